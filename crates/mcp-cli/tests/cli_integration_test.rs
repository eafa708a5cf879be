//! Integration tests for the `mcp-sdkgen` binary.
//!
//! Each test runs the compiled binary against graph dumps written into a
//! temporary directory and checks its exit code, stdout and stderr.

use std::fs;
use std::io::Read;
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Output};
use std::thread;
use tempfile::TempDir;

const WIDGETS_DUMP: &str = r#"{
  "kind": "module",
  "name": "widgets",
  "members": [
    {
      "kind": "class",
      "name": "Widget",
      "members": [
        {
          "kind": "method",
          "name": "get_widget",
          "doc": "Fetch one widget.",
          "parameters": [{"name": "self"}, {"name": "id", "annotation": "int"}]
        },
        {
          "kind": "method",
          "name": "list_widgets",
          "parameters": [{"name": "self"}, {"name": "page", "default": 1, "has_default": true}]
        },
        {
          "kind": "method",
          "name": "_internal",
          "parameters": [{"name": "self"}, {"name": "x"}]
        }
      ]
    },
    {"kind": "unavailable", "name": "extras", "error": "ImportError: optional dependency"}
  ]
}"#;

fn graphs() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("widgets.json"), WIDGETS_DUMP).unwrap();
    dir
}

fn mcp_sdkgen(args: &[&str], graphs: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mcp-sdkgen"))
        .args(args)
        .env("MCP_SDKGEN_PATH", graphs)
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_BASE_URL")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_convert_heuristic_run() {
    let graphs = graphs();
    let out = TempDir::new().unwrap();
    let target = out.path().join("widgets-mcp");

    let output = mcp_sdkgen(
        &[
            "--format",
            "json",
            "convert",
            "widgets",
            "widgets",
            "--output-dir",
            target.to_str().unwrap(),
        ],
        graphs.path(),
    );

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let summary = stdout_json(&output);
    assert_eq!(summary["tools_emitted"], 2);
    assert_eq!(summary["strategy"], "heuristic");
    assert_eq!(summary["heuristic_described"], 2);
    assert_eq!(summary["skipped"], 1);

    assert!(target.join("mcp_server.py").is_file());
    assert!(target.join("tools.json").is_file());
    assert!(target.join("requirements.txt").is_file());
    assert!(target.join("example_usage.py").is_file());
    assert!(target.join("README.md").is_file());
    assert!(target.join("tests/test_group_01.py").is_file());
    assert!(target.join(".mcp-sdkgen-complete").is_file());
}

#[test]
fn test_convert_no_tests_flag() {
    let graphs = graphs();
    let out = TempDir::new().unwrap();

    let output = mcp_sdkgen(
        &[
            "convert",
            "widgets",
            "widgets",
            "-o",
            out.path().to_str().unwrap(),
            "--no-tests",
        ],
        graphs.path(),
    );

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(!out.path().join("tests").exists());
}

#[test]
fn test_unknown_module_exits_with_stage() {
    let graphs = graphs();
    let out = TempDir::new().unwrap();

    let output = mcp_sdkgen(
        &["convert", "gadgets", "gadgets", "-o", out.path().to_str().unwrap()],
        graphs.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("load stage failed"), "{err}");
    assert!(err.contains("gadgets"), "{err}");
}

#[test]
fn test_non_empty_output_dir_exits_with_stage() {
    let graphs = graphs();
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("keep.txt"), "mine").unwrap();

    let output = mcp_sdkgen(
        &["convert", "widgets", "widgets", "-o", out.path().to_str().unwrap()],
        graphs.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("configure stage failed"));
    assert!(!out.path().join(".mcp-sdkgen-complete").exists());
}

#[test]
fn test_invalid_configuration_exits_2() {
    let graphs = graphs();
    let out = TempDir::new().unwrap();

    let output = mcp_sdkgen(
        &[
            "convert",
            "widgets",
            "widgets",
            "-o",
            out.path().to_str().unwrap(),
            "--max-methods",
            "0",
        ],
        graphs.path(),
    );
    assert_eq!(output.status.code(), Some(2));

    let output = mcp_sdkgen(&["convert", "widgets"], graphs.path());
    assert_eq!(output.status.code(), Some(2));

    let output = mcp_sdkgen(&["--format", "xml", "introspect", "widgets"], graphs.path());
    assert_eq!(output.status.code(), Some(2));
}

/// Every model request times out; the run still succeeds with heuristic
/// descriptions for all methods.
#[test]
fn test_unreachable_model_degrades_to_heuristic() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { return };
            thread::spawn(move || {
                let mut buf = [0u8; 4096];
                while matches!(stream.read(&mut buf), Ok(n) if n > 0) {}
            });
        }
    });

    let graphs = graphs();
    let out = TempDir::new().unwrap();
    let base_url = format!("http://{addr}/v1");

    let output = mcp_sdkgen(
        &[
            "--format",
            "json",
            "convert",
            "widgets",
            "widgets",
            "-o",
            out.path().to_str().unwrap(),
            "--openai-api-key",
            "sk-test",
            "--model-base-url",
            &base_url,
            "--model-timeout-secs",
            "1",
        ],
        graphs.path(),
    );

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let summary = stdout_json(&output);
    assert_eq!(summary["strategy"], "model");
    assert_eq!(summary["model_described"], 0);
    assert_eq!(summary["heuristic_described"], summary["methods_discovered"]);
    assert!(out.path().join(".mcp-sdkgen-complete").is_file());
}

#[test]
fn test_introspect_json() {
    let graphs = graphs();

    let output = mcp_sdkgen(
        &["--format", "json", "introspect", "widgets", "--detailed"],
        graphs.path(),
    );

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let report = stdout_json(&output);
    assert_eq!(report["method_count"], 2);
    assert_eq!(report["filtered_by_visibility"], 1);
    assert_eq!(report["skipped"][0]["path"], "widgets.extras");
    assert!(
        report["methods"][0]
            .as_str()
            .unwrap()
            .starts_with("widgets.Widget.get_widget(")
    );
}

#[test]
fn test_introspect_text() {
    let graphs = graphs();

    let output = mcp_sdkgen(&["--format", "text", "introspect", "widgets"], graphs.path());

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l == "method_count: 2"));
}

#[test]
fn test_completions() {
    let graphs = graphs();
    let output = mcp_sdkgen(&["completions", "bash"], graphs.path());

    assert_eq!(output.status.code(), Some(0));
    let script = String::from_utf8_lossy(&output.stdout);
    assert!(script.contains("convert"));
    assert!(script.contains("--sdk-path"));
}
