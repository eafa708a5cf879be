//! Integration tests for graph dump loading and method discovery.

use mcp_sdkgen_core::Visibility;
use mcp_sdkgen_introspector::{GraphDirectorySource, ModuleSource, WalkOptions, Walker};
use serde_json::json;
use std::path::PathBuf;

fn fixtures() -> GraphDirectorySource {
    GraphDirectorySource::new(vec![
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"),
    ])
}

/// Tests the full GitHub-like fixture with the default policy
#[test]
fn test_walk_json_fixture() {
    let module = fixtures().load("github").unwrap();
    let report = Walker::default().walk(&module);

    let names: Vec<_> = report
        .methods
        .iter()
        .map(mcp_sdkgen_core::DiscoveredMethod::qualified_name)
        .collect();
    assert_eq!(
        names,
        vec![
            "github.Repository.Repository.create_issue",
            "github.Repository.Repository.get",
            "github.Github.get_repo",
            "github.Github.get_user",
            "github.Github.search_repositories",
        ]
    );
    assert!(report.methods.iter().all(|m| m.visibility == Visibility::Public));
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, "github.GithubIntegration");
    // __init__ and _requester_hook
    assert_eq!(report.filtered_by_visibility, 2);
}

/// Tests parameter extraction details from the dump
#[test]
fn test_parameters_from_fixture() {
    let module = fixtures().load("github").unwrap();
    let report = Walker::default().walk(&module);

    let get_repo = report
        .methods
        .iter()
        .find(|m| m.name == "get_repo")
        .unwrap();
    assert_eq!(get_repo.parameters.len(), 2);
    assert!(get_repo.parameters[0].required);
    assert_eq!(get_repo.parameters[0].declared_type.as_deref(), Some("str | int"));
    assert!(!get_repo.parameters[1].required);
    assert_eq!(get_repo.parameters[1].default, Some(json!(false)));
    assert_eq!(get_repo.return_type.as_deref(), Some("Repository"));
    assert!(get_repo.doc.starts_with("Get a repository."));

    let get_user = report.methods.iter().find(|m| m.name == "get_user").unwrap();
    assert!(!get_user.parameters[0].required);

    let search = report
        .methods
        .iter()
        .find(|m| m.name == "search_repositories")
        .unwrap();
    assert_eq!(search.parameters.len(), 1);

    let static_get = report.methods.iter().find(|m| m.name == "get").unwrap();
    assert_eq!(static_get.parameters[0].name, "url");
}

/// Tests YAML dumps and submodule descent
#[test]
fn test_walk_yaml_submodule() {
    let module = fixtures().load("kubernetes.client").unwrap();
    let options = WalkOptions::new(false, &["^delete_".to_string()]).unwrap();
    let report = Walker::new(options).walk(&module);

    assert_eq!(report.classes_seen, 2);
    assert_eq!(report.filtered_by_pattern, 1);
    assert_eq!(
        report
            .methods
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>(),
        vec![
            "list_namespaced_deployment",
            "list_namespaced_pod",
            "read_namespaced_pod"
        ]
    );
}

/// Tests that the unavailable attribute at the package root is reported
#[test]
fn test_walk_yaml_root_reports_unavailable() {
    let module = fixtures().load("kubernetes").unwrap();
    let report = Walker::default().walk(&module);
    assert_eq!(report.modules_seen, 2);
    assert_eq!(report.methods.len(), 4);
    assert!(report.skipped.iter().any(|s| s.path == "kubernetes.stream"));
}

/// Tests the report serializes for CLI output
#[test]
fn test_report_serializes() {
    let module = fixtures().load("kubernetes.client").unwrap();
    let report = Walker::default().walk(&module);
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["classes_seen"], 2);
    assert_eq!(value["methods"].as_array().unwrap().len(), 4);
}

/// Tests resolution failure for unknown packages
#[test]
fn test_unknown_module() {
    let err = fixtures().load("boto3").unwrap_err();
    assert!(err.is_module_load_error());
}
