//! Convert command implementation.
//!
//! Builds a [`ConversionConfig`] from the command-line options, runs the
//! conversion pipeline, and prints the run summary. Ctrl-C during the run
//! cancels the describe stage; a second Ctrl-C exits immediately.

use crate::cli::ConvertArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use mcp_sdkgen_converter::{ConversionFailure, Converter};
use mcp_sdkgen_core::cli::{ExitCode, OutputFormat, SdkModulePath};
use mcp_sdkgen_core::{ConversionConfig, ModelConfig};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Exit status after a second Ctrl-C.
const INTERRUPTED: i32 = 130;

/// Runs the convert command.
///
/// # Errors
///
/// Returns an error if the prompt template file cannot be read or the
/// summary cannot be formatted. Conversion failures are reported on stderr
/// and mapped to an exit code instead.
pub async fn run(args: ConvertArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let config = match build_config(args) {
        Ok(config) => config,
        Err(e) => {
            report_error(&format!("{e:#}"));
            return Ok(ExitCode::INVALID_INPUT);
        }
    };

    info!(
        "Converting {} ({}) into {}",
        config.sdk_name,
        config.sdk_module,
        config.output_dir.display()
    );

    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    let outcome = Converter::from_search_paths(&config)
        .convert_with_cancellation(&config, cancel)
        .await;
    interrupt.abort();

    match outcome {
        Ok(result) => {
            if result.fully_degraded() {
                warn!(
                    "Model strategy produced no descriptions; all {} methods used the heuristic",
                    result.heuristic_described
                );
            }
            let formatted = crate::formatters::format_output(&result, output_format)?;
            println!("{formatted}");
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            report_failure(&failure);
            Ok(exit_code_for(&failure))
        }
    }
}

/// Translates command-line options into a validated configuration.
///
/// # Errors
///
/// Returns an error if the module path is malformed, the prompt template
/// cannot be read, or the configuration is invalid.
pub fn build_config(args: ConvertArgs) -> Result<ConversionConfig> {
    let module = SdkModulePath::new(&args.sdk_module).context("invalid SDK module path")?;

    let mut builder = ConversionConfig::builder(args.sdk_name, module.as_str(), args.output_dir)
        .include_private_methods(args.include_private)
        .max_methods_per_tool_group(args.max_methods)
        .method_limit(args.limit)
        .generate_tests(!args.no_tests)
        .filter_patterns(args.filters)
        .overwrite(args.overwrite)
        .allow_empty(args.allow_empty);

    for path in args.sdk_paths {
        builder = builder.module_search_path(path);
    }
    if let Some(package) = args.package {
        builder = builder.sdk_package(package);
    }
    if let Some(path) = args.prompt_template {
        let template = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read prompt template {}", path.display()))?;
        builder = builder.prompt_template(template);
    }

    if let Some(api_key) = args.openai_api_key.filter(|k| !k.trim().is_empty()) {
        let mut model = ModelConfig::new(api_key)
            .with_base_url(args.model_base_url)
            .with_model(args.model)
            .with_max_retries(args.model_retries);
        if let Some(secs) = args.model_timeout_secs {
            model = model.with_timeout(Duration::from_secs(secs));
        }
        if let Some(concurrency) = args.concurrency {
            model = model.with_max_concurrent_requests(concurrency);
        }
        builder = builder.model(model);
    } else {
        info!("No model API key given; describing methods heuristically");
    }

    builder.build().context("invalid conversion configuration")
}

/// Maps a failed run to the exit code the binary reports.
#[must_use]
pub const fn exit_code_for(failure: &ConversionFailure) -> ExitCode {
    ExitCode::for_error(&failure.error)
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    warn!("Interrupted; finishing with heuristic descriptions (Ctrl-C again to abort)");
    cancel.cancel();

    if tokio::signal::ctrl_c().await.is_ok() {
        std::process::exit(INTERRUPTED);
    }
}

fn report_failure(failure: &ConversionFailure) {
    eprintln!(
        "{} {} stage failed: {}",
        "error:".red().bold(),
        failure.stage,
        failure.error
    );
}

fn report_error(message: &str) {
    eprintln!("{} {message}", "error:".red().bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(extra: &[&str]) -> ConvertArgs {
        let mut argv = vec!["mcp-sdkgen", "convert", "github", "github", "-o", "out"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Convert(args) => args,
            other => panic!("Expected Convert command, got {other:?}"),
        }
    }

    #[test]
    fn test_build_config_defaults() {
        let mut args = parse(&[]);
        args.openai_api_key = None;
        let config = build_config(args).unwrap();

        assert_eq!(config.sdk_name, "github");
        assert!(config.generate_tests);
        assert!(config.model.is_none());
        assert_eq!(config.max_methods_per_tool_group, None);
    }

    #[test]
    fn test_build_config_flags() {
        let mut args = parse(&[
            "--no-tests",
            "--max-methods",
            "25",
            "--limit",
            "100",
            "--include-private",
            "--package",
            "PyGithub",
        ]);
        args.openai_api_key = None;
        let config = build_config(args).unwrap();

        assert!(!config.generate_tests);
        assert!(config.include_private_methods);
        assert_eq!(config.max_methods_per_tool_group, Some(25));
        assert_eq!(config.method_limit, Some(100));
        assert_eq!(config.package_name(), "PyGithub");
    }

    #[test]
    fn test_build_config_with_model() {
        let mut args = parse(&["--model-timeout-secs", "5", "--concurrency", "8"]);
        args.openai_api_key = Some("sk-test".to_string());
        let config = build_config(args).unwrap();

        let model = config.model.unwrap();
        assert_eq!(model.timeout, Duration::from_secs(5));
        assert_eq!(model.max_concurrent_requests, 8);
        assert_eq!(model.max_retries, 3);
    }

    #[test]
    fn test_build_config_model_retries() {
        let mut args = parse(&["--model-retries", "0"]);
        args.openai_api_key = Some("sk-test".to_string());
        let model = build_config(args).unwrap().model.unwrap();
        assert_eq!(model.max_retries, 0);
    }

    #[test]
    fn test_blank_api_key_means_heuristic() {
        let mut args = parse(&[]);
        args.openai_api_key = Some("  ".to_string());
        assert!(build_config(args).unwrap().model.is_none());
    }

    #[test]
    fn test_build_config_rejects_bad_values() {
        let mut args = parse(&["--max-methods", "0"]);
        args.openai_api_key = None;
        assert!(build_config(args).is_err());

        let mut args = parse(&[]);
        args.sdk_module = "../etc".to_string();
        assert!(build_config(args).is_err());

        let mut args = parse(&["--prompt-template", "/nonexistent/prompt.hbs"]);
        args.openai_api_key = None;
        let err = build_config(args).unwrap_err();
        assert!(format!("{err:#}").contains("prompt template"));
    }
}
