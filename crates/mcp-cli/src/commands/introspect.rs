//! Introspect command implementation.
//!
//! Loads an SDK module graph and runs only the discovery walk, printing what
//! a conversion would turn into tools.

use anyhow::{Context, Result};
use mcp_sdkgen_core::DiscoveredMethod;
use mcp_sdkgen_core::cli::{ExitCode, OutputFormat, SdkModulePath};
use mcp_sdkgen_introspector::{
    GraphDirectorySource, ModuleSource, SkippedEntry, WalkOptions, WalkReport, Walker,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Result of a discovery walk.
#[derive(Debug, Serialize)]
pub struct IntrospectionReport {
    /// Dotted module path
    pub module: String,
    /// Graph dump the module came from
    pub origin: String,
    /// Modules visited
    pub modules_seen: usize,
    /// Classes visited
    pub classes_seen: usize,
    /// Eligible methods
    pub method_count: usize,
    /// Methods dropped by filter patterns
    pub filtered_by_pattern: usize,
    /// Methods dropped by the visibility policy
    pub filtered_by_visibility: usize,
    /// Skipped attributes and methods
    pub skipped_count: usize,
    /// Method signatures in walk order
    pub methods: Vec<String>,
    /// Full method records (with `--detailed`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<DiscoveredMethod>>,
    /// Skip reasons (with `--detailed`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<Vec<SkippedEntry>>,
}

impl IntrospectionReport {
    /// Builds a report from a walk.
    #[must_use]
    pub fn new(module: String, origin: String, report: WalkReport, detailed: bool) -> Self {
        let methods = report
            .methods
            .iter()
            .map(|m| format!("{}.{}", m.owner_path, m.signature()))
            .collect();

        Self {
            module,
            origin,
            modules_seen: report.modules_seen,
            classes_seen: report.classes_seen,
            method_count: report.methods.len(),
            filtered_by_pattern: report.filtered_by_pattern,
            filtered_by_visibility: report.filtered_by_visibility,
            skipped_count: report.skipped.len(),
            methods,
            details: detailed.then_some(report.methods),
            skipped: detailed.then_some(report.skipped),
        }
    }
}

/// Runs the introspect command.
///
/// # Errors
///
/// Returns an error if the module path is malformed, a filter pattern does
/// not compile, the module cannot be loaded, or formatting fails.
pub async fn run(
    sdk_module: String,
    sdk_paths: Vec<PathBuf>,
    include_private: bool,
    filters: Vec<String>,
    detailed: bool,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let module_path = SdkModulePath::new(sdk_module).context("invalid SDK module path")?;
    let options = WalkOptions::new(include_private, &filters).context("invalid filter")?;

    info!("Introspecting module: {}", module_path);

    let source = GraphDirectorySource::new(sdk_paths);
    let module = source
        .load(module_path.as_str())
        .with_context(|| format!("failed to load module '{module_path}'"))?;

    let walk = Walker::new(options).walk(&module);
    let report = IntrospectionReport::new(module.path, module.origin, walk, detailed);

    let formatted = crate::formatters::format_output(&report, output_format)?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}
