//! Conversion pipeline.
//!
//! One run walks the module graph, describes every eligible method, renders
//! the server, and exports it:
//!
//! ```text
//! Configured → Loaded → Walked → Described → Generated → Written → Done
//! ```
//!
//! The output directory is checked read-only while configuring, so a target
//! that cannot be written is rejected before any model request is made. The
//! write stage repeats the check. Nothing touches the directory before that
//! stage, so a run that fails earlier leaves no files behind. A run that
//! fails during the write leaves no completion marker.

use crate::result::ConversionResult;
use crate::stage::{ConversionFailure, Stage, StageContext};
use mcp_sdkgen_codegen::ServerGenerator;
use mcp_sdkgen_codegen::describe::DescribeStrategy;
use mcp_sdkgen_core::{ConversionConfig, Error};
use mcp_sdkgen_files::{ExportOptions, FilesBuilder, check_output_dir};
use mcp_sdkgen_introspector::{GraphDirectorySource, ModuleSource, WalkOptions, Walker};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Result type for conversion runs.
pub type ConversionOutcome = Result<ConversionResult, ConversionFailure>;

/// Drives conversion runs against one module source.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_converter::Converter;
/// use mcp_sdkgen_core::ConversionConfig;
/// use mcp_sdkgen_introspector::InMemorySource;
/// use mcp_sdkgen_introspector::graph::{ClassNode, MethodNode, ModuleNode, ParameterNode};
/// use std::sync::Arc;
/// # use tempfile::TempDir;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let module = ModuleNode::new("widgets").with_class(
///     ClassNode::new("Widget").with_method(
///         MethodNode::new("get_widget")
///             .with_parameter(ParameterNode::positional("self"))
///             .with_parameter(ParameterNode::positional("id")),
///     ),
/// );
/// let converter = Converter::new(Arc::new(InMemorySource::new().with_module("widgets", module)));
///
/// # let temp = TempDir::new().unwrap();
/// # let output_dir = temp.path().join("widgets-mcp");
/// let config = ConversionConfig::builder("widgets", "widgets", &output_dir)
///     .build()
///     .unwrap();
/// let result = converter.convert(&config).await.unwrap();
///
/// assert_eq!(result.tools_emitted, 1);
/// assert_eq!(result.heuristic_described, 1);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    source: Arc<dyn ModuleSource>,
}

impl Converter {
    /// Creates a converter over a module source.
    #[must_use]
    pub fn new(source: Arc<dyn ModuleSource>) -> Self {
        Self { source }
    }

    /// Creates a converter that reads graph dumps from the configured
    /// search paths.
    #[must_use]
    pub fn from_search_paths(config: &ConversionConfig) -> Self {
        Self::new(Arc::new(GraphDirectorySource::new(
            config.module_search_paths.clone(),
        )))
    }

    /// Runs a conversion to completion.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionFailure`] naming the failed stage when the
    /// configuration is invalid, the module cannot be loaded, the walk finds
    /// nothing (unless `allow_empty` is set), tool names collide, or the
    /// output cannot be written.
    pub async fn convert(&self, config: &ConversionConfig) -> ConversionOutcome {
        self.convert_with_cancellation(config, CancellationToken::new())
            .await
    }

    /// Runs a conversion whose describe stage can be cancelled.
    ///
    /// Cancelling `cancel` stops new model requests; every method not yet
    /// described falls back to the heuristic and the run completes normally.
    ///
    /// # Errors
    ///
    /// Same as [`Converter::convert`].
    pub async fn convert_with_cancellation(
        &self,
        config: &ConversionConfig,
        cancel: CancellationToken,
    ) -> ConversionOutcome {
        let started = Instant::now();

        config.validate().at_stage(Stage::Configured)?;
        let walk_options = WalkOptions::new(config.include_private_methods, &config.filter_patterns)
            .at_stage(Stage::Configured)?;
        let strategy = DescribeStrategy::from_config(config).at_stage(Stage::Configured)?;
        let generator = ServerGenerator::new().at_stage(Stage::Configured)?;
        check_output_dir(&config.output_dir, config.overwrite).at_stage(Stage::Configured)?;
        advance(Stage::Configured);

        let module = self
            .source
            .load(&config.sdk_module)
            .at_stage(Stage::Loaded)?;
        info!("Loaded module '{}' from {}", module.path, module.origin);
        advance(Stage::Loaded);

        let report = Walker::new(walk_options).walk(&module);
        for entry in &report.skipped {
            debug!("Skipped {}: {}", entry.path, entry.reason);
        }
        let methods_discovered = report.methods.len();
        let mut methods = report.methods;
        if let Some(limit) = config.method_limit
            && methods.len() > limit
        {
            info!("Limiting {} discovered methods to {}", methods.len(), limit);
            methods.truncate(limit);
        }

        if methods.is_empty() {
            if !config.allow_empty {
                return Err(ConversionFailure::new(
                    Stage::Walked,
                    Error::EmptyResult {
                        module: config.sdk_module.clone(),
                    },
                ));
            }
            warn!(
                "No eligible methods in '{}'; generating a server without tools",
                config.sdk_module
            );
        }
        info!(
            "Discovered {} methods in {} classes ({} skipped)",
            methods_discovered,
            report.classes_seen,
            report.skipped.len()
        );
        advance(Stage::Walked);

        let described = strategy.describe_all(methods, &cancel).await;
        let cancelled = cancel.is_cancelled();
        if cancelled {
            warn!("Describe stage cancelled; remaining methods used the heuristic");
        }
        advance(Stage::Described);

        let server = generator
            .generate(&described.methods, config)
            .at_stage(Stage::Generated)?;
        advance(Stage::Generated);

        let tree = FilesBuilder::from_generated_code(server.code)
            .build()
            .at_stage(Stage::Generated)?;
        let options = ExportOptions::default()
            .with_overwrite(config.overwrite)
            .with_marker(config.sdk_name.clone(), server.tools.len());
        let export = tree
            .export_to_filesystem(&config.output_dir, &options)
            .at_stage(Stage::Written)?;
        advance(Stage::Written);

        let result = ConversionResult {
            sdk_name: config.sdk_name.clone(),
            sdk_module: config.sdk_module.clone(),
            origin: module.origin,
            modules_seen: report.modules_seen,
            classes_seen: report.classes_seen,
            methods_discovered,
            skipped: report.skipped.len(),
            tools_emitted: server.tools.len(),
            tool_groups: server.group_count,
            strategy: strategy.name().to_string(),
            model_described: described.model_count,
            heuristic_described: described.heuristic_count,
            cancelled,
            output_dir: export.directory,
            files: export.files,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        info!(
            "Generated {} tools for {} in {}ms ({} model, {} heuristic)",
            result.tools_emitted,
            result.sdk_name,
            result.elapsed_ms,
            result.model_described,
            result.heuristic_described
        );
        advance(Stage::Done);
        Ok(result)
    }
}

fn advance(stage: Stage) {
    debug!("Conversion reached stage '{:?}'", stage);
}
