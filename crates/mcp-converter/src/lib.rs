//! SDK-to-MCP-server conversion pipeline.
//!
//! Ties the workspace together: a [`ModuleSource`](mcp_sdkgen_introspector::ModuleSource)
//! resolves the SDK graph, the walker discovers methods, the describe
//! strategy categorizes them, the server generator renders the Python
//! server, and the files crate exports it with a completion marker.
//!
//! # Examples
//!
//! ```no_run
//! use mcp_sdkgen_converter::Converter;
//! use mcp_sdkgen_core::ConversionConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConversionConfig::builder("github", "github", "./github-mcp")
//!     .module_search_path("./graphs")
//!     .max_methods_per_tool_group(Some(50))
//!     .build()?;
//!
//! let result = Converter::from_search_paths(&config).convert(&config).await?;
//! println!("{} tools written to {}", result.tools_emitted, result.output_dir.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod converter;
mod result;
mod stage;

pub use converter::{ConversionOutcome, Converter};
pub use result::ConversionResult;
pub use stage::{ConversionFailure, Stage, StageContext};
