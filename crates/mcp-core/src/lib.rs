//! Core types, configuration, and errors for SDK-to-MCP server generation.
//!
//! Every other crate in the workspace builds on the definitions here:
//!
//! - Domain records passed between stages (`DiscoveredMethod`,
//!   `DescribedMethod`, `Parameter`, `ToolName`)
//! - The error taxonomy with per-variant predicates
//! - `ConversionConfig` and `ModelConfig`
//! - CLI value types in [`cli`]

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
mod config;
mod error;
mod types;

pub use config::{
    ConversionConfig, ConversionConfigBuilder, DEFAULT_MAX_CONCURRENT_REQUESTS,
    DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_MODEL_BASE_URL, DEFAULT_MODEL_TIMEOUT,
    DEFAULT_RETRY_BACKOFF, ModelConfig, is_dotted_identifier,
};
pub use error::{Error, Result};
pub use types::{
    DescribedMethod, DescriptionSource, DiscoveredMethod, Parameter, ToolName, Visibility,
    is_dunder,
};
