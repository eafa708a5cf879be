//! CLI command implementations.
//!
//! Each command returns an [`ExitCode`](mcp_sdkgen_core::cli::ExitCode)
//! instead of exiting, so commands can be driven from tests.

pub mod completions;
pub mod convert;
pub mod introspect;
