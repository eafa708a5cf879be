//! MCP SDKGen CLI library.
//!
//! This library provides the core functionality for the `mcp-sdkgen`
//! binary, exposing the argument definitions, commands, and formatters so
//! they can be tested.

#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;

pub use cli::{Cli, Commands, ConvertArgs};
pub use runner::{execute_command, init_logging};
