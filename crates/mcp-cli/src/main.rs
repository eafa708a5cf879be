//! MCP SDKGen command-line entry point.
//!
//! # Examples
//!
//! ```bash
//! # Generate a server from ./graphs/github.json
//! mcp-sdkgen convert github github --sdk-path ./graphs -o ./github-mcp
//!
//! # Preview what would be converted
//! mcp-sdkgen introspect github --sdk-path ./graphs
//! ```

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use mcp_sdkgen_cli::{Cli, execute_command, init_logging};
use mcp_sdkgen_core::cli::{ExitCode, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let output_format = match cli.format.parse::<OutputFormat>() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(ExitCode::INVALID_INPUT.as_i32());
        }
    };

    let exit_code = match execute_command(cli.command, output_format).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::ERROR
        }
    };

    std::process::exit(exit_code.as_i32());
}
