//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, elvish, and
//! `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use mcp_sdkgen_core::cli::ExitCode;
use std::io::{self, Write};
use tracing::info;

/// Writes the completion script for `shell` to `out`.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use clap_complete::Shell;
/// use mcp_sdkgen_cli::commands::completions;
///
/// let mut cmd = Command::new("mcp-sdkgen").subcommand(Command::new("convert"));
/// let mut script = Vec::new();
/// completions::write_completions(Shell::Bash, &mut cmd, &mut script);
///
/// assert!(String::from_utf8(script).unwrap().contains("convert"));
/// ```
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
pub async fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    info!("Generating {shell} completions");
    write_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}
