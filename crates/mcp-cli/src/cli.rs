//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands
//! - `ConvertArgs` - Options of the `convert` subcommand

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use mcp_sdkgen_core::{DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_MODEL_BASE_URL};
use std::path::PathBuf;

/// MCP SDKGen - Generate MCP servers from SDK object graphs.
///
/// Walks an SDK's object graph dump, describes every public method (with a
/// chat-completion model or a naming heuristic), and writes a Python MCP
/// server with one stub tool per method.
#[derive(Parser, Debug)]
#[command(name = "mcp-sdkgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an SDK module into a generated MCP server.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Heuristic descriptions, graph dumps in ./graphs
    /// mcp-sdkgen convert github github --sdk-path ./graphs -o ./github-mcp
    ///
    /// # Model descriptions, 50 tools per group
    /// OPENAI_API_KEY=sk-... mcp-sdkgen convert kubernetes kubernetes.client \
    ///     --sdk-path ./graphs -o ./k8s-mcp --max-methods 50
    /// ```
    Convert(ConvertArgs),

    /// Walk an SDK module and print the discovered methods.
    ///
    /// Runs only the discovery stage; nothing is written and no model is
    /// contacted. Useful for tuning filters before a conversion.
    ///
    /// # Examples
    ///
    /// ```bash
    /// mcp-sdkgen introspect azure.mgmt.resource --sdk-path ./graphs --detailed
    /// ```
    Introspect {
        /// Dotted module path to walk
        sdk_module: String,

        /// Directory holding SDK graph dumps (repeatable)
        #[arg(long = "sdk-path", env = "MCP_SDKGEN_PATH", num_args = 1)]
        sdk_paths: Vec<PathBuf>,

        /// Include single-underscore methods
        #[arg(long)]
        include_private: bool,

        /// Skip methods whose name matches this regex (repeatable)
        #[arg(long = "filter", num_args = 1)]
        filters: Vec<String>,

        /// Show parameters, docs and skipped attributes
        #[arg(short, long)]
        detailed: bool,
    },

    /// Generate shell completions.
    ///
    /// # Examples
    ///
    /// ```bash
    /// mcp-sdkgen completions bash > /etc/bash_completion.d/mcp-sdkgen
    /// mcp-sdkgen completions zsh > ~/.zfunc/_mcp-sdkgen
    /// ```
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options of the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Free-text SDK label used in generated names and docs
    pub sdk_name: String,

    /// Dotted module path to convert
    pub sdk_module: String,

    /// Directory that receives the generated server
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Directory holding SDK graph dumps (repeatable)
    #[arg(long = "sdk-path", env = "MCP_SDKGEN_PATH", num_args = 1)]
    pub sdk_paths: Vec<PathBuf>,

    /// API key for the chat-completion endpoint; enables model descriptions
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Base URL of the chat-completion endpoint
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_MODEL_BASE_URL)]
    pub model_base_url: String,

    /// Model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Timeout of one model request, in seconds
    #[arg(long)]
    pub model_timeout_secs: Option<u64>,

    /// Maximum model requests in flight
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Retries of a model request after a connection error, 429, or 5xx
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub model_retries: u32,

    /// Include single-underscore methods
    #[arg(long)]
    pub include_private: bool,

    /// Tools per group (registry shard and test file)
    #[arg(long)]
    pub max_methods: Option<usize>,

    /// Convert only the first N discovered methods
    #[arg(long)]
    pub limit: Option<usize>,

    /// Skip methods whose name matches this regex (repeatable)
    #[arg(long = "filter", num_args = 1)]
    pub filters: Vec<String>,

    /// Handlebars prompt template file for model descriptions
    #[arg(long)]
    pub prompt_template: Option<PathBuf>,

    /// Package name for requirements.txt (defaults to the module root)
    #[arg(long)]
    pub package: Option<String>,

    /// Do not generate test skeletons
    #[arg(long)]
    pub no_tests: bool,

    /// Write into a non-empty output directory
    #[arg(long)]
    pub overwrite: bool,

    /// Generate a server even if no methods are found
    #[arg(long)]
    pub allow_empty: bool,
}
