//! Method description and MCP server code generation.
//!
//! Two stages of a conversion run live here:
//!
//! - [`describe`]: gives each discovered method a category and description,
//!   from a chat-completion model or a name-prefix heuristic
//! - [`server`]: renders a Python MCP server with one stub handler per
//!   method, using Handlebars templates
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_codegen::describe::HeuristicDescriber;
//! use mcp_sdkgen_codegen::ServerGenerator;
//! use mcp_sdkgen_core::{ConversionConfig, DiscoveredMethod};
//!
//! let describer = HeuristicDescriber::new();
//! let methods = vec![
//!     describer.describe(&DiscoveredMethod::new("github.Github", "get_repo")),
//!     describer.describe(&DiscoveredMethod::new("github.Github", "search_users")),
//! ];
//!
//! let config = ConversionConfig::builder("github", "github", "out").build().unwrap();
//! let server = ServerGenerator::new().unwrap().generate(&methods, &config).unwrap();
//!
//! assert_eq!(server.tool_count(), 2);
//! assert!(server.code.file("README.md").is_some());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod common;
pub mod describe;
pub mod server;
pub mod template_engine;

pub use common::{GeneratedCode, GeneratedFile};
pub use describe::{DescribeOutcome, DescribeStrategy};
pub use server::{GeneratedServer, GeneratedTool, ServerGenerator};
pub use template_engine::TemplateEngine;
