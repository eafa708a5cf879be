//! MCP server code generation.
//!
//! Converts described methods into a Python MCP server whose handlers are
//! stubs: each checks its required arguments and returns a canned success
//! payload.

mod generator;
mod naming;
mod schema;
mod types;

pub use generator::{MANIFEST_FILE, SERVER_FILE, ServerGenerator};
pub use naming::assign_tool_names;
pub use schema::{input_schema, schema_type};
pub use types::{GeneratedServer, GeneratedTool, ToolManifest};
