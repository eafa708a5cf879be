//! Types produced by server generation.

use crate::common::GeneratedCode;
use mcp_sdkgen_core::{DescriptionSource, ToolName};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One tool of a generated server.
///
/// This is also the record written to the `tools.json` manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTool {
    /// Final, disambiguated tool name
    pub name: ToolName,
    /// `owner_path.name` of the source method
    pub qualified_name: String,
    /// Functional category
    pub category: String,
    /// One-sentence description
    pub description: String,
    /// Strategy that produced category and description
    pub source: DescriptionSource,
    /// JSON Schema of the tool arguments
    pub input_schema: Value,
    /// 1-based tool group number
    pub group: usize,
}

impl GeneratedTool {
    /// Returns the names listed as required in the input schema.
    #[must_use]
    pub fn required_parameters(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Machine-readable manifest of a generated server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolManifest {
    /// SDK label
    pub sdk_name: String,
    /// Dotted module path that was walked
    pub sdk_module: String,
    /// Number of tools
    pub tool_count: usize,
    /// Number of tool groups
    pub group_count: usize,
    /// Tools in emission order
    pub tools: Vec<GeneratedTool>,
}

/// Result of generating a server: tool records plus rendered files.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedServer {
    /// Tools in emission order
    pub tools: Vec<GeneratedTool>,
    /// Number of tool groups
    pub group_count: usize,
    /// Rendered output files
    pub code: GeneratedCode,
}

impl GeneratedServer {
    /// Returns the number of tools.
    #[must_use]
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Looks a tool up by its final name.
    #[must_use]
    pub fn tool(&self, name: &str) -> Option<&GeneratedTool> {
        self.tools.iter().find(|t| t.name.as_str() == name)
    }
}
