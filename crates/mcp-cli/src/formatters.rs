//! Output formatters for CLI commands.
//!
//! Every command builds one serializable report and hands it to
//! [`format_output`]; the three formats carry the same fields.

use anyhow::Result;
use colored::Colorize;
use mcp_sdkgen_core::cli::OutputFormat;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_cli::formatters::format_output;
/// use mcp_sdkgen_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     sdk_name: String,
///     tools_emitted: usize,
/// }
///
/// let summary = Summary {
///     sdk_name: "github".to_string(),
///     tools_emitted: 12,
/// };
///
/// let output = format_output(&summary, OutputFormat::Json)?;
/// assert!(output.contains("\"tools_emitted\": 12"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as pretty-printed JSON.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize};
    use serde_json::Value;

    /// Format data as `key: value` lines.
    ///
    /// Nested keys are joined with dots and array items are indexed, so every
    /// line can be grepped on its own.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten("", &value, &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(prefix: &str, value: &Value, lines: &mut Vec<String>) {
        match value {
            Value::Object(map) if !map.is_empty() => {
                for (key, val) in map {
                    flatten(&join(prefix, key), val, lines);
                }
            }
            Value::Array(items) if !items.is_empty() => {
                for (i, item) in items.iter().enumerate() {
                    flatten(&join(prefix, &i.to_string()), item, lines);
                }
            }
            Value::String(s) => lines.push(format!("{prefix}: {s}")),
            other => lines.push(format!("{prefix}: {other}")),
        }
    }

    fn join(prefix: &str, key: &str) -> String {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Format data as colorized, indented output.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        write_value(&value, 0, &mut out);
        Ok(out)
    }

    fn write_value(value: &Value, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(map) => {
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    out.push_str(&pad);
                    out.push_str(&key.replace('_', " ").bold().to_string());
                    out.push(':');
                    if is_scalar(val) {
                        out.push(' ');
                        out.push_str(&scalar(val));
                    } else if is_empty(val) {
                        out.push_str(&" (none)".dimmed().to_string());
                    } else {
                        out.push('\n');
                        write_value(val, indent + 1, out);
                    }
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    if is_scalar(item) {
                        out.push_str(&pad);
                        out.push_str("- ");
                        out.push_str(&scalar(item));
                    } else {
                        write_value(item, indent, out);
                        if i + 1 < items.len() {
                            out.push('\n');
                        }
                    }
                }
            }
            other => {
                out.push_str(&pad);
                out.push_str(&scalar(other));
            }
        }
    }

    const fn is_scalar(value: &Value) -> bool {
        !matches!(value, Value::Object(_) | Value::Array(_))
    }

    fn is_empty(value: &Value) -> bool {
        match value {
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "-".dimmed().to_string(),
            Value::Bool(true) => "yes".green().to_string(),
            Value::Bool(false) => "no".yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
