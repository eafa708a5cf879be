//! Python source helpers.
//!
//! Generated servers embed SDK-derived text (names, docs, descriptions,
//! default values) in Python source. Everything passes through these helpers
//! so the emitted file always parses.
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_codegen::common::python;
//! use serde_json::json;
//!
//! assert_eq!(python::literal(&json!({"a": [1, true, null]})), r#"{"a": [1, True, None]}"#);
//! assert_eq!(python::to_pascal_case("azure-mgmt resource"), "AzureMgmtResource");
//! ```

use serde_json::Value;

/// Renders a JSON value as an equivalent Python literal.
///
/// Strings use JSON escaping, which Python string literals accept.
#[must_use]
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string(s),
        Value::Array(items) => {
            let inner = items.iter().map(literal).collect::<Vec<_>>().join(", ");
            format!("[{inner}]")
        }
        Value::Object(map) => {
            let inner = map
                .iter()
                .map(|(k, v)| format!("{}: {}", string(k), literal(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{inner}}}")
        }
    }
}

/// Renders a Python string literal.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_codegen::common::python::string;
///
/// assert_eq!(string("say \"hi\"\n"), r#""say \"hi\"\n""#);
/// ```
#[must_use]
pub fn string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Escapes text for use inside a triple-quoted docstring.
///
/// Backslashes and double quotes are escaped; newlines are kept.
#[must_use]
pub fn docstring(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Collapses text to one line for comments and table cells.
#[must_use]
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Converts free text to `PascalCase`, keeping ASCII alphanumerics only.
///
/// Returns `Sdk` when nothing usable remains.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_codegen::common::python::to_pascal_case;
///
/// assert_eq!(to_pascal_case("github"), "Github");
/// assert_eq!(to_pascal_case("kubernetes_client"), "KubernetesClient");
/// assert_eq!(to_pascal_case("!!!"), "Sdk");
/// ```
#[must_use]
pub fn to_pascal_case(text: &str) -> String {
    let words = words(text);
    if words.is_empty() {
        return "Sdk".to_string();
    }

    let mut result = words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect::<String>();

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert_str(0, "Sdk");
    }
    result
}

/// Converts free text to an `UPPER_SNAKE` environment variable prefix.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_codegen::common::python::to_env_prefix;
///
/// assert_eq!(to_env_prefix("Azure SDK"), "AZURE_SDK");
/// assert_eq!(to_env_prefix("k8s"), "K8S");
/// ```
#[must_use]
pub fn to_env_prefix(text: &str) -> String {
    let words = words(text);
    if words.is_empty() {
        return "SDK".to_string();
    }
    let prefix = words.join("_").to_ascii_uppercase();
    if prefix.starts_with(|c: char| c.is_ascii_digit()) {
        format!("SDK_{prefix}")
    } else {
        prefix
    }
}

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_scalars() {
        assert_eq!(literal(&json!(null)), "None");
        assert_eq!(literal(&json!(true)), "True");
        assert_eq!(literal(&json!(false)), "False");
        assert_eq!(literal(&json!(42)), "42");
        assert_eq!(literal(&json!(1.5)), "1.5");
        assert_eq!(literal(&json!("x")), "\"x\"");
    }

    #[test]
    fn test_literal_nested() {
        let value = json!({"properties": {"id": {"type": "string", "default": null}}});
        assert_eq!(
            literal(&json!(["id", [], {}])),
            r#"["id", [], {}]"#
        );
        assert!(literal(&value).starts_with(r#"{"properties": {"id": {"#));
        assert!(literal(&value).contains(r#""default": None"#));
    }

    #[test]
    fn test_string_escapes_quotes_and_newlines() {
        assert_eq!(string("a\"b\\c\nd"), r#""a\"b\\c\nd""#);
    }

    #[test]
    fn test_docstring_escaping() {
        assert_eq!(docstring(r#"Ends with """"#), r#"Ends with \"\"\""#);
        assert_eq!(docstring(r"C:\path"), r"C:\\path");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("  Get a\n   repository. "), "Get a repository.");
    }

    #[test]
    fn test_pascal_and_env_with_leading_digit() {
        assert_eq!(to_pascal_case("3scale"), "Sdk3scale");
        assert_eq!(to_env_prefix("3scale api"), "SDK_3SCALE_API");
        assert_eq!(to_env_prefix(""), "SDK");
    }
}
