//! Python annotation to JSON Schema conversion.
//!
//! Annotations arrive as verbatim source text (`"Optional[List[str]]"`,
//! `"github.Repository.Repository"`, `"int | None"`). Only the outer type
//! matters for a tool's input schema.
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_codegen::server::schema_type;
//!
//! assert_eq!(schema_type(Some("Optional[int]")), "number");
//! assert_eq!(schema_type(Some("typing.Dict[str, Any]")), "object");
//! assert_eq!(schema_type(None), "string");
//! ```

use mcp_sdkgen_core::Parameter;
use serde_json::{Map, Value, json};

/// Maps a declared Python type to a JSON Schema type name.
///
/// Unknown and absent annotations map to `string`.
#[must_use]
pub fn schema_type(annotation: Option<&str>) -> &'static str {
    annotation.map_or("string", |text| map_annotation(text.trim()))
}

fn map_annotation(text: &str) -> &'static str {
    let text = strip_quotes(text);

    let members = split_top_level(text, '|');
    if members.len() > 1 {
        return first_non_none(&members);
    }

    let (base, args) = split_generic(text);
    let base = base.rsplit('.').next().unwrap_or(base);

    match base {
        "Optional" => args.map_or("string", map_annotation),
        "Union" => args.map_or("string", |a| first_non_none(&split_top_level(a, ','))),
        "Annotated" => args
            .and_then(|a| split_top_level(a, ',').first().copied())
            .map_or("string", map_annotation),
        "int" | "float" | "Decimal" | "complex" => "number",
        "bool" => "boolean",
        "dict" | "Dict" | "Mapping" | "MutableMapping" | "OrderedDict" | "defaultdict"
        | "TypedDict" => "object",
        "list" | "List" | "tuple" | "Tuple" | "set" | "Set" | "frozenset" | "FrozenSet"
        | "Sequence" | "MutableSequence" | "Iterable" | "Collection" => "array",
        // str, bytes, SDK classes
        _ => "string",
    }
}

fn first_non_none(members: &[&str]) -> &'static str {
    members
        .iter()
        .map(|m| strip_quotes(m.trim()))
        .find(|m| !matches!(*m, "None" | "NoneType" | "type(None)"))
        .map_or("string", map_annotation)
}

fn strip_quotes(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'').trim()
}

/// Splits `Base[args]` into the base name and the bracketed arguments.
fn split_generic(text: &str) -> (&str, Option<&str>) {
    match (text.find('['), text.rfind(']')) {
        (Some(open), Some(close)) if open < close => {
            (text[..open].trim(), Some(text[open + 1..close].trim()))
        }
        _ => (text, None),
    }
}

/// Splits on `sep` outside of brackets.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}

/// Builds a tool input schema from a parameter list.
///
/// Required parameters are listed under `required` in declaration order;
/// optional parameters carry their default when it is known.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_codegen::server::input_schema;
/// use mcp_sdkgen_core::Parameter;
/// use serde_json::json;
///
/// let schema = input_schema(&[
///     Parameter::required("id").with_type("int"),
///     Parameter::optional("page", Some(json!(1))),
/// ]);
///
/// assert_eq!(schema["properties"]["id"]["type"], "number");
/// assert_eq!(schema["properties"]["page"]["default"], 1);
/// assert_eq!(schema["required"], json!(["id"]));
/// ```
#[must_use]
pub fn input_schema(parameters: &[Parameter]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in parameters {
        let mut property = Map::new();
        property.insert(
            "type".to_string(),
            Value::from(schema_type(param.declared_type.as_deref())),
        );
        if param.required {
            required.push(Value::from(param.name.clone()));
        } else if let Some(default) = &param.default {
            property.insert("default".to_string(), default.clone());
        }
        properties.insert(param.name.clone(), Value::Object(property));
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
