//! Signature extraction from method nodes.
//!
//! Turns a raw [`MethodNode`] into the parameter list a generated tool
//! exposes: the receiver and variadic parameters are dropped, requiredness is
//! derived from default presence, and the doc string is cleaned.

use crate::graph::{MethodNode, ParameterKind};
use mcp_sdkgen_core::{Error, Parameter, Result};
use std::collections::HashSet;

/// Callable signature as exposed to tool callers.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    /// Parameters in declaration order
    pub parameters: Vec<Parameter>,
    /// Cleaned documentation string
    pub doc: String,
    /// Return annotation text
    pub return_type: Option<String>,
    /// Coroutine function
    pub is_async: bool,
    /// The declared signature accepted `*args` or `**kwargs`
    pub has_variadics: bool,
}

/// Extracts the signature of a method bound to a class.
///
/// For instance and class bindings the first positional parameter is the
/// receiver and is dropped.
///
/// # Errors
///
/// Returns `AttributeAccess` if two parameters share a name.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_introspector::extract_signature;
/// use mcp_sdkgen_introspector::graph::{MethodNode, ParameterNode};
///
/// let method = MethodNode::new("get_repo")
///     .with_parameter(ParameterNode::positional("self"))
///     .with_parameter(ParameterNode::positional("full_name").with_annotation("str"));
///
/// let sig = extract_signature(&method).unwrap();
/// assert_eq!(sig.parameters.len(), 1);
/// assert!(sig.parameters[0].required);
/// ```
pub fn extract_signature(method: &MethodNode) -> Result<Signature> {
    extract(method, method.binding.has_receiver())
}

/// Extracts the signature of a module-level function.
///
/// Module-level functions never have a receiver, whatever their binding says.
///
/// # Errors
///
/// Returns `AttributeAccess` if two parameters share a name.
pub fn extract_free_function(method: &MethodNode) -> Result<Signature> {
    extract(method, false)
}

fn extract(method: &MethodNode, drop_receiver: bool) -> Result<Signature> {
    let mut params = method.parameters.iter().peekable();

    if drop_receiver
        && params
            .peek()
            .is_some_and(|p| p.kind == ParameterKind::Positional)
    {
        params.next();
    }

    let mut seen = HashSet::new();
    let mut parameters = Vec::with_capacity(method.parameters.len());
    let mut has_variadics = false;

    for param in params {
        if param.kind.is_variadic() {
            has_variadics = true;
            continue;
        }
        if !seen.insert(param.name.as_str()) {
            return Err(Error::AttributeAccess {
                path: method.name.clone(),
                reason: format!("duplicate parameter name '{}'", param.name),
            });
        }
        parameters.push(Parameter {
            name: param.name.clone(),
            required: !param.has_default && param.default.is_none(),
            declared_type: param
                .annotation
                .as_ref()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
            default: param.default.clone(),
        });
    }

    Ok(Signature {
        parameters,
        doc: clean_doc(&method.doc),
        return_type: method.returns.clone(),
        is_async: method.is_async,
        has_variadics,
    })
}

/// Cleans a documentation string.
///
/// Leading whitespace of the first line is stripped, the common indentation
/// of the remaining lines is removed, and leading/trailing blank lines are
/// dropped. Tabs count as a single column.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_introspector::clean_doc;
///
/// let doc = "  Get a repository.\n\n    :param name: full name\n      continued\n  ";
/// assert_eq!(
///     clean_doc(doc),
///     "Get a repository.\n\n:param name: full name\n  continued"
/// );
/// ```
#[must_use]
pub fn clean_doc(doc: &str) -> String {
    let mut lines: Vec<&str> = doc.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    cleaned.push(lines.remove(0).trim().to_string());
    for line in lines {
        let stripped = line.get(indent..).unwrap_or_else(|| line.trim_start());
        cleaned.push(stripped.trim_end().to_string());
    }

    while cleaned.last().is_some_and(String::is_empty) {
        cleaned.pop();
    }
    let first_content = cleaned
        .iter()
        .position(|line| !line.is_empty())
        .unwrap_or(cleaned.len());

    cleaned[first_content..].join("\n")
}
