//! Domain types shared by every stage of a conversion run.
//!
//! The pipeline moves data strictly forward:
//! `DiscoveredMethod` (walker) → `DescribedMethod` (describer) → generated
//! tools (generator). Both record types are transient; only the rendered files
//! outlive a run.
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_core::{DiscoveredMethod, Parameter, Visibility};
//!
//! let method = DiscoveredMethod::new("sdk.Widget", "get_widget")
//!     .with_parameters(vec![Parameter::required("id")]);
//!
//! assert_eq!(method.qualified_name(), "sdk.Widget.get_widget");
//! assert_eq!(method.visibility, Visibility::Public);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tool name identifier (newtype over String).
///
/// Names the unit emitted into the generated server. Using a strong type
/// keeps tool names apart from method names, which may differ after
/// collision disambiguation.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_core::ToolName;
///
/// let tool = ToolName::new("get_widget");
/// assert_eq!(tool.as_str(), "get_widget");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ToolName(String);

impl ToolName {
    /// Creates a new tool name.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the tool name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ToolName` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ToolName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ToolName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Visibility of a reflected callable, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// No leading underscore
    Public,
    /// Leading underscore (including name-mangled `__name`)
    Private,
}

impl Visibility {
    /// Derives visibility from the naming convention.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_core::Visibility;
    ///
    /// assert_eq!(Visibility::from_name("get"), Visibility::Public);
    /// assert_eq!(Visibility::from_name("_internal"), Visibility::Private);
    /// assert_eq!(Visibility::from_name("__mangled"), Visibility::Private);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.starts_with('_') {
            Self::Private
        } else {
            Self::Public
        }
    }
}

/// Returns `true` for dunder names such as `__init__`.
///
/// Dunder methods are protocol hooks, never tools.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_core::is_dunder;
///
/// assert!(is_dunder("__init__"));
/// assert!(!is_dunder("__mangled"));
/// assert!(!is_dunder("__"));
/// ```
#[must_use]
pub fn is_dunder(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}

/// One parameter of a discovered method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, unique within its method
    pub name: String,
    /// Whether callers must supply the parameter
    pub required: bool,
    /// Declared type annotation, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
    /// Default value, when the parameter has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl Parameter {
    /// Creates a required parameter with no declared type.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            declared_type: None,
            default: None,
        }
    }

    /// Creates an optional parameter with the given default.
    #[must_use]
    pub fn optional(name: impl Into<String>, default: Option<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            required: false,
            declared_type: None,
            default,
        }
    }

    /// Sets the declared type.
    #[must_use]
    pub fn with_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }
}

/// A callable found by walking the SDK object graph.
///
/// `owner_path + "." + name` is unique within one walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredMethod {
    /// Dotted path of the defining class or module
    pub owner_path: String,
    /// The callable's identifier
    pub name: String,
    /// Parameters in declaration order, receiver and variadics removed
    pub parameters: Vec<Parameter>,
    /// Cleaned documentation string, possibly empty
    #[serde(default)]
    pub doc: String,
    /// Derived from the name
    pub visibility: Visibility,
    /// Declared return annotation, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    /// Whether the callable is a coroutine function
    #[serde(default)]
    pub is_async: bool,
}

impl DiscoveredMethod {
    /// Creates a method record with no parameters and no documentation.
    #[must_use]
    pub fn new(owner_path: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            owner_path: owner_path.into(),
            visibility: Visibility::from_name(&name),
            name,
            parameters: Vec::new(),
            doc: String::new(),
            return_type: None,
            is_async: false,
        }
    }

    /// Replaces the parameter list.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets the documentation string.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Returns `owner_path.name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner_path, self.name)
    }

    /// Returns the last segment of the owner path.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_core::DiscoveredMethod;
    ///
    /// let method = DiscoveredMethod::new("kubernetes.client.CoreV1Api", "list_pod");
    /// assert_eq!(method.owner_leaf(), "CoreV1Api");
    /// ```
    #[must_use]
    pub fn owner_leaf(&self) -> &str {
        self.owner_path
            .rsplit('.')
            .next()
            .unwrap_or(&self.owner_path)
    }

    /// Renders a readable signature such as `get(id: int, page=1) -> Repo`.
    #[must_use]
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| {
                let mut rendered = p.name.clone();
                if let Some(ty) = &p.declared_type {
                    rendered.push_str(": ");
                    rendered.push_str(ty);
                }
                if !p.required {
                    let default = p
                        .default
                        .as_ref()
                        .map_or_else(|| "None".to_string(), ToString::to_string);
                    rendered.push_str(" = ");
                    rendered.push_str(&default);
                }
                rendered
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut signature = format!("{}({params})", self.name);
        if let Some(ret) = &self.return_type {
            signature.push_str(" -> ");
            signature.push_str(ret);
        }
        signature
    }
}

/// Which describe strategy produced a category and description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionSource {
    /// Remote language-model endpoint
    Model,
    /// Local name-prefix table
    Heuristic,
}

impl DescriptionSource {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Heuristic => "heuristic",
        }
    }
}

impl fmt::Display for DescriptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered method plus its category and description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribedMethod {
    /// The method this description belongs to
    pub method: DiscoveredMethod,
    /// Short category label (e.g. `retrieval`)
    pub category: String,
    /// One-sentence summary
    pub description: String,
    /// Strategy that produced `category` and `description`
    pub source: DescriptionSource,
}
