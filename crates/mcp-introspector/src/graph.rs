//! Object graph model for an SDK.
//!
//! A graph dump is a tree of [`Node`]s tagged by a `kind` field:
//!
//! ```json
//! {
//!   "kind": "module",
//!   "name": "sdk",
//!   "members": [
//!     {
//!       "kind": "class",
//!       "name": "Widget",
//!       "members": [
//!         {
//!           "kind": "method",
//!           "name": "get_widget",
//!           "parameters": [
//!             { "name": "self" },
//!             { "name": "id", "annotation": "int" }
//!           ]
//!         }
//!       ]
//!     },
//!     { "kind": "unavailable", "name": "extras", "error": "ImportError: no module named 'yaml'" }
//!   ]
//! }
//! ```
//!
//! Unknown fields are ignored so dump producers can attach extra metadata.

use serde::{Deserialize, Serialize};

/// One node of the SDK object graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// A module or package
    Module(ModuleNode),
    /// A class
    Class(ClassNode),
    /// A method or module-level function
    Method(MethodNode),
    /// An attribute that raised when it was accessed
    Unavailable(UnavailableNode),
}

impl Node {
    /// Returns the node's own (undotted) name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Module(m) => &m.name,
            Self::Class(c) => &c.name,
            Self::Method(m) => &m.name,
            Self::Unavailable(u) => &u.name,
        }
    }

    /// Returns the node kind as it appears in dumps.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Module(_) => "module",
            Self::Class(_) => "class",
            Self::Method(_) => "method",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

/// A module: submodules, classes, and module-level functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleNode {
    /// Last segment of the module path
    pub name: String,
    /// Module documentation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
    /// Member nodes in enumeration order
    #[serde(default)]
    pub members: Vec<Node>,
}

impl ModuleNode {
    /// Creates an empty module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            members: Vec::new(),
        }
    }

    /// Adds a submodule.
    #[must_use]
    pub fn with_submodule(mut self, module: Self) -> Self {
        self.members.push(Node::Module(module));
        self
    }

    /// Adds a class.
    #[must_use]
    pub fn with_class(mut self, class: ClassNode) -> Self {
        self.members.push(Node::Class(class));
        self
    }

    /// Adds a module-level function.
    #[must_use]
    pub fn with_function(mut self, function: MethodNode) -> Self {
        self.members.push(Node::Method(function));
        self
    }

    /// Adds an attribute that failed on access.
    #[must_use]
    pub fn with_unavailable(mut self, name: impl Into<String>, error: impl Into<String>) -> Self {
        self.members.push(Node::Unavailable(UnavailableNode {
            name: name.into(),
            error: error.into(),
        }));
        self
    }

    /// Finds a direct submodule by name.
    #[must_use]
    pub fn submodule(&self, name: &str) -> Option<&Self> {
        self.members.iter().find_map(|member| match member {
            Node::Module(m) if m.name == name => Some(m),
            _ => None,
        })
    }
}

/// A class: methods and nested classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    /// Class name
    pub name: String,
    /// Class documentation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
    /// Member nodes in enumeration order
    #[serde(default)]
    pub members: Vec<Node>,
}

impl ClassNode {
    /// Creates an empty class.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            members: Vec::new(),
        }
    }

    /// Adds a method.
    #[must_use]
    pub fn with_method(mut self, method: MethodNode) -> Self {
        self.members.push(Node::Method(method));
        self
    }

    /// Adds a nested class.
    #[must_use]
    pub fn with_class(mut self, class: Self) -> Self {
        self.members.push(Node::Class(class));
        self
    }

    /// Adds an attribute that failed on access.
    #[must_use]
    pub fn with_unavailable(mut self, name: impl Into<String>, error: impl Into<String>) -> Self {
        self.members.push(Node::Unavailable(UnavailableNode {
            name: name.into(),
            error: error.into(),
        }));
        self
    }
}

/// How a method is bound to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    /// Receives the instance as first parameter
    #[default]
    Instance,
    /// Receives the class as first parameter
    Class,
    /// No implicit receiver
    Static,
}

impl Binding {
    /// Returns `true` when the first positional parameter is a receiver.
    #[must_use]
    pub const fn has_receiver(self) -> bool {
        matches!(self, Self::Instance | Self::Class)
    }
}

/// A callable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodNode {
    /// Callable name
    pub name: String,
    /// Raw documentation string
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
    /// Receiver binding; ignored for module-level functions
    #[serde(default)]
    pub binding: Binding,
    /// Coroutine function
    #[serde(default)]
    pub is_async: bool,
    /// Return annotation text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    /// Parameters in declaration order, receiver included
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
}

impl MethodNode {
    /// Creates an instance method with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            binding: Binding::Instance,
            is_async: false,
            returns: None,
            parameters: Vec::new(),
        }
    }

    /// Sets the binding.
    #[must_use]
    pub const fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    /// Sets the documentation string.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterNode) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the return annotation.
    #[must_use]
    pub fn with_returns(mut self, returns: impl Into<String>) -> Self {
        self.returns = Some(returns.into());
        self
    }
}

/// Parameter kind, following positional/keyword calling conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Positional-or-keyword (also positional-only)
    #[default]
    Positional,
    /// Keyword-only
    KeywordOnly,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
}

impl ParameterKind {
    /// Returns `true` for `*args` and `**kwargs`.
    #[must_use]
    pub const fn is_variadic(self) -> bool {
        matches!(self, Self::VarPositional | Self::VarKeyword)
    }
}

/// One parameter of a method node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterNode {
    /// Parameter name
    pub name: String,
    /// Calling convention
    #[serde(default)]
    pub kind: ParameterKind,
    /// Type annotation text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Default value, if representable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Set when a default exists, including a `None` default
    #[serde(default)]
    pub has_default: bool,
}

impl ParameterNode {
    /// Creates a positional parameter without default.
    #[must_use]
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Positional,
            annotation: None,
            default: None,
            has_default: false,
        }
    }

    /// Sets the kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: ParameterKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Gives the parameter a default value.
    #[must_use]
    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self.has_default = true;
        self
    }
}

/// Attribute that raised on access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableNode {
    /// Attribute name
    pub name: String,
    /// Error text captured at dump time
    #[serde(default)]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tagged_dump() {
        let dump = json!({
            "kind": "module",
            "name": "sdk",
            "members": [
                {
                    "kind": "class",
                    "name": "Widget",
                    "members": [{
                        "kind": "method",
                        "name": "get_widget",
                        "parameters": [{"name": "self"}, {"name": "id", "annotation": "int"}]
                    }]
                },
                {"kind": "unavailable", "name": "extras", "error": "ImportError"}
            ]
        });

        let node: Node = serde_json::from_value(dump).unwrap();
        let Node::Module(module) = node else {
            panic!("expected module");
        };
        assert_eq!(module.members.len(), 2);
        assert_eq!(module.members[0].kind(), "class");
        assert_eq!(module.members[1].name(), "extras");
    }

    #[test]
    fn test_method_defaults() {
        let node: Node = serde_json::from_value(json!({"kind": "method", "name": "ping"})).unwrap();
        let Node::Method(method) = node else {
            panic!("expected method");
        };
        assert_eq!(method.binding, Binding::Instance);
        assert!(!method.is_async);
        assert!(method.parameters.is_empty());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let node: Node = serde_json::from_value(json!({
            "kind": "class",
            "name": "Client",
            "mro": ["Client", "object"]
        }))
        .unwrap();
        assert_eq!(node.name(), "Client");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: Result<Node, _> =
            serde_json::from_value(json!({"kind": "property", "name": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_submodule_lookup() {
        let module = ModuleNode::new("azure")
            .with_submodule(ModuleNode::new("mgmt"))
            .with_class(ClassNode::new("mgmt"));
        assert!(module.submodule("mgmt").is_some());
        assert!(module.submodule("storage").is_none());
    }

    #[test]
    fn test_with_default_sets_flag() {
        let param = ParameterNode::positional("page").with_default(serde_json::Value::Null);
        assert!(param.has_default);
        assert_eq!(param.default, Some(serde_json::Value::Null));
        assert!(ParameterKind::VarKeyword.is_variadic());
        assert!(!ParameterKind::KeywordOnly.is_variadic());
    }
}
