//! Depth-first discovery of SDK methods.
//!
//! The walker visits a loaded module graph in a fixed order (submodules, then
//! classes, then methods, each sorted by name) and collects every method that
//! passes the visibility policy and the filter patterns. Attributes that
//! failed at dump time and methods whose signature cannot be extracted are
//! recorded as skipped entries; they never abort the walk.
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_introspector::{LoadedModule, WalkOptions, Walker};
//! use mcp_sdkgen_introspector::graph::{ClassNode, MethodNode, ModuleNode};
//!
//! let module = LoadedModule {
//!     path: "sdk".to_string(),
//!     root: ModuleNode::new("sdk").with_class(
//!         ClassNode::new("Client")
//!             .with_method(MethodNode::new("get_user"))
//!             .with_method(MethodNode::new("test_connection")),
//!     ),
//!     origin: "memory".to_string(),
//! };
//!
//! let options = WalkOptions::new(false, &["^test_".to_string()]).unwrap();
//! let report = Walker::new(options).walk(&module);
//!
//! assert_eq!(report.methods.len(), 1);
//! assert_eq!(report.filtered_by_pattern, 1);
//! ```

use crate::graph::{ClassNode, MethodNode, ModuleNode, Node};
use crate::signature::{Signature, extract_free_function, extract_signature};
use crate::source::LoadedModule;
use mcp_sdkgen_core::{DiscoveredMethod, Error, Result, Visibility, is_dunder};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Visibility policy and name filters for one walk.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    include_private: bool,
    filters: Vec<Regex>,
}

impl WalkOptions {
    /// Compiles the filter patterns.
    ///
    /// Patterns are case-insensitive and match anywhere in the method name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a pattern is not a valid regular expression.
    pub fn new(include_private: bool, patterns: &[String]) -> Result<Self> {
        let filters = patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| Error::ConfigError {
                        message: format!("invalid filter pattern '{pattern}': {e}"),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            include_private,
            filters,
        })
    }

    /// Returns `true` if private methods are included.
    #[must_use]
    pub const fn include_private(&self) -> bool {
        self.include_private
    }

    fn is_filtered(&self, name: &str) -> bool {
        self.filters.iter().any(|re| re.is_match(name))
    }
}

/// An object the walker could not turn into a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// Dotted path of the object
    pub path: String,
    /// Why it was skipped
    pub reason: String,
}

/// Result of one walk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WalkReport {
    /// Eligible methods in walk order
    pub methods: Vec<DiscoveredMethod>,
    /// Classes visited
    pub classes_seen: usize,
    /// Modules visited, the root included
    pub modules_seen: usize,
    /// Methods dropped by a filter pattern
    pub filtered_by_pattern: usize,
    /// Methods dropped by the visibility policy (dunder included)
    pub filtered_by_visibility: usize,
    /// Objects skipped with a warning
    pub skipped: Vec<SkippedEntry>,
}

/// Depth-first method discovery over a module graph.
#[derive(Debug, Clone, Default)]
pub struct Walker {
    options: WalkOptions,
}

impl Walker {
    /// Creates a walker with the given options.
    #[must_use]
    pub const fn new(options: WalkOptions) -> Self {
        Self { options }
    }

    /// Walks a loaded module.
    ///
    /// The walk is pure: the same graph and options always yield the same
    /// report.
    #[must_use]
    pub fn walk(&self, module: &LoadedModule) -> WalkReport {
        let mut state = WalkState {
            options: &self.options,
            report: WalkReport::default(),
            seen: HashSet::new(),
        };
        state.visit_module(&module.path, &module.root);

        debug!(
            "Walked '{}': {} methods, {} classes, {} modules, {} skipped",
            module.path,
            state.report.methods.len(),
            state.report.classes_seen,
            state.report.modules_seen,
            state.report.skipped.len()
        );
        state.report
    }
}

struct WalkState<'a> {
    options: &'a WalkOptions,
    report: WalkReport,
    seen: HashSet<String>,
}

/// Members of one module or class, split by kind and sorted by name.
struct Members<'n> {
    modules: Vec<&'n ModuleNode>,
    classes: Vec<&'n ClassNode>,
    methods: Vec<&'n MethodNode>,
}

impl<'n> Members<'n> {
    fn partition(owner: &str, nodes: &'n [Node], skipped: &mut Vec<SkippedEntry>) -> Self {
        let mut members = Self {
            modules: Vec::new(),
            classes: Vec::new(),
            methods: Vec::new(),
        };

        for node in nodes {
            match node {
                Node::Module(m) => members.modules.push(m),
                Node::Class(c) => members.classes.push(c),
                Node::Method(m) => members.methods.push(m),
                Node::Unavailable(u) => {
                    let path = format!("{owner}.{}", u.name);
                    warn!("Skipping '{}': {}", path, u.error);
                    skipped.push(SkippedEntry {
                        path,
                        reason: u.error.clone(),
                    });
                }
            }
        }

        members.modules.sort_by(|a, b| a.name.cmp(&b.name));
        members.classes.sort_by(|a, b| a.name.cmp(&b.name));
        members.methods.sort_by(|a, b| a.name.cmp(&b.name));
        members
    }
}

impl WalkState<'_> {
    fn visit_module(&mut self, path: &str, module: &ModuleNode) {
        self.report.modules_seen += 1;
        let members = Members::partition(path, &module.members, &mut self.report.skipped);

        for submodule in members.modules {
            self.visit_module(&format!("{path}.{}", submodule.name), submodule);
        }
        for class in members.classes {
            self.visit_class(&format!("{path}.{}", class.name), class);
        }
        for function in members.methods {
            self.visit_method(path, function, extract_free_function);
        }
    }

    fn visit_class(&mut self, path: &str, class: &ClassNode) {
        self.report.classes_seen += 1;
        let members = Members::partition(path, &class.members, &mut self.report.skipped);

        for module in members.modules {
            let entry = format!("{path}.{}", module.name);
            warn!("Skipping '{}': module nested in a class", entry);
            self.report.skipped.push(SkippedEntry {
                path: entry,
                reason: "module nested in a class".to_string(),
            });
        }
        for nested in members.classes {
            self.visit_class(&format!("{path}.{}", nested.name), nested);
        }
        for method in members.methods {
            self.visit_method(path, method, extract_signature);
        }
    }

    fn visit_method(
        &mut self,
        owner: &str,
        method: &MethodNode,
        extract: fn(&MethodNode) -> Result<Signature>,
    ) {
        let name = method.name.as_str();

        if is_dunder(name) {
            self.report.filtered_by_visibility += 1;
            return;
        }
        if Visibility::from_name(name) == Visibility::Private && !self.options.include_private {
            self.report.filtered_by_visibility += 1;
            return;
        }
        if self.options.is_filtered(name) {
            self.report.filtered_by_pattern += 1;
            return;
        }

        let qualified = format!("{owner}.{name}");
        if self.seen.contains(&qualified) {
            debug!("Duplicate method '{}' ignored", qualified);
            self.report.skipped.push(SkippedEntry {
                path: qualified,
                reason: "duplicate definition".to_string(),
            });
            return;
        }

        let signature = match extract(method) {
            Ok(signature) => signature,
            Err(err) => {
                let reason = match err {
                    Error::AttributeAccess { reason, .. } => reason,
                    other => other.to_string(),
                };
                warn!("Skipping '{}': {}", qualified, reason);
                self.report.skipped.push(SkippedEntry {
                    path: qualified,
                    reason,
                });
                return;
            }
        };

        self.seen.insert(qualified);
        self.report.methods.push(DiscoveredMethod {
            owner_path: owner.to_string(),
            name: name.to_string(),
            parameters: signature.parameters,
            doc: signature.doc,
            visibility: Visibility::from_name(name),
            return_type: signature.return_type,
            is_async: signature.is_async,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ParameterNode;

    fn loaded(root: ModuleNode) -> LoadedModule {
        LoadedModule {
            path: root.name.clone(),
            root,
            origin: "memory".to_string(),
        }
    }

    fn names(report: &WalkReport) -> Vec<String> {
        report.methods.iter().map(DiscoveredMethod::qualified_name).collect()
    }

    #[test]
    fn test_walk_order_is_depth_first_and_sorted() {
        let root = ModuleNode::new("sdk")
            .with_function(MethodNode::new("z_helper"))
            .with_class(ClassNode::new("Zeta").with_method(MethodNode::new("run")))
            .with_class(
                ClassNode::new("Alpha")
                    .with_method(MethodNode::new("list_items"))
                    .with_method(MethodNode::new("get_item")),
            )
            .with_submodule(
                ModuleNode::new("sub").with_class(ClassNode::new("Inner").with_method(MethodNode::new("ping"))),
            );

        let report = Walker::default().walk(&loaded(root));
        assert_eq!(
            names(&report),
            vec![
                "sdk.sub.Inner.ping",
                "sdk.Alpha.get_item",
                "sdk.Alpha.list_items",
                "sdk.Zeta.run",
                "sdk.z_helper",
            ]
        );
        assert_eq!(report.modules_seen, 2);
        assert_eq!(report.classes_seen, 3);
    }

    #[test]
    fn test_private_and_dunder_policy() {
        let class = ClassNode::new("Widget")
            .with_method(MethodNode::new("__init__"))
            .with_method(MethodNode::new("_internal"))
            .with_method(MethodNode::new("__mangled"))
            .with_method(MethodNode::new("get_widget"));
        let root = ModuleNode::new("sdk").with_class(class);

        let public = Walker::default().walk(&loaded(root.clone()));
        assert_eq!(names(&public), vec!["sdk.Widget.get_widget"]);
        assert_eq!(public.filtered_by_visibility, 3);

        let options = WalkOptions::new(true, &[]).unwrap();
        let all = Walker::new(options).walk(&loaded(root));
        assert_eq!(
            names(&all),
            vec![
                "sdk.Widget.__mangled",
                "sdk.Widget._internal",
                "sdk.Widget.get_widget"
            ]
        );
        assert!(all.methods.iter().all(|m| m.name != "__init__"));
    }

    #[test]
    fn test_filter_patterns_case_insensitive() {
        let class = ClassNode::new("Client")
            .with_method(MethodNode::new("Test_Login"))
            .with_method(MethodNode::new("debug_dump"))
            .with_method(MethodNode::new("get_user"));
        let root = ModuleNode::new("sdk").with_class(class);

        let options =
            WalkOptions::new(false, &["^test_".to_string(), "debug_".to_string()]).unwrap();
        let report = Walker::new(options).walk(&loaded(root));
        assert_eq!(names(&report), vec!["sdk.Client.get_user"]);
        assert_eq!(report.filtered_by_pattern, 2);
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = WalkOptions::new(false, &["(unclosed".to_string()]).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_unavailable_attributes_skipped() {
        let root = ModuleNode::new("sdk")
            .with_unavailable("extras", "ImportError: No module named 'yaml'")
            .with_class(
                ClassNode::new("Client")
                    .with_unavailable("stream", "AttributeError")
                    .with_method(MethodNode::new("get_user")),
            );

        let report = Walker::default().walk(&loaded(root));
        assert_eq!(report.methods.len(), 1);
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped.iter().any(|s| s.path == "sdk.extras"));
        assert!(report.skipped.iter().any(|s| s.path == "sdk.Client.stream"));
    }

    #[test]
    fn test_duplicates_keep_first() {
        let class = ClassNode::new("Client")
            .with_method(MethodNode::new("get").with_doc("first"))
            .with_method(MethodNode::new("get").with_doc("second"));
        let root = ModuleNode::new("sdk").with_class(class);

        let report = Walker::default().walk(&loaded(root));
        assert_eq!(report.methods.len(), 1);
        assert_eq!(report.methods[0].doc, "first");
        assert_eq!(report.skipped[0].reason, "duplicate definition");
    }

    #[test]
    fn test_bad_signature_skipped_not_fatal() {
        let broken = MethodNode::new("broken")
            .with_parameter(ParameterNode::positional("self"))
            .with_parameter(ParameterNode::positional("a"))
            .with_parameter(ParameterNode::positional("a"));
        let class = ClassNode::new("Client")
            .with_method(broken)
            .with_method(MethodNode::new("ok"));
        let root = ModuleNode::new("sdk").with_class(class);

        let report = Walker::default().walk(&loaded(root));
        assert_eq!(names(&report), vec!["sdk.Client.ok"]);
        assert_eq!(report.skipped[0].path, "sdk.Client.broken");
        assert!(report.skipped[0].reason.contains("duplicate parameter"));
    }

    #[test]
    fn test_module_functions_keep_first_parameter() {
        let root = ModuleNode::new("sdk")
            .with_function(MethodNode::new("connect").with_parameter(ParameterNode::positional("url")));
        let report = Walker::default().walk(&loaded(root));
        assert_eq!(report.methods[0].parameters[0].name, "url");
        assert_eq!(report.methods[0].owner_path, "sdk");
    }

    #[test]
    fn test_walk_is_idempotent() {
        let root = ModuleNode::new("sdk").with_class(
            ClassNode::new("A")
                .with_method(MethodNode::new("b"))
                .with_method(MethodNode::new("a")),
        );
        let module = loaded(root);
        let walker = Walker::default();
        assert_eq!(names(&walker.walk(&module)), names(&walker.walk(&module)));
    }
}
