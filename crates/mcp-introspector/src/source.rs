//! Module sources resolve a dotted module path to an object graph.
//!
//! [`GraphDirectorySource`] reads graph dumps (JSON or YAML) from a list of
//! search directories; [`InMemorySource`] serves graphs registered in code.
//! Both resolve the longest dotted prefix that has a registered root, then
//! descend through submodule members for the remaining segments, so
//! `azure.mgmt.resource` can be served by a dump of `azure.mgmt`.

use crate::graph::{ModuleNode, Node};
use mcp_sdkgen_core::{Error, Result, is_dotted_identifier};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Graph dump file extensions, in lookup order.
const DUMP_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// A resolved module graph.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModule {
    /// Dotted path that was requested
    pub path: String,
    /// Module node at that path
    pub root: ModuleNode,
    /// Where the graph came from (dump file path, or `memory`)
    pub origin: String,
}

/// Resolves dotted module paths to module graphs.
pub trait ModuleSource: fmt::Debug + Send + Sync {
    /// Loads the module at `module_path`.
    ///
    /// # Errors
    ///
    /// Returns `ModuleLoad` if the path cannot be resolved or its graph
    /// cannot be parsed.
    fn load(&self, module_path: &str) -> Result<LoadedModule>;
}

/// Reads graph dumps from search directories.
///
/// For a module path `a.b.c` the candidates are tried in this order:
/// `a.b.c.{json,yaml,yml}`, then `a.b.{json,yaml,yml}`, then `a.{…}`, each
/// in every search directory before moving to the next shorter prefix.
/// A dump that exists but lacks the requested submodule does not end the
/// search: the next shorter prefix is tried, and the miss is reported only
/// if no dump resolves the path.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_introspector::{GraphDirectorySource, ModuleSource};
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(
///     dir.path().join("sdk.json"),
///     r#"{"kind": "module", "name": "sdk", "members": []}"#,
/// ).unwrap();
///
/// let source = GraphDirectorySource::new(vec![dir.path().to_path_buf()]);
/// let module = source.load("sdk").unwrap();
/// assert_eq!(module.path, "sdk");
/// assert!(source.load("missing").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct GraphDirectorySource {
    search_paths: Vec<PathBuf>,
}

impl GraphDirectorySource {
    /// Creates a source over the given search directories.
    #[must_use]
    pub const fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Returns the search directories.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    fn find_dump(&self, prefix: &str) -> Option<PathBuf> {
        self.search_paths.iter().find_map(|dir| {
            DUMP_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{prefix}.{ext}")))
                .find(|candidate| candidate.is_file())
        })
    }
}

impl ModuleSource for GraphDirectorySource {
    fn load(&self, module_path: &str) -> Result<LoadedModule> {
        let segments = split_module_path(module_path)?;

        let mut first_miss = None;
        for len in (1..=segments.len()).rev() {
            let prefix = segments[..len].join(".");
            let Some(file) = self.find_dump(&prefix) else {
                continue;
            };

            let root = read_dump(module_path, &file)?;
            match descend(module_path, &prefix, root, &segments[len..]) {
                Ok(module) => {
                    debug!("Resolved '{}' via graph dump {}", prefix, file.display());
                    return Ok(LoadedModule {
                        path: module_path.to_string(),
                        root: module,
                        origin: file.display().to_string(),
                    });
                }
                Err(miss) => {
                    debug!("Graph dump {} does not resolve '{}'", file.display(), module_path);
                    first_miss.get_or_insert(miss);
                }
            }
        }

        if let Some(miss) = first_miss {
            return Err(miss);
        }

        let searched = self
            .search_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::ModuleLoad {
            module: module_path.to_string(),
            reason: if searched.is_empty() {
                "no graph dump search paths configured".to_string()
            } else {
                format!("no graph dump found (searched: {searched})")
            },
        })
    }
}

/// Serves module graphs registered in memory.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_introspector::{InMemorySource, ModuleSource};
/// use mcp_sdkgen_introspector::graph::ModuleNode;
///
/// let source = InMemorySource::new()
///     .with_module("azure", ModuleNode::new("azure").with_submodule(ModuleNode::new("mgmt")));
///
/// assert!(source.load("azure.mgmt").is_ok());
/// assert!(source.load("azure.storage").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    modules: BTreeMap<String, ModuleNode>,
}

impl InMemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module graph at a dotted path.
    #[must_use]
    pub fn with_module(mut self, path: impl Into<String>, module: ModuleNode) -> Self {
        self.insert(path, module);
        self
    }

    /// Registers a module graph at a dotted path, replacing any previous one.
    pub fn insert(&mut self, path: impl Into<String>, module: ModuleNode) {
        self.modules.insert(path.into(), module);
    }
}

impl ModuleSource for InMemorySource {
    fn load(&self, module_path: &str) -> Result<LoadedModule> {
        let segments = split_module_path(module_path)?;

        for len in (1..=segments.len()).rev() {
            let prefix = segments[..len].join(".");
            if let Some(root) = self.modules.get(&prefix) {
                let module = descend(module_path, &prefix, root.clone(), &segments[len..])?;
                return Ok(LoadedModule {
                    path: module_path.to_string(),
                    root: module,
                    origin: "memory".to_string(),
                });
            }
        }

        Err(Error::ModuleLoad {
            module: module_path.to_string(),
            reason: "module is not registered".to_string(),
        })
    }
}

fn split_module_path(module_path: &str) -> Result<Vec<&str>> {
    if !is_dotted_identifier(module_path) {
        return Err(Error::ModuleLoad {
            module: module_path.to_string(),
            reason: "not a dotted identifier path".to_string(),
        });
    }
    Ok(module_path.split('.').collect())
}

fn read_dump(module_path: &str, file: &Path) -> Result<ModuleNode> {
    let content = std::fs::read_to_string(file).map_err(|e| Error::ModuleLoad {
        module: module_path.to_string(),
        reason: format!("cannot read {}: {e}", file.display()),
    })?;

    let is_yaml = file
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yaml" || ext == "yml");

    let node: Node = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| malformed(module_path, file, &e))?
    } else {
        serde_json::from_str(&content).map_err(|e| malformed(module_path, file, &e))?
    };

    match node {
        Node::Module(module) => Ok(module),
        other => Err(Error::ModuleLoad {
            module: module_path.to_string(),
            reason: format!(
                "graph dump {} has a {} at its root, expected a module",
                file.display(),
                other.kind()
            ),
        }),
    }
}

fn malformed(module_path: &str, file: &Path, err: &dyn fmt::Display) -> Error {
    Error::ModuleLoad {
        module: module_path.to_string(),
        reason: format!("malformed graph dump {}: {err}", file.display()),
    }
}

fn descend(module_path: &str, prefix: &str, root: ModuleNode, rest: &[&str]) -> Result<ModuleNode> {
    let mut current = root;
    let mut resolved = prefix.to_string();

    for segment in rest {
        let next = current
            .members
            .into_iter()
            .find_map(|member| match member {
                Node::Module(m) if m.name == *segment => Some(m),
                _ => None,
            })
            .ok_or_else(|| Error::ModuleLoad {
                module: module_path.to_string(),
                reason: format!("module '{resolved}' has no submodule '{segment}'"),
            })?;
        resolved.push('.');
        resolved.push_str(segment);
        current = next;
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        std::fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_longest_prefix_wins() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "azure.json",
            r#"{"kind": "module", "name": "azure", "members": [
                {"kind": "module", "name": "mgmt", "doc": "from azure.json"}
            ]}"#,
        );
        write(
            &dir,
            "azure.mgmt.json",
            r#"{"kind": "module", "name": "mgmt", "doc": "from azure.mgmt.json"}"#,
        );

        let source = GraphDirectorySource::new(vec![dir.path().to_path_buf()]);
        let module = source.load("azure.mgmt").unwrap();
        assert_eq!(module.root.doc, "from azure.mgmt.json");
        assert!(module.origin.ends_with("azure.mgmt.json"));
    }

    #[test]
    fn test_descends_into_submodules() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "azure.mgmt.json",
            r#"{"kind": "module", "name": "mgmt", "members": [
                {"kind": "module", "name": "resource", "members": [
                    {"kind": "class", "name": "ResourceClient"}
                ]}
            ]}"#,
        );

        let source = GraphDirectorySource::new(vec![dir.path().to_path_buf()]);
        let module = source.load("azure.mgmt.resource").unwrap();
        assert_eq!(module.path, "azure.mgmt.resource");
        assert_eq!(module.root.name, "resource");
        assert_eq!(module.root.members.len(), 1);
    }

    #[test]
    fn test_yaml_dump() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "kubernetes.yaml",
            "kind: module\nname: kubernetes\nmembers:\n  - kind: class\n    name: CoreV1Api\n",
        );

        let source = GraphDirectorySource::new(vec![dir.path().to_path_buf()]);
        let module = source.load("kubernetes").unwrap();
        assert_eq!(module.root.members[0].name(), "CoreV1Api");
    }

    #[test]
    fn test_search_path_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write(&first, "sdk.json", r#"{"kind": "module", "name": "sdk", "doc": "first"}"#);
        write(&second, "sdk.json", r#"{"kind": "module", "name": "sdk", "doc": "second"}"#);

        let source = GraphDirectorySource::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        assert_eq!(source.load("sdk").unwrap().root.doc, "first");
    }

    #[test]
    fn test_malformed_dump_is_module_load_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "broken.json", "{ not json");

        let source = GraphDirectorySource::new(vec![dir.path().to_path_buf()]);
        let err = source.load("broken").unwrap_err();
        assert!(err.is_module_load_error());
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_non_module_root_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "odd.json", r#"{"kind": "class", "name": "Odd"}"#);

        let source = GraphDirectorySource::new(vec![dir.path().to_path_buf()]);
        let err = source.load("odd").unwrap_err();
        assert!(err.to_string().contains("expected a module"));
    }

    #[test]
    fn test_missing_submodule() {
        let dir = TempDir::new().unwrap();
        write(&dir, "sdk.json", r#"{"kind": "module", "name": "sdk"}"#);

        let source = GraphDirectorySource::new(vec![dir.path().to_path_buf()]);
        let err = source.load("sdk.extras").unwrap_err();
        assert!(err.is_module_load_error());
        assert!(err.to_string().contains("no submodule 'extras'"));
    }

    #[test]
    fn test_shorter_prefix_tried_when_submodule_missing() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "azure.mgmt.json",
            r#"{"kind": "module", "name": "mgmt", "members": [
                {"kind": "module", "name": "compute"}
            ]}"#,
        );
        write(
            &dir,
            "azure.json",
            r#"{"kind": "module", "name": "azure", "members": [
                {"kind": "module", "name": "mgmt", "members": [
                    {"kind": "module", "name": "storage", "doc": "from azure.json"}
                ]}
            ]}"#,
        );

        let source = GraphDirectorySource::new(vec![dir.path().to_path_buf()]);
        let module = source.load("azure.mgmt.storage").unwrap();
        assert_eq!(module.root.doc, "from azure.json");
        assert!(module.origin.ends_with("azure.json"));

        let err = source.load("azure.mgmt.network").unwrap_err();
        assert!(err.to_string().contains("module 'azure.mgmt' has no submodule 'network'"));
    }

    #[test]
    fn test_no_search_paths() {
        let source = GraphDirectorySource::new(Vec::new());
        let err = source.load("sdk").unwrap_err();
        assert!(err.to_string().contains("no graph dump search paths"));
    }

    #[test]
    fn test_path_traversal_rejected() {
        let source = GraphDirectorySource::new(vec![PathBuf::from(".")]);
        assert!(source.load("../etc/passwd").is_err());
        assert!(source.load("").is_err());
    }

    #[test]
    fn test_in_memory_source() {
        let source = InMemorySource::new().with_module("sdk", ModuleNode::new("sdk"));
        assert_eq!(source.load("sdk").unwrap().origin, "memory");
        assert!(source.load("other").unwrap_err().is_module_load_error());
    }
}
