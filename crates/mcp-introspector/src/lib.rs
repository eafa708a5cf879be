//! SDK object graph model, module sources, and method discovery.
//!
//! An SDK is described by a graph of module, class, and method nodes. A
//! [`ModuleSource`] resolves a dotted module path to the root of such a graph,
//! and the [`Walker`] visits it depth-first to collect every eligible
//! [`DiscoveredMethod`](mcp_sdkgen_core::DiscoveredMethod).
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_introspector::{InMemorySource, ModuleSource, Walker, WalkOptions};
//! use mcp_sdkgen_introspector::graph::{ClassNode, MethodNode, ModuleNode, ParameterNode};
//!
//! let get_widget = MethodNode::new("get_widget")
//!     .with_parameter(ParameterNode::positional("self"))
//!     .with_parameter(ParameterNode::positional("id"));
//! let widget = ClassNode::new("Widget")
//!     .with_method(get_widget)
//!     .with_method(MethodNode::new("_internal"));
//! let source = InMemorySource::new()
//!     .with_module("sdk", ModuleNode::new("sdk").with_class(widget));
//!
//! let module = source.load("sdk").unwrap();
//! let report = Walker::new(WalkOptions::default()).walk(&module);
//!
//! assert_eq!(report.methods.len(), 1);
//! assert_eq!(report.methods[0].qualified_name(), "sdk.Widget.get_widget");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod graph;
pub mod signature;
pub mod source;
pub mod walker;

pub use signature::{Signature, clean_doc, extract_free_function, extract_signature};
pub use source::{GraphDirectorySource, InMemorySource, LoadedModule, ModuleSource};
pub use walker::{SkippedEntry, WalkOptions, WalkReport, Walker};
