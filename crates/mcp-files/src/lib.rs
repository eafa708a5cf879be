//! Output tree and export for generated MCP servers.
//!
//! Generated files are collected into an in-memory [`OutputTree`] keyed by
//! validated relative paths, then written to disk in one export. A completion
//! marker is written last, so a directory that carries it holds the full
//! output of a finished run.
//!
//! # Features
//!
//! - **Path safety**: tree paths are relative and cannot escape the output directory
//! - **Atomic writes**: every file is written to a temp file and renamed into place
//! - **Completion marker**: written only after every file succeeded
//! - **Clean overwrite**: files listed by the previous marker but not regenerated are removed
//! - **Integration**: builds directly from `mcp-sdkgen-codegen` output
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_codegen::{GeneratedCode, GeneratedFile};
//! use mcp_sdkgen_files::{ExportOptions, FilesBuilder, read_marker};
//! # use tempfile::TempDir;
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile::new("mcp_server.py", "SERVER_NAME = \"github-mcp\"\n"));
//! code.add_file(GeneratedFile::new("tools.json", "{}\n"));
//!
//! let tree = FilesBuilder::from_generated_code(code).build().unwrap();
//!
//! # let temp = TempDir::new().unwrap();
//! # let output_dir = temp.path().join("out");
//! let options = ExportOptions::default().with_marker("github", 0);
//! tree.export_to_filesystem(&output_dir, &options).unwrap();
//!
//! let marker = read_marker(&output_dir).unwrap().unwrap();
//! assert_eq!(marker.files, vec!["mcp_server.py", "tools.json"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod filesystem;
mod marker;
pub mod tree;
pub mod types;

// Re-export main types
pub use builder::FilesBuilder;
pub use filesystem::{ExportOptions, ExportReport, check_output_dir};
pub use marker::{CompletionMarker, MARKER_FILE, is_complete, read_marker};
pub use tree::OutputTree;
pub use types::{FileEntry, FilePath, FilesError, Result};
