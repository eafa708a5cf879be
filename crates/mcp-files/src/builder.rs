//! Builder pattern for constructing output trees.
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_files::FilesBuilder;
//!
//! let tree = FilesBuilder::new()
//!     .add_file("mcp_server.py", "")
//!     .add_file("tests/test_group_01.py", "")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(tree.file_count(), 2);
//! ```

use crate::tree::OutputTree;
use crate::types::{FilesError, Result};
use mcp_sdkgen_codegen::GeneratedCode;
use std::path::Path;

/// Builder for an [`OutputTree`].
///
/// Path errors are collected while adding and the first one is returned by
/// [`FilesBuilder::build`], so a chain of calls never panics.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_files::FilesBuilder;
/// use mcp_sdkgen_codegen::{GeneratedCode, GeneratedFile};
///
/// let mut code = GeneratedCode::new();
/// code.add_file(GeneratedFile::new("mcp_server.py", "SERVER_NAME = \"x\"\n"));
/// code.add_file(GeneratedFile::new("tests/test_group_01.py", ""));
///
/// let tree = FilesBuilder::from_generated_code(code).build().unwrap();
/// assert!(tree.exists("tests/test_group_01.py"));
/// ```
#[derive(Debug, Default)]
pub struct FilesBuilder {
    tree: OutputTree,
    errors: Vec<FilesError>,
}

impl FilesBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder holding every file of the generated code.
    #[must_use]
    pub fn from_generated_code(code: GeneratedCode) -> Self {
        code.files
            .into_iter()
            .fold(Self::new(), |builder, file| {
                builder.add_file(file.path, file.content)
            })
    }

    /// Adds a file. An invalid path is reported by `build()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_files::FilesBuilder;
    ///
    /// let result = FilesBuilder::new()
    ///     .add_file("../escape.py", "")
    ///     .build();
    ///
    /// assert!(result.is_err());
    /// ```
    #[must_use]
    pub fn add_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Err(e) = self.tree.add_file(path, content) {
            self.errors.push(e);
        }
        self
    }

    /// Adds several files.
    #[must_use]
    pub fn add_files<P, C>(mut self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<Path>,
        C: Into<String>,
    {
        for (path, content) in files {
            self = self.add_file(path, content);
        }
        self
    }

    /// Returns the number of files added so far.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.tree.file_count()
    }

    /// Consumes the builder and returns the tree.
    ///
    /// # Errors
    ///
    /// Returns the first path error encountered while adding files.
    pub fn build(self) -> Result<OutputTree> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        Ok(self.tree)
    }
}
