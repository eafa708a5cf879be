//! In-memory output tree.

use crate::types::{FileEntry, FilePath, FilesError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Generated files keyed by validated relative path.
///
/// Iteration is in path order, so exports and listings are deterministic.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_files::OutputTree;
///
/// let mut tree = OutputTree::new();
/// tree.add_file("mcp_server.py", "print('hi')\n").unwrap();
///
/// assert!(tree.exists("mcp_server.py"));
/// assert_eq!(tree.read_file("mcp_server.py").unwrap(), "print('hi')\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTree {
    files: BTreeMap<FilePath, FileEntry>,
}

impl OutputTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Adds or replaces a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid relative tree path.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Result<()> {
        let path = FilePath::new(path)?;
        self.files.insert(path, FileEntry::new(content));
        Ok(())
    }

    /// Reads a file's content.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if no file exists at the path, or a path error
    /// if the path is invalid.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<&str> {
        let path = FilePath::new(path)?;
        self.files
            .get(&path)
            .map(FileEntry::content)
            .ok_or_else(|| FilesError::FileNotFound {
                path: path.to_string(),
            })
    }

    /// Returns `true` if a file exists at the path.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        FilePath::new(path).is_ok_and(|p| self.files.contains_key(&p))
    }

    /// Returns the number of files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the tree holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns the total content size in bytes.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.files.values().map(FileEntry::size).sum()
    }

    /// Returns all paths in order.
    #[must_use]
    pub fn paths(&self) -> Vec<&FilePath> {
        self.files.keys().collect()
    }

    /// Iterates over `(path, entry)` pairs in path order.
    pub fn files(&self) -> impl Iterator<Item = (&FilePath, &FileEntry)> {
        self.files.iter()
    }

    /// Returns the distinct parent directories, shallowest first.
    #[must_use]
    pub fn directories(&self) -> Vec<&str> {
        let mut dirs: Vec<&str> = self.files.keys().filter_map(FilePath::parent).collect();
        dirs.sort_unstable();
        dirs.dedup();
        dirs
    }
}
