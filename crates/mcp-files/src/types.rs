//! Core types for the output tree.
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_files::{FileEntry, FilePath};
//!
//! let path = FilePath::new("tests/test_group_01.py").unwrap();
//! let file = FileEntry::new("def test(): pass\n");
//!
//! assert_eq!(path.as_str(), "tests/test_group_01.py");
//! assert_eq!(file.content(), "def test(): pass\n");
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while building or exporting an output tree.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_files::FilesError;
///
/// let error = FilesError::DirectoryNotEmpty {
///     path: "out".to_string(),
/// };
///
/// assert!(error.is_not_empty());
/// ```
#[derive(Error, Debug)]
pub enum FilesError {
    /// File not found in the tree
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// Path is empty or malformed
    #[error("Invalid path: {path}")]
    InvalidPath {
        /// The invalid path
        path: String,
    },

    /// Path is absolute (tree paths are relative to the output directory)
    #[error("Path must be relative: {path}")]
    PathNotRelative {
        /// The absolute path
        path: String,
    },

    /// Path contains `..`, `.`, or empty components
    #[error("Path contains invalid components: {path}")]
    InvalidPathComponent {
        /// The path with invalid components
        path: String,
    },

    /// Output directory already holds files and overwrite is off
    #[error("Output directory is not empty: {path} (pass overwrite to replace its contents)")]
    DirectoryNotEmpty {
        /// The output directory
        path: String,
    },

    /// Output location exists but is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The offending path
        path: String,
    },

    /// I/O error during export
    #[error("I/O error at {path}: {source}")]
    IoError {
        /// Path where the error occurred
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Completion marker could not be serialized or parsed
    #[error("Invalid completion marker at {path}: {source}")]
    MarkerError {
        /// Marker path
        path: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },
}

impl FilesError {
    /// Returns `true` if this is a file not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Returns `true` if this is an invalid path error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_files::FilesError;
    ///
    /// let error = FilesError::PathNotRelative {
    ///     path: "/etc/passwd".to_string(),
    /// };
    ///
    /// assert!(error.is_invalid_path());
    /// ```
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. } | Self::PathNotRelative { .. } | Self::InvalidPathComponent { .. }
        )
    }

    /// Returns `true` if the output directory was non-empty.
    #[must_use]
    pub const fn is_not_empty(&self) -> bool {
        matches!(self, Self::DirectoryNotEmpty { .. })
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }

    fn path(&self) -> &str {
        match self {
            Self::FileNotFound { path }
            | Self::InvalidPath { path }
            | Self::PathNotRelative { path }
            | Self::InvalidPathComponent { path }
            | Self::DirectoryNotEmpty { path }
            | Self::NotADirectory { path }
            | Self::IoError { path, .. }
            | Self::MarkerError { path, .. } => path,
        }
    }
}

/// Every files error surfaces as an output write failure of the run.
impl From<FilesError> for mcp_sdkgen_core::Error {
    fn from(error: FilesError) -> Self {
        let path = error.path().to_string();
        let message = error.to_string();
        let source = match error {
            FilesError::IoError { source, .. } => Some(source),
            _ => None,
        };
        Self::OutputWrite {
            path,
            message,
            source,
        }
    }
}

/// Result type for output tree operations.
pub type Result<T> = std::result::Result<T, FilesError>;

/// A validated path inside the output tree.
///
/// Paths are relative, use forward slashes on every platform, and contain no
/// `.`, `..`, or empty components, so a tree can never write outside its
/// output directory.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_files::FilePath;
///
/// assert!(FilePath::new("mcp_server.py").is_ok());
/// assert!(FilePath::new("tests/test_group_01.py").is_ok());
///
/// assert!(FilePath::new("/etc/passwd").is_err());
/// assert!(FilePath::new("../escape.py").is_err());
/// assert!(FilePath::new("a//b.py").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilePath(String);

impl FilePath {
    /// Creates a validated tree path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` for empty or non-UTF-8 paths, `PathNotRelative`
    /// for absolute paths, and `InvalidPathComponent` for `.`, `..`, or
    /// empty components.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.to_str().ok_or_else(|| FilesError::InvalidPath {
            path: path.display().to_string(),
        })?;

        // Backslashes are separators on Windows only; normalize them away
        let normalized = if cfg!(target_os = "windows") {
            path_str.replace('\\', "/")
        } else {
            path_str.to_string()
        };

        if normalized.is_empty() {
            return Err(FilesError::InvalidPath {
                path: String::new(),
            });
        }

        if normalized.starts_with('/') || path.is_absolute() {
            return Err(FilesError::PathNotRelative { path: normalized });
        }

        if normalized
            .split('/')
            .any(|c| c.is_empty() || c == "." || c == "..")
        {
            return Err(FilesError::InvalidPathComponent { path: normalized });
        }

        Ok(Self(normalized))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the parent directory, or `None` for a top-level file.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_files::FilePath;
    ///
    /// let path = FilePath::new("tests/test_group_01.py").unwrap();
    /// assert_eq!(path.parent(), Some("tests"));
    /// assert_eq!(FilePath::new("README.md").unwrap().parent(), None);
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.0.rfind('/').map(|pos| &self.0[..pos])
    }

    /// Resolves the path under a base directory.
    #[must_use]
    pub fn to_disk_path(&self, base: &Path) -> PathBuf {
        self.0.split('/').fold(base.to_path_buf(), |acc, c| acc.join(c))
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File content held by the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    content: String,
}

impl FileEntry {
    /// Creates a file entry.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Returns the file content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the content size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }
}
