//! Filesystem export for output trees.
//!
//! An export runs in four phases:
//!
//! 1. Preflight: create the directory, or refuse a non-empty one unless
//!    overwriting. An overwrite removes the previous completion marker and
//!    every file it lists that the new tree no longer contains
//! 2. Create every parent directory in one pass
//! 3. Write each file to a temp file and rename it into place
//! 4. Write the completion marker, when requested
//!
//! A failure in phases 1-3 leaves no marker behind.
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_files::{ExportOptions, FilesBuilder, is_complete};
//! # use tempfile::TempDir;
//!
//! # let temp = TempDir::new().unwrap();
//! # let output_dir = temp.path().join("github-mcp");
//! let tree = FilesBuilder::new()
//!     .add_file("mcp_server.py", "")
//!     .add_file("tests/test_group_01.py", "")
//!     .build()
//!     .unwrap();
//!
//! let options = ExportOptions::default().with_marker("github", 1);
//! let report = tree.export_to_filesystem(&output_dir, &options).unwrap();
//!
//! assert_eq!(report.files.len(), 2);
//! assert!(output_dir.join("tests/test_group_01.py").exists());
//! assert!(is_complete(&output_dir));
//! ```

use crate::marker::{self, CompletionMarker, MARKER_FILE};
use crate::tree::OutputTree;
use crate::types::{FilePath, FilesError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Options for filesystem export operations.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_files::ExportOptions;
///
/// let options = ExportOptions::default()
///     .with_overwrite(true)
///     .with_marker("github", 12);
/// assert!(options.overwrite);
/// ```
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Use atomic writes (write to temp file, then rename)
    pub atomic: bool,
    /// Allow exporting into a non-empty directory
    pub overwrite: bool,
    /// SDK label and tool count recorded in the completion marker
    pub marker: Option<(String, usize)>,
}

impl ExportOptions {
    /// Creates options with defaults: atomic writes, no overwrite, no marker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            atomic: true,
            overwrite: false,
            marker: None,
        }
    }

    /// Sets whether to use atomic writes.
    #[must_use]
    pub const fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Sets whether a non-empty directory may be written into.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Requests a completion marker after all files are written.
    #[must_use]
    pub fn with_marker(mut self, sdk_name: impl Into<String>, tool_count: usize) -> Self {
        self.marker = Some((sdk_name.into(), tool_count));
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Directory the tree was written to, tilde expanded
    pub directory: PathBuf,
    /// Files written, relative to `directory`, in path order
    pub files: Vec<String>,
    /// Whether the completion marker was written
    pub marker_written: bool,
    /// Files of the previous export that were removed because the new tree
    /// no longer contains them
    pub pruned: Vec<String>,
}

/// State of an export target before anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Missing,
    Empty,
    Occupied,
}

/// Checks that `dir` can receive an export without touching the disk.
///
/// This is the same check [`OutputTree::export_to_filesystem`] runs first,
/// minus directory creation, so callers can reject a bad target before doing
/// expensive work.
///
/// # Errors
///
/// Returns `NotADirectory` if `dir` exists and is not a directory, and
/// `DirectoryNotEmpty` if it holds entries and `overwrite` is off.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_files::filesystem::check_output_dir;
/// # use tempfile::TempDir;
///
/// # let temp = TempDir::new().unwrap();
/// std::fs::write(temp.path().join("notes.txt"), "mine").unwrap();
///
/// assert!(check_output_dir(temp.path(), false).unwrap_err().is_not_empty());
/// assert!(check_output_dir(temp.path(), true).is_ok());
/// assert!(check_output_dir(temp.path().join("fresh"), false).is_ok());
/// ```
pub fn check_output_dir(dir: impl AsRef<Path>, overwrite: bool) -> Result<()> {
    let base = expand_tilde(dir.as_ref())?;
    inspect_target(&base, overwrite).map(|_| ())
}

impl OutputTree {
    /// Exports the tree to a directory on disk.
    ///
    /// A leading `~` in `dir` is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - `dir` exists and is not a directory
    /// - `dir` is non-empty and overwrite is off
    /// - Any directory creation or file write fails
    pub fn export_to_filesystem(
        &self,
        dir: impl AsRef<Path>,
        options: &ExportOptions,
    ) -> Result<ExportReport> {
        let base = expand_tilde(dir.as_ref())?;

        let pruned = self.preflight(&base, options)?;
        self.create_directories(&base)?;

        let mut files = Vec::with_capacity(self.file_count());
        for (path, entry) in self.files() {
            let disk_path = path.to_disk_path(&base);
            write_file(&disk_path, entry.content(), options.atomic)?;
            tracing::debug!("Wrote {}", disk_path.display());
            files.push(path.to_string());
        }

        let marker_written = if let Some((sdk_name, tool_count)) = &options.marker {
            let marker = CompletionMarker::new(sdk_name.clone(), *tool_count, files.clone());
            let marker_path = base.join(MARKER_FILE);
            write_file(&marker_path, &marker::render(&marker, &marker_path)?, options.atomic)?;
            true
        } else {
            false
        };

        tracing::info!(
            "Exported {} files to {}",
            files.len(),
            base.display()
        );

        Ok(ExportReport {
            directory: base,
            files,
            marker_written,
            pruned,
        })
    }

    fn preflight(&self, base: &Path, options: &ExportOptions) -> Result<Vec<String>> {
        match inspect_target(base, options.overwrite)? {
            Target::Missing => {
                fs::create_dir_all(base).map_err(|e| io_error(base, e))?;
                Ok(Vec::new())
            }
            Target::Empty => Ok(Vec::new()),
            Target::Occupied => self.prune_previous_export(base),
        }
    }

    /// Removes the previous marker, then every file it listed that this tree
    /// does not write again. Files the marker never listed are left alone.
    fn prune_previous_export(&self, base: &Path) -> Result<Vec<String>> {
        let previous = match marker::read_marker(base) {
            Ok(Some(previous)) => previous.files,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable completion marker: {}", e);
                Vec::new()
            }
        };

        if marker::remove_stale(base)? {
            tracing::debug!("Removed stale completion marker in {}", base.display());
        }

        let mut pruned = Vec::new();
        for listed in previous {
            let Ok(path) = FilePath::new(&listed) else {
                tracing::warn!("Ignoring invalid path '{}' in completion marker", listed);
                continue;
            };
            if self.exists(path.as_str()) {
                continue;
            }

            let disk_path = path.to_disk_path(base);
            match fs::remove_file(&disk_path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(io_error(&disk_path, e)),
            }
            remove_empty_parents(&disk_path, base);
            tracing::debug!("Removed {} from previous export", disk_path.display());
            pruned.push(path.to_string());
        }

        if !pruned.is_empty() {
            tracing::info!(
                "Removed {} files left by the previous export",
                pruned.len()
            );
        }
        Ok(pruned)
    }

    fn create_directories(&self, base: &Path) -> Result<()> {
        for dir in self.directories() {
            let disk_dir = dir.split('/').fold(base.to_path_buf(), |acc, c| acc.join(c));
            fs::create_dir_all(&disk_dir).map_err(|e| io_error(&disk_dir, e))?;
        }
        Ok(())
    }
}

fn inspect_target(base: &Path, overwrite: bool) -> Result<Target> {
    if !base.exists() {
        return Ok(Target::Missing);
    }

    if !base.is_dir() {
        return Err(FilesError::NotADirectory {
            path: base.display().to_string(),
        });
    }

    let mut entries = fs::read_dir(base).map_err(|e| io_error(base, e))?;
    if entries.next().is_none() {
        return Ok(Target::Empty);
    }

    if !overwrite {
        return Err(FilesError::DirectoryNotEmpty {
            path: base.display().to_string(),
        });
    }
    Ok(Target::Occupied)
}

/// Removes directories between `file` and `base` that became empty.
fn remove_empty_parents(file: &Path, base: &Path) {
    let mut dir = file.parent();
    while let Some(current) = dir
        && current != base
        && fs::remove_dir(current).is_ok()
    {
        dir = current.parent();
    }
}

/// Expands tilde (~) in path to user's home directory.
fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        return Ok(path.to_path_buf());
    };

    if path_str == "~" || path_str.starts_with("~/") {
        let home = dirs::home_dir().ok_or_else(|| FilesError::IoError {
            path: path_str.to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Cannot determine home directory",
            ),
        })?;
        Ok(path_str
            .strip_prefix("~/")
            .map_or_else(|| home.clone(), |rest| home.join(rest)))
    } else {
        Ok(path.to_path_buf())
    }
}

/// Writes file content, atomically when requested.
fn write_file(path: &Path, content: &str, atomic: bool) -> Result<()> {
    if !atomic {
        return fs::write(path, content).map_err(|e| io_error(path, e));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| FilesError::InvalidPath {
            path: path.display().to_string(),
        })?;
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    let result = (|| {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    result.map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        io_error(path, e)
    })
}

fn io_error(path: &Path, source: std::io::Error) -> FilesError {
    FilesError::IoError {
        path: path.display().to_string(),
        source,
    }
}
