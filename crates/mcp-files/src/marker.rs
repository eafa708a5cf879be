//! Completion marker.
//!
//! The marker file is written after every other file of an export. An output
//! directory without it was either never finished or belongs to a failed run.

use crate::types::{FilesError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// File name of the completion marker.
pub const MARKER_FILE: &str = ".mcp-sdkgen-complete";

/// Contents of the completion marker.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_files::CompletionMarker;
///
/// let marker = CompletionMarker::new("github", 42, vec!["mcp_server.py".to_string()]);
/// assert_eq!(marker.tool_count, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMarker {
    /// SDK label of the run
    pub sdk_name: String,
    /// Number of generated tools
    pub tool_count: usize,
    /// Files written, relative to the output directory
    pub files: Vec<String>,
    /// Time the export finished
    pub completed_at: DateTime<Utc>,
    /// Generator version
    pub generator_version: String,
}

impl CompletionMarker {
    /// Creates a marker stamped with the current time.
    #[must_use]
    pub fn new(sdk_name: impl Into<String>, tool_count: usize, files: Vec<String>) -> Self {
        Self {
            sdk_name: sdk_name.into(),
            tool_count,
            files,
            completed_at: Utc::now(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Reads the marker of an output directory.
///
/// Returns `Ok(None)` when the directory has no marker.
///
/// # Errors
///
/// Returns `IoError` if the marker cannot be read or `MarkerError` if it is
/// not valid marker JSON.
pub fn read_marker(dir: impl AsRef<Path>) -> Result<Option<CompletionMarker>> {
    let path = dir.as_ref().join(MARKER_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(FilesError::IoError {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| FilesError::MarkerError {
            path: path.display().to_string(),
            source: e,
        })
}

/// Returns `true` if the directory carries a completion marker.
#[must_use]
pub fn is_complete(dir: impl AsRef<Path>) -> bool {
    dir.as_ref().join(MARKER_FILE).is_file()
}

/// Serializes a marker as pretty JSON with a trailing newline.
pub fn render(marker: &CompletionMarker, path: &Path) -> Result<String> {
    serde_json::to_string_pretty(marker)
        .map(|mut json| {
            json.push('\n');
            json
        })
        .map_err(|e| FilesError::MarkerError {
            path: path.display().to_string(),
            source: e,
        })
}

/// Removes the marker of `dir`, returning whether one existed.
pub fn remove_stale(dir: &Path) -> Result<bool> {
    let path = dir.join(MARKER_FILE);
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FilesError::IoError {
            path: path.display().to_string(),
            source: e,
        }),
    }
}
