//! Run summary.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of a finished conversion.
///
/// Non-fatal degradations show up here as counts only: skipped attributes
/// and methods that fell back to the heuristic describer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    /// SDK label
    pub sdk_name: String,
    /// Dotted module path that was converted
    pub sdk_module: String,
    /// Where the module graph came from
    pub origin: String,
    /// Modules visited, the root included
    pub modules_seen: usize,
    /// Classes visited
    pub classes_seen: usize,
    /// Eligible methods found by the walk
    pub methods_discovered: usize,
    /// Attributes and methods skipped during the walk
    pub skipped: usize,
    /// Tools in the generated server
    pub tools_emitted: usize,
    /// Tool groups (one test skeleton each when tests are generated)
    pub tool_groups: usize,
    /// Describe strategy of the run (`model` or `heuristic`)
    pub strategy: String,
    /// Methods described by the model
    pub model_described: usize,
    /// Methods described by the heuristic, fallbacks included
    pub heuristic_described: usize,
    /// The describe stage was cancelled
    pub cancelled: bool,
    /// Output directory
    pub output_dir: PathBuf,
    /// Files written, relative to `output_dir`
    pub files: Vec<String>,
    /// Wall time of the run in milliseconds
    pub elapsed_ms: u64,
}

impl ConversionResult {
    /// Returns the wall time of the run.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    /// Returns `true` if every described method came from the heuristic
    /// although a model was configured.
    #[must_use]
    pub fn fully_degraded(&self) -> bool {
        self.strategy == "model" && self.model_described == 0 && self.heuristic_described > 0
    }
}
