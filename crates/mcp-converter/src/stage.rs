//! Pipeline stages and stage-tagged failures.

use mcp_sdkgen_core::Error;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// State of a conversion run.
///
/// Runs move strictly forward: `Configured → Loaded → Walked → Described →
/// Generated → Written → Done`. A failure is tagged with the state the run
/// was trying to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Configuration validated
    Configured,
    /// Module graph resolved
    Loaded,
    /// Methods discovered
    Walked,
    /// Methods described
    Described,
    /// Server files rendered
    Generated,
    /// Files and completion marker on disk
    Written,
    /// Run finished
    Done,
}

impl Stage {
    /// Returns the name of the step that leads into this state.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_converter::Stage;
    ///
    /// assert_eq!(Stage::Loaded.step(), "load");
    /// assert_eq!(Stage::Written.step(), "write");
    /// ```
    #[must_use]
    pub const fn step(self) -> &'static str {
        match self {
            Self::Configured => "configure",
            Self::Loaded => "load",
            Self::Walked => "walk",
            Self::Described => "describe",
            Self::Generated => "generate",
            Self::Written => "write",
            Self::Done => "finish",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.step())
    }
}

/// A fatal conversion error and the stage it happened in.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_converter::{ConversionFailure, Stage};
/// use mcp_sdkgen_core::Error;
///
/// let failure = ConversionFailure::new(
///     Stage::Loaded,
///     Error::ModuleLoad {
///         module: "nosuch".to_string(),
///         reason: "no graph dump found".to_string(),
///     },
/// );
///
/// assert_eq!(
///     failure.to_string(),
///     "load stage failed: failed to load module 'nosuch': no graph dump found"
/// );
/// assert!(!failure.is_config_error());
/// ```
#[derive(Debug, Error)]
#[error("{stage} stage failed: {error}")]
pub struct ConversionFailure {
    /// State the run was trying to reach
    pub stage: Stage,
    /// Underlying error
    #[source]
    pub error: Error,
}

impl ConversionFailure {
    /// Tags an error with its stage.
    #[must_use]
    pub const fn new(stage: Stage, error: Error) -> Self {
        Self { stage, error }
    }

    /// Returns `true` if the run was rejected for its configuration.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        self.error.is_config_error()
    }
}

/// Attaches a stage to core results.
pub trait StageContext<T> {
    /// Tags the error, if any, with `stage`.
    ///
    /// # Errors
    ///
    /// Returns the tagged error.
    fn at_stage(self, stage: Stage) -> Result<T, ConversionFailure>;
}

impl<T, E: Into<Error>> StageContext<T> for Result<T, E> {
    fn at_stage(self, stage: Stage) -> Result<T, ConversionFailure> {
        self.map_err(|e| ConversionFailure::new(stage, e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_are_ordered() {
        assert!(Stage::Configured < Stage::Loaded);
        assert!(Stage::Described < Stage::Generated);
        assert!(Stage::Written < Stage::Done);
    }

    #[test]
    fn test_at_stage_tags_error() {
        let result: Result<(), Error> = Err(Error::ConfigError {
            message: "bad".to_string(),
        });
        let failure = result.at_stage(Stage::Configured).unwrap_err();
        assert_eq!(failure.stage, Stage::Configured);
        assert!(failure.is_config_error());
        assert!(std::error::Error::source(&failure).is_some());
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let json = serde_json::to_string(&Stage::Described).unwrap();
        assert_eq!(json, "\"described\"");
    }
}
