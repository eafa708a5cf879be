//! CLI-specific value types.
//!
//! Strong types for command-line concepts shared by the binary and by
//! callers that drive the converter programmatically.
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_core::cli::{ExitCode, OutputFormat, SdkModulePath};
//!
//! let format = OutputFormat::Pretty;
//! assert_eq!(format.as_str(), "pretty");
//!
//! let code = ExitCode::SUCCESS;
//! assert_eq!(code.as_i32(), 0);
//!
//! let module = SdkModulePath::new("azure.mgmt.resource").unwrap();
//! assert_eq!(module.root(), "azure");
//! ```

use crate::config::is_dotted_identifier;
use std::fmt;
use std::str::FromStr;

/// CLI output format.
///
/// All formats carry the same information with different presentation.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_core::cli::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON output for machine parsing
    Json,
    /// Plain text output for scripts
    Text,
    /// Colored output for human reading
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(crate::Error::InvalidArgument(format!(
                "invalid output format: '{s}' (expected: json, text, or pretty)"
            ))),
        }
    }
}

/// Process exit code.
///
/// `0` success, `1` a conversion failed in some stage, `2` the invocation
/// itself was invalid.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_core::cli::ExitCode;
///
/// assert!(ExitCode::SUCCESS.is_success());
/// assert_eq!(ExitCode::INVALID_INPUT.as_i32(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful run.
    pub const SUCCESS: Self = Self(0);

    /// A conversion stage failed.
    pub const ERROR: Self = Self(1);

    /// Invalid arguments or configuration.
    pub const INVALID_INPUT: Self = Self(2);

    /// Creates an exit code from an integer value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Maps a library error to the exit code the binary reports for it.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_core::{cli::ExitCode, Error};
    ///
    /// let err = Error::ConfigError { message: "bad".into() };
    /// assert_eq!(ExitCode::for_error(&err), ExitCode::INVALID_INPUT);
    ///
    /// let err = Error::EmptyResult { module: "tiny".into() };
    /// assert_eq!(ExitCode::for_error(&err), ExitCode::ERROR);
    /// ```
    #[must_use]
    pub const fn for_error(error: &crate::Error) -> Self {
        match error {
            crate::Error::ConfigError { .. } | crate::Error::InvalidArgument(_) => {
                Self::INVALID_INPUT
            }
            _ => Self::ERROR,
        }
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated dotted SDK module path.
///
/// Rejects anything that is not a sequence of identifiers joined by dots,
/// which also keeps paths such as `../etc` out of graph-dump lookups.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_core::cli::SdkModulePath;
///
/// assert!(SdkModulePath::new("kubernetes.client").is_ok());
/// assert!(SdkModulePath::new("../etc/passwd").is_err());
/// assert!(SdkModulePath::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SdkModulePath(String);

impl SdkModulePath {
    /// Creates a validated module path. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the trimmed value is not a dotted
    /// identifier path.
    pub fn new(s: impl Into<String>) -> crate::Result<Self> {
        let s = s.into();
        let trimmed = s.trim();

        if !is_dotted_identifier(trimmed) {
            return Err(crate::Error::InvalidArgument(format!(
                "invalid SDK module path: '{trimmed}' (expected identifiers joined by '.')"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the module path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the top-level package segment.
    #[must_use]
    pub fn root(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for SdkModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SdkModulePath {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
