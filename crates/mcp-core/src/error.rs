//! Error types for SDK-to-MCP server generation.
//!
//! One error enum covers every stage of a conversion run. Only some of the
//! variants are fatal for a run; the rest are recovered where they occur and
//! surface as counters in the run summary:
//!
//! | Variant              | Raised by     | Fatal |
//! |----------------------|---------------|-------|
//! | `ModuleLoad`         | module source | yes   |
//! | `AttributeAccess`    | walker        | no (skipped with warning) |
//! | `DescribeFailure`    | describer     | no (heuristic fallback) |
//! | `NameCollision`      | generator     | yes   |
//! | `OutputWrite`        | writer        | yes   |
//! | `EmptyResult`        | orchestrator  | yes, unless acknowledged |
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_core::{Error, Result};
//!
//! fn resolve(module: &str) -> Result<()> {
//!     if module.is_empty() {
//!         return Err(Error::ModuleLoad {
//!             module: module.to_string(),
//!             reason: "empty module path".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = resolve("").unwrap_err();
//! assert!(err.is_module_load_error());
//! assert!(err.is_fatal());
//! ```

use thiserror::Error;

/// Main error type for SDK-to-MCP conversion.
///
/// All library crates in the workspace return this type, so a failure can
/// travel from any stage up to the orchestrator without conversion glue.
#[derive(Error, Debug)]
pub enum Error {
    /// The target SDK module could not be resolved or parsed.
    #[error("failed to load module '{module}': {reason}")]
    ModuleLoad {
        /// Dotted module path that was requested
        module: String,
        /// Why resolution failed
        reason: String,
    },

    /// A single reflected object raised on inspection.
    ///
    /// Recovered by the walker: the object is recorded as skipped and the
    /// traversal continues.
    #[error("cannot inspect '{path}': {reason}")]
    AttributeAccess {
        /// Dotted path of the object that failed
        path: String,
        /// Error text captured when the object was accessed
        reason: String,
    },

    /// The remote describe strategy failed for one method.
    ///
    /// Recovered by falling back to the heuristic strategy.
    #[error("describe failed for '{method}': {message}")]
    DescribeFailure {
        /// Qualified name of the method being described
        method: String,
        /// Description of the failure
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Two tools would share a final name even after disambiguation.
    #[error("tool name '{tool}' is produced by both '{first}' and '{second}'")]
    NameCollision {
        /// The colliding tool name
        tool: String,
        /// Qualified name of the first method claiming the tool name
        first: String,
        /// Qualified name of the second method claiming the tool name
        second: String,
    },

    /// Writing the generated output failed.
    #[error("cannot write output at '{path}': {message}")]
    OutputWrite {
        /// Path that could not be written
        path: String,
        /// Description of the failure
        message: String,
        /// Optional underlying I/O error
        #[source]
        source: Option<std::io::Error>,
    },

    /// The walk found no eligible methods.
    #[error("no eligible methods found in module '{module}' (check filters and visibility policy)")]
    EmptyResult {
        /// Module that was walked
        module: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Serialization, parsing or template rendering error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Invalid argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if this is a module load error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_core::Error;
    ///
    /// let err = Error::ModuleLoad {
    ///     module: "github".to_string(),
    ///     reason: "not found".to_string(),
    /// };
    /// assert!(err.is_module_load_error());
    /// ```
    #[must_use]
    pub const fn is_module_load_error(&self) -> bool {
        matches!(self, Self::ModuleLoad { .. })
    }

    /// Returns `true` if this is an attribute access error.
    #[must_use]
    pub const fn is_attribute_access_error(&self) -> bool {
        matches!(self, Self::AttributeAccess { .. })
    }

    /// Returns `true` if this is a describe failure.
    #[must_use]
    pub const fn is_describe_failure(&self) -> bool {
        matches!(self, Self::DescribeFailure { .. })
    }

    /// Returns `true` if this is a tool name collision.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_core::Error;
    ///
    /// let err = Error::NameCollision {
    ///     tool: "b_get".to_string(),
    ///     first: "a.b.get".to_string(),
    ///     second: "x.b.get".to_string(),
    /// };
    /// assert!(err.is_name_collision());
    /// ```
    #[must_use]
    pub const fn is_name_collision(&self) -> bool {
        matches!(self, Self::NameCollision { .. })
    }

    /// Returns `true` if this is an output write error.
    #[must_use]
    pub const fn is_output_write_error(&self) -> bool {
        matches!(self, Self::OutputWrite { .. })
    }

    /// Returns `true` if this is an empty walk result.
    #[must_use]
    pub const fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "output directory is empty".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if the error aborts a conversion run.
    ///
    /// Attribute access and describe failures are recovered in place and
    /// never abort a run.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_core::Error;
    ///
    /// let recovered = Error::AttributeAccess {
    ///     path: "sdk.Client.broken".to_string(),
    ///     reason: "ImportError".to_string(),
    /// };
    /// assert!(!recovered.is_fatal());
    /// ```
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::AttributeAccess { .. } | Self::DescribeFailure { .. }
        )
    }
}

/// Result type alias for conversion operations.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_core::{Result, Error};
///
/// fn group_size(value: usize) -> Result<usize> {
///     if value == 0 {
///         return Err(Error::ConfigError {
///             message: "group size must be positive".to_string(),
///         });
///     }
///     Ok(value)
/// }
///
/// assert!(group_size(5).is_ok());
/// assert!(group_size(0).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
