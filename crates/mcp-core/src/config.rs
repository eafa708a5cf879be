//! Conversion configuration.
//!
//! [`ConversionConfig`] is the single externally supplied configuration object
//! of a conversion run. Only the SDK name, module path, and output directory
//! are mandatory; everything else has a default.
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_core::ConversionConfig;
//!
//! let config = ConversionConfig::builder("github", "github", "./github-mcp-server")
//!     .include_private_methods(false)
//!     .max_methods_per_tool_group(Some(50))
//!     .filter_pattern("^test_")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.sdk_name, "github");
//! assert!(config.generate_tests);
//! assert!(config.model.is_none());
//! ```

use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Default chat-completion base URL.
pub const DEFAULT_MODEL_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default per-request timeout for the model endpoint.
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on concurrent model requests.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 4;

/// Default number of retries after a transient model endpoint failure.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry; doubled for each further retry.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Remote model settings.
///
/// Presence of a `ModelConfig` in [`ConversionConfig`] selects the model
/// describe strategy for the run.
#[derive(Debug)]
pub struct ModelConfig {
    /// Bearer credential for the endpoint
    pub api_key: SecretString,
    /// Base URL; `/chat/completions` is appended
    pub base_url: String,
    /// Model identifier sent with each request
    pub model: String,
    /// Independent timeout for each request
    pub timeout: Duration,
    /// Upper bound on in-flight requests
    pub max_concurrent_requests: usize,
    /// Retries after a connection error, 429, or 5xx response
    pub max_retries: u32,
    /// Delay before the first retry; doubles with each retry
    pub retry_backoff: Duration,
}

impl ModelConfig {
    /// Creates settings with default endpoint, model, timeout, and fan-out.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_core::ModelConfig;
    ///
    /// let model = ModelConfig::new("sk-test");
    /// assert_eq!(model.max_concurrent_requests, 4);
    /// assert_eq!(model.max_retries, 3);
    /// ```
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_MODEL_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_MODEL_TIMEOUT,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the concurrent request bound.
    #[must_use]
    pub const fn with_max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = max;
        self
    }

    /// Sets how often a transient failure is retried. Zero disables retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the delay before the first retry.
    #[must_use]
    pub const fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(config_error("model API key is empty"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(config_error(format!(
                "model base URL must be http(s): '{}'",
                self.base_url
            )));
        }
        if self.model.trim().is_empty() {
            return Err(config_error("model name is empty"));
        }
        if self.timeout.is_zero() {
            return Err(config_error("model timeout must be positive"));
        }
        if self.max_concurrent_requests == 0 {
            return Err(config_error("max concurrent requests must be positive"));
        }
        Ok(())
    }
}

/// Configuration for one conversion run.
#[derive(Debug)]
pub struct ConversionConfig {
    /// Free-text SDK label used in generated names and docs
    pub sdk_name: String,
    /// Dotted module path to introspect
    pub sdk_module: String,
    /// Directory that receives the generated server
    pub output_dir: PathBuf,
    /// Include single-underscore methods
    pub include_private_methods: bool,
    /// Tools per registry shard / test file; `None` keeps one group
    pub max_methods_per_tool_group: Option<usize>,
    /// Cap on methods passed to the describer, in walk order
    pub method_limit: Option<usize>,
    /// Emit one test skeleton per tool group
    pub generate_tests: bool,
    /// Custom Handlebars prompt template for the model strategy
    pub prompt_template: Option<String>,
    /// Regular expressions; matching method names are skipped
    pub filter_patterns: Vec<String>,
    /// Extra `prefix → category` entries for the heuristic table
    pub custom_mappings: BTreeMap<String, String>,
    /// Remote model settings; `None` selects the heuristic strategy
    pub model: Option<ModelConfig>,
    /// Directories searched for SDK graph dumps
    pub module_search_paths: Vec<PathBuf>,
    /// Package name for the dependency manifest; defaults to the module root
    pub sdk_package: Option<String>,
    /// Allow writing into a non-empty output directory
    pub overwrite: bool,
    /// Treat an empty walk as a warning instead of an error
    pub allow_empty: bool,
}

impl ConversionConfig {
    /// Starts a builder with the three mandatory fields.
    #[must_use]
    pub fn builder(
        sdk_name: impl Into<String>,
        sdk_module: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self {
                sdk_name: sdk_name.into(),
                sdk_module: sdk_module.into(),
                output_dir: output_dir.into(),
                include_private_methods: false,
                max_methods_per_tool_group: None,
                method_limit: None,
                generate_tests: true,
                prompt_template: None,
                filter_patterns: Vec::new(),
                custom_mappings: BTreeMap::new(),
                model: None,
                module_search_paths: Vec::new(),
                sdk_package: None,
                overwrite: false,
                allow_empty: false,
            },
        }
    }

    /// Returns the package name written to the dependency manifest.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_core::ConversionConfig;
    ///
    /// let config = ConversionConfig::builder("azure", "azure.mgmt.resource", "out")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.package_name(), "azure");
    /// ```
    #[must_use]
    pub fn package_name(&self) -> &str {
        self.sdk_package.as_deref().unwrap_or_else(|| {
            self.sdk_module
                .split('.')
                .next()
                .unwrap_or(&self.sdk_module)
        })
    }

    /// Validates field values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a mandatory field is blank, the module path
    /// is not a dotted identifier, a size limit is zero, or the model
    /// settings are unusable.
    pub fn validate(&self) -> Result<()> {
        if self.sdk_name.trim().is_empty() {
            return Err(config_error("SDK name is empty"));
        }
        if !is_dotted_identifier(&self.sdk_module) {
            return Err(config_error(format!(
                "SDK module must be a dotted identifier path: '{}'",
                self.sdk_module
            )));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(config_error("output directory is empty"));
        }
        if self.max_methods_per_tool_group == Some(0) {
            return Err(config_error("max methods per tool group must be positive"));
        }
        if self.method_limit == Some(0) {
            return Err(config_error("method limit must be positive"));
        }
        if let Some(package) = &self.sdk_package
            && (package.trim().is_empty() || package.chars().any(char::is_whitespace))
        {
            return Err(config_error(format!("invalid SDK package name: '{package}'")));
        }
        for prefix in self.custom_mappings.keys() {
            if prefix.is_empty() {
                return Err(config_error("custom mapping prefix is empty"));
            }
        }
        if let Some(model) = &self.model {
            model.validate()?;
        }
        Ok(())
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Includes single-underscore methods.
    #[must_use]
    pub const fn include_private_methods(mut self, include: bool) -> Self {
        self.config.include_private_methods = include;
        self
    }

    /// Sets the tool group size.
    #[must_use]
    pub const fn max_methods_per_tool_group(mut self, max: Option<usize>) -> Self {
        self.config.max_methods_per_tool_group = max;
        self
    }

    /// Caps the number of methods passed to the describer.
    #[must_use]
    pub const fn method_limit(mut self, limit: Option<usize>) -> Self {
        self.config.method_limit = limit;
        self
    }

    /// Enables or disables test skeleton emission.
    #[must_use]
    pub const fn generate_tests(mut self, generate: bool) -> Self {
        self.config.generate_tests = generate;
        self
    }

    /// Sets a custom prompt template.
    #[must_use]
    pub fn prompt_template(mut self, template: impl Into<String>) -> Self {
        self.config.prompt_template = Some(template.into());
        self
    }

    /// Adds a method-name filter pattern.
    #[must_use]
    pub fn filter_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.filter_patterns.push(pattern.into());
        self
    }

    /// Adds several filter patterns.
    #[must_use]
    pub fn filter_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .filter_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds a heuristic `prefix → category` mapping.
    #[must_use]
    pub fn custom_mapping(mut self, prefix: impl Into<String>, category: impl Into<String>) -> Self {
        self.config
            .custom_mappings
            .insert(prefix.into(), category.into());
        self
    }

    /// Selects the model strategy with the given settings.
    #[must_use]
    pub fn model(mut self, model: ModelConfig) -> Self {
        self.config.model = Some(model);
        self
    }

    /// Adds a graph dump search directory.
    #[must_use]
    pub fn module_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.module_search_paths.push(path.into());
        self
    }

    /// Overrides the dependency manifest package name.
    #[must_use]
    pub fn sdk_package(mut self, package: impl Into<String>) -> Self {
        self.config.sdk_package = Some(package.into());
        self
    }

    /// Allows writing into a non-empty output directory.
    #[must_use]
    pub const fn overwrite(mut self, overwrite: bool) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    /// Acknowledges that the SDK may legitimately expose no methods.
    #[must_use]
    pub const fn allow_empty(mut self, allow: bool) -> Self {
        self.config.allow_empty = allow;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build(self) -> Result<ConversionConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn config_error(message: impl Into<String>) -> Error {
    Error::ConfigError {
        message: message.into(),
    }
}

/// Returns `true` for a non-empty dotted path of identifiers.
#[must_use]
pub fn is_dotted_identifier(path: &str) -> bool {
    !path.is_empty()
        && path.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
