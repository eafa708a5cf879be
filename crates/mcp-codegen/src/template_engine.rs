//! Template engine for code generation using Handlebars.
//!
//! Wraps Handlebars with the built-in server and prompt templates
//! pre-registered. Templates run in strict mode (a missing variable is an
//! error) and without HTML escaping, because the output is Python source,
//! Markdown, and plain text. Values that must be valid Python literals are
//! rendered on the Rust side before they reach a template.
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let rendered = engine
//!     .render("server/requirements", &json!({"package": "PyGithub", "include_pytest": false}))
//!     .unwrap();
//! assert!(rendered.contains("PyGithub"));
//! ```

use handlebars::Handlebars;
use mcp_sdkgen_core::{Error, Result};
use serde::Serialize;

/// Built-in templates: registered name and source.
const BUILTIN_TEMPLATES: [(&str, &str); 7] = [
    (
        "server/mcp_server",
        include_str!("../templates/server/mcp_server.py.hbs"),
    ),
    (
        "server/handler",
        include_str!("../templates/server/handler.py.hbs"),
    ),
    (
        "server/example_usage",
        include_str!("../templates/server/example_usage.py.hbs"),
    ),
    (
        "server/readme",
        include_str!("../templates/server/README.md.hbs"),
    ),
    (
        "server/requirements",
        include_str!("../templates/server/requirements.txt.hbs"),
    ),
    (
        "server/test_group",
        include_str!("../templates/server/test_group.py.hbs"),
    ),
    (
        "describe/prompt",
        include_str!("../templates/describe/prompt.hbs"),
    ),
];

/// Template engine for code generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; the model describer shares one engine
/// across concurrent requests.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails (should not happen
    /// with valid built-in templates).
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, source) in BUILTIN_TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::SerializationError {
                    message: format!("Failed to register template '{name}': {e}"),
                    source: None,
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Renders a registered template with the given context.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - Template rendering fails (including a missing variable)
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::SerializationError {
                message: format!("Template rendering failed: {e}"),
                source: None,
            })
    }

    /// Returns `true` if a template is registered under `name`.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Registers a custom template, replacing any template of the same name.
    ///
    /// # Errors
    ///
    /// Returns error if the template string does not parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_codegen::template_engine::TemplateEngine;
    ///
    /// let mut engine = TemplateEngine::new().unwrap();
    /// engine.register_template_string("custom", "Describe {{name}}").unwrap();
    /// assert!(engine.register_template_string("broken", "{{#if}}").is_err());
    /// ```
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::SerializationError {
                message: format!("Failed to register template '{name}': {e}"),
                source: None,
            })
    }
}
