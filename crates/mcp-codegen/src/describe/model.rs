//! Chat-completion describe strategy.
//!
//! Sends one prompt per method to an OpenAI-compatible
//! `POST {base_url}/chat/completions` endpoint and parses the reply as
//! `{"category": ..., "description": ...}`.
//!
//! Connection errors, `429` and `5xx` responses are retried with exponential
//! backoff. Other statuses and malformed replies fail at once. The caller's
//! per-method timeout covers every attempt of a method.

use crate::template_engine::TemplateEngine;
use mcp_sdkgen_core::{
    DescribedMethod, DescriptionSource, DiscoveredMethod, Error, ModelConfig, Parameter, Result,
};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are an expert in SDK APIs. You write concise, accurate \
descriptions of SDK methods for AI assistants that call them as MCP tools.";

const CUSTOM_PROMPT: &str = "describe/custom_prompt";
const DEFAULT_PROMPT: &str = "describe/prompt";

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Structured category and description parsed from a model reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelReply {
    /// Short functional category
    pub category: String,
    /// One-sentence description
    pub description: String,
}

#[derive(Debug, Serialize)]
struct PromptContext<'a> {
    name: &'a str,
    owner: &'a str,
    signature: String,
    doc: &'a str,
    sdk_name: &'a str,
}

/// Failure of one request attempt.
#[derive(Debug)]
struct AttemptError {
    error: Error,
    transient: bool,
}

impl AttemptError {
    const fn transient(error: Error) -> Self {
        Self {
            error,
            transient: true,
        }
    }

    const fn permanent(error: Error) -> Self {
        Self {
            error,
            transient: false,
        }
    }
}

/// Model describe strategy.
///
/// Holds the endpoint, the bearer credential, and the prompt template for
/// one run. Requests are independent, so one describer is shared by every
/// concurrent request of the describe stage.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_codegen::describe::ModelDescriber;
/// use mcp_sdkgen_core::ModelConfig;
///
/// let config = ModelConfig::new("sk-test").with_base_url("http://127.0.0.1:9/v1/");
/// let describer = ModelDescriber::new(&config, "github", None).unwrap();
/// assert_eq!(describer.endpoint(), "http://127.0.0.1:9/v1/chat/completions");
/// ```
#[derive(Debug)]
pub struct ModelDescriber {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    model: String,
    timeout: Duration,
    max_concurrent_requests: usize,
    max_retries: u32,
    retry_backoff: Duration,
    sdk_name: String,
    prompts: TemplateEngine<'static>,
    prompt_name: &'static str,
}

impl ModelDescriber {
    /// Creates a describer from model settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the custom prompt template does not parse,
    /// does not render against a sample method (for example because it
    /// names an unknown variable), or the HTTP client cannot be built.
    pub fn new(
        config: &ModelConfig,
        sdk_name: impl Into<String>,
        prompt_template: Option<&str>,
    ) -> Result<Self> {
        let mut prompts = TemplateEngine::new()?;
        let prompt_name = match prompt_template {
            Some(template) => {
                prompts
                    .register_template_string(CUSTOM_PROMPT, template)
                    .map_err(|e| Error::ConfigError {
                        message: format!("invalid prompt template: {e}"),
                    })?;
                CUSTOM_PROMPT
            }
            None => DEFAULT_PROMPT,
        };

        let client = reqwest::Client::builder()
            .user_agent(concat!("mcp-sdkgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::ConfigError {
                message: format!("cannot build HTTP client: {e}"),
            })?;

        let describer = Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: SecretString::from(config.api_key.expose_secret().to_owned()),
            model: config.model.clone(),
            timeout: config.timeout,
            max_concurrent_requests: config.max_concurrent_requests,
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff,
            sdk_name: sdk_name.into(),
            prompts,
            prompt_name,
        };

        let sample = DiscoveredMethod::new("sdk.Client", "get_item")
            .with_parameters(vec![Parameter::required("item_id").with_type("str")])
            .with_doc("Get one item.");
        describer
            .build_prompt(&sample)
            .map_err(|e| Error::ConfigError {
                message: format!("prompt template does not render: {e}"),
            })?;

        Ok(describer)
    }

    /// Returns the full chat-completion URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the bound on concurrent requests.
    #[must_use]
    pub const fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
    }

    /// Builds the user prompt for one method.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the prompt template fails to render.
    pub fn build_prompt(&self, method: &DiscoveredMethod) -> Result<String> {
        let context = PromptContext {
            name: &method.name,
            owner: &method.owner_path,
            signature: method.signature(),
            doc: &method.doc,
            sdk_name: &self.sdk_name,
        };
        self.prompts.render(self.prompt_name, &context)
    }

    /// Describes one method, retrying transient failures, without timeout or
    /// fallback.
    ///
    /// # Errors
    ///
    /// Returns `DescribeFailure` on non-success status, malformed replies,
    /// and transport errors that outlast the retries.
    pub async fn describe(&self, method: &DiscoveredMethod) -> Result<DescribedMethod> {
        let reply = self.request(method).await?;
        Ok(DescribedMethod {
            method: method.clone(),
            category: reply.category,
            description: reply.description,
            source: DescriptionSource::Model,
        })
    }

    async fn request(&self, method: &DiscoveredMethod) -> Result<ModelReply> {
        let qualified = method.qualified_name();
        let prompt = self
            .build_prompt(method)
            .map_err(|e| failure(&qualified, format!("prompt rendering failed: {e}"), None))?;

        let mut retries = 0;
        loop {
            match self.attempt(&qualified, &prompt).await {
                Ok(reply) => return Ok(reply),
                Err(AttemptError {
                    error,
                    transient: true,
                }) if retries < self.max_retries => {
                    let delay = self.backoff(retries);
                    debug!(
                        "Attempt {} for {} failed, retrying in {:?}: {}",
                        retries + 1,
                        qualified,
                        delay,
                        error
                    );
                    tokio::time::sleep(delay).await;
                    retries += 1;
                }
                Err(AttemptError { error, .. }) => return Err(error),
            }
        }
    }

    /// Delay before retry number `retry` (zero based).
    const fn backoff(&self, retry: u32) -> Duration {
        self.retry_backoff
            .saturating_mul(2u32.saturating_pow(retry))
    }

    async fn attempt(
        &self,
        qualified: &str,
        prompt: &str,
    ) -> std::result::Result<ModelReply, AttemptError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.1,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AttemptError::transient(failure(
                    qualified,
                    format!("request to model endpoint failed: {e}"),
                    Some(Box::new(e)),
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let transient = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            let body = response.text().await.unwrap_or_default();
            let error = failure(
                qualified,
                format!("model endpoint returned {status}: {}", truncate(&body, 200)),
                None,
            );
            return Err(AttemptError { error, transient });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            AttemptError::permanent(failure(
                qualified,
                format!("cannot decode chat response: {e}"),
                Some(Box::new(e)),
            ))
        })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AttemptError::permanent(failure(
                    qualified,
                    "chat response has no content".to_string(),
                    None,
                ))
            })?;

        parse_reply(&content)
            .map_err(|e| AttemptError::permanent(failure(qualified, e.to_string(), None)))
    }
}

/// Parses the model's reply text into a [`ModelReply`].
///
/// Accepts a fenced ```` ```json ```` block or the first `{` … last `}` span.
/// The category is normalized to lowercase kebab-case and the description to
/// a single line. Empty fields are rejected.
///
/// # Errors
///
/// Returns `SerializationError` if no valid object is found or a field is
/// empty.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_codegen::describe::parse_reply;
///
/// let reply = parse_reply(r#"Sure! {"category": "Repository Management", "description": "Gets a repo."}"#).unwrap();
/// assert_eq!(reply.category, "repository-management");
/// assert_eq!(reply.description, "Gets a repo.");
///
/// assert!(parse_reply(r#"{"category": "", "description": "x"}"#).is_err());
/// ```
pub fn parse_reply(text: &str) -> Result<ModelReply> {
    let json_str = extract_json(text);

    let reply: ModelReply =
        serde_json::from_str(json_str).map_err(|e| Error::SerializationError {
            message: format!("Failed to parse model reply: {e}"),
            source: Some(e),
        })?;

    let category = normalize_category(&reply.category);
    let description = reply.description.split_whitespace().collect::<Vec<_>>().join(" ");

    if category.is_empty() || description.is_empty() {
        return Err(Error::SerializationError {
            message: "model reply has an empty category or description".to_string(),
            source: None,
        });
    }

    Ok(ModelReply {
        category,
        description,
    })
}

fn extract_json(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let content_start = start + 7;
        let rest = &text[content_start..];
        return rest.find("```").map_or(rest, |end| &rest[..end]).trim();
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

fn normalize_category(category: &str) -> String {
    category
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

fn failure(
    method: &str,
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
) -> Error {
    Error::DescribeFailure {
        method: method.to_string(),
        message,
        source,
    }
}
