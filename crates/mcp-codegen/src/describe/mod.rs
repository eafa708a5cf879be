//! Method describer.
//!
//! Gives every discovered method a category and a one-sentence description.
//! The strategy is chosen once per run:
//!
//! - [`DescribeStrategy::Heuristic`] looks the name up in a prefix table.
//! - [`DescribeStrategy::Model`] asks a chat-completion endpoint, with up to
//!   `max_concurrent_requests` requests in flight and an independent timeout
//!   per request. Any failure (transport, status, timeout, malformed reply)
//!   falls back to the heuristic for that one method.
//!
//! Cancelling the token passed to [`DescribeStrategy::describe_all`] stops new
//! requests, abandons in-flight ones, and describes everything left
//! heuristically. The batch always completes.
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_codegen::describe::DescribeStrategy;
//! use mcp_sdkgen_core::{ConversionConfig, DiscoveredMethod};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = ConversionConfig::builder("sdk", "sdk", "out").build().unwrap();
//! let strategy = DescribeStrategy::from_config(&config).unwrap();
//!
//! let methods = vec![DiscoveredMethod::new("sdk.Widget", "get_widget")];
//! let outcome = strategy.describe_all(methods, &CancellationToken::new()).await;
//!
//! assert_eq!(outcome.methods[0].category, "retrieval");
//! assert_eq!(outcome.heuristic_count, 1);
//! # }
//! ```

mod heuristic;
mod model;

pub use heuristic::{HeuristicDescriber, OTHER_CATEGORY};
pub use model::{ModelDescriber, ModelReply, parse_reply};

use mcp_sdkgen_core::{ConversionConfig, DescribedMethod, DescriptionSource, DiscoveredMethod, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Describe strategy for one run.
#[derive(Debug, Clone)]
pub enum DescribeStrategy {
    /// Remote model with heuristic fallback
    Model {
        /// Shared model client
        describer: Arc<ModelDescriber>,
        /// Fallback for failed requests
        fallback: Arc<HeuristicDescriber>,
    },
    /// Prefix table only
    Heuristic(Arc<HeuristicDescriber>),
}

/// Described methods plus per-strategy counts.
#[derive(Debug, Clone, Default)]
pub struct DescribeOutcome {
    /// Described methods, in input order
    pub methods: Vec<DescribedMethod>,
    /// Methods described by the model
    pub model_count: usize,
    /// Methods described by the heuristic, fallbacks included
    pub heuristic_count: usize,
}

impl DescribeOutcome {
    fn from_methods(methods: Vec<DescribedMethod>) -> Self {
        let model_count = methods
            .iter()
            .filter(|m| m.source == DescriptionSource::Model)
            .count();
        let heuristic_count = methods.len() - model_count;
        Self {
            methods,
            model_count,
            heuristic_count,
        }
    }
}

impl DescribeStrategy {
    /// Selects the strategy from the run configuration.
    ///
    /// Model settings present selects [`DescribeStrategy::Model`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the model describer cannot be built.
    pub fn from_config(config: &ConversionConfig) -> Result<Self> {
        let heuristic = Arc::new(HeuristicDescriber::with_custom_mappings(
            &config.custom_mappings,
        ));

        match &config.model {
            Some(model) => {
                let describer = ModelDescriber::new(
                    model,
                    config.sdk_name.clone(),
                    config.prompt_template.as_deref(),
                )?;
                Ok(Self::Model {
                    describer: Arc::new(describer),
                    fallback: heuristic,
                })
            }
            None => Ok(Self::Heuristic(heuristic)),
        }
    }

    /// Returns the strategy name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Model { .. } => "model",
            Self::Heuristic(_) => "heuristic",
        }
    }

    /// Describes a single method.
    ///
    /// Model failures fall back to the heuristic; this never fails.
    pub async fn describe(&self, method: DiscoveredMethod) -> DescribedMethod {
        match self {
            Self::Heuristic(heuristic) => heuristic.describe_owned(method),
            Self::Model {
                describer,
                fallback,
            } => {
                let never = CancellationToken::new();
                describe_with_model(describer, fallback, method, &never).await
            }
        }
    }

    /// Describes a batch of methods, keeping input order.
    pub async fn describe_all(
        &self,
        methods: Vec<DiscoveredMethod>,
        cancel: &CancellationToken,
    ) -> DescribeOutcome {
        let total = methods.len();
        info!("Describing {} methods with the {} strategy", total, self.name());

        let described = match self {
            Self::Heuristic(heuristic) => methods
                .into_iter()
                .map(|m| heuristic.describe_owned(m))
                .collect(),
            Self::Model {
                describer,
                fallback,
            } => describe_concurrently(describer, fallback, methods, cancel).await,
        };

        let outcome = DescribeOutcome::from_methods(described);
        info!(
            "Described {} methods ({} model, {} heuristic)",
            total, outcome.model_count, outcome.heuristic_count
        );
        outcome
    }
}

async fn describe_concurrently(
    describer: &Arc<ModelDescriber>,
    fallback: &Arc<HeuristicDescriber>,
    methods: Vec<DiscoveredMethod>,
    cancel: &CancellationToken,
) -> Vec<DescribedMethod> {
    let semaphore = Arc::new(Semaphore::new(describer.max_concurrent_requests()));
    let mut tasks = JoinSet::new();

    for (index, method) in methods.iter().cloned().enumerate() {
        let describer = Arc::clone(describer);
        let fallback = Arc::clone(fallback);
        let semaphore = Arc::clone(&semaphore);
        let cancel = cancel.clone();

        tasks.spawn(async move {
            let permit = tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                permit = semaphore.acquire_owned() => permit.ok(),
            };

            let described = match permit {
                Some(_permit) => describe_with_model(&describer, &fallback, method, &cancel).await,
                None => fallback.describe_owned(method),
            };
            (index, described)
        });
    }

    let mut slots: Vec<Option<DescribedMethod>> = vec![None; methods.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, described)) => slots[index] = Some(described),
            Err(e) => debug!("Describe task failed: {}", e),
        }
    }

    // A slot is only empty if its task panicked.
    let heuristic = Arc::clone(fallback);
    slots
        .into_iter()
        .zip(methods)
        .map(|(slot, method)| slot.unwrap_or_else(|| heuristic.describe_owned(method)))
        .collect()
}

async fn describe_with_model(
    describer: &ModelDescriber,
    fallback: &HeuristicDescriber,
    method: DiscoveredMethod,
    cancel: &CancellationToken,
) -> DescribedMethod {
    if cancel.is_cancelled() {
        return fallback.describe_owned(method);
    }

    let result = tokio::select! {
        biased;
        () = cancel.cancelled() => None,
        result = tokio::time::timeout(describer.timeout(), describer.describe(&method)) => Some(result),
    };

    let Some(result) = result else {
        debug!("Describe of '{}' abandoned: cancelled", method.qualified_name());
        return fallback.describe_owned(method);
    };

    match result {
        Ok(Ok(described)) => described,
        Ok(Err(e)) => {
            debug!("Falling back to heuristic: {}", e);
            fallback.describe_owned(method)
        }
        Err(_) => {
            debug!(
                "Falling back to heuristic: '{}' timed out after {:?}",
                method.qualified_name(),
                describer.timeout()
            );
            fallback.describe_owned(method)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_heuristic_strategy_keeps_order() {
        let config = ConversionConfig::builder("sdk", "sdk", "out").build().unwrap();
        let strategy = DescribeStrategy::from_config(&config).unwrap();
        assert_eq!(strategy.name(), "heuristic");

        let methods = vec![
            DiscoveredMethod::new("sdk.A", "list_items"),
            DiscoveredMethod::new("sdk.A", "get_item"),
            DiscoveredMethod::new("sdk.A", "frobnicate"),
        ];
        let outcome = strategy.describe_all(methods, &CancellationToken::new()).await;

        let categories: Vec<_> = outcome.methods.iter().map(|m| m.category.as_str()).collect();
        assert_eq!(categories, vec!["listing", "retrieval", "other"]);
        assert_eq!(outcome.model_count, 0);
        assert_eq!(outcome.heuristic_count, 3);
    }

    #[tokio::test]
    async fn test_custom_mappings_reach_strategy() {
        let config = ConversionConfig::builder("k8s", "kubernetes", "out")
            .custom_mapping("read_", "reading")
            .build()
            .unwrap();
        let strategy = DescribeStrategy::from_config(&config).unwrap();
        let described = strategy
            .describe(DiscoveredMethod::new("kubernetes.Api", "read_pod"))
            .await;
        assert_eq!(described.category, "reading");
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let strategy = DescribeStrategy::Heuristic(Arc::new(HeuristicDescriber::new()));
        let outcome = strategy
            .describe_all(Vec::new(), &CancellationToken::new())
            .await;
        assert!(outcome.methods.is_empty());
    }

    #[test]
    fn test_model_selected_with_credentials() {
        let config = ConversionConfig::builder("sdk", "sdk", "out")
            .model(mcp_sdkgen_core::ModelConfig::new("sk-test"))
            .build()
            .unwrap();
        let strategy = DescribeStrategy::from_config(&config).unwrap();
        assert_eq!(strategy.name(), "model");
    }
}
