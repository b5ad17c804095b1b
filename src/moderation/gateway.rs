// Moderation gateway: the single entry point callers use.
//
// Forwards text to the configured evaluator and returns its verdict as-is.
// The evaluator trait is total, so the gateway never fails; the only bound on
// how long it takes is the remote client's timeout.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::info;

use super::fallback::FallbackScorer;
use super::openrouter::OpenRouterEvaluator;
use super::traits::{TrustEvaluator, Verdict};
use crate::config::ModerationConfig;

/// Default number of texts evaluated at once by `evaluate_batch`.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;

#[derive(Clone)]
pub struct ModerationGateway {
    evaluator: Arc<dyn TrustEvaluator>,
}

impl ModerationGateway {
    /// Wrap any evaluator. Tests use this to substitute fakes.
    pub fn new(evaluator: Arc<dyn TrustEvaluator>) -> Self {
        Self { evaluator }
    }

    /// Build the standard gateway: OpenRouter with the default keyword fallback.
    pub fn from_config(config: ModerationConfig) -> anyhow::Result<Self> {
        if config.has_credential() {
            info!(model = %config.model, "Using OpenRouter moderation");
        } else {
            info!("No OpenRouter credential, moderation runs degraded");
        }
        let evaluator = OpenRouterEvaluator::new(config, FallbackScorer::default())?;
        Ok(Self::new(Arc::new(evaluator)))
    }

    /// Produce a verdict for `text`. Never fails.
    pub async fn evaluate(&self, text: &str) -> Verdict {
        self.evaluator.evaluate(text).await
    }

    /// Evaluate several texts with bounded concurrency, preserving order.
    ///
    /// Each evaluation is independent; one slow remote call only delays its
    /// own slot.
    pub async fn evaluate_batch(&self, texts: &[String], concurrency: usize) -> Vec<Verdict> {
        stream::iter(texts)
            .map(|text| self.evaluate(text))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}
