// Moderation: trait-based evaluators behind a single gateway.
//
// The TrustEvaluator trait defines the interface. OpenRouterEvaluator asks a
// hosted LLM for a verdict and degrades to FallbackScorer (keyword heuristic)
// on any failure, so callers always get a verdict back.

pub mod fallback;
pub mod gateway;
pub mod openrouter;
pub mod prompt;
pub mod traits;

pub use fallback::{FallbackScorer, KeywordTable};
pub use gateway::ModerationGateway;
pub use openrouter::OpenRouterEvaluator;
pub use traits::{TrustEvaluator, TrustTag, Verdict};
