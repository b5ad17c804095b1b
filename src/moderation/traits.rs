// Verdict types and the evaluator trait.
//
// A Verdict is the {score, tag, explanation} result of evaluating one piece
// of text. Every evaluator (remote, fallback, or a test fake) produces one
// through the TrustEvaluator trait, and nothing past that trait can fail.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Highest possible trust score.
pub const MAX_TRUST_SCORE: u8 = 100;

/// Symbolic band summarizing a trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrustTag {
    #[serde(rename = "🟢", alias = "safe")]
    Safe,
    #[serde(rename = "🟡", alias = "caution")]
    Caution,
    #[serde(rename = "🔴", alias = "unsafe")]
    Unsafe,
}

impl TrustTag {
    /// The symbol used on the wire and in the moderation prompt.
    pub fn symbol(&self) -> &'static str {
        match self {
            TrustTag::Safe => "🟢",
            TrustTag::Caution => "🟡",
            TrustTag::Unsafe => "🔴",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustTag::Safe => "safe",
            TrustTag::Caution => "caution",
            TrustTag::Unsafe => "unsafe",
        }
    }

    /// Parse either the symbol or the name (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw {
            "🟢" => return Some(TrustTag::Safe),
            "🟡" => return Some(TrustTag::Caution),
            "🔴" => return Some(TrustTag::Unsafe),
            _ => {}
        }
        match raw.to_ascii_lowercase().as_str() {
            "safe" => Some(TrustTag::Safe),
            "caution" => Some(TrustTag::Caution),
            "unsafe" => Some(TrustTag::Unsafe),
            _ => None,
        }
    }
}

impl fmt::Display for TrustTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a verdict would carry a score outside 0-100.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("trust score {0} is outside 0-100")]
pub struct ScoreOutOfRange(pub i64);

/// The result of evaluating a single piece of text.
///
/// Fields are private so a Verdict can only exist with an in-range score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    trust_score: u8,
    trust_tag: TrustTag,
    explanation: String,
}

impl Verdict {
    pub fn new(
        trust_score: i64,
        trust_tag: TrustTag,
        explanation: impl Into<String>,
    ) -> Result<Self, ScoreOutOfRange> {
        if !(0..=MAX_TRUST_SCORE as i64).contains(&trust_score) {
            return Err(ScoreOutOfRange(trust_score));
        }
        Ok(Self {
            trust_score: trust_score as u8,
            trust_tag,
            explanation: explanation.into(),
        })
    }

    /// Fixed verdict for when no remote credential is configured.
    ///
    /// Distinct from the keyword fallback: this means "not attempted",
    /// not "attempted and failed".
    pub fn unconfigured() -> Self {
        Self {
            trust_score: 75,
            trust_tag: TrustTag::Caution,
            explanation: "AI moderation unavailable - no API key configured".to_string(),
        }
    }

    pub fn trust_score(&self) -> u8 {
        self.trust_score
    }

    pub fn trust_tag(&self) -> TrustTag {
        self.trust_tag
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Anything that can produce a Verdict for a text.
///
/// Implementations must be total: failures are handled internally and still
/// yield a Verdict. Async because the main implementation makes an HTTP call.
#[async_trait]
pub trait TrustEvaluator: Send + Sync {
    async fn evaluate(&self, text: &str) -> Verdict;
}
