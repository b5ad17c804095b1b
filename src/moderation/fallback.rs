// Offline keyword scorer.
//
// Used whenever the remote evaluator is unreachable or returns something we
// can't parse. Deterministic and network-free, so it can never fail or block.
// The keyword lists live in a KeywordTable so the scoring rule can be tested
// independently of the words themselves.

use async_trait::async_trait;

use super::traits::{TrustEvaluator, TrustTag, Verdict};

/// Keyword lists consulted by the fallback scorer.
///
/// Matching is case-insensitive substring membership: each keyword counts
/// at most once no matter how often it appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    pub harmful: Vec<String>,
    pub positive: Vec<String>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            harmful: ["hate", "violence", "abuse", "spam", "scam", "fake"]
                .map(String::from)
                .to_vec(),
            positive: ["love", "peace", "help", "support", "community", "positive"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl KeywordTable {
    /// Count how many harmful and positive keywords appear in `text`.
    pub fn count_matches(&self, text: &str) -> (usize, usize) {
        let lower = text.to_lowercase();
        (
            count_present(&lower, &self.harmful),
            count_present(&lower, &self.positive),
        )
    }
}

fn count_present(lower: &str, words: &[String]) -> usize {
    words
        .iter()
        .filter(|w| !w.is_empty() && lower.contains(w.to_lowercase().as_str()))
        .count()
}

/// Score keyword counts into a Verdict.
///
/// Harmful keywords take precedence over positive ones; text with neither is
/// neutral (75, caution).
pub fn score_counts(harmful: usize, positive: usize) -> Verdict {
    // Counts are small in practice; saturate so huge tables can't overflow.
    let h = harmful.min(u32::MAX as usize) as i64;
    let p = positive.min(u32::MAX as usize) as i64;

    let (score, tag, explanation) = if h > 0 {
        let tag = if h > 2 {
            TrustTag::Unsafe
        } else {
            TrustTag::Caution
        };
        (
            (100 - 20 * h).max(30),
            tag,
            "Content contains potentially harmful keywords",
        )
    } else if p > 0 {
        (
            (70 + 5 * p).min(95),
            TrustTag::Safe,
            "Content appears positive and community-friendly",
        )
    } else {
        (75, TrustTag::Caution, "Content appears neutral")
    };

    // Every branch lands in 30..=95.
    Verdict::new(score, tag, explanation).unwrap_or_else(|_| Verdict::unconfigured())
}

/// Keyword-based fallback scorer.
#[derive(Debug, Clone, Default)]
pub struct FallbackScorer {
    table: KeywordTable,
}

impl FallbackScorer {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Score text without touching the network.
    pub fn score(&self, text: &str) -> Verdict {
        let (harmful, positive) = self.table.count_matches(text);
        score_counts(harmful, positive)
    }
}

#[async_trait]
impl TrustEvaluator for FallbackScorer {
    async fn evaluate(&self, text: &str) -> Verdict {
        self.score(text)
    }
}
