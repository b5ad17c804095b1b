// Publication gate: turns a verdict into accept/reject.
//
// Two outcomes only. Rejection is a business result, not an error: it
// carries the score and explanation so the submitter can see why. Accepted
// posts carry a ModerationRecord for the caller to persist with the post.

use serde::Serialize;
use tracing::info;

use super::submission::{Submission, SubmissionError};
use crate::moderation::{ModerationGateway, TrustTag, Verdict};

/// Scores below this are rejected.
pub const ACCEPT_THRESHOLD: u8 = 60;

/// Scores at or above this mark an accepted post as verified.
pub const VERIFIED_THRESHOLD: u8 = 90;

/// The accept/reject outcome for one submission. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationDecision {
    pub accepted: bool,
    pub verified: bool,
    pub trust_score: u8,
    pub trust_tag: TrustTag,
    pub explanation: String,
}

/// Moderation fields stored alongside an accepted post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModerationRecord {
    pub ai_verified: bool,
    pub ai_trust_score: u8,
    pub ai_explanation: String,
}

impl PublicationDecision {
    /// Apply the thresholds to a verdict.
    pub fn from_verdict(verdict: &Verdict) -> Self {
        let score = verdict.trust_score();
        let accepted = score >= ACCEPT_THRESHOLD;
        Self {
            accepted,
            verified: accepted && score >= VERIFIED_THRESHOLD,
            trust_score: score,
            trust_tag: verdict.trust_tag(),
            explanation: verdict.explanation().to_string(),
        }
    }

    /// Message shown to the submitter, only for rejections.
    pub fn rejection_message(&self) -> Option<String> {
        (!self.accepted).then(|| {
            format!(
                "Post rejected by AI moderation. Trust score: {}. Explanation: {}",
                self.trust_score, self.explanation
            )
        })
    }

    /// Fields to persist with the post, only for acceptances.
    pub fn record(&self) -> Option<ModerationRecord> {
        self.accepted.then(|| ModerationRecord {
            ai_verified: self.verified,
            ai_trust_score: self.trust_score,
            ai_explanation: self.explanation.clone(),
        })
    }
}

/// Runs moderation on a submission and decides publication.
#[derive(Clone)]
pub struct PublicationGate {
    gateway: ModerationGateway,
}

impl PublicationGate {
    pub fn new(gateway: ModerationGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &ModerationGateway {
        &self.gateway
    }

    /// Validate, moderate the text (possibly empty), and decide.
    ///
    /// Only validation can fail. Image-only posts are moderated on their
    /// empty text, which scores neutral and passes.
    pub async fn review(
        &self,
        submission: &Submission,
    ) -> Result<PublicationDecision, SubmissionError> {
        submission.validate()?;

        let verdict = self.gateway.evaluate(&submission.text).await;
        let decision = PublicationDecision::from_verdict(&verdict);

        info!(
            accepted = decision.accepted,
            verified = decision.verified,
            trust_score = decision.trust_score,
            "Publication decision"
        );

        Ok(decision)
    }
}
