// Moderation prompt rendering.
//
// The post text is embedded verbatim. The model is asked for a single JSON
// object and nothing else, which the remote client then parses strictly.

use super::traits::TrustTag;

/// System-role instruction sent alongside the prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a content moderation AI for a social platform.";

/// Render the user-role moderation prompt for a post.
pub fn moderation_prompt(post: &str) -> String {
    let safe = TrustTag::Safe.symbol();
    let caution = TrustTag::Caution.symbol();
    let unsafe_ = TrustTag::Unsafe.symbol();

    format!(
        "You are a content moderation AI for a social platform. Analyze the following post for:\n\
         1. Harmful content (hate speech, violence, harassment)\n\
         2. Misinformation or fake news\n\
         3. Spam or inappropriate content\n\
         4. Overall trustworthiness and community value\n\
         \n\
         Post to analyze: \"{post}\"\n\
         \n\
         Return ONLY a valid JSON object with these exact fields:\n\
         - trust_score: integer between 0-100 (higher = more trustworthy)\n\
         - trust_tag: exactly one of \"{safe}\" (safe), \"{caution}\" (caution), or \"{unsafe_}\" (unsafe)\n\
         - explanation: brief reason for the score (max 100 characters)\n\
         \n\
         Example response format:\n\
         {{\"trust_score\": 85, \"trust_tag\": \"{safe}\", \"explanation\": \"Positive community content\"}}\n\
         \n\
         Respond with ONLY the JSON object, no other text:\n"
    )
}
