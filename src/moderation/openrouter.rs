// OpenRouter chat-completions evaluator.
//
// Sends the moderation prompt as a two-turn chat (system + user), waits at
// most the configured timeout, and parses the first completion's content as
// a single JSON object. There is exactly one attempt per evaluation and one
// strict parse; any failure along the way degrades to the keyword fallback.
//
// API docs: https://openrouter.ai/docs/api-reference/chat-completion

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::fallback::FallbackScorer;
use super::prompt::{moderation_prompt, SYSTEM_INSTRUCTION};
use super::traits::{TrustEvaluator, TrustTag, Verdict};
use crate::config::ModerationConfig;
use crate::output::truncate_chars;

/// Longest explanation kept from a remote verdict.
pub const MAX_REMOTE_EXPLANATION_CHARS: usize = 100;

/// Why the model's content couldn't become a Verdict.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("content is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("content is not a JSON object")]
    NotAnObject,
    #[error("trust_score is missing")]
    MissingScore,
    #[error("trust_score is not an integer: {0}")]
    InvalidScore(Value),
    #[error("trust_score {0} is outside 0-100")]
    ScoreOutOfRange(i64),
}

/// Why a remote evaluation attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("response has no completion content")]
    MissingContent,
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::Timeout
        } else {
            RemoteError::Transport(e)
        }
    }
}

/// Parse a model reply into a Verdict, strictly.
///
/// The trimmed content must be one JSON object with an integer `trust_score`
/// in 0-100. A missing or unrecognized `trust_tag` defaults to caution and a
/// missing `explanation` to a placeholder; long explanations are cut to 100
/// characters.
pub fn parse_verdict(content: &str) -> Result<Verdict, ParseError> {
    let value: Value = serde_json::from_str(content.trim())
        .map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    let object = value.as_object().ok_or(ParseError::NotAnObject)?;

    let score = extract_score(object)?;

    let tag = object
        .get("trust_tag")
        .and_then(Value::as_str)
        .and_then(TrustTag::parse)
        .unwrap_or(TrustTag::Caution);

    let explanation = match object.get("explanation").and_then(Value::as_str) {
        Some(text) => text.chars().take(MAX_REMOTE_EXPLANATION_CHARS).collect(),
        None => "No explanation provided".to_string(),
    };

    Verdict::new(score, tag, explanation).map_err(|e| ParseError::ScoreOutOfRange(e.0))
}

/// Pull `trust_score` out as an integer. Whole-valued floats (85.0) are
/// accepted; fractional ones and strings are not.
fn extract_score(object: &Map<String, Value>) -> Result<i64, ParseError> {
    let raw = object.get("trust_score").ok_or(ParseError::MissingScore)?;
    if let Some(n) = raw.as_i64() {
        return Ok(n);
    }
    match raw.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        // u64 beyond i64 range, or fractional
        Some(f) if f > 0.0 && f.fract() == 0.0 => Err(ParseError::ScoreOutOfRange(i64::MAX)),
        _ => Err(ParseError::InvalidScore(raw.clone())),
    }
}

/// Pull the first completion's message content out of a response body.
pub fn extract_content(body: &ChatResponse) -> Option<&str> {
    body.choices
        .first()
        .and_then(|choice| choice.message.as_ref())
        .and_then(|message| message.content.as_deref())
}

/// Remote evaluator backed by an OpenRouter-compatible endpoint.
pub struct OpenRouterEvaluator {
    client: Client,
    config: ModerationConfig,
    fallback: FallbackScorer,
}

impl OpenRouterEvaluator {
    /// Create an evaluator. The HTTP client enforces the configured timeout
    /// over the whole request, body included.
    pub fn new(config: ModerationConfig, fallback: FallbackScorer) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent("trustgate/0.1 (content-moderation)")
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            config,
            fallback,
        })
    }

    pub fn config(&self) -> &ModerationConfig {
        &self.config
    }

    /// One attempt at a remote verdict. Errors are returned, not handled.
    pub async fn try_remote(&self, api_key: &str, text: &str) -> Result<Verdict, RemoteError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: moderation_prompt(text),
                },
            ],
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "OpenRouter responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status,
                body: truncate_chars(&body, 200),
            });
        }

        // A body that doesn't match the chat shape is the same as missing content.
        let body: ChatResponse = match response.json().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return Err(RemoteError::Timeout),
            Err(_) => return Err(RemoteError::MissingContent),
        };

        let content = extract_content(&body).ok_or(RemoteError::MissingContent)?;
        debug!(content = %truncate_chars(content, 200), "Raw model reply");

        Ok(parse_verdict(content)?)
    }
}

#[async_trait]
impl TrustEvaluator for OpenRouterEvaluator {
    async fn evaluate(&self, text: &str) -> Verdict {
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!("No OpenRouter API key configured, returning unconfigured verdict");
            return Verdict::unconfigured();
        };

        match self.try_remote(api_key, text).await {
            Ok(verdict) => {
                debug!(
                    trust_score = verdict.trust_score(),
                    trust_tag = %verdict.trust_tag(),
                    text_preview = %truncate_chars(text, 50),
                    "Remote verdict"
                );
                verdict
            }
            Err(e) => {
                warn!(error = %e, "Remote moderation failed, using keyword fallback");
                self.fallback.score(text)
            }
        }
    }
}

// --- Chat-completions request/response types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage; 2],
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// The subset of a chat-completions response we read. Everything below
/// `choices` is optional so a partial body still deserializes and is then
/// reported as missing content.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let v = parse_verdict(
            r#"{"trust_score": 85, "trust_tag": "🟢", "explanation": "Positive community content"}"#,
        )
        .unwrap();
        assert_eq!(v.trust_score(), 85);
        assert_eq!(v.trust_tag(), TrustTag::Safe);
        assert_eq!(v.explanation(), "Positive community content");
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let v = parse_verdict("\n  {\"trust_score\": 12, \"trust_tag\": \"🔴\"}  \n").unwrap();
        assert_eq!(v.trust_score(), 12);
        assert_eq!(v.trust_tag(), TrustTag::Unsafe);
    }

    #[test]
    fn test_parse_defaults_missing_tag_and_explanation() {
        let v = parse_verdict(r#"{"trust_score": 64}"#).unwrap();
        assert_eq!(v.trust_tag(), TrustTag::Caution);
        assert_eq!(v.explanation(), "No explanation provided");
    }

    #[test]
    fn test_parse_unknown_tag_defaults_to_caution() {
        let v = parse_verdict(r#"{"trust_score": 90, "trust_tag": "green"}"#).unwrap();
        assert_eq!(v.trust_tag(), TrustTag::Caution);
    }

    #[test]
    fn test_parse_accepts_whole_float() {
        assert_eq!(parse_verdict(r#"{"trust_score": 70.0}"#).unwrap().trust_score(), 70);
    }

    #[test]
    fn test_parse_truncates_long_explanation() {
        let long = "x".repeat(250);
        let content = format!(r#"{{"trust_score": 50, "explanation": "{long}"}}"#);
        let v = parse_verdict(&content).unwrap();
        assert_eq!(v.explanation().chars().count(), MAX_REMOTE_EXPLANATION_CHARS);
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(
            parse_verdict("Sure! Here is my analysis"),
            Err(ParseError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_verdict(r#"```json {"trust_score": 80} ```"#),
            Err(ParseError::InvalidJson(_))
        ));
        assert_eq!(parse_verdict("[85, \"🟢\"]"), Err(ParseError::NotAnObject));
        assert_eq!(
            parse_verdict(r#"{"trust_tag": "🟢"}"#),
            Err(ParseError::MissingScore)
        );
        assert!(matches!(
            parse_verdict(r#"{"trust_score": "85"}"#),
            Err(ParseError::InvalidScore(_))
        ));
        assert!(matches!(
            parse_verdict(r#"{"trust_score": 85.5}"#),
            Err(ParseError::InvalidScore(_))
        ));
        assert_eq!(
            parse_verdict(r#"{"trust_score": 101}"#),
            Err(ParseError::ScoreOutOfRange(101))
        );
        assert_eq!(
            parse_verdict(r#"{"trust_score": -5}"#),
            Err(ParseError::ScoreOutOfRange(-5))
        );
    }

    #[test]
    fn test_extract_content() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{}"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(&body), Some("{}"));

        let empty: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(extract_content(&empty), None);

        let no_choices: ChatResponse = serde_json::from_str(r#"{"error": "x"}"#).unwrap();
        assert_eq!(extract_content(&no_choices), None);

        let no_message: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"finish_reason": "stop"}]}"#).unwrap();
        assert_eq!(extract_content(&no_message), None);
    }

    #[tokio::test]
    async fn test_unconfigured_skips_network() {
        // Endpoint is unroutable; an attempt would fall back, not return the fixed verdict.
        let config = ModerationConfig::unconfigured().with_endpoint("http://127.0.0.1:1/");
        let evaluator = OpenRouterEvaluator::new(config, FallbackScorer::default()).unwrap();
        assert_eq!(evaluator.evaluate("hate spam scam").await, Verdict::unconfigured());
    }
}
