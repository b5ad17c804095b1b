use std::env;
use std::time::Duration;

use anyhow::Result;

/// Default chat-completions endpoint.
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model: free tier, widely available.
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct:free";

/// Absolute bound on a single remote evaluation.
pub const REMOTE_TIMEOUT: Duration = Duration::from_secs(15);

/// Settings for the remote evaluator, built once and handed to the client.
///
/// An absent API key is a supported mode: the client skips the network and
/// returns the fixed "unconfigured" verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl ModerationConfig {
    /// Config with a credential and default endpoint/model/timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            api_key: (!api_key.trim().is_empty()).then_some(api_key),
            ..Self::unconfigured()
        }
    }

    /// Config with no credential.
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_OPENROUTER_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: REMOTE_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars only. The .env file is loaded by the binary
/// at startup via dotenvy.
pub struct Config {
    /// OpenRouter credential (OPENROUTER_API_KEY). Empty means absent.
    pub openrouter_api_key: String,
    /// Chat-completions endpoint (OPENROUTER_URL)
    pub openrouter_url: String,
    /// Model identifier sent with each request (OPENROUTER_MODEL)
    pub openrouter_model: String,
}

impl Config {
    /// Load configuration from environment variables. Nothing is required.
    pub fn load() -> Result<Self> {
        Ok(Self {
            openrouter_api_key: env::var("OPENROUTER_API_KEY").unwrap_or_default(),
            openrouter_url: env::var("OPENROUTER_URL")
                .unwrap_or_else(|_| DEFAULT_OPENROUTER_URL.to_string()),
            openrouter_model: env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }

    /// Build the remote evaluator settings from this config.
    pub fn moderation(&self) -> ModerationConfig {
        ModerationConfig::new(self.openrouter_api_key.clone())
            .with_endpoint(self.openrouter_url.clone())
            .with_model(self.openrouter_model.clone())
    }

    /// Check that the OpenRouter credential is configured.
    ///
    /// Evaluation works without it (degraded verdicts); this is for commands
    /// that want to report or insist on the remote path.
    pub fn require_credential(&self) -> Result<()> {
        if self.openrouter_api_key.trim().is_empty() {
            anyhow::bail!(
                "OPENROUTER_API_KEY not set. Moderation will return degraded verdicts.\n\
                 Add it to your .env file to enable AI moderation."
            );
        }
        Ok(())
    }
}
