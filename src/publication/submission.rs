// Submission: the post payload the gate moderates.
//
// Only `text` is evaluated. The image, tags, and action type ride along for
// inbound validation and for whatever the caller persists afterwards.

use serde::{Deserialize, Serialize};

/// Maximum characters of post text.
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Maximum encoded image payload, in bytes.
pub const MAX_IMAGE_BYTES: usize = 1_048_487;

/// Maximum number of tags per submission.
pub const MAX_TAGS: usize = 10;

/// What the submitter is doing with the post. Serialized as 0/1/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ActionType {
    #[default]
    Create,
    Edit,
    Delete,
}

impl TryFrom<u8> for ActionType {
    type Error = SubmissionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ActionType::Create),
            1 => Ok(ActionType::Edit),
            2 => Ok(ActionType::Delete),
            other => Err(SubmissionError::InvalidAction(other)),
        }
    }
}

impl From<ActionType> for u8 {
    fn from(action: ActionType) -> Self {
        match action {
            ActionType::Create => 0,
            ActionType::Edit => 1,
            ActionType::Delete => 2,
        }
    }
}

/// Why a submission was refused before moderation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Post must have text, image, or both.")]
    Empty,
    #[error("Post text is too long ({0} characters, max 10000).")]
    TextTooLong(usize),
    #[error("Image is too large. Please upload an image smaller than 1MB.")]
    ImageTooLarge,
    #[error("Action type must be 0 (create), 1 (edit), or 2 (delete), got {0}.")]
    InvalidAction(u8),
    #[error("At most 10 tags are allowed, got {0}.")]
    TooManyTags(usize),
    #[error("Tags must be 1-20 characters, alphanumeric and underscore only: {0:?}")]
    InvalidTag(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub action_type: ActionType,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Submission {
    /// A text-only create submission.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Check the inbound limits. Does not look at content.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        if self.text.trim().is_empty() && self.image_url.trim().is_empty() {
            return Err(SubmissionError::Empty);
        }

        let chars = self.text.chars().count();
        if chars > MAX_TEXT_CHARS {
            return Err(SubmissionError::TextTooLong(chars));
        }

        if self.image_url.len() > MAX_IMAGE_BYTES {
            return Err(SubmissionError::ImageTooLarge);
        }

        if self.tags.len() > MAX_TAGS {
            return Err(SubmissionError::TooManyTags(self.tags.len()));
        }
        if let Some(bad) = self.tags.iter().find(|t| !is_valid_tag(t)) {
            return Err(SubmissionError::InvalidTag(bad.clone()));
        }

        Ok(())
    }
}

fn is_valid_tag(tag: &str) -> bool {
    (1..=20).contains(&tag.len()) && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
