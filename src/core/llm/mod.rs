pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::content::GenerationRequest;

/// Persona attached to every remote call.
const SYSTEM_PROMPT: &str = "You are a helpful social media strategist.";

/// Hard cap on completion size for a single variation.
pub const MAX_COMPLETION_TOKENS: u32 = 400;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Build the two-message prompt for one variation.
pub fn prompt_for(request: &GenerationRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Create {} for {} about '{}' in {} tone.",
            request.content_type, request.platform, request.topic, request.tone
        )),
    ]
}

/// Failure classes surfaced to the user. Classified from the HTTP
/// status where one exists, from the error text otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RateLimited,
    Unauthorized,
    Other,
}

impl ErrorKind {
    /// One-line explanation shown at most once per batch.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::RateLimited => "Remote quota exhausted or rate-limited. Showing demo output.",
            ErrorKind::Unauthorized => {
                "Invalid or unauthorized API credential. Showing demo output."
            }
            ErrorKind::Other => "Remote generation error occurred. Showing demo output.",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub kind: ErrorKind,
    pub message: String,
}

impl RemoteError {
    /// Classify from the error text alone. Last-resort path for
    /// transport errors that carry no HTTP status.
    pub fn from_text(message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = classify_text(&message);
        Self { kind, message }
    }

    /// Classify from an HTTP status first, falling back to text
    /// matching for statuses outside the known set.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = match status {
            429 => ErrorKind::RateLimited,
            401 => ErrorKind::Unauthorized,
            _ => classify_text(&message),
        };
        Self { kind, message }
    }
}

fn classify_text(message: &str) -> ErrorKind {
    if message.contains("insufficient_quota") || message.contains("429") {
        ErrorKind::RateLimited
    } else if message.contains("Invalid") || message.contains("401") {
        ErrorKind::Unauthorized
    } else {
        ErrorKind::Other
    }
}

/// One chat-style completion call. Implementations return the raw
/// assistant payload; a missing or blank payload comes back as
/// `Ok(None)`, which is not an error.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        temperature: f32,
        max_tokens: u32,
        messages: &[ChatMessage],
    ) -> Result<Option<String>, RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::{ContentType, Platform, Tone};

    #[test]
    fn prompt_carries_persona_and_request_fields() {
        let request = GenerationRequest::new(
            Platform::Instagram,
            ContentType::Caption,
            Tone::Bold,
            "AI",
            1,
            "gpt-4o-mini",
            0.7,
        )
        .unwrap();
        let messages = prompt_for(&request);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(
            messages[0].content,
            "You are a helpful social media strategist."
        );
        assert_eq!(messages[1].role, "user");
        assert_eq!(
            messages[1].content,
            "Create Caption for Instagram about 'AI' in Bold tone."
        );
    }

    #[test]
    fn prompt_uses_display_labels_for_multiword_types() {
        let request = GenerationRequest::new(
            Platform::LinkedIn,
            ContentType::ContentPlan,
            Tone::Friendly,
            "fitness",
            1,
            "gpt-4o",
            0.2,
        )
        .unwrap();
        let messages = prompt_for(&request);
        assert_eq!(
            messages[1].content,
            "Create 30-Day Content Plan for LinkedIn about 'fitness' in Friendly tone."
        );
    }

    #[test]
    fn status_classification_wins_over_text() {
        let err = RemoteError::from_status(429, "anything at all");
        assert_eq!(err.kind, ErrorKind::RateLimited);
        let err = RemoteError::from_status(401, "anything at all");
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn unknown_status_falls_back_to_text_matching() {
        let err = RemoteError::from_status(500, "insufficient_quota for this key");
        assert_eq!(err.kind, ErrorKind::RateLimited);
        let err = RemoteError::from_status(403, "Invalid API key provided");
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        let err = RemoteError::from_status(500, "server exploded");
        assert_eq!(err.kind, ErrorKind::Other);
    }

    #[test]
    fn text_classification_matches_known_substrings() {
        assert_eq!(
            RemoteError::from_text("Error code: 429 - rate limit").kind,
            ErrorKind::RateLimited
        );
        assert_eq!(
            RemoteError::from_text("Invalid credential").kind,
            ErrorKind::Unauthorized
        );
        assert_eq!(
            RemoteError::from_text("connection reset by peer").kind,
            ErrorKind::Other
        );
    }

    #[test]
    fn user_messages_are_stable() {
        assert_eq!(
            ErrorKind::RateLimited.user_message(),
            "Remote quota exhausted or rate-limited. Showing demo output."
        );
        assert_eq!(
            ErrorKind::Unauthorized.user_message(),
            "Invalid or unauthorized API credential. Showing demo output."
        );
        assert_eq!(
            ErrorKind::Other.user_message(),
            "Remote generation error occurred. Showing demo output."
        );
    }
}
