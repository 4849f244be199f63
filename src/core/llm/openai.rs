use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatMessage, ChatProvider, RemoteError};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct OpenAiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessageOwned,
}

#[derive(Deserialize)]
struct OpenAiMessageOwned {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client for the OpenAI HTTP API. The base URL is
/// injectable so tests can point it at a mock server.
pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn complete(
        &self,
        model: &str,
        temperature: f32,
        max_tokens: u32,
        messages: &[ChatMessage],
    ) -> Result<Option<String>, RemoteError> {
        let req_messages = messages
            .iter()
            .map(|m| OpenAiMessage {
                role: &m.role,
                content: &m.content,
            })
            .collect();

        let req = OpenAiRequest {
            model,
            messages: req_messages,
            max_tokens,
            temperature,
        };
        let res = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&req)
            .send()
            .await
            .map_err(|e| RemoteError::from_text(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(RemoteError::from_status(
                status.as_u16(),
                format!("API error {}: {}", status.as_u16(), body),
            ));
        }

        // A well-formed 2xx reply without usable text is not an error;
        // the caller substitutes local output.
        let parsed: OpenAiResponse = match res.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("Unparseable completion payload: {}", e);
                return Ok(None);
            }
        };
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);
        Ok(text.filter(|t| !t.trim().is_empty()))
    }
}
