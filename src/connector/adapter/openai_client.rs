use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{DomainError, Message, PendingTurn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Chat Completions API request payload.
#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [Message],
}

/// Minimal subset of the Chat Completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// HTTP client for the OpenAI Chat Completions API (and compatible servers).
///
/// The credential is not part of the client: each [`PendingTurn`] carries the
/// key resolved for its session. No timeout, retry or streaming is layered on
/// top of reqwest's defaults; the full response is awaited.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pull the human-readable reason out of an error body, falling back to
    /// the raw text.
    fn error_detail(body: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| body.trim().to_string())
    }
}

impl Default for OpenAiChatClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, turn: &PendingTurn) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: turn.model().as_str(),
            temperature: turn.temperature(),
            messages: turn.messages(),
        };

        debug!(
            "POST {} with {} messages",
            self.url,
            turn.messages().len()
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(turn.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::completion(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiChatClient: API returned {status}: {body}");
            let detail = Self::error_detail(&body);
            return Err(DomainError::completion(if detail.is_empty() {
                format!("API returned {status}")
            } else {
                format!("API returned {status}: {detail}")
            }));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| DomainError::completion(format!("failed to parse response: {e}")))?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::completion("response contained no message content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let client = OpenAiChatClient::new("http://localhost:1234/");
        assert_eq!(client.url(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn error_detail_prefers_api_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(
            OpenAiChatClient::error_detail(body),
            "Incorrect API key provided"
        );
    }

    #[test]
    fn error_detail_falls_back_to_raw_body() {
        assert_eq!(OpenAiChatClient::error_detail(" bad gateway \n"), "bad gateway");
    }

    #[test]
    fn request_serializes_messages_in_order() {
        let messages = vec![Message::system("sys"), Message::user("hi")];
        let request = ApiRequest {
            model: "gpt-4o-mini",
            temperature: 0.8,
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }
}
