//! HTTP client for the hosted chat-completions API.
//!
//! [`LlmClient`] issues one `POST /chat/completions` per call and
//! extracts the text of the first returned choice. No retry, no backoff,
//! no streaming: a failed call is an [`LlmError`] the caller replaces
//! with its static fallback.

use candidly_core::chat::ChatMessage;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

/// Errors from the completion-API layer.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No API key is configured; the client is in fallback-only mode.
    #[error("No completion API key configured")]
    MissingApiKey,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Completion API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The API answered 2xx but returned no usable choice.
    #[error("Completion API returned no choices")]
    EmptyResponse,
}

/// One message in the outbound request body.
///
/// Plain text for normal calls; a parts array when attaching an image
/// for the vision endpoint.
#[derive(Debug, Serialize)]
struct RequestMessage {
    role: String,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

/// Response body of a successful completion call.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for the hosted chat-completions API.
pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Create a client from configuration.
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// One chat-completion call over a plain-text message list.
    ///
    /// Returns the content of the first choice.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let body: Vec<RequestMessage> = messages
            .iter()
            .map(|m| RequestMessage {
                role: m.role.clone(),
                content: MessageContent::Text(m.content.clone()),
            })
            .collect();
        self.send(body).await
    }

    /// One vision call: a text instruction plus one inline image.
    ///
    /// The image is embedded as a base64 data URL with the given MIME
    /// type, the shape the vision endpoint expects.
    pub async fn complete_with_image(
        &self,
        instruction: &str,
        mime_type: &str,
        image_base64: &str,
    ) -> Result<String, LlmError> {
        let body = vec![RequestMessage {
            role: candidly_core::chat::ROLE_USER.to_string(),
            content: MessageContent::Parts(vec![
                ContentPart::Text {
                    text: instruction.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:{mime_type};base64,{image_base64}"),
                    },
                },
            ]),
        }];
        self.send(body).await
    }

    // ---- private helpers ----

    async fn send(&self, messages: Vec<RequestMessage>) -> Result<String, LlmError> {
        let api_key = self.config.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_response_parses() {
        let raw = serde_json::json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": "Tell me about their team management style."
                    },
                    "finish_reason": "stop"
                }
            ]
        });

        let parsed: CompletionResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Tell me about their team management style.")
        );
    }

    #[test]
    fn test_request_message_serializes_text() {
        let msg = RequestMessage {
            role: "user".to_string(),
            content: MessageContent::Text("They are a good leader".to_string()),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "They are a good leader");
    }

    #[test]
    fn test_request_message_serializes_image_parts() {
        let msg = RequestMessage {
            role: "user".to_string(),
            content: MessageContent::Parts(vec![
                ContentPart::Text {
                    text: "Transcribe the questions".to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: "data:image/png;base64,AAAA".to_string(),
                    },
                },
            ]),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][1]["type"], "image_url");
        assert_eq!(json["content"][1]["image_url"]["url"], "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_fast() {
        let client = LlmClient::new(LlmConfig {
            api_key: None,
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        });

        let result = client
            .complete(&[candidly_core::chat::ChatMessage::user("hello")])
            .await;

        assert!(matches!(result, Err(LlmError::MissingApiKey)));
    }
}
