//! Chat-completion service abstraction
//!
//! `ChatCompleter` is what the answer pipeline calls. The concrete client
//! speaks the OpenAI chat-completions wire format, which Groq (the default
//! base URL) and most hosted providers accept.

use crate::config::LlmConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// A single blocking completion call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Trait for chat-completion backends
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    /// Return the text of the first choice
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint
pub struct OpenAiCompatibleClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiCompatibleClient {
    /// Create a new completion client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| AppError::Internal {
            message: format!("Failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

fn first_choice_text(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Completion {
            message: "Empty response: no choices returned".to_string(),
        })?
        .message
        .content
        .ok_or_else(|| AppError::Completion {
            message: "Empty response: first choice has no content".to_string(),
        })
}

#[async_trait]
impl ChatCompleter for OpenAiCompatibleClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Completion {
                message: format!("Request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Completion {
                message: format!("status {}: {}", status.as_u16(), body),
            });
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| AppError::Completion {
            message: format!("Failed to parse response: {}", e),
        })?;

        first_choice_text(chat_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Stand-in completion service that only accepts the token `gsk_test`
    async fn spawn_completion_service() -> String {
        let router = Router::new().route(
            "/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers.get("authorization").and_then(|v| v.to_str().ok());
                if auth != Some("Bearer gsk_test") {
                    return (StatusCode::UNAUTHORIZED, "invalid api key".to_string());
                }
                let reply = json!({
                    "choices": [
                        {"index": 0, "message": {"role": "assistant", "content": body["model"]}}
                    ]
                });
                (StatusCode::OK, reply.to_string())
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{}", addr)
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "llama-3.1-8b-instant".to_string(),
            messages: vec![ChatMessage::user("hi")],
            temperature: 0.2,
        }
    }

    #[test]
    fn test_request_wire_format() {
        let request = CompletionRequest {
            model: "llama-3.1-8b-instant".to_string(),
            messages: vec![ChatMessage::system("be brief"), ChatMessage::user("hi")],
            temperature: 0.2,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama-3.1-8b-instant");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_first_choice_is_returned() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"id": "x", "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  first  "}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ]}"#,
        )
        .unwrap();
        // Trimming is the caller's job
        assert_eq!(first_choice_text(response).unwrap(), "  first  ");
    }

    #[test]
    fn test_no_choices_is_completion_error() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let err = first_choice_text(response).unwrap_err();
        assert!(matches!(err, AppError::Completion { .. }));
    }

    #[test]
    fn test_null_content_is_completion_error() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#)
                .unwrap();
        assert!(first_choice_text(response).is_err());
    }

    #[test]
    fn test_completions_url() {
        let client = OpenAiCompatibleClient::new(&LlmConfig {
            base_url: "https://api.groq.com/openai/v1/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.completions_url(), "https://api.groq.com/openai/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_bearer_token_reaches_service() {
        let client = OpenAiCompatibleClient::new(&LlmConfig {
            base_url: spawn_completion_service().await,
            api_key: "gsk_test".to_string(),
            ..Default::default()
        })
        .unwrap();

        let answer = client.complete(&request()).await.unwrap();
        assert_eq!(answer, "llama-3.1-8b-instant");
    }

    #[tokio::test]
    async fn test_error_status_is_completion_error_with_body() {
        let client = OpenAiCompatibleClient::new(&LlmConfig {
            base_url: spawn_completion_service().await,
            api_key: "revoked".to_string(),
            ..Default::default()
        })
        .unwrap();

        let err = client.complete(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "Completion service error: status 401: invalid api key");
    }
}
