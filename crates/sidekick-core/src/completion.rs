//! Chat-completion gateway for the OpenAI API.
//!
//! Wraps a single request/response call to the chat-completions endpoint,
//! normalizes the heterogeneous response shapes into plain text, and maps
//! transport failures to the [`CompletionError`] taxonomy. One attempt per
//! call; no retries, no backoff.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{CompletionError, Result};

/// OpenAI chat-completions endpoint.
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Sampling temperature sent with every request.
const TEMPERATURE: f32 = 0.7;

/// System instruction prepended to every forwarded prompt unless overridden
/// via `SIDEKICK_SYSTEM_PROMPT`.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are the assistant behind a social-media \
management bot. Answer the user's question directly and concisely.";

/// Shown instead of an empty body when the backend returns nothing usable.
const EMPTY_RESPONSE_FALLBACK: &str = "(the model returned an empty response)";

/// A role-tagged message part in a completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Role of the message sender ("system" or "user").
    pub role: String,

    /// Text content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request body. Constructed fresh for every call.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,

    /// Conversation messages: an optional system part, then the user turn.
    pub messages: Vec<ChatMessage>,

    /// Temperature for generation.
    pub temperature: f32,
}

/// Typed completion response (the strict shape).
#[derive(Debug, Deserialize)]
struct ChatCompletion {
    /// Unique identifier for this completion.
    id: String,

    /// Completion choices.
    choices: Vec<ChatChoice>,
}

/// A choice in the completion response.
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// The message for this choice.
    message: ResponseMessage,
}

/// Message in a completion response.
#[derive(Debug, Deserialize)]
struct ResponseMessage {
    /// Text content of the response.
    content: Option<String>,
}

/// A backend able to answer one completion request.
///
/// The trait is the seam between the session router and the network: the
/// production implementation is [`OpenAiClient`], tests substitute fakes.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Issue exactly one request for the given message sequence and return
    /// the generated text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// OpenAI API client for chat completions.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Create a new client with the given API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// The model identifier this client sends with every request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            error!(status = %status, body = %body, "chat completion request rejected");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(extract_content(&body))
    }
}

/// Normalize a completion response body into plain text.
///
/// Extraction strategies are tried in order, each miss logged on its own so a
/// shape drift is visible in the logs. The last strategy cannot fail: a
/// payload nothing recognizes degrades to the raw body instead of an error,
/// and the result is never empty.
pub fn extract_content(body: &str) -> String {
    // Strict typed shape first.
    match serde_json::from_str::<ChatCompletion>(body) {
        Ok(completion) => {
            let content = completion
                .choices
                .first()
                .and_then(|choice| choice.message.content.as_deref());
            if let Some(content) = content {
                if !content.is_empty() {
                    return content.to_string();
                }
            }
            debug!(id = %completion.id, "typed completion carried no content");
        }
        Err(e) => {
            debug!(error = %e, "response did not match the typed completion shape");
        }
    }

    // Dynamic lookup, for payloads the strict shape rejects (missing or
    // extra fields) but that still carry the content at the usual path.
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => {
            let content = value
                .pointer("/choices/0/message/content")
                .and_then(|v| v.as_str());
            if let Some(content) = content {
                if !content.is_empty() {
                    return content.to_string();
                }
            }
            debug!("response JSON has no /choices/0/message/content string");
        }
        Err(e) => {
            debug!(error = %e, "response body is not JSON");
        }
    }

    // Surface the raw payload rather than failing.
    if body.trim().is_empty() {
        EMPTY_RESPONSE_FALLBACK.to_string()
    } else {
        body.to_string()
    }
}
