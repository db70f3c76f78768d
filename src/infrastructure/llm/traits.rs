//! Chat completion wire types and the backend trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::errors::AiError;

/// One role-tagged message of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// "user", "assistant", or the speaker's username for the newest turn
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Request body for `POST /v1/chat/completions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
    pub mode: String,
    pub character: String,
}

/// Completion envelope. Only `choices` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub finish_reason: Option<String>,
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: Option<String>,
    pub content: String,
}

/// Token usage information
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatCompletion {
    /// Parse a raw response body and take the first choice's content
    pub fn first_content(body: &str) -> AiResult<String> {
        let completion: ChatCompletion = serde_json::from_str(body)
            .map_err(|e| AiError::Parse(e.to_string()))?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                "Completion {} used {} tokens ({} prompt, {} completion)",
                completion.id,
                usage.total_tokens,
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AiError::Parse("No choices in response".to_string()))
    }
}

/// Result type for AI operations
pub type AiResult<T> = Result<T, AiError>;

/// Chat completion backend
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Send a request and return the reply text
    async fn complete(&self, request: &ChatRequest) -> AiResult<String>;
}
