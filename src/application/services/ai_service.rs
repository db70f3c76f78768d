//! AI bridge - turns channel history into a completion request

use std::sync::Arc;

use crate::application::errors::AiError;
use crate::domain::entities::Message;
use crate::domain::traits::Gateway;
use crate::infrastructure::llm::{AiConfig, AiResult, ChatBackend, ChatRequest, ChatTurn};

/// Reply used when the completion envelope cannot be used
pub const PARSE_FAILURE_REPLY: &str = "Sorry, I could not understand the AI response.";

const CHAT_MODE: &str = "chat";

/// Service forwarding conversations to a chat completion backend
pub struct AiBridge {
    backend: Option<Arc<dyn ChatBackend>>,
    character: String,
    history_limit: usize,
}

impl AiBridge {
    pub fn new(backend: Option<Arc<dyn ChatBackend>>, config: &AiConfig) -> Self {
        Self {
            backend,
            character: config.character.clone(),
            history_limit: config.history_limit,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Build the request body.
    ///
    /// `history` is oldest first; only its last `history_limit` entries are used.
    /// Bot authors become "assistant" and every human becomes "user", while the
    /// new turn carries the speaker's actual username as its role.
    pub fn build_request(&self, history: &[Message], author: &str, content: &str) -> ChatRequest {
        let start = history.len().saturating_sub(self.history_limit);
        let mut messages: Vec<ChatTurn> = history[start..]
            .iter()
            .map(|m| {
                if m.author.is_bot {
                    ChatTurn::assistant(m.content.clone())
                } else {
                    ChatTurn::user(m.content.clone())
                }
            })
            .collect();
        messages.push(ChatTurn::new(author, content));

        ChatRequest {
            messages,
            mode: CHAT_MODE.to_string(),
            character: self.character.clone(),
        }
    }

    /// Ask the backend for a reply to `content` given the channel history
    pub async fn generate_reply(
        &self,
        channel_id: &str,
        history: &[Message],
        author: &str,
        content: &str,
    ) -> AiResult<String> {
        let backend = self.backend.as_ref().ok_or(AiError::NotConfigured)?;
        let request = self.build_request(history, author, content);

        tracing::debug!(
            "Asking {} in {} with {} turns",
            backend.name(),
            channel_id,
            request.messages.len()
        );

        backend.complete(&request).await
    }

    /// Produce the text to send for an AI request triggered by `message`.
    ///
    /// Failures never escape: transport errors are shown verbatim and unusable
    /// responses get a generic apology.
    pub async fn reply_for<G: Gateway + ?Sized>(&self, gateway: &G, message: &Message, content: &str) -> String {
        if let Err(e) = gateway.send_typing(&message.channel_id).await {
            tracing::warn!("Failed to send typing indicator: {}", e);
        }

        let before = Some(message.id.as_str()).filter(|id| !id.is_empty());
        let history = match gateway
            .recent_messages(&message.channel_id, before, self.history_limit)
            .await
        {
            Ok(history) => history,
            Err(e) => {
                tracing::error!("Failed to fetch history for {}: {}", message.channel_id, e);
                return e.to_string();
            }
        };

        match self
            .generate_reply(&message.channel_id, &history, &message.author.username, content)
            .await
        {
            Ok(reply) => reply,
            Err(AiError::Parse(e)) => {
                tracing::warn!("Unusable AI response: {}", e);
                PARSE_FAILURE_REPLY.to_string()
            }
            Err(e) => {
                tracing::warn!("AI request failed: {}", e);
                e.to_string()
            }
        }
    }
}
