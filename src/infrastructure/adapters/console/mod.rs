//! Console adapter for development/testing

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::errors::BotError;
use crate::application::messaging::MessageRouter;
use crate::domain::entities::{ChannelKind, Message, User};
use crate::domain::traits::{BotInfo, Gateway};
use super::shutdown_signal;

pub const CONSOLE_CHANNEL: &str = "console";

/// Messages kept for history lookups
const HISTORY_WINDOW: usize = 100;

/// Console bot adapter for local development.
///
/// Every stdin line is a direct message from a human; replies go to stdout.
pub struct ConsoleAdapter {
    info: BotInfo,
    user: User,
    history: Mutex<Vec<Message>>,
    next_id: AtomicU64,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        let username = std::env::var("USER").unwrap_or_else(|_| "console".to_string());
        Self {
            info: BotInfo {
                id: "console-bot".to_string(),
                name: "krydder-bot".to_string(),
            },
            user: User::new("console-user", username),
            history: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn record(&self, author: User, text: &str) -> Message {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let message = Message::new(CONSOLE_CHANNEL, author, text)
            .with_id(id.to_string())
            .with_channel_kind(ChannelKind::Direct);
        let mut history = self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        history.push(message.clone());
        if history.len() > HISTORY_WINDOW {
            let excess = history.len() - HISTORY_WINDOW;
            history.drain(..excess);
        }
        message
    }

    /// Record a line typed by the user and return it as an inbound message
    pub fn user_message(&self, text: &str) -> Message {
        self.record(self.user.clone(), text)
    }

    /// Read stdin until EOF or a shutdown signal, routing every line
    pub async fn run(self: Arc<Self>, router: Arc<MessageRouter>) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode), prefix {}", router.dispatcher().prefix());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let line = line.map_err(|e| BotError::Gateway(e.to_string()))?;
                    let Some(line) = line else { break };
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let message = self.user_message(line);
                    if let Err(e) = router.respond(self.as_ref(), &message).await {
                        tracing::error!("Failed to handle message: {}", e);
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutting down");
                    break;
                }
            }
        }

        Ok(())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for ConsoleAdapter {
    async fn send_message(&self, _channel_id: &str, text: &str) -> Result<(), BotError> {
        let bot = User::new(self.info.id.clone(), self.info.name.clone()).bot();
        self.record(bot, text);
        println!("[BOT] {}", text);
        Ok(())
    }

    async fn send_typing(&self, _channel_id: &str) -> Result<(), BotError> {
        println!("[BOT is typing...]");
        Ok(())
    }

    async fn recent_messages(
        &self,
        channel_id: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Message>, BotError> {
        let before: Option<u64> = before.and_then(|id| id.parse().ok());
        let history = self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let earlier: Vec<&Message> = history
            .iter()
            .filter(|m| m.channel_id == channel_id)
            .filter(|m| match (before, m.id.parse::<u64>()) {
                (Some(before), Ok(id)) => id < before,
                _ => true,
            })
            .collect();

        let start = earlier.len().saturating_sub(limit);
        Ok(earlier[start..].iter().map(|m| (*m).clone()).collect())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_history_is_oldest_first_and_excludes_trigger() {
        let console = ConsoleAdapter::new();
        console.user_message("one");
        console.send_message(CONSOLE_CHANNEL, "two").await.unwrap();
        console.user_message("three");
        let trigger = console.user_message("four");

        let history = console
            .recent_messages(CONSOLE_CHANNEL, Some(&trigger.id), 2)
            .await
            .unwrap();
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["two", "three"]);
        assert!(history[0].author.is_bot);
        assert!(!history[1].author.is_bot);
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let console = ConsoleAdapter::new();
        for i in 0..HISTORY_WINDOW + 50 {
            console.user_message(&format!("line {i}"));
        }

        let history = console
            .recent_messages(CONSOLE_CHANNEL, None, HISTORY_WINDOW * 2)
            .await
            .unwrap();
        assert_eq!(history.len(), HISTORY_WINDOW);
        assert_eq!(history[0].content, "line 50");
        assert_eq!(history[HISTORY_WINDOW - 1].content, format!("line {}", HISTORY_WINDOW + 49));
    }

    #[test]
    fn test_user_messages_are_direct() {
        let console = ConsoleAdapter::new();
        let msg = console.user_message("hei");
        assert!(msg.is_direct());
        assert_ne!(msg.author.id, console.bot_info().id);
    }
}
