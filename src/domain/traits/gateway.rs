use async_trait::async_trait;
use crate::domain::entities::Message;
use crate::application::errors::BotError;

/// Gateway trait - abstraction over the messaging platform connection
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Send a text message to a channel
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), BotError>;

    /// Show the typing indicator in a channel
    async fn send_typing(&self, channel_id: &str) -> Result<(), BotError>;

    /// Fetch up to `limit` messages of a channel, oldest first.
    ///
    /// With `before` set, only messages posted before that message id are returned.
    async fn recent_messages(
        &self,
        channel_id: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Message>, BotError>;

    /// Identity the bot is connected as
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
}
