//! Discord adapter

pub mod send;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serenity::all::{ActivityData, GetMessages};
use serenity::client::{Client, Context, EventHandler};
use serenity::http::Http;
use serenity::model::channel::Message as DiscordMessage;
use serenity::model::gateway::{GatewayIntents, Ready};
use serenity::model::id::{ChannelId, MessageId};

use crate::application::errors::BotError;
use crate::application::messaging::MessageRouter;
use crate::application::services::StatusRotator;
use crate::domain::entities::{Activity, ActivityKind, ChannelKind, Message, User};
use crate::domain::traits::{BotInfo, Gateway, PresenceSink};
use super::shutdown_signal;

/// Discord history requests are capped at 100 messages
const MAX_HISTORY: usize = 100;

/// REST side of the Discord connection, one per handled event
pub struct DiscordGateway {
    http: Arc<Http>,
    info: BotInfo,
}

impl DiscordGateway {
    pub fn new(http: Arc<Http>, info: BotInfo) -> Self {
        Self { http, info }
    }

    fn channel_id(id: &str) -> Result<ChannelId, BotError> {
        parse_snowflake(id)
            .map(ChannelId::new)
            .ok_or_else(|| BotError::Parse(format!("invalid channel id {:?}", id)))
    }
}

fn parse_snowflake(id: &str) -> Option<u64> {
    id.parse::<u64>().ok().filter(|v| *v != 0)
}

/// Convert a serenity message into the domain message
pub fn to_domain(msg: &DiscordMessage) -> Message {
    let kind = if msg.guild_id.is_some() {
        ChannelKind::Guild
    } else {
        ChannelKind::Direct
    };
    let author = User {
        id: msg.author.id.to_string(),
        username: msg.author.name.clone(),
        is_bot: msg.author.bot,
    };

    Message::new(msg.channel_id.to_string(), author, msg.content.clone())
        .with_id(msg.id.to_string())
        .with_channel_kind(kind)
}

#[async_trait]
impl Gateway for DiscordGateway {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), BotError> {
        let channel = Self::channel_id(channel_id)?;
        tracing::debug!("Sending to {}: {}", channel_id, text);
        send::send_chunked(&self.http, channel, text)
            .await
            .map_err(|e| BotError::Gateway(e.to_string()))
    }

    async fn send_typing(&self, channel_id: &str) -> Result<(), BotError> {
        let channel = Self::channel_id(channel_id)?;
        channel
            .broadcast_typing(&self.http)
            .await
            .map_err(|e| BotError::Gateway(e.to_string()))
    }

    async fn recent_messages(
        &self,
        channel_id: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Message>, BotError> {
        let channel = Self::channel_id(channel_id)?;

        let limit = u8::try_from(limit.min(MAX_HISTORY)).unwrap_or(u8::MAX);
        let mut request = GetMessages::new().limit(limit);
        if let Some(id) = before.and_then(parse_snowflake) {
            request = request.before(MessageId::new(id));
        }

        let messages = channel
            .messages(&*self.http, request)
            .await
            .map_err(|e| BotError::Gateway(e.to_string()))?;

        // Discord returns newest first.
        Ok(messages.iter().rev().map(to_domain).collect())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

impl PresenceSink for Context {
    fn set_activity(&self, activity: &Activity) {
        let name = activity.name.clone();
        let data = match activity.kind {
            ActivityKind::Playing => ActivityData::playing(name),
            ActivityKind::Listening => ActivityData::listening(name),
            ActivityKind::Watching => ActivityData::watching(name),
        };
        Context::set_activity(self, Some(data));
    }
}

/// Serenity event handler wired to the message router
pub struct DiscordHandler {
    router: Arc<MessageRouter>,
    rotator: Arc<StatusRotator>,
    bot_info: OnceLock<BotInfo>,
    rotation_started: AtomicBool,
}

impl DiscordHandler {
    pub fn new(router: Arc<MessageRouter>, rotator: Arc<StatusRotator>) -> Self {
        Self {
            router,
            rotator,
            bot_info: OnceLock::new(),
            rotation_started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        self.bot_info
            .set(BotInfo {
                id: ready.user.id.to_string(),
                name: ready.user.name.clone(),
            })
            .ok();

        tracing::info!("Bot is ready as {}", ready.user.name);

        // Ready fires again after a resume; keep a single rotation task.
        if !self.rotation_started.swap(true, Ordering::SeqCst) {
            let rotator = Arc::clone(&self.rotator);
            tokio::spawn(async move { rotator.run(ctx).await });
        }
    }

    async fn message(&self, ctx: Context, msg: DiscordMessage) {
        let Some(info) = self.bot_info.get() else {
            tracing::debug!("Message before ready, ignoring");
            return;
        };

        let gateway = DiscordGateway::new(Arc::clone(&ctx.http), info.clone());
        let message = to_domain(&msg);

        if let Err(e) = self.router.respond(&gateway, &message).await {
            tracing::error!("Failed to handle message in {}: {}", message.channel_id, e);
        }
    }
}

/// Discord bot adapter
pub struct DiscordAdapter {
    token: String,
    router: Arc<MessageRouter>,
    rotator: Arc<StatusRotator>,
}

impl DiscordAdapter {
    pub fn new(token: impl Into<String>, router: Arc<MessageRouter>) -> Self {
        Self {
            token: token.into(),
            router,
            rotator: Arc::new(StatusRotator::default()),
        }
    }

    /// Connect and serve events until the gateway stops or a shutdown signal arrives
    pub async fn run(self) -> Result<(), BotError> {
        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let handler = DiscordHandler::new(Arc::clone(&self.router), Arc::clone(&self.rotator));

        tracing::info!("Logging in");
        let mut client = Client::builder(&self.token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| BotError::Gateway(e.to_string()))?;

        let shard_manager = Arc::clone(&client.shard_manager);

        tracing::info!("Running. Press CTRL-C to exit.");
        tokio::select! {
            result = client.start() => {
                result.map_err(|e| BotError::Gateway(e.to_string()))?;
            }
            _ = shutdown_signal() => {
                tracing::info!("Shutting down");
                shard_manager.shutdown_all().await;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_parsing() {
        assert_eq!(parse_snowflake("123456789012345678"), Some(123456789012345678));
        assert_eq!(parse_snowflake("0"), None);
        assert_eq!(parse_snowflake("console"), None);
        assert!(DiscordGateway::channel_id("nope").is_err());
    }
}
