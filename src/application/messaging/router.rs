//! Message router - decides what, if anything, to answer

use crate::application::errors::BotError;
use crate::application::services::{AiBridge, MatchPolicy, ResponseStore, TriggerMatcher};
use crate::domain::entities::{Action, CommandRegistry, Message};
use crate::domain::traits::Gateway;
use super::dispatcher::CommandDispatcher;

/// Routing decision for one inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The bot's own message, or nothing worth answering
    Ignore,
    /// Starts with the command prefix
    Command,
    /// Contains a trigger word or arrived as a direct message
    Respond,
}

/// Top-level decision procedure, built once and shared by every handler
pub struct MessageRouter {
    dispatcher: CommandDispatcher,
    matcher: TriggerMatcher,
    store: ResponseStore,
    ai: AiBridge,
    always_ai: bool,
}

impl MessageRouter {
    pub fn new(
        prefix: impl Into<String>,
        registry: CommandRegistry,
        store: ResponseStore,
        policy: MatchPolicy,
        ai: AiBridge,
    ) -> Self {
        Self {
            dispatcher: CommandDispatcher::new(prefix, registry),
            matcher: TriggerMatcher::new(store.triggers(), policy),
            store,
            ai,
            always_ai: false,
        }
    }

    /// Answer trigger words and direct messages through the AI bridge
    pub fn with_always_ai(mut self, always_ai: bool) -> Self {
        self.always_ai = always_ai;
        self
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    pub fn classify(&self, self_id: &str, message: &Message) -> Route {
        if message.author.id == self_id {
            return Route::Ignore;
        }
        if self.dispatcher.is_command(&message.content) {
            return Route::Command;
        }
        if self.matcher.is_trigger(&message.content) || message.is_direct() {
            return Route::Respond;
        }
        Route::Ignore
    }

    /// Work out the reply for `message`, `None` when nothing should be sent
    pub async fn handle<G: Gateway + ?Sized>(&self, gateway: &G, message: &Message) -> Option<String> {
        let me = gateway.bot_info();

        match self.classify(&me.id, message) {
            Route::Ignore => None,
            Route::Command => {
                tracing::debug!(
                    "Command received in {} from {} with content {}",
                    message.channel_id,
                    message.author,
                    message.content
                );
                match self.dispatcher.dispatch(&message.content) {
                    Action::Reply(text) => Some(text),
                    Action::AskAi(text) => Some(self.ai.reply_for(gateway, message, &text).await),
                    Action::Silent => None,
                }
            }
            Route::Respond => {
                tracing::debug!(
                    "Message received in {} ({}) from {} with content {}",
                    message.channel_id,
                    message.channel_kind.as_str(),
                    message.author,
                    message.content
                );
                if self.always_ai {
                    Some(self.ai.reply_for(gateway, message, &message.content).await)
                } else {
                    Some(self.store.pick_random())
                }
            }
        }
    }

    /// Handle `message` and send the reply, if any, back to its channel
    pub async fn respond<G: Gateway + ?Sized>(&self, gateway: &G, message: &Message) -> Result<(), BotError> {
        let Some(reply) = self.handle(gateway, message).await else {
            return Ok(());
        };
        if reply.is_empty() {
            tracing::debug!("Empty reply for {}, nothing sent", message.channel_id);
            return Ok(());
        }
        gateway.send_message(&message.channel_id, &reply).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ChannelKind, User};
    use crate::infrastructure::llm::AiConfig;

    fn router() -> MessageRouter {
        let store = ResponseStore::from_texts("cat oregano", "meow");
        MessageRouter::new(
            "^",
            CommandRegistry::builtin(),
            store,
            MatchPolicy::WholeWord,
            AiBridge::new(None, &AiConfig::default()),
        )
    }

    fn from(user: &str, text: &str) -> Message {
        Message::new("c1", User::new(user, user), text)
    }

    #[test]
    fn test_own_messages_are_ignored() {
        let r = router();
        assert_eq!(r.classify("me", &from("me", "^ping")), Route::Ignore);
        assert_eq!(r.classify("me", &from("me", "cat")), Route::Ignore);
        let dm = from("me", "hello").with_channel_kind(ChannelKind::Direct);
        assert_eq!(r.classify("me", &dm), Route::Ignore);
    }

    #[test]
    fn test_prefix_wins_over_triggers() {
        let r = router();
        assert_eq!(r.classify("me", &from("ola", "^echo cat oregano")), Route::Command);
    }

    #[test]
    fn test_triggers_and_direct_messages_respond() {
        let r = router();
        assert_eq!(r.classify("me", &from("ola", "Cat!")), Route::Respond);
        assert_eq!(r.classify("me", &from("ola", "I love cats")), Route::Ignore);
        let dm = from("ola", "hello").with_channel_kind(ChannelKind::Direct);
        assert_eq!(r.classify("me", &dm), Route::Respond);
    }
}
