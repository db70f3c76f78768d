use super::User;

/// Kind of channel a message arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Private conversation between one user and the bot
    Direct,
    /// Any shared channel (guild text channel, thread, group)
    Guild,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Direct => "direct",
            ChannelKind::Guild => "guild",
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, ChannelKind::Direct)
    }
}

/// A message seen on the gateway, either an inbound event or a history entry
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    pub author: User,
    pub content: String,
    pub channel_kind: ChannelKind,
}

impl Message {
    pub fn new(channel_id: impl Into<String>, author: User, content: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            channel_id: channel_id.into(),
            author,
            content: content.into(),
            channel_kind: ChannelKind::Guild,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_channel_kind(mut self, kind: ChannelKind) -> Self {
        self.channel_kind = kind;
        self
    }

    pub fn is_direct(&self) -> bool {
        self.channel_kind.is_direct()
    }
}
