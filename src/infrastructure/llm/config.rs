//! AI bridge configuration

use std::time::Duration;

/// Persona id sent with every request
pub const DEFAULT_CHARACTER: &str = "krydderbot-ng";

/// Number of channel messages used as conversation context
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    /// Base URL, `/v1/chat/completions` is appended
    pub endpoint: Option<String>,
    pub character: String,
    pub history_limit: usize,
    pub timeout_secs: u64,
    /// Log full request and response bodies, conversation included
    pub debug: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            character: DEFAULT_CHARACTER.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            debug: false,
        }
    }
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
