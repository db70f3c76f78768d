//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("AI error: {0}")]
    Ai(#[from] AiError),
}

/// Errors from the AI completion bridge
#[derive(Error, Debug)]
pub enum AiError {
    #[error("AI endpoint is not configured")]
    NotConfigured,

    /// Transport failure, timeout or non-2xx status
    #[error("{0}")]
    Network(String),

    /// The completion envelope could not be used
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Bundled or overridden text asset errors
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Error reading {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
