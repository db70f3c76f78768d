//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: CLI, environment and config file loading
//! - Assets: Bundled trigger words and responses
//! - LLM: Chat completion client
//! - Logging: Subscriber setup
//! - Adapters: Platform integrations (Discord, console)

pub mod config;
pub mod assets;
pub mod llm;
pub mod logging;
pub mod adapters;
