//! AI integration - chat completion over HTTP

pub mod traits;
pub mod config;
pub mod providers;


pub use traits::{ChatBackend, ChatCompletion, ChatRequest, ChatTurn, AiResult};
pub use config::AiConfig;
pub use providers::CompletionsProvider;
