//! Domain traits - Abstractions for infrastructure implementations

pub mod gateway;
pub mod presence;

pub use gateway::{BotInfo, Gateway};
pub use presence::PresenceSink;
