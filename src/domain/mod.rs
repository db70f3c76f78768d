//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (User, Message, Command, Activity)
//! - Traits: Abstractions for infrastructure (Gateway, PresenceSink)

pub mod entities;
pub mod traits;
