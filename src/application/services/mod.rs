//! Application services - Business logic orchestration

pub mod ai_service;
pub mod responses;
pub mod status_service;
pub mod triggers;

pub use ai_service::AiBridge;
pub use responses::ResponseStore;
pub use status_service::StatusRotator;
pub use triggers::{MatchPolicy, TriggerMatcher};
