//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: response store, trigger matching, AI bridge, status rotation
//! - Errors: Domain-specific errors
//! - Messaging: Command parsing, dispatching and message routing

pub mod errors;
pub mod services;
pub mod messaging;
