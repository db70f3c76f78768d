//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod activity;

pub use user::User;
pub use message::{Message, ChannelKind};
pub use command::{Action, Command, CommandKind, CommandRegistry};
pub use activity::{Activity, ActivityKind};
