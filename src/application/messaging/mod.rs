//! Message handling - routing, command parsing and dispatch

pub mod dispatcher;
pub mod parser;
pub mod router;

pub use dispatcher::CommandDispatcher;
pub use parser::{CommandParser, ParsedCommand};
pub use router::{MessageRouter, Route};
