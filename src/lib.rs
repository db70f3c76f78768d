//! krydder-bot - a chat bot answering commands, trigger words and direct messages

pub mod domain;
pub mod application;
pub mod infrastructure;
