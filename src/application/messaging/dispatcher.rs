//! Command dispatcher - looks up parsed commands and runs them

use crate::domain::entities::{Action, CommandRegistry};
use super::parser::CommandParser;

/// Reply for an unknown command name
pub const COMMAND_NOT_FOUND: &str = "Command not found";

pub struct CommandDispatcher {
    parser: CommandParser,
    registry: CommandRegistry,
}

impl CommandDispatcher {
    pub fn new(prefix: impl Into<String>, registry: CommandRegistry) -> Self {
        Self {
            parser: CommandParser::new(prefix),
            registry,
        }
    }

    pub fn prefix(&self) -> &str {
        self.parser.prefix()
    }

    pub fn is_command(&self, content: &str) -> bool {
        self.parser.is_command(content)
    }

    /// Parse and execute a prefixed message
    pub fn dispatch(&self, content: &str) -> Action {
        let Some(parsed) = self.parser.parse(content) else {
            tracing::debug!("Prefix without a command name, ignoring");
            return Action::Silent;
        };

        match self.registry.lookup(&parsed.name) {
            Some(command) => {
                tracing::debug!("Executing {} with {} args", command.name, parsed.args.len());
                command.kind.execute(&parsed.args, &self.registry)
            }
            None => Action::Reply(COMMAND_NOT_FOUND.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> CommandDispatcher {
        CommandDispatcher::new("^", CommandRegistry::builtin())
    }

    #[test]
    fn test_dispatch_builtins() {
        let d = dispatcher();
        assert_eq!(d.dispatch("^ping"), Action::Reply("Pong!".into()));
        assert_eq!(d.dispatch("^echo a  b c"), Action::Reply("a b c".into()));
        assert_eq!(d.dispatch("^echo"), Action::Reply(String::new()));
        assert_eq!(d.dispatch("^help"), Action::Reply("No command given".into()));
        assert_eq!(
            d.dispatch("^help ping"),
            Action::Reply("Name: ping\nDescription: Responds with Pong!\nUsage: ping".into())
        );
        assert_eq!(d.dispatch("^help nothing"), Action::Silent);
        assert_eq!(d.dispatch("^ai tell me a joke"), Action::AskAi("tell me a joke".into()));
    }

    #[test]
    fn test_unknown_and_case_mismatch() {
        let d = dispatcher();
        assert_eq!(d.dispatch("^Ping"), Action::Reply(COMMAND_NOT_FOUND.into()));
        assert_eq!(d.dispatch("^oregano"), Action::Reply(COMMAND_NOT_FOUND.into()));
    }

    #[test]
    fn test_bare_prefix_is_silent() {
        let d = dispatcher();
        assert_eq!(d.dispatch("^"), Action::Silent);
        assert_eq!(d.dispatch("^   "), Action::Silent);
    }
}
