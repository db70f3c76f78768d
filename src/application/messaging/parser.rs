//! Command parser - splits prefixed messages into a name and arguments

/// A command invocation taken from message text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Recognises and parses prefixed command messages
#[derive(Debug, Clone)]
pub struct CommandParser {
    prefix: String,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_command(&self, content: &str) -> bool {
        content.starts_with(&self.prefix)
    }

    /// Parse `content` into a command.
    ///
    /// The prefix is removed when present, the rest is split on runs of
    /// whitespace. Returns `None` when no command name remains.
    pub fn parse(&self, content: &str) -> Option<ParsedCommand> {
        let rest = content.strip_prefix(self.prefix.as_str()).unwrap_or(content);
        let mut tokens = rest.split_whitespace();
        let name = tokens.next()?.to_string();
        let args = tokens.map(|t| t.to_string()).collect();
        Some(ParsedCommand { name, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_prefix_and_collapses_whitespace() {
        let parser = CommandParser::new("^");
        let parsed = parser.parse("^echo   hello \t  world ").unwrap();
        assert_eq!(parsed.name, "echo");
        assert_eq!(parsed.args, vec!["hello", "world"]);
    }

    #[test]
    fn test_parse_multi_char_prefix() {
        let parser = CommandParser::new("kb!");
        assert!(parser.is_command("kb!ping"));
        assert!(!parser.is_command("kb ping"));
        assert_eq!(parser.parse("kb!ping").unwrap().name, "ping");
    }

    #[test]
    fn test_parse_empty_command_is_none() {
        let parser = CommandParser::new("^");
        assert_eq!(parser.parse("^"), None);
        assert_eq!(parser.parse("^    "), None);
    }

    #[test]
    fn test_space_after_prefix_is_allowed() {
        let parser = CommandParser::new("^");
        let parsed = parser.parse("^ ping").unwrap();
        assert_eq!(parsed.name, "ping");
        assert!(parsed.args.is_empty());
    }
}
