/// Built-in command behaviours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Ping,
    Echo,
    Help,
    Ai,
}

/// What a command asks the caller to do once it has run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send this text back to the channel
    Reply(String),
    /// Forward this text to the AI bridge and send its answer
    AskAi(String),
    /// Nothing to send
    Silent,
}

impl CommandKind {
    /// Run the command against its arguments.
    ///
    /// `registry` is only consulted by `help`, which describes other commands.
    pub fn execute(&self, args: &[String], registry: &CommandRegistry) -> Action {
        match self {
            CommandKind::Ping => Action::Reply("Pong!".to_string()),
            CommandKind::Echo => Action::Reply(args.join(" ")),
            CommandKind::Help => {
                let Some(target) = args.first() else {
                    return Action::Reply("No command given".to_string());
                };
                match registry.lookup(target) {
                    Some(command) => Action::Reply(command.help_text()),
                    // Unknown help targets get no reply at all.
                    None => Action::Silent,
                }
            }
            CommandKind::Ai => Action::AskAi(args.join(" ")),
        }
    }
}

/// Represents a bot command
#[derive(Debug, Clone)]
pub struct Command {
    pub name: String,
    pub description: String,
    pub usage: String,
    pub kind: CommandKind,
}

impl Command {
    pub fn new(name: impl Into<String>, kind: CommandKind) -> Self {
        let name = name.into();
        Self {
            usage: name.clone(),
            name,
            description: String::new(),
            kind,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Exact, case-sensitive name comparison
    pub fn matches(&self, input: &str) -> bool {
        self.name == input
    }

    pub fn help_text(&self) -> String {
        format!(
            "Name: {}\nDescription: {}\nUsage: {}",
            self.name, self.description, self.usage
        )
    }
}

/// Ordered command table, populated once at startup
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `ping`, `echo`, `help` and `ai`
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            Command::new("ping", CommandKind::Ping)
                .with_description("Responds with Pong!")
                .with_usage("ping"),
        );
        registry.register(
            Command::new("echo", CommandKind::Echo)
                .with_description("Repeats your message")
                .with_usage("echo <message>"),
        );
        registry.register(
            Command::new("help", CommandKind::Help)
                .with_description("Displays help for a command")
                .with_usage("help <command>"),
        );
        registry.register(
            Command::new("ai", CommandKind::Ai)
                .with_description("Runs your message through an AI")
                .with_usage("ai <message>"),
        );
        registry
    }

    /// Add a command. A name that is already taken is ignored.
    pub fn register(&mut self, command: Command) {
        if self.lookup(&command.name).is_some() {
            tracing::warn!("Command {} is already registered, ignoring duplicate", command.name);
            return;
        }
        self.commands.push(command);
    }

    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.matches(name))
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_builtin_registry_order() {
        let registry = CommandRegistry::builtin();
        let names: Vec<&str> = registry.all().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ping", "echo", "help", "ai"]);
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let registry = CommandRegistry::builtin();
        assert!(registry.lookup("ping").is_some());
        assert!(registry.lookup("Ping").is_none());
        assert!(registry.lookup("pin").is_none());
        assert!(registry.lookup("ping ").is_none());
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let mut registry = CommandRegistry::builtin();
        registry.register(Command::new("ping", CommandKind::Echo).with_description("impostor"));
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.lookup("ping").map(|c| c.kind), Some(CommandKind::Ping));
    }

    #[test]
    fn test_ping_and_echo() {
        let registry = CommandRegistry::builtin();
        assert_eq!(CommandKind::Ping.execute(&[], &registry), Action::Reply("Pong!".into()));
        assert_eq!(
            CommandKind::Echo.execute(&args(&["a", "b", "c"]), &registry),
            Action::Reply("a b c".into())
        );
        assert_eq!(CommandKind::Echo.execute(&[], &registry), Action::Reply(String::new()));
    }

    #[test]
    fn test_help_variants() {
        let registry = CommandRegistry::builtin();
        assert_eq!(
            CommandKind::Help.execute(&[], &registry),
            Action::Reply("No command given".into())
        );
        assert_eq!(
            CommandKind::Help.execute(&args(&["ping"]), &registry),
            Action::Reply("Name: ping\nDescription: Responds with Pong!\nUsage: ping".into())
        );
        assert_eq!(CommandKind::Help.execute(&args(&["nope"]), &registry), Action::Silent);
    }

    #[test]
    fn test_ai_joins_arguments() {
        let registry = CommandRegistry::builtin();
        assert_eq!(
            CommandKind::Ai.execute(&args(&["how", "are", "you"]), &registry),
            Action::AskAi("how are you".into())
        );
    }
}
