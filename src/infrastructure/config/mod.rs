//! Configuration management
//!
//! Values come from the command line, `KRYDDER_*` environment variables and an
//! optional YAML file, in that order of precedence.

use clap::builder::FalseyValueParser;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::application::errors::ConfigError;
use crate::application::services::MatchPolicy;
use crate::infrastructure::assets::Assets;
use crate::infrastructure::llm::config::{AiConfig, DEFAULT_CHARACTER, DEFAULT_TIMEOUT_SECS};

pub const DEFAULT_PREFIX: &str = "^";
pub const DEFAULT_VERBOSITY: u8 = 2;
pub const MAX_VERBOSITY: u8 = 3;

/// Command line options, each overridable through the environment
#[derive(Debug, Clone, Default, Args)]
pub struct BotArgs {
    /// Bot token
    #[arg(short, long, env = "KRYDDER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Verbosity level (0-3)
    #[arg(short, long, env = "KRYDDER_VERBOSITY", value_parser = clap::value_parser!(u8).range(0..=MAX_VERBOSITY as i64))]
    pub verbosity: Option<u8>,

    /// Command prefix [default: ^]
    #[arg(short, long, env = "KRYDDER_PREFIX")]
    pub prefix: Option<String>,

    /// Don't use colors in log output
    #[arg(long, env = "KRYDDER_NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Force truecolor
    #[arg(long, env = "KRYDDER_TRUE_COLOR", value_parser = FalseyValueParser::new())]
    pub true_color: bool,

    /// AI Endpoint URL
    #[arg(long, env = "KRYDDER_AI_ENDPOINT")]
    pub ai_endpoint: Option<String>,

    /// Always use AI
    #[arg(long, env = "KRYDDER_ALWAYS_AI", value_parser = FalseyValueParser::new())]
    pub always_ai: bool,

    /// Debug AI (logs full conversations)
    #[arg(long, env = "KRYDDER_AI_DEBUG", value_parser = FalseyValueParser::new())]
    pub ai_debug: bool,

    /// AI request timeout in seconds [default: 60]
    #[arg(long, env = "KRYDDER_AI_TIMEOUT")]
    pub ai_timeout: Option<u64>,

    /// AI character id [default: krydderbot-ng]
    #[arg(long, env = "KRYDDER_CHARACTER")]
    pub character: Option<String>,

    /// How trigger words are matched [default: whole-word]
    #[arg(long, env = "KRYDDER_TRIGGER_POLICY", value_enum)]
    pub trigger_policy: Option<MatchPolicy>,

    /// Read trigger words from this file instead of the bundled list
    #[arg(long, env = "KRYDDER_TRIGGERS_FILE")]
    pub triggers_file: Option<PathBuf>,

    /// Read responses from this file instead of the bundled list
    #[arg(long, env = "KRYDDER_RESPONSES_FILE")]
    pub responses_file: Option<PathBuf>,

    /// Talk to the bot on stdin instead of connecting to Discord
    #[arg(long, env = "KRYDDER_CONSOLE", value_parser = FalseyValueParser::new())]
    pub console: bool,

    /// Config file (optional)
    #[arg(short, long, env = "KRYDDER_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Contents of the YAML config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub verbosity: Option<u8>,
    pub prefix: Option<String>,
    pub no_color: Option<bool>,
    pub true_color: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_endpoint: Option<String>,
    pub always_ai: Option<bool>,
    pub ai_debug: Option<bool>,
    pub ai_timeout: Option<u64>,
    pub character: Option<String>,
    pub trigger_policy: Option<MatchPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses_file: Option<PathBuf>,
    pub console: Option<bool>,
}

impl FileConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config {}: {}", path.display(), e)))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Config file with every default spelled out
    pub fn sample() -> Self {
        Self {
            token: Some("YOUR_BOT_TOKEN".to_string()),
            verbosity: Some(DEFAULT_VERBOSITY),
            prefix: Some(DEFAULT_PREFIX.to_string()),
            no_color: Some(false),
            true_color: Some(false),
            ai_endpoint: Some("http://localhost:5000".to_string()),
            always_ai: Some(false),
            ai_debug: Some(false),
            ai_timeout: Some(DEFAULT_TIMEOUT_SECS),
            character: Some(DEFAULT_CHARACTER.to_string()),
            trigger_policy: Some(MatchPolicy::WholeWord),
            triggers_file: None,
            responses_file: None,
            console: Some(false),
        }
    }
}

/// Resolved, immutable bot configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub token: Option<String>,
    pub verbosity: u8,
    pub prefix: String,
    pub no_color: bool,
    pub true_color: bool,
    pub always_ai: bool,
    pub trigger_policy: MatchPolicy,
    pub triggers_file: Option<PathBuf>,
    pub responses_file: Option<PathBuf>,
    pub console: bool,
    pub ai: AiConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token: None,
            verbosity: DEFAULT_VERBOSITY,
            prefix: DEFAULT_PREFIX.to_string(),
            no_color: false,
            true_color: false,
            always_ai: false,
            trigger_policy: MatchPolicy::default(),
            triggers_file: None,
            responses_file: None,
            console: false,
            ai: AiConfig::default(),
        }
    }
}

impl Settings {
    /// Read the config file named by `args`, if any, and merge it under `args`
    pub fn load(args: &BotArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(args, file)
    }

    pub fn resolve(args: &BotArgs, file: FileConfig) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let verbosity = args.verbosity.or(file.verbosity).unwrap_or(defaults.verbosity);
        if verbosity > MAX_VERBOSITY {
            return Err(ConfigError::InvalidValue(format!(
                "verbosity must be between 0 and {}, got {}",
                MAX_VERBOSITY, verbosity
            )));
        }

        let prefix = args.prefix.clone().or(file.prefix).unwrap_or(defaults.prefix);
        if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue(format!("invalid command prefix {:?}", prefix)));
        }

        let ai_timeout = args.ai_timeout.or(file.ai_timeout).unwrap_or(defaults.ai.timeout_secs);
        if ai_timeout == 0 {
            return Err(ConfigError::InvalidValue("ai-timeout must be at least 1 second".to_string()));
        }

        let ai = AiConfig {
            endpoint: args
                .ai_endpoint
                .clone()
                .or(file.ai_endpoint)
                .filter(|e| !e.trim().is_empty()),
            character: args.character.clone().or(file.character).unwrap_or(defaults.ai.character),
            history_limit: defaults.ai.history_limit,
            timeout_secs: ai_timeout,
            debug: args.ai_debug || file.ai_debug.unwrap_or(false),
        };

        Ok(Self {
            token: args.token.clone().or(file.token).filter(|t| !t.trim().is_empty()),
            verbosity,
            prefix,
            no_color: args.no_color || file.no_color.unwrap_or(false),
            true_color: args.true_color || file.true_color.unwrap_or(false),
            always_ai: args.always_ai || file.always_ai.unwrap_or(false),
            trigger_policy: args.trigger_policy.or(file.trigger_policy).unwrap_or_default(),
            triggers_file: args.triggers_file.clone().or(file.triggers_file),
            responses_file: args.responses_file.clone().or(file.responses_file),
            console: args.console || file.console.unwrap_or(false),
            ai,
        })
    }

    /// The gateway token, required for anything but console mode
    pub fn token(&self) -> Result<&str, ConfigError> {
        self.token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField("token".to_string()))
    }

    pub fn assets(&self) -> Assets {
        Assets::new(self.triggers_file.clone(), self.responses_file.clone())
    }
}
