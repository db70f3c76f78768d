use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use krydder_bot::application::errors::AiError;
use krydder_bot::application::messaging::MessageRouter;
use krydder_bot::application::services::{AiBridge, ResponseStore};
use krydder_bot::domain::entities::CommandRegistry;
use krydder_bot::infrastructure::adapters::console::ConsoleAdapter;
use krydder_bot::infrastructure::adapters::discord::DiscordAdapter;
use krydder_bot::infrastructure::config::{BotArgs, FileConfig, Settings};
use krydder_bot::infrastructure::llm::{ChatBackend, CompletionsProvider};
use krydder_bot::infrastructure::logging;

const SUPPORTED_PLATFORMS: &[(&str, &str)] = &[("linux", "x86_64"), ("linux", "aarch64")];

#[derive(Parser)]
#[command(name = "krydder-bot", version)]
#[command(about = "A Discord bot with a taste for oregano", long_about = None)]
#[command(after_help = "You can also set options through environment variables, e.g. KRYDDER_TOKEN")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    args: BotArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot (default)
    Run,
    /// Print a default config file
    InitConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(Commands::InitConfig) = cli.command {
        return init_config();
    }

    let settings = match Settings::load(&cli.args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    logging::init(&settings);

    let token = if settings.console {
        None
    } else {
        match settings.token() {
            Ok(token) => Some(token.to_string()),
            Err(e) => {
                tracing::error!("No token specified ({})", e);
                return ExitCode::FAILURE;
            }
        }
    };

    check_platform();

    let router = build_router(&settings);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match token {
        Some(token) => rt.block_on(DiscordAdapter::new(token, router).run()),
        None => rt.block_on(Arc::new(ConsoleAdapter::new()).run(router)),
    };

    match result {
        Ok(()) => {
            tracing::info!("Bye!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_router(settings: &Settings) -> Arc<MessageRouter> {
    tracing::info!("Loading trigger words and responses into memory");
    let store = ResponseStore::load(&settings.assets());

    tracing::info!("Initializing commands");
    let registry = CommandRegistry::builtin();
    tracing::debug!("{} commands registered", registry.len());

    let backend: Option<Arc<dyn ChatBackend>> = match CompletionsProvider::new(&settings.ai) {
        Ok(provider) => {
            tracing::info!("Using AI endpoint {}", provider.url());
            Some(Arc::new(provider))
        }
        Err(AiError::NotConfigured) => None,
        Err(e) => {
            tracing::warn!("AI bridge disabled: {}", e);
            None
        }
    };
    let ai = AiBridge::new(backend, &settings.ai);
    if settings.always_ai && !ai.is_configured() {
        tracing::warn!("always-ai is set but no AI endpoint is configured");
    }

    let router = MessageRouter::new(
        settings.prefix.clone(),
        registry,
        store,
        settings.trigger_policy,
        ai,
    )
    .with_always_ai(settings.always_ai);

    Arc::new(router)
}

fn check_platform() {
    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    if !SUPPORTED_PLATFORMS.contains(&(os, arch)) {
        tracing::warn!(
            "Running on {}_{} is not supported and may lead to unexpected behavior",
            os,
            arch
        );
    }
}

fn init_config() -> ExitCode {
    match serde_yaml::to_string(&FileConfig::sample()) {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and pass it with --config.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to render config: {}", e);
            ExitCode::FAILURE
        }
    }
}
