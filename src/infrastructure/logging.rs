//! Logging setup - verbosity levels and colored level labels

use std::fmt;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::Settings;
use crate::infrastructure::llm::providers::completions::AI_DEBUG_TARGET;

const RESET: &str = "\x1b[0m";

/// Map the 0-3 verbosity scale onto tracing levels
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// How level labels are colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Plain,
    Basic,
    TrueColor,
}

impl ColorMode {
    pub fn detect(no_color: bool, force_true_color: bool) -> Self {
        if no_color {
            ColorMode::Plain
        } else if force_true_color || terminal_supports_true_color() {
            ColorMode::TrueColor
        } else {
            ColorMode::Basic
        }
    }
}

fn terminal_supports_true_color() -> bool {
    std::env::var("COLORTERM")
        .map(|v| matches!(v.to_lowercase().as_str(), "truecolor" | "24bit"))
        .unwrap_or(false)
}

/// Event format: `2024/01/31 12:00:00 [INFO] message`
#[derive(Debug, Clone, Copy)]
pub struct LevelLabelFormat {
    colors: ColorMode,
}

impl LevelLabelFormat {
    pub fn new(colors: ColorMode) -> Self {
        Self { colors }
    }

    pub fn label(&self, level: &Level) -> String {
        let name = level.as_str();
        let color = match (self.colors, *level) {
            (ColorMode::Plain, _) => return name.to_string(),
            (ColorMode::Basic, Level::ERROR) => "\x1b[31m",
            (ColorMode::Basic, Level::WARN) => "\x1b[33m",
            (ColorMode::Basic, Level::INFO) => "\x1b[32m",
            (ColorMode::Basic, _) => "\x1b[35m",
            (ColorMode::TrueColor, Level::ERROR) => "\x1b[38;2;255;85;85m",
            (ColorMode::TrueColor, Level::WARN) => "\x1b[38;2;255;215;0m",
            (ColorMode::TrueColor, Level::INFO) => "\x1b[38;2;80;250;123m",
            (ColorMode::TrueColor, _) => "\x1b[38;2;189;147;249m",
        };
        format!("{}{}{}", color, name, RESET)
    }
}

impl<S, N> FormatEvent<S, N> for LevelLabelFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let now = chrono::Local::now();
        write!(
            writer,
            "{} [{}] ",
            now.format("%Y/%m/%d %H:%M:%S"),
            self.label(event.metadata().level())
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Crate whose lines the verbosity level applies to
const OWN_TARGET: &str = "krydder_bot";

/// Build the level filter.
///
/// Verbosity applies to this crate only. Dependencies stay at `warn`, or
/// quieter when verbosity is 0. `RUST_LOG` refines the defaults.
pub fn build_filter(verbosity: u8, ai_debug: bool) -> EnvFilter {
    let level = LevelFilter::from_level(level_for(verbosity));
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.min(level).into())
        .from_env_lossy();

    let mut directives = vec![format!("{}={}", OWN_TARGET, level)];
    if ai_debug {
        directives.push(format!("{}=debug", AI_DEBUG_TARGET));
    }
    for directive in directives {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("invalid log directive {}: {}", directive, e),
        }
    }
    filter
}

/// Install the global subscriber
pub fn init(settings: &Settings) {
    let colors = ColorMode::detect(settings.no_color, settings.true_color);

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(settings.verbosity, settings.ai.debug))
        .with_ansi(colors != ColorMode::Plain)
        .event_format(LevelLabelFormat::new(colors))
        .init();

    if colors == ColorMode::TrueColor {
        tracing::debug!("Terminal supports full color");
    }
    if settings.ai.debug {
        tracing::warn!("AI debug logging is on, conversations will be written to the log");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), Level::ERROR);
        assert_eq!(level_for(1), Level::WARN);
        assert_eq!(level_for(2), Level::INFO);
        assert_eq!(level_for(3), Level::DEBUG);
    }

    #[test]
    fn test_labels() {
        assert_eq!(LevelLabelFormat::new(ColorMode::Plain).label(&Level::WARN), "WARN");
        assert_eq!(
            LevelLabelFormat::new(ColorMode::Basic).label(&Level::ERROR),
            "\x1b[31mERROR\x1b[0m"
        );
        assert_eq!(
            LevelLabelFormat::new(ColorMode::TrueColor).label(&Level::DEBUG),
            "\x1b[38;2;189;147;249mDEBUG\x1b[0m"
        );
    }

    #[test]
    fn test_no_color_wins() {
        assert_eq!(ColorMode::detect(true, true), ColorMode::Plain);
        assert_eq!(ColorMode::detect(false, true), ColorMode::TrueColor);
    }

    #[test]
    fn test_ai_debug_enables_target() {
        let filter = build_filter(0, true);
        assert!(filter.to_string().contains("ai_debug=debug"));
    }

    #[test]
    fn test_verbosity_is_scoped_to_own_crate() {
        let filter = build_filter(3, false).to_string();
        assert!(filter.contains("krydder_bot=debug"), "{filter}");
        assert!(!filter.contains("ai_debug"), "{filter}");

        let quiet = build_filter(0, false).to_string();
        assert!(quiet.contains("krydder_bot=error"), "{quiet}");
    }

    #[test]
    fn test_dependencies_stay_quiet_at_high_verbosity() {
        use tracing_subscriber::layer::SubscriberExt;

        let subscriber = tracing_subscriber::registry().with(build_filter(3, false));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "krydder_bot::router", Level::DEBUG));
            assert!(!tracing::enabled!(target: "serenity::gateway", Level::DEBUG));
            assert!(tracing::enabled!(target: "serenity::gateway", Level::WARN));
        });
    }
}
