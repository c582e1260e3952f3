//! Logging setup
//!
//! Builds a `tracing_subscriber` fmt subscriber with a local-time timer.

use crate::config::Config;

pub const DEFAULT_TIME_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]:[second]";

/// Timestamp formats accepted in `[logging] time_format`
pub const SUPPORTED_TIME_FORMATS: &[&str] = &[
    DEFAULT_TIME_FORMAT,
    "[hour]:[minute]:[second]",
    "[month]-[day] [hour]:[minute]",
    "[year]/[month]/[day] [hour]:[minute]:[second]",
];

/// Maps a requested format onto a supported one, falling back to the default
pub fn resolve_time_format(requested: &str) -> &'static str {
    SUPPORTED_TIME_FORMATS
        .iter()
        .find(|format| **format == requested)
        .copied()
        .unwrap_or(DEFAULT_TIME_FORMAT)
}

pub fn create_subscriber(
    verbose: bool,
    time_format: &str,
) -> Box<dyn tracing::Subscriber + Send + Sync> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let format = resolve_time_format(time_format);
    if format != time_format {
        eprintln!("Custom time format '{time_format}' not supported. Using default format.");
    }
    // Supported formats are known-good; an empty description only drops the timestamp
    let format_desc = time::format_description::parse(format).unwrap_or_default();

    Box::new(
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_timer(tracing_subscriber::fmt::time::LocalTime::new(format_desc))
            .finish(),
    )
}

/// Installs the global subscriber from configuration. Returns false when a
/// global subscriber was already set.
pub fn init(config: &Config) -> bool {
    let subscriber = create_subscriber(config.is_verbose_default(), &config.get_time_format());
    tracing::subscriber::set_global_default(subscriber).is_ok()
}
