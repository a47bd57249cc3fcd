//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Picks the log filter: `LOG_LEVEL`, then `RUST_LOG`, then the environment
/// default (`info` in production, `debug` otherwise).
pub fn env_filter(config: &Config) -> EnvFilter {
    let default_level = if config.is_production() { "info" } else { "debug" };

    if let Some(level) = config.log_level.as_deref().filter(|l| !l.trim().is_empty()) {
        match EnvFilter::try_new(level) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("Invalid LOG_LEVEL {:?} ({}), using {}", level, e, default_level),
        }
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs the global subscriber. Production logs drop ANSI colour.
pub fn init_tracing(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_ansi(!config.is_production())
        .with_target(true)
        .init();
}
