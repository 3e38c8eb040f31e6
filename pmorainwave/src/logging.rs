//! Logging bootstrap driven by pmoconfig
//!
//! Reads `host.logger.min_level` and `host.logger.enable_console` and
//! installs a global `tracing` subscriber accordingly.

use crate::error::Result;
use pmoconfig::Config;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

/// Parses a level name (`TRACE`, `debug`, `off`, ...), falling back to `INFO`
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or_else(|_| {
        eprintln!("Unknown log level '{}', using INFO", level);
        LevelFilter::INFO
    })
}

/// Installs the global subscriber
///
/// Calling it again once a subscriber is installed is a no-op.
pub fn init_logging(config: &Config) -> Result<()> {
    let level = parse_level(&config.get_log_min_level()?);
    let enable_console = config.get_log_enable_console().unwrap_or(true);

    let subscriber = Registry::default().with(level);
    let installed = if enable_console {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_level(true),
            )
            .try_init()
    } else {
        subscriber.try_init()
    };

    match installed {
        Ok(()) => tracing::debug!(%level, enable_console, "Logging initialized"),
        Err(e) => tracing::debug!("Log subscriber already installed: {}", e),
    }
    Ok(())
}
