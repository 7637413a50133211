//! Logger setup for binaries. The library itself only emits through `log`.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "painter3d::loader=debug").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: log::LevelFilter) -> Self {
        Self {
            env_filter: Some(level.to_string().to_lowercase()),
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Install the global logger. Later calls are ignored.
///
/// Falls back to `RUST_LOG`, then to `info`, when no filter is given.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);
        // Another logger may already be installed (test harnesses, embedders).
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
