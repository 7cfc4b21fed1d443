use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;
use crate::constants::DEFAULT_LOG_FILTER;

static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter. Later calls are no-ops.
pub fn init(format: LogFormat) {
    LOGGER_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        let registry = tracing_subscriber::registry().with(filter);

        let result = match format {
            LogFormat::Text => registry.with(fmt::layer()).try_init(),
            LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        };
        if let Err(e) = result {
            eprintln!("failed to initialize logging: {e}");
        }
    });
}
