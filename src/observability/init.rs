//! Tracing initialization and subscriber setup.

use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` if set and valid
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// Idempotent: only the first call takes effect, later calls are ignored.
///
/// # Example
///
/// ```rust
/// use recordview::observability::init_tracing;
/// use recordview::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    let _ = subscriber.try_init();
}
