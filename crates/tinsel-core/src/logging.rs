//! Tracing subscriber setup.

use crate::config::CoreConfig;
use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,tinsel_ui=debug";

/// Installs a formatting subscriber filtered by `RUST_LOG`, or [`DEFAULT_FILTER`].
pub fn init() -> bool {
    init_with(&CoreConfig::default())
}

/// Installs a formatting subscriber using the filter from `config`.
///
/// `RUST_LOG` still takes precedence. Returns whether the subscriber was
/// installed; when a global subscriber already exists nothing changes and the
/// refusal is traced to that subscriber.
pub fn init_with(config: &CoreConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.log_targets)
        .try_init()
    {
        Ok(()) => {
            tracing::debug!(filter = %config.log_filter, "Logging initialized");
            true
        }
        Err(err) => {
            tracing::trace!(%err, "Logging already initialized");
            false
        }
    }
}
