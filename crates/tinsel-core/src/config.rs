use crate::logging::DEFAULT_FILTER;

/// Process-wide settings for logging and profiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Print the event target (module path) with every log line.
    pub log_targets: bool,
    /// Turn puffin scopes on at startup.
    pub profiling: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_FILTER.to_string(),
            log_targets: true,
            profiling: false,
        }
    }
}

impl CoreConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_profiling(mut self, enabled: bool) -> Self {
        self.profiling = enabled;
        self
    }
}
