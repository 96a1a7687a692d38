//! Logging configuration and subscriber installation.

use tracing_subscriber::EnvFilter;

use crate::error::{TelemetryError, TelemetryResult};

/// Logging configuration.
///
/// The base level applies to the whole workspace; per-target
/// directives (e.g. `replay_engine=trace`) refine it. `RUST_LOG`
/// overrides everything when set.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level (`error`, `warn`, `info`, `debug`, `trace`).
    level: String,
    /// Additional per-target directives.
    directives: Vec<String>,
    /// Write to stderr instead of stdout. The TUI owns stdout, so the
    /// frontend enables this.
    stderr: bool,
}

impl LogConfig {
    /// Create a config with the given base level.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            directives: Vec::new(),
            stderr: false,
        }
    }

    /// Add a per-target directive such as `replay_engine=trace`.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Route log output to stderr.
    #[must_use]
    pub fn with_stderr(mut self) -> Self {
        self.stderr = true;
        self
    }

    fn filter(&self) -> TelemetryResult<EnvFilter> {
        let mut spec = self.level.clone();
        for directive in &self.directives {
            spec.push(',');
            spec.push_str(directive);
        }
        EnvFilter::try_new(&spec)
            .map_err(|e| TelemetryError::ConfigError(format!("invalid filter `{spec}`: {e}")))
    }
}

/// Install the global tracing subscriber from a [`LogConfig`].
///
/// `RUST_LOG` takes precedence over the configured level when present.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => config.filter()?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.stderr {
        builder.with_writer(std::io::stderr).try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| TelemetryError::InitError(e.to_string()))
}

/// Install logging at `info` with no directives.
pub fn setup_default_logging() -> TelemetryResult<()> {
    setup_logging(&LogConfig::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_spec_combines_level_and_directives() {
        let config = LogConfig::new("info")
            .with_directive("replay_engine=trace")
            .with_directive("replay_cli=debug");
        assert!(config.filter().is_ok());
    }

    #[test]
    fn invalid_level_is_a_config_error() {
        let config = LogConfig::new("loudest");
        let err = config.filter().unwrap_err();
        assert!(matches!(err, TelemetryError::ConfigError(_)));
    }

    #[test]
    fn stderr_flag_is_recorded() {
        let config = LogConfig::new("info").with_stderr();
        assert!(config.stderr);
    }
}
