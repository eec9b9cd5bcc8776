use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { value: String, source: ParseError },
    Install(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { value, .. } => {
                write!(f, "invalid log filter '{value}'")
            }
            TelemetryError::Install(err) => write!(f, "could not install subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::Install(err) => Some(&**err),
        }
    }
}

/// Configured level for the dashboard, with the HTTP plumbing held at `warn`
/// so per-interaction request noise does not drown the load/export events.
fn filter_directives(level: &str) -> String {
    format!("{level},hyper=warn,tower_http=warn")
}

/// Install the process-wide subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = filter_directives(&config.log_level);
            EnvFilter::try_new(&directives).map_err(|source| TelemetryError::InvalidFilter {
                value: directives,
                source,
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_quiet_the_http_plumbing() {
        let directives = filter_directives("debug");
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("hyper=warn"));
        EnvFilter::try_new(&directives).expect("directives parse");
    }

    #[test]
    fn bad_configured_level_is_reported() {
        let config = TelemetryConfig {
            log_level: "!!not-a-level[".to_string(),
        };
        // try_from_default_env only succeeds when RUST_LOG is set; with the
        // configured level invalid this must surface as InvalidFilter.
        std::env::remove_var("RUST_LOG");
        let err = init(&config).expect_err("invalid filter is rejected");
        assert!(matches!(err, TelemetryError::InvalidFilter { .. }));
    }
}
