//! CLI configuration.
//!
//! Logging is configured from the `-v` flag count, optionally overridden
//! by the environment:
//!
//! - `ROSTER_LOG`: an `EnvFilter` directive such as `roster_format=trace`.
//!   Takes precedence over `-v`.
//! - `ROSTER_LOG_FORMAT`: `text` (default) or `json`.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive.
pub const LOG_ENV: &str = "ROSTER_LOG";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "ROSTER_LOG_FORMAT";

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// `EnvFilter` directive for the subscriber.
    pub log_filter: String,
    /// Output format for log lines.
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from the verbosity flag and the environment.
    pub fn from_env(verbose: u8) -> Result<Self, ConfigError> {
        let filter = std::env::var(LOG_ENV).ok();
        let format = std::env::var(LOG_FORMAT_ENV).ok();
        Self::resolve(verbose, filter.as_deref(), format.as_deref())
    }

    /// Resolve configuration from explicit values.
    ///
    /// Blank environment values count as unset.
    pub fn resolve(
        verbose: u8,
        filter: Option<&str>,
        format: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let log_filter = match filter.map(str::trim).filter(|s| !s.is_empty()) {
            Some(directive) => {
                EnvFilter::try_new(directive).map_err(|e| {
                    ConfigError::InvalidFilter(directive.to_string(), e.to_string())
                })?;
                directive.to_string()
            }
            None => verbosity_filter(verbose).to_string(),
        };

        let log_format = match format.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            log_filter,
            log_format,
        })
    }

    /// Build the subscriber filter.
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_filter)
            .map_err(|e| ConfigError::InvalidFilter(self.log_filter.clone(), e.to_string()))
    }
}

fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid ROSTER_LOG directive {0:?}: {1}")]
    InvalidFilter(String, String),
    #[error("invalid ROSTER_LOG_FORMAT value {0:?}: expected \"text\" or \"json\"")]
    InvalidLogFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        let level = |v| CliConfig::resolve(v, None, None).unwrap().log_filter;
        assert_eq!(level(0), "warn");
        assert_eq!(level(1), "info");
        assert_eq!(level(2), "debug");
        assert_eq!(level(3), "trace");
        assert_eq!(level(9), "trace");
    }

    #[test]
    fn env_directive_overrides_verbosity() {
        let config = CliConfig::resolve(3, Some("roster_format=debug"), None).unwrap();
        assert_eq!(config.log_filter, "roster_format=debug");
        assert!(config.env_filter().is_ok());
    }

    #[test]
    fn blank_values_are_unset() {
        let config = CliConfig::resolve(1, Some("  "), Some("")).unwrap();
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn invalid_directive_is_rejected() {
        let err = CliConfig::resolve(0, Some("roster_format=loud"), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFilter(..)));
        assert!(err.to_string().contains(LOG_ENV));
    }

    #[test]
    fn log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        let err = CliConfig::resolve(0, None, Some("yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogFormat(ref v) if v == "yaml"));
    }
}
