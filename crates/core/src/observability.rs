//! Structured logging setup
//!
//! Installs a `tracing` subscriber with an `EnvFilter` and either a
//! human-readable or a JSON formatter. Log output goes to stderr so that
//! stdout stays reserved for command results.
//!
//! # Environment Variables
//!
//! - `CINEMATCH_LOG_LEVEL` or `RUST_LOG` (optional): filter directive (default: "info")
//! - `CINEMATCH_LOG_FORMAT` (optional): `pretty` or `json` (default: "pretty")

use crate::config::{parse_env_var, ConfigLoader};
use crate::error::CinematchError;
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. "info" or "cinematch_similarity=debug"
    pub level: String,
    pub format: LogFormat,
    /// Recorded on the initialization event
    pub service_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            service_name: "cinematch".to_string(),
        }
    }
}

impl ConfigLoader for LogConfig {
    fn from_env() -> Result<Self, CinematchError> {
        let defaults = Self::default();

        let level = std::env::var("CINEMATCH_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(defaults.level);

        let format = parse_env_var("CINEMATCH_LOG_FORMAT", defaults.format)?;

        Ok(Self {
            level,
            format,
            service_name: defaults.service_name,
        })
    }

    fn validate(&self) -> Result<(), CinematchError> {
        EnvFilter::try_new(&self.level).map_err(|e| {
            CinematchError::config(
                format!("Invalid log level '{}': {}", self.level, e),
                "CINEMATCH_LOG_LEVEL",
            )
        })?;
        Ok(())
    }
}

/// Install the global tracing subscriber
///
/// Must be called at most once per process.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a global subscriber
/// is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), CinematchError> {
    let env_filter = EnvFilter::try_new(&config.level).map_err(|e| {
        CinematchError::ObservabilityError(format!("Invalid log filter '{}': {}", config.level, e))
    })?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| CinematchError::ObservabilityError(e.to_string()))?;

    tracing::debug!(
        service_name = %config.service_name,
        format = %config.format,
        level = %config.level,
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::ENV_LOCK;
    use std::env;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("PRETTY".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_config_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var("CINEMATCH_LOG_LEVEL", "debug");
        env::set_var("CINEMATCH_LOG_FORMAT", "json");

        let config = LogConfig::from_env().unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);

        env::remove_var("CINEMATCH_LOG_LEVEL");
        env::remove_var("CINEMATCH_LOG_FORMAT");
    }

    #[test]
    fn test_log_config_invalid_level() {
        let config = LogConfig {
            level: "cinematch=verbose".to_string(),
            ..LogConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
