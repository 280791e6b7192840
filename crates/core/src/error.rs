//! Error types shared by cinematch crates

use thiserror::Error;

/// Errors raised by the shared configuration and logging layers
#[derive(Debug, Error)]
pub enum CinematchError {
    /// A configuration value is missing, unparsable or out of range
    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
        /// Environment variable or config key that caused the failure
        key: Option<String>,
    },

    /// The tracing subscriber could not be installed
    #[error("Observability error: {0}")]
    ObservabilityError(String),
}

impl CinematchError {
    /// Shorthand for a configuration error tied to a key
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

impl From<config::ConfigError> for CinematchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigurationError {
            message: err.to_string(),
            key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CinematchError::config("weights must sum to 1.0", "CINEMATCH_TEXT_WEIGHT");
        assert_eq!(
            err.to_string(),
            "Configuration error: weights must sum to 1.0"
        );
        match err {
            CinematchError::ConfigurationError { key, .. } => {
                assert_eq!(key.as_deref(), Some("CINEMATCH_TEXT_WEIGHT"));
            }
            _ => panic!("Expected ConfigurationError"),
        }
    }
}
