//! Shared configuration loader for cinematch
//!
//! Configuration is read from environment variables with the `CINEMATCH_`
//! prefix, optionally layered over a config file.
//!
//! # Override hierarchy
//!
//! defaults < config file < .env < environment
//!
//! # Example
//!
//! ```no_run
//! use cinematch_core::config::{load_dotenv, ConfigLoader, ScoringConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! load_dotenv();
//!
//! let scoring = ScoringConfig::from_env()?;
//! scoring.validate()?;
//! # Ok(())
//! # }
//! ```

use crate::error::CinematchError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix shared by every cinematch environment variable
pub const ENV_PREFIX: &str = "CINEMATCH";

/// Tolerance used when checking that blend weights sum to 1.0
const WEIGHT_EPSILON: f64 = 0.0001;

/// Configuration loader trait
///
/// Provides standardized methods for loading and validating configuration from
/// environment variables.
pub trait ConfigLoader: Sized {
    /// Load configuration from environment variables
    ///
    /// Missing optional values fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if a value is set but cannot be parsed.
    fn from_env() -> Result<Self, CinematchError>;

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if any validation check fails.
    fn validate(&self) -> Result<(), CinematchError>;
}

/// Scoring configuration
///
/// Weights used to blend text similarity with the normalized rating, plus the
/// default number of results returned by a query.
///
/// # Environment Variables
///
/// - `CINEMATCH_TEXT_WEIGHT` (optional): weight of genre text similarity (default: 0.8)
/// - `CINEMATCH_RATING_WEIGHT` (optional): weight of the scaled rating (default: 0.2)
/// - `CINEMATCH_TOP_N` (optional): default result count (default: 10)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight applied to cosine similarity of the genre features
    pub text_weight: f64,
    /// Weight applied to the min-max scaled rating of the candidate
    pub rating_weight: f64,
    /// Number of similar titles returned when the caller does not specify one
    pub top_n: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            text_weight: 0.8,
            rating_weight: 0.2,
            top_n: 10,
        }
    }
}

impl ScoringConfig {
    /// Load configuration from a file, with `CINEMATCH_*` environment
    /// variables taking precedence over file values.
    ///
    /// The format (TOML, JSON, YAML, ...) is inferred from the file extension.
    /// The result is validated before it is returned.
    pub fn from_file(path: &Path) -> Result<Self, CinematchError> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("text_weight", defaults.text_weight)?
            .set_default("rating_weight", defaults.rating_weight)?
            .set_default("top_n", defaults.top_n as i64)?
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check only the blend weights
    ///
    /// Weights must be finite, non-negative and sum to 1.0 within 1e-4.
    pub fn validate_weights(&self) -> Result<(), CinematchError> {
        if !self.text_weight.is_finite() || !self.rating_weight.is_finite() {
            return Err(CinematchError::config(
                "weights must be finite numbers",
                "CINEMATCH_TEXT_WEIGHT",
            ));
        }

        if self.text_weight < 0.0 || self.rating_weight < 0.0 {
            return Err(CinematchError::config(
                "All weights must be non-negative",
                "CINEMATCH_TEXT_WEIGHT",
            ));
        }

        let sum = self.text_weight + self.rating_weight;
        if (sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(CinematchError::config(
                format!("Weights must sum to 1.0, got {:.4}", sum),
                "CINEMATCH_RATING_WEIGHT",
            ));
        }

        Ok(())
    }
}

impl ConfigLoader for ScoringConfig {
    fn from_env() -> Result<Self, CinematchError> {
        let defaults = Self::default();

        Ok(Self {
            text_weight: parse_env_var("CINEMATCH_TEXT_WEIGHT", defaults.text_weight)?,
            rating_weight: parse_env_var("CINEMATCH_RATING_WEIGHT", defaults.rating_weight)?,
            top_n: parse_env_var("CINEMATCH_TOP_N", defaults.top_n)?,
        })
    }

    fn validate(&self) -> Result<(), CinematchError> {
        self.validate_weights()?;

        if self.top_n == 0 {
            return Err(CinematchError::config(
                "top_n must be greater than 0",
                "CINEMATCH_TOP_N",
            ));
        }

        Ok(())
    }
}

/// Parse an environment variable, falling back to `default` when unset
///
/// # Errors
///
/// Returns a `ConfigurationError` if the value is set but cannot be parsed
pub(crate) fn parse_env_var<T>(key: &str, default: T) -> Result<T, CinematchError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|e| CinematchError::config(format!("Failed to parse {}: {}", key, e), key))
        })
        .unwrap_or(Ok(default))
}

/// Load .env file if present
///
/// A missing .env file is not an error.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    /// Serializes tests that touch `CINEMATCH_*` variables
    pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_scoring_env() {
        env::remove_var("CINEMATCH_TEXT_WEIGHT");
        env::remove_var("CINEMATCH_RATING_WEIGHT");
        env::remove_var("CINEMATCH_TOP_N");
    }

    #[test]
    fn test_scoring_config_default() {
        let config = ScoringConfig::default();
        assert_eq!(config.text_weight, 0.8);
        assert_eq!(config.rating_weight, 0.2);
        assert_eq!(config.top_n, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scoring_config_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var("CINEMATCH_TEXT_WEIGHT", "0.6");
        env::set_var("CINEMATCH_RATING_WEIGHT", "0.4");
        env::set_var("CINEMATCH_TOP_N", "5");

        let config = ScoringConfig::from_env().unwrap();
        assert_eq!(config.text_weight, 0.6);
        assert_eq!(config.rating_weight, 0.4);
        assert_eq!(config.top_n, 5);

        clear_scoring_env();
    }

    #[test]
    fn test_scoring_config_from_env_invalid_value() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var("CINEMATCH_TOP_N", "many");

        let result = ScoringConfig::from_env();
        assert!(matches!(
            result,
            Err(CinematchError::ConfigurationError { .. })
        ));

        clear_scoring_env();
    }

    #[test]
    fn test_validation_weights_must_sum_to_one() {
        let config = ScoringConfig {
            text_weight: 0.7,
            rating_weight: 0.2,
            top_n: 10,
        };

        match config.validate().unwrap_err() {
            CinematchError::ConfigurationError { message, .. } => {
                assert!(message.contains("sum to 1.0"));
            }
            _ => panic!("Expected ConfigurationError"),
        }
    }

    #[test]
    fn test_validation_negative_weight() {
        let config = ScoringConfig {
            text_weight: 1.2,
            rating_weight: -0.2,
            top_n: 10,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_top_n() {
        let config = ScoringConfig {
            top_n: 0,
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config.validate_weights().is_ok());
    }

    #[test]
    fn test_from_file_toml() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_scoring_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "text_weight = 0.5\nrating_weight = 0.5\ntop_n = 3").unwrap();

        let config = ScoringConfig::from_file(file.path()).unwrap();
        assert_eq!(config.text_weight, 0.5);
        assert_eq!(config.rating_weight, 0.5);
        assert_eq!(config.top_n, 3);
    }

    #[test]
    fn test_from_file_partial_uses_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_scoring_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "top_n = 4").unwrap();

        let config = ScoringConfig::from_file(file.path()).unwrap();
        assert_eq!(config.text_weight, 0.8);
        assert_eq!(config.rating_weight, 0.2);
        assert_eq!(config.top_n, 4);
    }

    #[test]
    fn test_from_file_rejects_invalid_weights() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_scoring_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "text_weight = 0.9\nrating_weight = 0.9").unwrap();

        assert!(ScoringConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let result = ScoringConfig::from_file(Path::new("/nonexistent/cinematch.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_env_var_with_default() {
        let result: u32 = parse_env_var("CINEMATCH_NON_EXISTENT_VAR", 42).unwrap();
        assert_eq!(result, 42);
    }

    #[test]
    fn test_parse_env_var_invalid_value() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var("CINEMATCH_TEST_INVALID_VAR", "not-a-number");
        let result: Result<u32, _> = parse_env_var("CINEMATCH_TEST_INVALID_VAR", 42);
        assert!(result.is_err());
        env::remove_var("CINEMATCH_TEST_INVALID_VAR");
    }
}
