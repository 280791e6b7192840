//! # Cinematch Core
//!
//! Shared building blocks for the cinematch workspace.
//!
//! ## Modules
//!
//! - `error`: Error types and handling
//! - `config`: Configuration loading and validation
//! - `observability`: Structured logging setup
//! - `math`: Vector math utilities

pub mod config;
pub mod error;
pub mod math;
pub mod observability;

// Re-export commonly used types
pub use self::config::{load_dotenv, ConfigLoader, ScoringConfig, ENV_PREFIX};
pub use error::CinematchError;
pub use math::{cosine_similarity, dot_product, l2_norm, normalize_vector};
pub use observability::{init_logging, LogConfig, LogFormat};

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CinematchError>;
