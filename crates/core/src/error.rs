//! Error types for the engine crate.
//!
//! Gameplay itself is infallible; only configuration can be rejected.

use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A timing or limit field must be positive
    #[error("invalid config: `{field}` must be greater than zero")]
    Zero {
        /// Name of the offending field
        field: &'static str,
    },

    /// The config document could not be parsed
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
