//! Engine configuration.
//!
//! Defaults come from the constants in `blockfall_types`. A JSON document may
//! override any subset of fields:
//!
//! ```
//! use blockfall_core::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "lock_delay_ms": 750 }"#).unwrap();
//! assert_eq!(config.lock_delay_ms, 750);
//! assert_eq!(config.lock_reset_limit, 15);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::types::{
    LOCK_DELAY_MS, LOCK_RESET_LIMIT, MOVE_REPEAT_MS, REPEAT_DELAY_MS, SOFT_DROP_REPEAT_MS,
};

/// Tunable timings for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grace period before a grounded piece locks
    pub lock_delay_ms: u32,
    /// Move/rotate resets allowed while grounded
    pub lock_reset_limit: u8,
    /// Minimum interval between held horizontal moves
    pub move_repeat_ms: u32,
    /// Minimum interval between held soft-drop steps
    pub soft_drop_repeat_ms: u32,
    /// Hold time before a held input starts repeating (may be zero)
    pub repeat_delay_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lock_delay_ms: LOCK_DELAY_MS,
            lock_reset_limit: LOCK_RESET_LIMIT,
            move_repeat_ms: MOVE_REPEAT_MS,
            soft_drop_repeat_ms: SOFT_DROP_REPEAT_MS,
            repeat_delay_ms: REPEAT_DELAY_MS,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lock_delay_ms(mut self, ms: u32) -> Self {
        self.lock_delay_ms = ms;
        self
    }

    pub fn with_lock_reset_limit(mut self, limit: u8) -> Self {
        self.lock_reset_limit = limit;
        self
    }

    pub fn with_move_repeat_ms(mut self, ms: u32) -> Self {
        self.move_repeat_ms = ms;
        self
    }

    pub fn with_soft_drop_repeat_ms(mut self, ms: u32) -> Self {
        self.soft_drop_repeat_ms = ms;
        self
    }

    pub fn with_repeat_delay_ms(mut self, ms: u32) -> Self {
        self.repeat_delay_ms = ms;
        self
    }

    /// Reject zero-valued fields. `repeat_delay_ms` may be zero.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("lock_delay_ms", self.lock_delay_ms),
            ("lock_reset_limit", u32::from(self.lock_reset_limit)),
            ("move_repeat_ms", self.move_repeat_ms),
            ("soft_drop_repeat_ms", self.soft_drop_repeat_ms),
        ];
        match fields.iter().find(|(_, v)| *v == 0) {
            Some(&(field, _)) => Err(ConfigError::Zero { field }),
            None => Ok(()),
        }
    }

    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.lock_delay_ms, 500);
        assert_eq!(config.lock_reset_limit, 15);
        assert_eq!(config.move_repeat_ms, 100);
        assert_eq!(config.soft_drop_repeat_ms, 50);
        assert_eq!(config.repeat_delay_ms, 150);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_lock_delay_ms(300)
            .with_lock_reset_limit(5)
            .with_move_repeat_ms(80)
            .with_soft_drop_repeat_ms(30)
            .with_repeat_delay_ms(0);
        assert_eq!(config.lock_delay_ms, 300);
        assert_eq!(config.lock_reset_limit, 5);
        assert_eq!(config.move_repeat_ms, 80);
        assert_eq!(config.soft_drop_repeat_ms, 30);
        assert_eq!(config.repeat_delay_ms, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_field_rejected() {
        let err = EngineConfig::new().with_move_repeat_ms(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Zero { field: "move_repeat_ms" }));
        assert!(err.to_string().contains("move_repeat_ms"));
    }

    #[test]
    fn test_partial_json() {
        let config = EngineConfig::from_json(r#"{"soft_drop_repeat_ms": 40}"#).unwrap();
        assert_eq!(config.soft_drop_repeat_ms, 40);
        assert_eq!(config.move_repeat_ms, 100);
    }

    #[test]
    fn test_bad_json() {
        let err = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let err = EngineConfig::from_json(r#"{"lock_delay_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Zero { .. }));
    }
}
