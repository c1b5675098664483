//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// Board size and optional RNG seed.
///
/// Missing fields fall back to the defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    /// `None` seeds from the operating system
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard_board() {
        let config = EngineConfig::default();
        assert_eq!((config.width, config.height, config.seed), (10, 20, None));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            EngineConfig::new(0, 20).validate(),
            Err(EngineError::InvalidDimensions { width: 0, height: 20 })
        );
        assert!(EngineConfig::new(10, 0).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"height": 24, "seed": 9}"#).unwrap();
        assert_eq!(config, EngineConfig::new(10, 24).with_seed(9));
    }
}
