// 7.0 config.rs: league settings in one place. cap size and the near-cap buffer.
// 7.1 presets mirror how a league commissioner would tune the warning band.

use crate::cap::CapParams;
use crate::types::Amount;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueConfig {
    pub cap: CapParams,
}

impl LeagueConfig {
    // same cap, wider warning band (last quarter of the cap)
    pub fn strict() -> Self {
        let mut config = Self::default();
        config.cap.near_cap_threshold = Amount::new(dec!(75));
        config
    }

    pub fn with_total_cap(mut self, total: Amount) -> Self {
        self.cap.total_cap = total;
        self
    }

    pub fn with_near_cap_threshold(mut self, threshold: Amount) -> Self {
        self.cap.near_cap_threshold = threshold;
        self
    }

    // Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cap.total_cap.is_positive() {
            return Err(ConfigError::InvalidCap {
                reason: format!("total cap must be positive, got {}", self.cap.total_cap),
            });
        }

        if self.cap.near_cap_threshold.is_negative() || self.cap.near_cap_threshold > self.cap.total_cap {
            return Err(ConfigError::InvalidThreshold {
                reason: format!(
                    "near-cap threshold {} must be between $0.0 and the total cap {}",
                    self.cap.near_cap_threshold, self.cap.total_cap
                ),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid cap: {reason}")]
    InvalidCap { reason: String },

    #[error("invalid near-cap threshold: {reason}")]
    InvalidThreshold { reason: String },
}

// League presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaguePreset {
    Standard,
    Strict,
}

impl LeaguePreset {
    pub fn config(&self) -> LeagueConfig {
        match self {
            LeaguePreset::Standard => LeagueConfig::default(),
            LeaguePreset::Strict => LeagueConfig::strict(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        let config = LeagueConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cap.total_cap.value(), dec!(300));
        assert_eq!(config.cap.near_cap_threshold.value(), dec!(50));
    }

    #[test]
    fn presets_valid() {
        assert!(LeaguePreset::Standard.config().validate().is_ok());
        let strict = LeaguePreset::Strict.config();
        assert!(strict.validate().is_ok());
        assert_eq!(strict.cap.near_cap_threshold.value(), dec!(75));
    }

    #[test]
    fn zero_cap_rejected() {
        let config = LeagueConfig::default().with_total_cap(Amount::zero());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCap { .. })));
    }

    #[test]
    fn threshold_above_cap_rejected() {
        let config = LeagueConfig::default().with_near_cap_threshold(Amount::new(dec!(301)));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidThreshold { .. })));

        let config = LeagueConfig::default().with_near_cap_threshold(Amount::new(dec!(-1)));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidThreshold { .. })));
    }

    #[test]
    fn config_serialization() {
        let config = LeagueConfig::strict();
        let json = serde_json::to_string(&config).unwrap();
        let back: LeagueConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cap.near_cap_threshold, config.cap.near_cap_threshold);
    }
}
