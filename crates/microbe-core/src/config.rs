//! Configuration types for the lifecycle model.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Lifecycle constants shared by every organism
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Minimum lifespan in ticks
    pub base_life: i32,
    /// Width of the random lifespan range added to `base_life`
    pub max_life: i32,
    /// Minimum starting health
    pub base_health: i32,
    /// Width of the random health range added to `base_health`
    pub max_health: i32,
    /// Ticks of movement before the first reproduction
    pub reproduction_cycle: i32,
    /// Width of the random range added to `reproduction_cycle`
    pub reproduction_jitter: i32,
    /// Health required to reproduce; also the timer reset after reproducing
    pub good_health: i32,
    /// Health gained per feeding
    pub feed_gain: i32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            base_life: 500,
            max_life: 1500,
            base_health: 200,
            max_health: 600,
            reproduction_cycle: 500,
            reproduction_jitter: 100,
            good_health: 200,
            feed_gain: 100,
        }
    }
}

impl LifecycleConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every random range is non-empty and every base is usable
    pub fn validate(&self) -> Result<()> {
        let widths = [
            ("max_life", self.max_life),
            ("max_health", self.max_health),
            ("reproduction_jitter", self.reproduction_jitter),
        ];
        for (name, value) in widths {
            if value <= 0 {
                return Err(Error::Validation(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let bases = [
            ("base_life", self.base_life),
            ("base_health", self.base_health),
            ("reproduction_cycle", self.reproduction_cycle),
            ("good_health", self.good_health),
            ("feed_gain", self.feed_gain),
        ];
        for (name, value) in bases {
            if value < 0 {
                return Err(Error::Validation(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if self.base_life.checked_add(self.max_life).is_none()
            || self.base_health.checked_add(self.max_health).is_none()
            || self
                .reproduction_cycle
                .checked_add(self.reproduction_jitter)
                .is_none()
        {
            return Err(Error::Validation("random range overflows i32".to_string()));
        }

        // the strongest newborn must survive its first feeding
        if self
            .base_health
            .checked_add(self.max_health)
            .and_then(|top| top.checked_add(self.feed_gain))
            .is_none()
        {
            return Err(Error::Validation(format!(
                "feed_gain {} overflows the health range",
                self.feed_gain
            )));
        }

        Ok(())
    }
}

/// Reference food grid parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodGridConfig {
    /// Width of the grid
    pub width: i32,
    /// Height of the grid
    pub height: i32,
    /// Probability that a cell starts with food (0.0 to 1.0)
    pub density: f32,
}

impl Default for FoodGridConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            density: 0.1,
        }
    }
}

impl FoodGridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::Validation(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(Error::Validation(format!(
                "density must be within [0, 1], got {}",
                self.density
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let lifecycle = LifecycleConfig::default();
        assert_eq!(lifecycle.max_life, 1500);
        assert_eq!(lifecycle.good_health, 200);
        assert_eq!(lifecycle.feed_gain, 100);
        assert!(lifecycle.validate().is_ok());

        let grid = FoodGridConfig::default();
        assert_eq!(grid.width, 256);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = LifecycleConfig::from_json_str(r#"{ "feed_gain": 40 }"#).unwrap();
        assert_eq!(config.feed_gain, 40);
        assert_eq!(config.base_life, 500);
        assert_eq!(config.reproduction_cycle, 500);
    }

    #[test]
    fn test_empty_range_is_rejected() {
        let err = LifecycleConfig::from_json_str(r#"{ "max_health": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_negative_base_is_rejected() {
        let config = LifecycleConfig {
            feed_gain: -1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_feed_gain_overflow_is_rejected() {
        let config = LifecycleConfig {
            feed_gain: i32::MAX,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let config = LifecycleConfig {
            feed_gain: i32::MAX - 800,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = LifecycleConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_grid_config_bounds() {
        let config = FoodGridConfig {
            density: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = FoodGridConfig {
            width: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lifecycle_serialization() {
        let config = LifecycleConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: LifecycleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
