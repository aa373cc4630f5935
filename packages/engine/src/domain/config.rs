//! Simulation settings
//!
//! Loaded from a camelCase JSON blob by the host page and validated here, so
//! the tick loop never sees an out-of-range value.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Hard upper bound on simulated ticks per second.
pub const MAX_TPS: f32 = 10_000.0;

/// Default number of message-free ticks before a chunk goes dormant.
pub const DEFAULT_DORMANCY_THRESHOLD: u8 = 5;

const DEFAULT_SEED: u32 = 12345;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimConfig {
    pub ticks_per_second: f32,
    pub frame_rate: f32,
    pub threads: usize,
    pub dormancy_threshold: u8,
    pub seed: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60.0,
            frame_rate: 60.0,
            threads: default_threads(),
            dormancy_threshold: DEFAULT_DORMANCY_THRESHOLD,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    /// Parse and validate a settings blob. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_tps(self.ticks_per_second)?;
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(ConfigError::FrameRate(self.frame_rate));
        }
        validate_threads(self.threads)?;
        if self.dormancy_threshold == 0 {
            return Err(ConfigError::DormancyThreshold);
        }
        Ok(())
    }

    /// Ticks owed per presentation frame; may be fractional.
    #[inline]
    pub fn ticks_per_frame(&self) -> f32 {
        self.ticks_per_second / self.frame_rate
    }

    /// Seed for the xorshift generator, which must never be zero.
    #[inline]
    pub fn rng_seed(&self) -> u32 {
        if self.seed == 0 { DEFAULT_SEED } else { self.seed }
    }
}

pub(crate) fn validate_tps(tps: f32) -> Result<(), ConfigError> {
    if tps.is_finite() && tps > 0.0 && tps <= MAX_TPS {
        Ok(())
    } else {
        Err(ConfigError::TicksPerSecond { value: tps, max: MAX_TPS })
    }
}

pub(crate) fn validate_threads(threads: usize) -> Result<(), ConfigError> {
    if threads >= 1 {
        Ok(())
    } else {
        Err(ConfigError::Threads(threads))
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ticks_per_frame(), 1.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = SimConfig::from_json(r#"{"ticksPerSecond": 120, "threads": 2}"#).unwrap();
        assert_eq!(config.ticks_per_second, 120.0);
        assert_eq!(config.threads, 2);
        assert_eq!(config.dormancy_threshold, DEFAULT_DORMANCY_THRESHOLD);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            SimConfig::from_json(r#"{"ticksPerSecond": 0}"#),
            Err(ConfigError::TicksPerSecond { .. })
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{"ticksPerSecond": -3}"#),
            Err(ConfigError::TicksPerSecond { .. })
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{"ticksPerSecond": 20000}"#),
            Err(ConfigError::TicksPerSecond { .. })
        ));
        assert_eq!(SimConfig::from_json(r#"{"threads": 0}"#), Err(ConfigError::Threads(0)));
        assert_eq!(
            SimConfig::from_json(r#"{"dormancyThreshold": 0}"#),
            Err(ConfigError::DormancyThreshold)
        );
        assert!(matches!(SimConfig::from_json("not json"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn zero_seed_is_remapped() {
        let config = SimConfig { seed: 0, ..SimConfig::default() };
        assert_ne!(config.rng_seed(), 0);
    }
}
