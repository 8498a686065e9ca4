//! Simulation configuration

use crate::track::TrackGeometry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reference cadence is 10 ticks per second
pub const DEFAULT_TICK_SECONDS: f64 = 0.1;
pub const DEFAULT_ANGLE_STEP: f64 = 0.02;
pub const DEFAULT_TOTAL_LAPS: u32 = 58;
/// 1:22.123
pub const DEFAULT_BEST_LAP_SEED: f64 = 82.123;
/// 0.1% per tick
pub const DEFAULT_COMPETITOR_ADVANCE_PROBABILITY: f64 = 0.001;
pub const DEFAULT_DRS_MIN_SPEED_KPH: f64 = 250.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidStep { name: &'static str, value: f64 },

    #[error("competitor advance probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("initial fuel must be within [0, 100], got {0}")]
    InvalidFuel(f64),

    #[error("track radius must be a positive finite number, got {0}")]
    InvalidTrack(f64),

    #[error("race must have at least one lap")]
    NoLaps,
}

/// Tunables of the simulation
///
/// The defaults reproduce the reference dashboard. Every field can be
/// overridden when deserializing; missing fields keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulated seconds added per tick
    pub tick_seconds: f64,

    /// Radians travelled per tick
    pub angle_step: f64,

    pub total_laps: u32,

    /// Best lap time before any lap has been completed
    pub best_lap_seed: f64,

    /// Fuel at construction, in percent
    pub initial_fuel: f64,

    /// Chance per tick that a competitor completes a lap
    pub competitor_advance_probability: f64,

    /// DRS can only open above this speed
    pub drs_min_speed_kph: f64,

    pub track: TrackGeometry,

    /// Fixed RNG seed for reproducible sessions; entropy when unset
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_seconds: DEFAULT_TICK_SECONDS,
            angle_step: DEFAULT_ANGLE_STEP,
            total_laps: DEFAULT_TOTAL_LAPS,
            best_lap_seed: DEFAULT_BEST_LAP_SEED,
            initial_fuel: 100.0,
            competitor_advance_probability: DEFAULT_COMPETITOR_ADVANCE_PROBABILITY,
            drs_min_speed_kph: DEFAULT_DRS_MIN_SPEED_KPH,
            track: TrackGeometry::default(),
            seed: None,
        }
    }
}

fn positive_finite(name: &'static str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidStep { name, value })
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        positive_finite("tick_seconds", self.tick_seconds)?;
        positive_finite("angle_step", self.angle_step)?;
        positive_finite("best_lap_seed", self.best_lap_seed)?;

        if self.total_laps == 0 {
            return Err(SimError::NoLaps);
        }
        if !(0.0..=1.0).contains(&self.competitor_advance_probability) {
            return Err(SimError::InvalidProbability(
                self.competitor_advance_probability,
            ));
        }
        if !(0.0..=100.0).contains(&self.initial_fuel) {
            return Err(SimError::InvalidFuel(self.initial_fuel));
        }
        if !(self.track.radius.is_finite() && self.track.radius > 0.0) {
            return Err(SimError::InvalidTrack(self.track.radius));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_steps() {
        let config = SimConfig {
            angle_step: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidStep { name: "angle_step", .. })
        ));

        let config = SimConfig {
            tick_seconds: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidStep { name: "tick_seconds", .. })
        ));
    }

    #[test]
    fn test_rejects_probability_out_of_range() {
        let config = SimConfig {
            competitor_advance_probability: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(SimError::InvalidProbability(1.5)));
    }

    #[test]
    fn test_rejects_zero_laps_and_bad_track() {
        let config = SimConfig {
            total_laps: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(SimError::NoLaps));

        let mut config = SimConfig::default();
        config.track.radius = -1.0;
        assert_eq!(config.validate(), Err(SimError::InvalidTrack(-1.0)));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"total_laps": 10, "seed": 7}"#).unwrap();
        assert_eq!(config.total_laps, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.angle_step, DEFAULT_ANGLE_STEP);
    }
}
