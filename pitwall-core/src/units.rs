//! Type-safe wrappers for physical units
//!
//! Newtype wrappers around f64 keep seconds, radians, temperatures and
//! pressures from being mixed up inside the simulation.
//!
//! All unit types serialize with 4 decimal places to reduce JSON payload size.

use serde::{Deserialize, Serialize};

/// Round f64 to 4 decimal places for compact JSON serialization
///
/// Values too large to scale are written unrounded.
fn round4<S: serde::Serializer>(val: &f64, s: S) -> Result<S::Ok, S::Error> {
    let scaled = *val * 10000.0;
    if scaled.is_finite() {
        s.serialize_f64(scaled.round() / 10000.0)
    } else {
        s.serialize_f64(*val)
    }
}

/// Seconds (lap times, elapsed time)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Seconds(#[serde(serialize_with = "round4")] pub f64);

impl Seconds {
    /// Format as a lap time, e.g. `1:22.123`
    pub fn to_lap_string(&self) -> String {
        crate::format::format_lap_time(self.0)
    }
}

/// Radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Radians(#[serde(serialize_with = "round4")] pub f64);

/// Kilometers per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct KilometersPerHour(#[serde(serialize_with = "round4")] pub f64);

/// Revolutions per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Rpm(#[serde(serialize_with = "round4")] pub f64);

/// Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Celsius(#[serde(serialize_with = "round4")] pub f64);

/// Tire temperature bands used by the dashboard colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThermalBand {
    Cold,
    Optimal,
    Overheating,
}

impl Celsius {
    pub fn thermal_band(&self) -> ThermalBand {
        match self.0 {
            t if t > 100.0 => ThermalBand::Overheating,
            t if t > 80.0 => ThermalBand::Optimal,
            _ => ThermalBand::Cold,
        }
    }
}

/// Pounds per square inch (tire pressure)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Psi(#[serde(serialize_with = "round4")] pub f64);

/// Percentage (0.0 to 100.0)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Percent(#[serde(serialize_with = "round4")] pub f64);

impl Percent {
    /// Create a new percentage, clamping to [0.0, 100.0]
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 100.0))
    }

    /// Get as a fraction (0.0 to 1.0)
    pub fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }
}
