//! Telemetry snapshot model
//!
//! Defines the [`Snapshot`] record the simulation engine hands to the view
//! layer after every tick, and the [`TelemetryFrame`] envelope used to move
//! snapshots around.
//!
//! JSON field names are camelCase: they are the stable contract the browser
//! dashboard reads.
//!
//! Track coordinate system: 2D screen space of the track map
//! - X: right
//! - Y: down

use crate::units::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;

/// One full advance of the simulation, as consumed by the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Time since the current lap began
    pub lap_time: Seconds,

    /// Track sector derived from `angle`
    pub sector: Sector,

    /// Point on the track map derived from `angle`
    pub position: TrackPoint,

    // === Vehicle Dynamics ===
    pub speed: KilometersPerHour,
    pub rpm: Rpm,

    /// Forward gear, 1 to 8
    pub gear: u8,

    pub throttle: Percent,
    pub brake: Percent,

    /// Steering input, -0.3 (left) to 0.3 (right)
    pub steering: f64,

    pub drs: bool,
    pub ers_deploy_mode: ErsDeployMode,

    // === Consumables ===
    pub fuel_remaining: Percent,
    pub tire_temps: Corners<Celsius>,
    pub tire_pressures: Corners<Psi>,

    // === Race Progress ===
    pub current_lap: u32,
    pub total_laps: u32,
    pub best_lap_time: Seconds,

    /// Completed lap times in completion order
    pub lap_times: Vec<Seconds>,

    pub drivers: Vec<Driver>,

    /// Progress around the track in [0, 2π)
    pub angle: Radians,
}

impl Snapshot {
    /// Current lap time minus best lap time (negative when ahead of best)
    pub fn delta_to_best(&self) -> Seconds {
        Seconds(self.lap_time.0 - self.best_lap_time.0)
    }

    /// Mean of all completed laps
    pub fn average_lap_time(&self) -> Option<Seconds> {
        if self.lap_times.is_empty() {
            return None;
        }
        let total: f64 = self.lap_times.iter().map(|t| t.0).sum();
        Some(Seconds(total / self.lap_times.len() as f64))
    }

    pub fn last_lap_time(&self) -> Option<Seconds> {
        self.lap_times.last().copied()
    }

    /// Race completion in percent, capped at 100
    pub fn race_progress(&self) -> Percent {
        if self.total_laps == 0 {
            return Percent::new(0.0);
        }
        Percent::new(self.current_lap as f64 / self.total_laps as f64 * 100.0)
    }

    pub fn current_driver(&self) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.is_current_driver)
    }
}

/// A snapshot stamped with where and when it was produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryFrame {
    /// Wall-clock time the frame was produced
    pub timestamp: DateTime<Utc>,

    /// Name of the source that produced the frame
    pub source: String,

    /// Number of ticks the source has advanced, starting at 1
    pub tick: u64,

    #[serde(flatten)]
    pub snapshot: Snapshot,
}

/// Fields present in every filtered frame regardless of the mask
const ALWAYS_INCLUDED: [&str; 3] = ["timestamp", "source", "tick"];

impl TelemetryFrame {
    pub fn new(source: impl Into<String>, tick: u64, snapshot: Snapshot) -> Self {
        Self {
            timestamp: Utc::now(),
            source: source.into(),
            tick,
            snapshot,
        }
    }

    /// Serialize to JSON, keeping only the fields selected by `mask`
    ///
    /// `timestamp`, `source` and `tick` are always included.
    pub fn to_json_filtered(&self, mask: Option<&FieldMask>) -> Result<String, serde_json::Error> {
        let mask = match mask {
            Some(mask) if !mask.is_all() => mask,
            _ => return serde_json::to_string(self),
        };

        match serde_json::to_value(self)? {
            serde_json::Value::Object(mut map) => {
                map.retain(|key, _| ALWAYS_INCLUDED.contains(&key.as_str()) || mask.includes(key));
                serde_json::to_string(&map)
            }
            other => serde_json::to_string(&other),
        }
    }
}

/// Point on the track map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub x: f64,
    pub y: f64,
}

impl TrackPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One value per tire (Front-Left, Front-Right, Rear-Left, Rear-Right)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corners<T> {
    pub fl: T,
    pub fr: T,
    pub rl: T,
    pub rr: T,
}

impl<T> Corners<T> {
    pub fn new(fl: T, fr: T, rl: T, rr: T) -> Self {
        Self { fl, fr, rl, rr }
    }

    pub fn all(&self) -> [&T; 4] {
        [&self.fl, &self.fr, &self.rl, &self.rr]
    }

    pub fn all_mut(&mut self) -> [&mut T; 4] {
        [&mut self.fl, &mut self.fr, &mut self.rl, &mut self.rr]
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Corners<U> {
        Corners {
            fl: f(&self.fl),
            fr: f(&self.fr),
            rl: f(&self.rl),
            rr: f(&self.rr),
        }
    }
}

/// Track sector, one of three equal arcs of the lap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Sector {
    One,
    Two,
    Three,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid sector {0}, expected 1, 2 or 3")]
pub struct InvalidSector(pub u8);

impl Sector {
    pub fn number(self) -> u8 {
        match self {
            Sector::One => 1,
            Sector::Two => 2,
            Sector::Three => 3,
        }
    }
}

impl From<Sector> for u8 {
    fn from(sector: Sector) -> Self {
        sector.number()
    }
}

impl TryFrom<u8> for Sector {
    type Error = InvalidSector;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Sector::One),
            2 => Ok(Sector::Two),
            3 => Ok(Sector::Three),
            other => Err(InvalidSector(other)),
        }
    }
}

/// ERS deployment mode shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErsDeployMode {
    None,
    Low,
    Medium,
    High,
    Overtake,
}

/// A competitor in the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// Stable unique identifier
    pub id: u32,

    /// Three letter code, unique in the field
    pub name: String,

    /// Display rank
    pub position: u32,

    pub current_lap: u32,
    pub lap_time: Seconds,
    pub is_current_driver: bool,
}

/// Field mask for selecting which snapshot fields to serialize
#[derive(Debug, Clone)]
pub struct FieldMask {
    fields: HashSet<String>,
    include_all: bool,
}

impl FieldMask {
    /// Create a mask that includes all fields
    pub fn all() -> Self {
        Self {
            fields: HashSet::new(),
            include_all: true,
        }
    }

    /// Create a mask from a comma-separated list of field names
    pub fn parse(fields: &str) -> Self {
        let fields: HashSet<String> = fields
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            fields,
            include_all: false,
        }
    }

    pub fn builder() -> FieldMaskBuilder {
        FieldMaskBuilder::default()
    }

    /// Check if a field should be included (case-insensitive)
    pub fn includes(&self, field: &str) -> bool {
        self.include_all || self.fields.contains(&field.to_lowercase())
    }

    pub fn is_all(&self) -> bool {
        self.include_all
    }
}

impl FromStr for FieldMask {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Builder for FieldMask, with groups matching the dashboard panels
#[derive(Debug, Default)]
pub struct FieldMaskBuilder {
    fields: HashSet<String>,
}

impl FieldMaskBuilder {
    pub fn with_field(mut self, field: &str) -> Self {
        self.fields.insert(field.to_lowercase());
        self
    }

    fn with_fields(self, fields: &[&str]) -> Self {
        fields.iter().fold(self, |b, f| b.with_field(f))
    }

    /// Speed, RPM, gear, pedals, steering and DRS
    pub fn vehicle(self) -> Self {
        self.with_fields(&["speed", "rpm", "gear", "throttle", "brake", "steering", "drs"])
    }

    pub fn tires(self) -> Self {
        self.with_fields(&["tireTemps", "tirePressures"])
    }

    /// Lap timer, lap pace and race progress panels
    pub fn lap_timing(self) -> Self {
        self.with_fields(&["lapTime", "currentLap", "totalLaps", "bestLapTime", "lapTimes"])
    }

    /// Track map inputs
    pub fn track(self) -> Self {
        self.with_fields(&["position", "sector", "angle"])
    }

    pub fn build(self) -> FieldMask {
        FieldMask {
            fields: self.fields,
            include_all: false,
        }
    }
}
