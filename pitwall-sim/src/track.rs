//! Track geometry: the lap is a circle, progress is an angle
//!
//! Position and sector are pure functions of the angle and are never
//! stored anywhere.

use pitwall_core::model::{Sector, TrackPoint};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// End of sector 1
const SECTOR_1_END: f64 = PI * 2.0 / 3.0;
/// End of sector 2
const SECTOR_2_END: f64 = PI * 4.0 / 3.0;

/// Circular track laid out on the track map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    pub center: TrackPoint,
    pub radius: f64,
}

impl Default for TrackGeometry {
    fn default() -> Self {
        Self {
            center: TrackPoint::new(300.0, 200.0),
            radius: 200.0,
        }
    }
}

impl TrackGeometry {
    /// Point on the track at `angle` radians
    pub fn point_at(&self, angle: f64) -> TrackPoint {
        TrackPoint::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }
}

/// Sector containing `angle`, using arcs [0, 2π/3), [2π/3, 4π/3), [4π/3, 2π)
pub fn sector_at(angle: f64) -> Sector {
    let angle = angle.rem_euclid(TAU);
    if angle < SECTOR_1_END {
        Sector::One
    } else if angle < SECTOR_2_END {
        Sector::Two
    } else {
        Sector::Three
    }
}

/// Advance `angle` by `step`, wrapping into [0, 2π)
///
/// Returns the new angle and whether the start/finish line was crossed.
/// A step longer than a full revolution still counts as one crossing.
pub fn advance_angle(angle: f64, step: f64) -> (f64, bool) {
    let next = angle + step;
    if next >= TAU {
        (next.rem_euclid(TAU), true)
    } else {
        (next, false)
    }
}
