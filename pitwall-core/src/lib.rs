//! PitWall Core Library
//!
//! This crate provides the telemetry snapshot model, unit types and the
//! source trait shared by the simulation engine and the server that drives it.

pub mod format;
pub mod model;
pub mod source;
pub mod units;

pub use format::format_lap_time;
pub use model::{FieldMask, Snapshot, TelemetryFrame};
pub use source::TelemetrySource;
