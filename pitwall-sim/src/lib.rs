//! Telemetry simulation engine for PitWall
//!
//! A stateful generator of plausible race telemetry. The engine advances on
//! a fixed step every time it is ticked and hands back an owned
//! [`Snapshot`](pitwall_core::Snapshot).

pub mod adapter;
pub mod config;
pub mod dynamics;
pub mod engine;
pub mod field;
pub mod fuel;
pub mod laps;
pub mod tires;
pub mod track;

pub use adapter::SimAdapter;
pub use config::{SimConfig, SimError};
pub use engine::SimulationEngine;
