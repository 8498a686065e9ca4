//! Telemetry source trait definition

use crate::model::TelemetryFrame;
use anyhow::Result;

/// Trait for anything that produces telemetry frames on demand
///
/// A source is driven by an external fixed-cadence loop: every call to
/// [`read_frame`](TelemetrySource::read_frame) is one full advance of the
/// underlying state.
pub trait TelemetrySource: Send + Sync {
    /// Human readable name (e.g. "Simulator")
    fn name(&self) -> &str;

    /// Start producing frames
    ///
    /// Sources that own state must begin from a fresh state here.
    fn start(&mut self) -> Result<()>;

    /// Stop producing frames and release any state
    fn stop(&mut self) -> Result<()>;

    /// Produce the next telemetry frame
    ///
    /// Returns:
    /// - `Ok(Some(frame))` if the source advanced
    /// - `Ok(None)` if the source is not active
    /// - `Err(_)` if an error occurred
    fn read_frame(&mut self) -> Result<Option<TelemetryFrame>>;

    /// Get whether the source is currently active
    fn is_active(&self) -> bool;
}
