//! The simulation engine exposed as a telemetry source
//!
//! Inactive until started. Every start builds a brand new engine, which is
//! the only way a session is reset.

use crate::config::SimConfig;
use crate::engine::SimulationEngine;
use anyhow::Result;
use pitwall_core::{model::TelemetryFrame, source::TelemetrySource};

const SOURCE_NAME: &str = "Simulator";

pub struct SimAdapter {
    config: SimConfig,
    engine: Option<SimulationEngine>,
}

impl SimAdapter {
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    pub fn with_config(config: SimConfig) -> Self {
        Self {
            config,
            engine: None,
        }
    }

    /// The running engine, if started
    pub fn engine(&self) -> Option<&SimulationEngine> {
        self.engine.as_ref()
    }
}

impl Default for SimAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySource for SimAdapter {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn start(&mut self) -> Result<()> {
        self.engine = Some(SimulationEngine::with_config(self.config.clone())?);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.engine = None;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Option<TelemetryFrame>> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(None);
        };

        let snapshot = engine.tick();
        Ok(Some(TelemetryFrame::new(SOURCE_NAME, engine.ticks(), snapshot)))
    }

    fn is_active(&self) -> bool {
        self.engine.is_some()
    }
}
