//! The simulation engine
//!
//! Owns all simulation state and advances it one fixed step per
//! [`tick`](SimulationEngine::tick). Each tick runs, in order:
//!
//! 1. lap clock
//! 2. angle integration, with at most one lap completion
//! 3. vehicle dynamics resample
//! 4. fuel burn
//! 5. tire random walk
//! 6. competitor field update
//!
//! and returns an owned [`Snapshot`]. Position and sector are derived from
//! the angle whenever they are read.

use crate::config::{SimConfig, SimError};
use crate::dynamics::{self, VehicleSample};
use crate::field::CompetitorField;
use crate::fuel::FuelTank;
use crate::laps::LapHistory;
use crate::tires::TireModel;
use crate::track;
use pitwall_core::model::{Driver, ErsDeployMode, Sector, Snapshot, TrackPoint};
use pitwall_core::units::{Percent, Radians, Seconds};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

pub struct SimulationEngine {
    config: SimConfig,
    rng: StdRng,
    ticks: u64,
    angle: f64,
    laps: LapHistory,
    fuel: FuelTank,
    tires: TireModel,
    field: CompetitorField,
    vehicle: VehicleSample,
}

impl SimulationEngine {
    /// Engine with the reference configuration and an entropy seed
    pub fn new() -> Self {
        Self::build(SimConfig::default())
    }

    /// Engine with a fixed seed; two engines with the same seed produce the
    /// same snapshots
    pub fn with_seed(seed: u64) -> Self {
        Self::build(SimConfig::default().with_seed(seed))
    }

    pub fn with_config(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let field = CompetitorField::generate(&mut rng);

        Self {
            rng,
            ticks: 0,
            angle: 0.0,
            laps: LapHistory::new(config.total_laps, config.best_lap_seed),
            fuel: FuelTank::new(config.initial_fuel),
            tires: TireModel::new(),
            field,
            vehicle: VehicleSample::idle(),
            config,
        }
    }

    /// Advance the simulation by one fixed step
    pub fn tick(&mut self) -> Snapshot {
        self.ticks += 1;
        self.laps.advance(self.config.tick_seconds);

        let (angle, crossed_line) = track::advance_angle(self.angle, self.config.angle_step);
        if crossed_line {
            let lap = self.laps.complete_lap();
            debug!(
                lap = lap.number,
                time = lap.time.0,
                personal_best = lap.personal_best,
                "Lap completed"
            );
        }
        self.angle = angle;

        self.vehicle = dynamics::sample(&mut self.rng, self.angle, self.config.drs_min_speed_kph);
        self.fuel.burn(&mut self.rng);
        self.tires.step(&mut self.rng);
        self.field
            .update(&mut self.rng, self.config.competitor_advance_probability);

        self.snapshot()
    }

    /// Copy of the current state, without advancing
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lap_time: self.laps.elapsed(),
            sector: self.sector(),
            position: self.position(),
            speed: self.vehicle.speed,
            rpm: self.vehicle.rpm,
            gear: self.vehicle.gear,
            throttle: self.vehicle.throttle,
            brake: self.vehicle.brake,
            steering: self.vehicle.steering,
            drs: self.vehicle.drs,
            ers_deploy_mode: ErsDeployMode::Medium,
            fuel_remaining: self.fuel.remaining(),
            tire_temps: self.tires.temps(),
            tire_pressures: self.tires.pressures(),
            current_lap: self.laps.current_lap(),
            total_laps: self.laps.total_laps(),
            best_lap_time: self.laps.best(),
            lap_times: self.laps.lap_times().to_vec(),
            drivers: self.field.drivers().to_vec(),
            angle: Radians(self.angle),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of ticks since construction
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn position(&self) -> TrackPoint {
        self.config.track.point_at(self.angle)
    }

    pub fn sector(&self) -> Sector {
        track::sector_at(self.angle)
    }

    pub fn elapsed_lap_time(&self) -> Seconds {
        self.laps.elapsed()
    }

    pub fn current_lap(&self) -> u32 {
        self.laps.current_lap()
    }

    pub fn lap_times(&self) -> &[Seconds] {
        self.laps.lap_times()
    }

    pub fn best_lap_time(&self) -> Seconds {
        self.laps.best()
    }

    pub fn fuel_remaining(&self) -> Percent {
        self.fuel.remaining()
    }

    pub fn drivers(&self) -> &[Driver] {
        self.field.drivers()
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_state() {
        let engine = SimulationEngine::with_seed(1);
        assert_eq!(engine.ticks(), 0);
        assert_eq!(engine.angle(), 0.0);
        assert_eq!(engine.sector(), Sector::One);
        assert_eq!(engine.position(), TrackPoint::new(500.0, 200.0));
        assert_eq!(engine.current_lap(), 1);
        assert_eq!(engine.best_lap_time(), Seconds(82.123));
        assert_eq!(engine.fuel_remaining().0, 100.0);
        assert_eq!(engine.drivers().len(), 20);
        assert_eq!(engine.elapsed_lap_time(), Seconds(0.0));
        assert_eq!(engine.config().seed, Some(1));
    }

    #[test]
    fn test_tick_advances_clock_and_angle() {
        let mut engine = SimulationEngine::with_seed(1);
        let snapshot = engine.tick();
        assert!((snapshot.lap_time.0 - 0.1).abs() < 1e-12);
        assert!((snapshot.angle.0 - 0.02).abs() < 1e-12);
        assert_eq!(snapshot.ers_deploy_mode, ErsDeployMode::Medium);
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn test_snapshot_does_not_advance() {
        let mut engine = SimulationEngine::with_seed(2);
        engine.tick();
        let a = engine.snapshot();
        let b = engine.snapshot();
        assert_eq!(a, b);
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn test_snapshot_is_detached_from_engine() {
        let mut engine = SimulationEngine::with_seed(3);
        let mut snapshot = engine.tick();
        snapshot.drivers.clear();
        snapshot.lap_times.push(Seconds(1.0));
        assert_eq!(engine.drivers().len(), 20);
        assert!(engine.lap_times().is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimConfig {
            tick_seconds: -0.1,
            ..Default::default()
        };
        assert!(SimulationEngine::with_config(config).is_err());
    }
}
