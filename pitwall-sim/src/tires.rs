//! Tire thermal and pressure model
//!
//! Each tire drifts on a small bounded random walk. Values are clamped right
//! after every perturbation so they can never leave their ranges.

use pitwall_core::model::Corners;
use pitwall_core::units::{Celsius, Psi};
use rand::Rng;

pub const MIN_TEMP_C: f64 = 60.0;
pub const MAX_TEMP_C: f64 = 120.0;
/// Temperature moves at most ±2 °C per tick
const TEMP_WALK: f64 = 4.0;

pub const MIN_PRESSURE_PSI: f64 = 20.0;
pub const MAX_PRESSURE_PSI: f64 = 24.0;
/// Pressure moves at most ±0.1 psi per tick
const PRESSURE_WALK: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct TireModel {
    temps: Corners<Celsius>,
    pressures: Corners<Psi>,
}

impl Default for TireModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TireModel {
    /// Tires at their starting temperatures and cold pressures
    pub fn new() -> Self {
        Self {
            temps: Corners::new(Celsius(85.0), Celsius(87.0), Celsius(83.0), Celsius(86.0)),
            pressures: Corners::new(Psi(22.1), Psi(22.3), Psi(21.8), Psi(22.0)),
        }
    }

    /// Start from arbitrary values, clamped into range
    pub fn from_values(temps: Corners<Celsius>, pressures: Corners<Psi>) -> Self {
        Self {
            temps: temps.map(|t| Celsius(t.0.clamp(MIN_TEMP_C, MAX_TEMP_C))),
            pressures: pressures.map(|p| Psi(p.0.clamp(MIN_PRESSURE_PSI, MAX_PRESSURE_PSI))),
        }
    }

    pub fn temps(&self) -> Corners<Celsius> {
        self.temps
    }

    pub fn pressures(&self) -> Corners<Psi> {
        self.pressures
    }

    /// Perturb every tire, temperatures first
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for temp in self.temps.all_mut() {
            let next = temp.0 + (rng.gen::<f64>() - 0.5) * TEMP_WALK;
            temp.0 = next.clamp(MIN_TEMP_C, MAX_TEMP_C);
        }
        for pressure in self.pressures.all_mut() {
            let next = pressure.0 + (rng.gen::<f64>() - 0.5) * PRESSURE_WALK;
            pressure.0 = next.clamp(MIN_PRESSURE_PSI, MAX_PRESSURE_PSI);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_in_range(tires: &TireModel) {
        for t in tires.temps().all() {
            assert!((MIN_TEMP_C..=MAX_TEMP_C).contains(&t.0), "temp {}", t.0);
        }
        for p in tires.pressures().all() {
            assert!((MIN_PRESSURE_PSI..=MAX_PRESSURE_PSI).contains(&p.0), "pressure {}", p.0);
        }
    }

    #[test]
    fn test_initial_values() {
        let tires = TireModel::new();
        assert_eq!(tires.temps().fr, Celsius(87.0));
        assert_eq!(tires.pressures().rl, Psi(21.8));
    }

    #[test]
    fn test_random_walk_is_bounded_per_step() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut tires = TireModel::new();
        for _ in 0..1000 {
            let before = tires.clone();
            tires.step(&mut rng);
            for (a, b) in before.temps().all().iter().zip(tires.temps().all()) {
                assert!((a.0 - b.0).abs() <= 2.0 + 1e-9);
            }
            for (a, b) in before.pressures().all().iter().zip(tires.pressures().all()) {
                assert!((a.0 - b.0).abs() <= 0.1 + 1e-9);
            }
            assert_in_range(&tires);
        }
    }

    #[test]
    fn test_clamps_hold_at_the_edges() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut tires = TireModel::from_values(
            Corners::new(Celsius(60.0), Celsius(120.0), Celsius(60.5), Celsius(119.5)),
            Corners::new(Psi(20.0), Psi(24.0), Psi(20.05), Psi(23.95)),
        );
        for _ in 0..10_000 {
            tires.step(&mut rng);
            assert_in_range(&tires);
        }
    }

    #[test]
    fn test_from_values_clamps_input() {
        let tires = TireModel::from_values(
            Corners::new(Celsius(10.0), Celsius(200.0), Celsius(90.0), Celsius(90.0)),
            Corners::new(Psi(5.0), Psi(30.0), Psi(22.0), Psi(22.0)),
        );
        assert_eq!(tires.temps().fl, Celsius(MIN_TEMP_C));
        assert_eq!(tires.temps().fr, Celsius(MAX_TEMP_C));
        assert_eq!(tires.pressures().fl, Psi(MIN_PRESSURE_PSI));
        assert_eq!(tires.pressures().fr, Psi(MAX_PRESSURE_PSI));
    }
}
