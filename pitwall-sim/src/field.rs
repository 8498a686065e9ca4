//! Competitor field
//!
//! A coarse stand-in for the rest of the grid: other drivers occasionally
//! tick over a lap with a fresh lap time. There are no overtakes and the
//! display order never changes.

use pitwall_core::model::Driver;
use pitwall_core::units::Seconds;
use rand::Rng;

/// Grid in display order; the first entry is the player's car
pub const ROSTER: [&str; 20] = [
    "VER", "LEC", "NOR", "RUS", "PER", "SAI", "HAM", "ALO", "OCO", "BOT", "GAS", "STR", "ALB",
    "MAG", "TSU", "HUL", "ZHO", "RIC", "PIA", "SAR",
];

/// Competitor lap times are drawn from [82, 87) seconds
const MIN_LAP_SECONDS: f64 = 82.0;
const MAX_LAP_SECONDS: f64 = 87.0;

/// Competitors start somewhere in their first three laps
const MAX_STARTING_LAP: u32 = 3;

fn sample_lap_time<R: Rng + ?Sized>(rng: &mut R) -> Seconds {
    Seconds(rng.gen_range(MIN_LAP_SECONDS..MAX_LAP_SECONDS))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorField {
    drivers: Vec<Driver>,
}

impl CompetitorField {
    /// Build the grid from [`ROSTER`] with randomised starting laps
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let drivers = ROSTER
            .iter()
            .enumerate()
            .map(|(index, name)| Driver {
                id: index as u32 + 1,
                name: name.to_string(),
                position: index as u32 + 1,
                current_lap: rng.gen_range(1..=MAX_STARTING_LAP),
                lap_time: sample_lap_time(rng),
                is_current_driver: index == 0,
            })
            .collect();

        Self { drivers }
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    /// Give every other driver a `probability` chance to finish a lap
    ///
    /// The current driver's lap count comes from the engine's own lap
    /// history and is never touched here.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, probability: f64) {
        for driver in self.drivers.iter_mut().filter(|d| !d.is_current_driver) {
            if rng.gen_bool(probability) {
                driver.current_lap += 1;
                driver.lap_time = sample_lap_time(rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_generated_grid() {
        let mut rng = StdRng::seed_from_u64(4);
        let field = CompetitorField::generate(&mut rng);
        let drivers = field.drivers();

        assert_eq!(drivers.len(), 20);
        assert_eq!(drivers.iter().filter(|d| d.is_current_driver).count(), 1);
        assert!(drivers[0].is_current_driver);
        assert_eq!(drivers[0].name, "VER");

        let ids: HashSet<u32> = drivers.iter().map(|d| d.id).collect();
        let names: HashSet<&str> = drivers.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(ids.len(), 20);
        assert_eq!(names.len(), 20);

        for (index, d) in drivers.iter().enumerate() {
            assert_eq!(d.position, index as u32 + 1);
            assert!((1..=3).contains(&d.current_lap));
            assert!((82.0..87.0).contains(&d.lap_time.0));
        }
    }

    #[test]
    fn test_update_never_touches_current_driver() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut field = CompetitorField::generate(&mut rng);
        let before = field.drivers().to_vec();

        field.update(&mut rng, 1.0);

        for (old, new) in before.iter().zip(field.drivers()) {
            if old.is_current_driver {
                assert_eq!(old, new);
            } else {
                assert_eq!(new.current_lap, old.current_lap + 1);
                assert!((82.0..87.0).contains(&new.lap_time.0));
            }
            assert_eq!(old.id, new.id);
            assert_eq!(old.position, new.position);
        }
    }

    #[test]
    fn test_zero_probability_freezes_field() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut field = CompetitorField::generate(&mut rng);
        let before = field.clone();
        for _ in 0..1000 {
            field.update(&mut rng, 0.0);
        }
        assert_eq!(field, before);
    }
}
