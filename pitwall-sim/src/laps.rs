//! Lap timing and lap history
//!
//! The current lap number is derived from the number of completed laps, so
//! `lap_times().len() == current_lap() - 1` holds by construction.

use pitwall_core::units::Seconds;

/// Result of crossing the start/finish line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletedLap {
    /// Number of the lap that was just finished
    pub number: u32,
    pub time: Seconds,
    /// Whether the lap beat the previous best
    pub personal_best: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LapHistory {
    elapsed: f64,
    lap_times: Vec<Seconds>,
    best: f64,
    total_laps: u32,
}

impl LapHistory {
    pub fn new(total_laps: u32, best_lap_seed: f64) -> Self {
        Self {
            elapsed: 0.0,
            lap_times: Vec::new(),
            best: best_lap_seed,
            total_laps,
        }
    }

    /// Add `dt` seconds to the running lap
    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
    }

    /// Close the running lap and start the next one at zero
    ///
    /// Race length is not enforced: laps keep counting past `total_laps`.
    pub fn complete_lap(&mut self) -> CompletedLap {
        let time = self.elapsed;
        let number = self.current_lap();
        self.lap_times.push(Seconds(time));

        let personal_best = time < self.best;
        if personal_best {
            self.best = time;
        }
        self.elapsed = 0.0;

        CompletedLap {
            number,
            time: Seconds(time),
            personal_best,
        }
    }

    pub fn elapsed(&self) -> Seconds {
        Seconds(self.elapsed)
    }

    pub fn current_lap(&self) -> u32 {
        self.lap_times.len() as u32 + 1
    }

    pub fn total_laps(&self) -> u32 {
        self.total_laps
    }

    pub fn best(&self) -> Seconds {
        Seconds(self.best)
    }

    pub fn lap_times(&self) -> &[Seconds] {
        &self.lap_times
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_history() {
        let laps = LapHistory::new(58, 82.123);
        assert_eq!(laps.current_lap(), 1);
        assert!(laps.lap_times().is_empty());
        assert_eq!(laps.best(), Seconds(82.123));
        assert_eq!(laps.elapsed(), Seconds(0.0));
    }

    #[test]
    fn test_complete_lap_appends_and_resets() {
        let mut laps = LapHistory::new(58, 82.123);
        laps.advance(90.0);
        let lap = laps.complete_lap();

        assert_eq!(lap.number, 1);
        assert_eq!(lap.time, Seconds(90.0));
        assert!(!lap.personal_best);
        assert_eq!(laps.current_lap(), 2);
        assert_eq!(laps.lap_times(), &[Seconds(90.0)]);
        assert_eq!(laps.elapsed(), Seconds(0.0));
        assert_eq!(laps.best(), Seconds(82.123));
    }

    #[test]
    fn test_best_is_minimum_of_seed_and_history() {
        let mut laps = LapHistory::new(58, 82.123);
        for time in [84.0, 81.5, 83.0, 80.9, 81.0] {
            laps.advance(time);
            laps.complete_lap();
            let expected = laps
                .lap_times()
                .iter()
                .map(|t| t.0)
                .fold(82.123, f64::min);
            assert_eq!(laps.best().0, expected);
            assert_eq!(laps.lap_times().len() as u32, laps.current_lap() - 1);
        }
        assert_eq!(laps.best(), Seconds(80.9));
    }

    #[test]
    fn test_laps_continue_past_race_length() {
        let mut laps = LapHistory::new(2, 82.123);
        for _ in 0..5 {
            laps.advance(85.0);
            laps.complete_lap();
        }
        assert_eq!(laps.current_lap(), 6);
        assert_eq!(laps.total_laps(), 2);
    }
}
