//! Fuel depletion model

use pitwall_core::units::Percent;
use rand::Rng;

/// Upper bound of fuel burnt in one tick, in percent of a full tank
const MAX_BURN_PER_TICK: f64 = 0.02;

/// Fuel level that only ever goes down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelTank {
    remaining: f64,
}

impl FuelTank {
    pub fn new(initial: f64) -> Self {
        Self {
            remaining: initial.clamp(0.0, 100.0),
        }
    }

    pub fn remaining(&self) -> Percent {
        Percent::new(self.remaining)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Burn a random amount below the per-tick maximum, never below empty
    pub fn burn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let burnt = rng.gen::<f64>() * MAX_BURN_PER_TICK;
        self.remaining = (self.remaining - burnt).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_burn_is_non_increasing_and_bounded() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut tank = FuelTank::new(100.0);
        for _ in 0..1000 {
            let before = tank.remaining().0;
            tank.burn(&mut rng);
            let after = tank.remaining().0;
            assert!(after <= before);
            assert!(before - after < MAX_BURN_PER_TICK);
        }
    }

    #[test]
    fn test_never_goes_negative() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut tank = FuelTank::new(0.05);
        for _ in 0..1000 {
            tank.burn(&mut rng);
            assert!(tank.remaining().0 >= 0.0);
        }
        assert!(tank.is_empty());
    }

    #[test]
    fn test_initial_level_is_clamped() {
        assert_eq!(FuelTank::new(130.0).remaining().0, 100.0);
        assert_eq!(FuelTank::new(-1.0).remaining().0, 0.0);
    }
}
