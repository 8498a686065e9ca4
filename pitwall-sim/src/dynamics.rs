//! Vehicle dynamics sampler
//!
//! Speed follows the shape of the lap, everything else is resampled every
//! tick. Values are meant to look right on a dashboard, they are not
//! coupled across ticks.

use pitwall_core::units::{KilometersPerHour, Percent, Rpm};
use rand::Rng;

const BASE_SPEED_KPH: f64 = 180.0;
const SPEED_SWING_KPH: f64 = 50.0;
const SPEED_NOISE_KPH: f64 = 20.0;

const BASE_RPM: f64 = 8000.0;
const RPM_RANGE: f64 = 4000.0;
/// Speed at which the RPM curve reaches the top of its range
const REFERENCE_SPEED_KPH: f64 = 320.0;
const RPM_NOISE: f64 = 200.0;

const KPH_PER_GEAR: f64 = 40.0;
pub const MIN_GEAR: u8 = 1;
pub const MAX_GEAR: u8 = 8;

const MIN_THROTTLE: f64 = 20.0;
const THROTTLE_RANGE: f64 = 80.0;

/// Brakes are only applied above this speed
pub const BRAKE_ZONE_SPEED_KPH: f64 = 200.0;
const MAX_BRAKE: f64 = 80.0;

/// Steering spans [-0.3, 0.3)
const STEERING_RANGE: f64 = 0.6;

/// Share of eligible ticks where DRS is open
const DRS_OPEN_CHANCE: f64 = 0.3;

/// One tick worth of vehicle state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSample {
    pub speed: KilometersPerHour,
    pub rpm: Rpm,
    pub gear: u8,
    pub throttle: Percent,
    pub brake: Percent,
    pub steering: f64,
    pub drs: bool,
}

impl VehicleSample {
    /// Stationary car before the first tick
    pub fn idle() -> Self {
        Self {
            speed: KilometersPerHour(0.0),
            rpm: Rpm(0.0),
            gear: MIN_GEAR,
            throttle: Percent::new(0.0),
            brake: Percent::new(0.0),
            steering: 0.0,
            drs: false,
        }
    }
}

/// Gear for a speed: one gear per 40 km/h, clamped to [1, 8]
pub fn gear_for_speed(speed_kph: f64) -> u8 {
    (speed_kph / KPH_PER_GEAR)
        .floor()
        .clamp(MIN_GEAR as f64, MAX_GEAR as f64) as u8
}

/// Engine speed before noise
pub fn base_rpm_for_speed(speed_kph: f64) -> f64 {
    BASE_RPM + (speed_kph / REFERENCE_SPEED_KPH) * RPM_RANGE
}

/// Draw a fresh sample for the car at `angle`
pub fn sample<R: Rng + ?Sized>(rng: &mut R, angle: f64, drs_min_speed_kph: f64) -> VehicleSample {
    let speed = (BASE_SPEED_KPH
        + (angle * 2.0).sin() * SPEED_SWING_KPH
        + rng.gen::<f64>() * SPEED_NOISE_KPH)
        .floor()
        .max(0.0);
    let rpm = (base_rpm_for_speed(speed) + rng.gen::<f64>() * RPM_NOISE).floor();
    let throttle = (MIN_THROTTLE + rng.gen::<f64>() * THROTTLE_RANGE).floor();
    let brake = if speed > BRAKE_ZONE_SPEED_KPH {
        (rng.gen::<f64>() * MAX_BRAKE).floor()
    } else {
        0.0
    };
    let steering = (rng.gen::<f64>() - 0.5) * STEERING_RANGE;
    let drs = rng.gen_bool(DRS_OPEN_CHANCE) && speed > drs_min_speed_kph;

    VehicleSample {
        speed: KilometersPerHour(speed),
        rpm: Rpm(rpm),
        gear: gear_for_speed(speed),
        throttle: Percent::new(throttle),
        brake: Percent::new(brake),
        steering,
        drs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gear_for_speed_clamps() {
        assert_eq!(gear_for_speed(0.0), 1);
        assert_eq!(gear_for_speed(79.9), 1);
        assert_eq!(gear_for_speed(80.0), 2);
        assert_eq!(gear_for_speed(215.0), 5);
        assert_eq!(gear_for_speed(320.0), 8);
        assert_eq!(gear_for_speed(400.0), 8);
    }

    #[test]
    fn test_gear_is_monotone_in_speed() {
        let mut previous = gear_for_speed(0.0);
        for kph in 1..400 {
            let gear = gear_for_speed(kph as f64);
            assert!(gear >= previous);
            previous = gear;
        }
    }

    #[test]
    fn test_samples_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for i in 0..5000 {
            let angle = (i as f64 * 0.02) % std::f64::consts::TAU;
            let s = sample(&mut rng, angle, DEFAULT_DRS);

            assert!((130.0..250.0).contains(&s.speed.0), "speed {}", s.speed.0);
            assert_eq!(s.speed.0, s.speed.0.floor());
            assert!((MIN_GEAR..=MAX_GEAR).contains(&s.gear));
            assert_eq!(s.gear, gear_for_speed(s.speed.0));
            assert!(s.rpm.0 >= base_rpm_for_speed(s.speed.0).floor());
            assert!(s.rpm.0 < base_rpm_for_speed(s.speed.0) + RPM_NOISE);
            assert!((20.0..100.0).contains(&s.throttle.0));
            assert!((0.0..80.0).contains(&s.brake.0));
            assert!((-0.3..=0.3).contains(&s.steering));
        }
    }

    const DEFAULT_DRS: f64 = crate::config::DEFAULT_DRS_MIN_SPEED_KPH;

    #[test]
    fn test_no_brake_outside_braking_zone() {
        let mut rng = StdRng::seed_from_u64(3);
        for i in 0..5000 {
            let s = sample(&mut rng, i as f64 * 0.013, DEFAULT_DRS);
            if s.speed.0 <= BRAKE_ZONE_SPEED_KPH {
                assert_eq!(s.brake.0, 0.0);
            }
        }
    }

    #[test]
    fn test_drs_respects_speed_threshold() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut opened = 0;
        for i in 0..5000 {
            let s = sample(&mut rng, i as f64 * 0.013, 200.0);
            if s.drs {
                opened += 1;
                assert!(s.speed.0 > 200.0);
            }
        }
        assert!(opened > 0, "DRS should open sometimes above a low threshold");
    }
}
