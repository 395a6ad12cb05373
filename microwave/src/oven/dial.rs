//! Adjustment-knob discretization
//!
//! The same physical angle means power before the power is confirmed and
//! timer minutes afterwards.

use crate::knob::normalize_degrees;

pub const MIN_POWER: u8 = 1;
pub const MAX_POWER: u8 = 10;

/// Degrees per power step (ten sectors)
pub const POWER_SECTOR_DEGREES: f64 = 360.0 / MAX_POWER as f64;

pub const TIMER_STEP_MINUTES: u16 = 5;
pub const MAX_TIMER_MINUTES: u16 = 300;

/// Degrees per timer step
pub const TIMER_SECTOR_DEGREES: f64 = 6.0;

/// Power level in [1, 10] for an adjustment-knob angle
pub fn power_from_angle(angle: f64) -> u8 {
    let sector = (normalize_degrees(angle) / POWER_SECTOR_DEGREES).floor() as u8;
    (sector + 1).clamp(MIN_POWER, MAX_POWER)
}

/// Timer minutes in {0, 5, ..., 300} for an adjustment-knob angle
pub fn timer_from_angle(angle: f64) -> u16 {
    let sector = (normalize_degrees(angle) / TIMER_SECTOR_DEGREES).floor() as u16;
    (sector * TIMER_STEP_MINUTES).min(MAX_TIMER_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_sectors() {
        assert_eq!(power_from_angle(0.0), 1);
        assert_eq!(power_from_angle(35.9), 1);
        assert_eq!(power_from_angle(36.0), 2);
        assert_eq!(power_from_angle(120.0), 4);
        assert_eq!(power_from_angle(359.99), 10);
        assert_eq!(power_from_angle(-1.0), 10);
    }

    #[test]
    fn test_power_always_in_range() {
        let mut angle = -720.0;
        while angle < 720.0 {
            let power = power_from_angle(angle);
            assert!((MIN_POWER..=MAX_POWER).contains(&power), "angle {}", angle);
            angle += 0.7;
        }
    }

    #[test]
    fn test_timer_steps() {
        assert_eq!(timer_from_angle(0.0), 0);
        assert_eq!(timer_from_angle(5.9), 0);
        assert_eq!(timer_from_angle(6.0), 5);
        assert_eq!(timer_from_angle(30.0), 25);
        assert_eq!(timer_from_angle(359.9), 295);
    }

    #[test]
    fn test_timer_always_on_grid_and_capped() {
        let mut angle = -400.0;
        while angle < 800.0 {
            let minutes = timer_from_angle(angle);
            assert!(minutes <= MAX_TIMER_MINUTES);
            assert_eq!(minutes % TIMER_STEP_MINUTES, 0);
            angle += 1.3;
        }
    }
}
