use crate::estimation::degradation::{EXTREME_COLD_F, EXTREME_HEAT_F};
use crate::estimation::{DrivingStyle, HealthEstimate, RangeEstimate};

pub const COLD_RANGE_FACTOR: f64 = 0.7;
pub const HEAT_RANGE_FACTOR: f64 = 0.85;
pub const AGGRESSIVE_RANGE_FACTOR: f64 = 0.8;
pub const CONSERVATIVE_RANGE_FACTOR: f64 = 1.2;

/// Full-charge range for a battery at `health`, rounded to whole miles.
///
/// Capped at `max_range_miles * 1.2`, which only conservative driving can reach.
pub fn estimate_range(
    health: &HealthEstimate,
    max_range_miles: f64,
    temperature_f: f64,
    style: DrivingStyle,
) -> RangeEstimate {
    let max_range_miles = if max_range_miles.is_finite() {
        max_range_miles.max(0.0)
    } else {
        0.0
    };
    let health_percent = if health.health_percent.is_nan() {
        0.0
    } else {
        health.health_percent.clamp(0.0, 100.0)
    };

    let adjusted = max_range_miles * (health_percent / 100.0)
        * temperature_factor(temperature_f)
        * style_factor(style);
    let ceiling = max_range_miles * CONSERVATIVE_RANGE_FACTOR;

    RangeEstimate {
        // f64::round rounds half away from zero.
        miles: adjusted.clamp(0.0, ceiling).round(),
    }
}

pub fn temperature_factor(temperature_f: f64) -> f64 {
    if temperature_f < EXTREME_COLD_F {
        COLD_RANGE_FACTOR
    } else if temperature_f > EXTREME_HEAT_F {
        HEAT_RANGE_FACTOR
    } else {
        1.0
    }
}

pub fn style_factor(style: DrivingStyle) -> f64 {
    match style {
        DrivingStyle::Aggressive => AGGRESSIVE_RANGE_FACTOR,
        DrivingStyle::Normal => 1.0,
        DrivingStyle::Conservative => CONSERVATIVE_RANGE_FACTOR,
    }
}
