//! Fixed linear battery degradation model.
//!
//! degradation = 1.5 %/year of age
//!             + 0.7 % per 10k miles
//!             + 0.5 %/year when the climate is outside [32, 95] F
//!             + up to 1 %/year scaled by fast-charge share

use crate::estimation::{HealthEstimate, UsageFactors};

pub const AGE_DEGRADATION_PER_YEAR: f64 = 1.5;
pub const MILEAGE_DEGRADATION_PER_10K_MILES: f64 = 0.7;
pub const EXTREME_CLIMATE_DEGRADATION_PER_YEAR: f64 = 0.5;
pub const FAST_CHARGE_DEGRADATION_PER_YEAR: f64 = 1.0;

pub const EXTREME_COLD_F: f64 = 32.0;
pub const EXTREME_HEAT_F: f64 = 95.0;

// Past these the model is saturated at 100 % degradation anyway.
const MAX_AGE_YEARS: f64 = 100.0;
const MAX_MILES_DRIVEN: f64 = 2_000_000.0;

pub fn estimate_degradation(factors: &UsageFactors) -> HealthEstimate {
    let age_years = clamp_input(factors.age_years, MAX_AGE_YEARS);
    let miles_driven = clamp_input(factors.miles_driven, MAX_MILES_DRIVEN);
    let fast_charge_fraction = clamp_input(factors.fast_charge_fraction, 1.0);

    let age_term = age_years * AGE_DEGRADATION_PER_YEAR;
    let mileage_term = (miles_driven / 10_000.0) * MILEAGE_DEGRADATION_PER_10K_MILES;
    let climate_term = if is_extreme_climate(factors.climate_f) {
        age_years * EXTREME_CLIMATE_DEGRADATION_PER_YEAR
    } else {
        0.0
    };
    let charge_term = age_years * fast_charge_fraction * FAST_CHARGE_DEGRADATION_PER_YEAR;

    let degradation = (age_term + mileage_term + climate_term + charge_term).clamp(0.0, 100.0);

    HealthEstimate {
        health_percent: 100.0 - degradation,
    }
}

/// Strictly outside the [32, 95] F band; NaN never counts as extreme.
pub fn is_extreme_climate(climate_f: f64) -> bool {
    climate_f > EXTREME_HEAT_F || climate_f < EXTREME_COLD_F
}

fn clamp_input(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(
        age_years: f64,
        miles_driven: f64,
        climate_f: f64,
        fast_charge_fraction: f64,
    ) -> UsageFactors {
        UsageFactors {
            age_years,
            miles_driven,
            climate_f,
            fast_charge_fraction,
        }
    }

    #[test]
    fn new_battery_is_fully_healthy() {
        let health = estimate_degradation(&factors(0.0, 0.0, 70.0, 0.0));
        assert_eq!(health.health_percent, 100.0);
    }

    #[test]
    fn age_costs_one_and_a_half_percent_per_year() {
        let health = estimate_degradation(&factors(10.0, 0.0, 70.0, 0.0));
        assert_eq!(health.health_percent, 85.0);
    }

    #[test]
    fn mileage_costs_point_seven_percent_per_10k_miles() {
        let health = estimate_degradation(&factors(0.0, 50_000.0, 70.0, 0.0));
        assert!((health.degradation_percent() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn climate_penalty_applies_only_outside_band() {
        let mild = estimate_degradation(&factors(2.0, 0.0, 70.0, 0.0));
        let hot = estimate_degradation(&factors(2.0, 0.0, 100.0, 0.0));
        let cold = estimate_degradation(&factors(2.0, 0.0, 10.0, 0.0));

        assert_eq!(mild.degradation_percent(), 3.0);
        assert_eq!(hot.degradation_percent(), 4.0);
        assert_eq!(cold.degradation_percent(), 4.0);
    }

    #[test]
    fn climate_band_edges_are_not_extreme() {
        assert!(!is_extreme_climate(32.0));
        assert!(!is_extreme_climate(95.0));
        assert!(is_extreme_climate(31.9));
        assert!(is_extreme_climate(95.1));
        assert!(!is_extreme_climate(f64::NAN));
    }

    #[test]
    fn fast_charging_scales_with_age() {
        let health = estimate_degradation(&factors(4.0, 0.0, 70.0, 0.5));
        // 4 * 1.5 + 4 * 0.5 = 8
        assert_eq!(health.health_percent, 92.0);
    }

    #[test]
    fn all_terms_combine() {
        let health = estimate_degradation(&factors(4.0, 20_000.0, 100.0, 1.0));
        // 6 + 1.4 + 2 + 4 = 13.4
        assert!((health.health_percent - 86.6).abs() < 1e-9);
    }

    #[test]
    fn degradation_saturates_at_one_hundred() {
        let health = estimate_degradation(&factors(80.0, 900_000.0, 120.0, 1.0));
        assert_eq!(health.health_percent, 0.0);
    }

    #[test]
    fn negative_inputs_are_clamped() {
        let health = estimate_degradation(&factors(-5.0, -10_000.0, 70.0, -1.0));
        assert_eq!(health.health_percent, 100.0);
    }

    #[test]
    fn fast_charge_fraction_is_capped_at_one() {
        let capped = estimate_degradation(&factors(4.0, 0.0, 70.0, 3.0));
        let full = estimate_degradation(&factors(4.0, 0.0, 70.0, 1.0));
        assert_eq!(capped, full);
    }

    #[test]
    fn non_finite_inputs_stay_in_range() {
        let nan = estimate_degradation(&factors(f64::NAN, f64::NAN, f64::NAN, f64::NAN));
        assert_eq!(nan.health_percent, 100.0);

        let infinite = estimate_degradation(&factors(f64::INFINITY, f64::INFINITY, 70.0, 0.0));
        assert_eq!(infinite.health_percent, 0.0);
    }

    #[test]
    fn health_stays_within_bounds_across_grid() {
        for age in [0.0, 0.5, 3.0, 12.0, 40.0, 70.0] {
            for miles in [0.0, 12_000.0, 150_000.0, 1_500_000.0] {
                for climate in [-20.0, 31.0, 70.0, 96.0] {
                    for fast in [0.0, 0.3, 1.0] {
                        let health = estimate_degradation(&factors(age, miles, climate, fast));
                        assert!(
                            (0.0..=100.0).contains(&health.health_percent),
                            "health {} out of range for age={age} miles={miles}",
                            health.health_percent
                        );
                    }
                }
            }
        }
    }
}
