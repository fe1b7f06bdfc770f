//! Display tiers the dashboard derives from raw estimates.

use crate::estimation::degradation::{EXTREME_COLD_F, EXTREME_HEAT_F};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    Critical,
    Low,
    Moderate,
    Good,
}

impl HealthTier {
    pub fn from_percent(health_percent: f64) -> Self {
        if health_percent <= 10.0 {
            HealthTier::Critical
        } else if health_percent <= 25.0 {
            HealthTier::Low
        } else if health_percent <= 50.0 {
            HealthTier::Moderate
        } else {
            HealthTier::Good
        }
    }
}

/// State-of-charge coloring for the battery gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeLevel {
    Low,
    Medium,
    High,
}

impl ChargeLevel {
    pub fn from_percent(charge_percent: f64) -> Self {
        if charge_percent <= 20.0 {
            ChargeLevel::Low
        } else if charge_percent <= 40.0 {
            ChargeLevel::Medium
        } else {
            ChargeLevel::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeBand {
    Low,
    Medium,
    High,
}

impl RangeBand {
    /// Bands the remaining range as a share of the rated maximum.
    pub fn classify(miles: f64, max_range_miles: f64) -> Self {
        if max_range_miles.is_nan() || max_range_miles <= 0.0 {
            return RangeBand::Low;
        }
        let range_percent = miles / max_range_miles * 100.0;
        if range_percent <= 20.0 {
            RangeBand::Low
        } else if range_percent <= 50.0 {
            RangeBand::Medium
        } else {
            RangeBand::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherImpact {
    Cold,
    Optimal,
    Hot,
}

impl WeatherImpact {
    pub fn from_temperature(temperature_f: f64) -> Self {
        if temperature_f < EXTREME_COLD_F {
            WeatherImpact::Cold
        } else if temperature_f > EXTREME_HEAT_F {
            WeatherImpact::Hot
        } else {
            WeatherImpact::Optimal
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WeatherImpact::Cold => "Cold weather reduces range by ~30%",
            WeatherImpact::Optimal => "Optimal temperature for range",
            WeatherImpact::Hot => "Hot weather reduces range by ~15%",
        }
    }
}
