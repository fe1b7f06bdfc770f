//! Battery health and range estimation.
//!
//! Both estimators are total functions: out-of-range inputs are clamped,
//! never rejected, so callers can feed raw form values straight in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod condition;
pub mod degradation;
pub mod range;

pub use condition::{ChargeLevel, HealthTier, RangeBand, WeatherImpact};
pub use degradation::estimate_degradation;
pub use range::estimate_range;

/// Rated full-charge range used when the vehicle does not specify one.
pub const DEFAULT_MAX_RANGE_MILES: f64 = 300.0;

/// Usage inputs gathered from the battery form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageFactors {
    pub age_years: f64,
    pub miles_driven: f64,
    /// Average ambient temperature in Fahrenheit.
    pub climate_f: f64,
    /// Share of charging sessions done on DC fast chargers, 0.0 to 1.0.
    pub fast_charge_fraction: f64,
}

/// Remaining battery capacity as a percentage of the original.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthEstimate {
    pub health_percent: f64,
}

impl HealthEstimate {
    pub fn degradation_percent(&self) -> f64 {
        100.0 - self.health_percent
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeEstimate {
    pub miles: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DrivingStyle {
    Conservative,
    #[default]
    Normal,
    Aggressive,
}

impl fmt::Display for DrivingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DrivingStyle::Conservative => "conservative",
            DrivingStyle::Normal => "normal",
            DrivingStyle::Aggressive => "aggressive",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown driving style: {0}")]
pub struct UnknownDrivingStyle(pub String);

impl FromStr for DrivingStyle {
    type Err = UnknownDrivingStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(DrivingStyle::Conservative),
            "normal" => Ok(DrivingStyle::Normal),
            "aggressive" => Ok(DrivingStyle::Aggressive),
            _ => Err(UnknownDrivingStyle(s.to_string())),
        }
    }
}

impl TryFrom<String> for DrivingStyle {
    type Error = UnknownDrivingStyle;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One evaluation of the battery panel: health, range and their display tiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryReport {
    pub health: HealthEstimate,
    pub range: RangeEstimate,
    pub max_range_miles: f64,
    pub health_tier: HealthTier,
    pub range_band: RangeBand,
    pub weather_impact: WeatherImpact,
    pub driving_style: DrivingStyle,
    pub charge_level: Option<ChargeLevel>,
}

impl BatteryReport {
    /// Attaches the current state of charge to the report.
    pub fn with_charge(mut self, charge_percent: f64) -> Self {
        self.charge_level = Some(ChargeLevel::from_percent(charge_percent));
        self
    }
}

pub fn build_report(
    factors: &UsageFactors,
    max_range_miles: f64,
    temperature_f: f64,
    style: DrivingStyle,
) -> BatteryReport {
    let health = estimate_degradation(factors);
    let range = estimate_range(&health, max_range_miles, temperature_f, style);

    BatteryReport {
        health,
        range,
        max_range_miles,
        health_tier: HealthTier::from_percent(health.health_percent),
        range_band: RangeBand::classify(range.miles, max_range_miles),
        weather_impact: WeatherImpact::from_temperature(temperature_f),
        driving_style: style,
        charge_level: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(age_years: f64, miles_driven: f64) -> UsageFactors {
        UsageFactors {
            age_years,
            miles_driven,
            climate_f: 70.0,
            fast_charge_fraction: 0.0,
        }
    }

    #[test]
    fn driving_style_parses_case_insensitively() {
        assert_eq!(
            "Aggressive".parse::<DrivingStyle>(),
            Ok(DrivingStyle::Aggressive)
        );
        assert_eq!(
            " conservative ".parse::<DrivingStyle>(),
            Ok(DrivingStyle::Conservative)
        );
        assert!("sporty".parse::<DrivingStyle>().is_err());
    }

    #[test]
    fn driving_style_serializes_lowercase() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(DrivingStyle::Conservative)?;
        assert_eq!(value, serde_json::json!("conservative"));
        let parsed: DrivingStyle = serde_json::from_value(serde_json::json!("aggressive"))?;
        assert_eq!(parsed, DrivingStyle::Aggressive);
        Ok(())
    }

    #[test]
    fn driving_style_deserializes_case_insensitively() -> Result<(), serde_json::Error> {
        let parsed: DrivingStyle = serde_json::from_value(serde_json::json!("Aggressive"))?;
        assert_eq!(parsed, DrivingStyle::Aggressive);
        let parsed: DrivingStyle = serde_json::from_value(serde_json::json!("CONSERVATIVE"))?;
        assert_eq!(parsed, DrivingStyle::Conservative);
        assert!(serde_json::from_value::<DrivingStyle>(serde_json::json!("sporty")).is_err());
        Ok(())
    }

    #[test]
    fn degradation_percent_complements_health() {
        let health = HealthEstimate {
            health_percent: 85.0,
        };
        assert_eq!(health.degradation_percent(), 15.0);
    }

    #[test]
    fn report_combines_estimates_and_tiers() {
        let report = build_report(
            &factors(10.0, 0.0),
            DEFAULT_MAX_RANGE_MILES,
            100.0,
            DrivingStyle::Normal,
        );

        assert_eq!(report.health.health_percent, 85.0);
        // 300 * 0.85 * 0.85 = 216.75
        assert_eq!(report.range.miles, 217.0);
        assert_eq!(report.health_tier, HealthTier::Good);
        assert_eq!(report.range_band, RangeBand::High);
        assert_eq!(report.weather_impact, WeatherImpact::Hot);
    }

    #[test]
    fn report_for_worn_battery_is_critical() {
        let report = build_report(
            &factors(70.0, 0.0),
            DEFAULT_MAX_RANGE_MILES,
            70.0,
            DrivingStyle::Aggressive,
        );

        assert_eq!(report.health.health_percent, 0.0);
        assert_eq!(report.range.miles, 0.0);
        assert_eq!(report.health_tier, HealthTier::Critical);
        assert_eq!(report.range_band, RangeBand::Low);
        assert_eq!(report.charge_level, None);
    }

    #[test]
    fn report_carries_charge_level_when_given() {
        let report = build_report(
            &factors(1.0, 0.0),
            DEFAULT_MAX_RANGE_MILES,
            70.0,
            DrivingStyle::Normal,
        )
        .with_charge(35.0);

        assert_eq!(report.charge_level, Some(ChargeLevel::Medium));
    }
}
