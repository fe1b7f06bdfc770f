use crate::estimation::{ChargeLevel, DrivingStyle, HealthTier, RangeBand};
use crate::maintenance::Urgency;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NoData,
    InvalidRecord,
    InvalidInput,
    InternalError,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ErrorResponse {
    pub error_code: ErrorCode,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StatusResponse {
    pub status: ServiceStatus,
    pub records_stored: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BatteryHealthResponse {
    pub health_percent: f64,
    pub degradation_percent: f64,
    pub health_tier: HealthTier,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RangeResponse {
    pub range_miles: f64,
    pub max_range_miles: f64,
    pub range_band: RangeBand,
    pub weather_impact: String,
    pub driving_style: DrivingStyle,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BatteryReportResponse {
    pub health_percent: f64,
    pub degradation_percent: f64,
    pub health_tier: HealthTier,
    pub range_miles: f64,
    pub max_range_miles: f64,
    pub range_band: RangeBand,
    pub weather_impact: String,
    pub driving_style: DrivingStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_level: Option<ChargeLevel>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TaskProjectionResponse {
    pub id: u32,
    pub name: String,
    pub tip: String,
    pub interval_miles: u32,
    pub due_mileage: u64,
    pub miles_left: u32,
    pub progress_percent: f64,
    pub urgency: Urgency,
    pub urgency_label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProjectionResponse {
    pub mileage: u32,
    pub tasks: Vec<TaskProjectionResponse>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RecordResponse {
    pub id: u64,
    pub make: String,
    pub model: String,
    pub mileage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub saved_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RecordsResponse {
    pub records: Vec<RecordResponse>,
    pub timestamp: String,
}
