use crate::api::responses::{
    BatteryHealthResponse, BatteryReportResponse, ErrorCode, ErrorResponse, ProjectionResponse,
    RangeResponse, RecordResponse, RecordsResponse, ServiceStatus, StatusResponse,
    TaskProjectionResponse,
};
use crate::error::AppError;
use crate::estimation::{
    BatteryReport, DrivingStyle, HealthEstimate, HealthTier, RangeBand, UsageFactors,
    WeatherImpact, build_report, estimate_degradation, estimate_range,
};
use crate::maintenance::{TaskProjection, project_tasks};
use crate::records::VehicleRecord;
use crate::state::{AppState, StoredRecord};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, error, info, warn};

pub type SharedState = Arc<RwLock<AppState>>;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
enum TimestampError {
    Format(time::error::Format),
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::Format(err) => write!(f, "timestamp format error: {err}"),
        }
    }
}

pub enum ApiResponse<T> {
    Success {
        status: StatusCode,
        body: T,
    },
    Error {
        status: StatusCode,
        body: ErrorResponse,
    },
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            ApiResponse::Success { status, body } => (status, Json(body)).into_response(),
            ApiResponse::Error { status, body } => (status, Json(body)).into_response(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RangeRequest {
    pub health_percent: f64,
    #[serde(default)]
    pub max_range_miles: Option<f64>,
    pub temperature_f: f64,
    #[serde(default)]
    pub driving_style: DrivingStyle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    pub factors: UsageFactors,
    #[serde(default)]
    pub max_range_miles: Option<f64>,
    pub temperature_f: f64,
    #[serde(default)]
    pub driving_style: DrivingStyle,
    #[serde(default)]
    pub charge_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProjectionRequest {
    pub mileage: u32,
}

pub async fn get_status(State(state): State<SharedState>) -> impl IntoResponse {
    build_status_response(state, SystemTime::now())
}

pub async fn post_battery_health(Json(factors): Json<UsageFactors>) -> impl IntoResponse {
    build_battery_health_response(&factors, SystemTime::now())
}

pub async fn post_battery_range(
    State(state): State<SharedState>,
    Json(request): Json<RangeRequest>,
) -> impl IntoResponse {
    build_range_response(state, &request, SystemTime::now())
}

pub async fn post_battery_report(
    State(state): State<SharedState>,
    Json(request): Json<ReportRequest>,
) -> impl IntoResponse {
    build_report_response(state, &request, SystemTime::now())
}

pub async fn get_battery_report(State(state): State<SharedState>) -> impl IntoResponse {
    build_latest_report_response(state, SystemTime::now())
}

pub async fn post_maintenance_projection(
    State(state): State<SharedState>,
    Json(request): Json<ProjectionRequest>,
) -> impl IntoResponse {
    build_projection_response(state, request.mileage, SystemTime::now())
}

pub async fn get_records(State(state): State<SharedState>) -> impl IntoResponse {
    build_records_response(state, SystemTime::now())
}

pub async fn post_record(
    State(state): State<SharedState>,
    Json(record): Json<VehicleRecord>,
) -> impl IntoResponse {
    build_create_record_response(state, record, SystemTime::now())
}

fn build_status_response(state: SharedState, now: SystemTime) -> ApiResponse<StatusResponse> {
    let records_stored = match state.read() {
        Ok(guard) => guard.records().len(),
        Err(_) => return internal_error("/api/status", "state lock poisoned while reading records"),
    };

    match format_timestamp(now) {
        Ok(timestamp) => ApiResponse::Success {
            status: StatusCode::OK,
            body: StatusResponse {
                status: ServiceStatus::Ok,
                records_stored,
                timestamp,
            },
        },
        Err(_) => internal_error("/api/status", "timestamp formatting failure"),
    }
}

fn build_battery_health_response(
    factors: &UsageFactors,
    now: SystemTime,
) -> ApiResponse<BatteryHealthResponse> {
    let health = estimate_degradation(factors);
    debug!(
        age_years = factors.age_years,
        miles_driven = factors.miles_driven,
        health_percent = health.health_percent,
        "Battery health estimated"
    );

    match format_timestamp(now) {
        Ok(timestamp) => ApiResponse::Success {
            status: StatusCode::OK,
            body: BatteryHealthResponse {
                health_percent: health.health_percent,
                degradation_percent: health.degradation_percent(),
                health_tier: HealthTier::from_percent(health.health_percent),
                timestamp,
            },
        },
        Err(_) => internal_error("/api/battery/health", "timestamp formatting failure"),
    }
}

fn build_range_response(
    state: SharedState,
    request: &RangeRequest,
    now: SystemTime,
) -> ApiResponse<RangeResponse> {
    let max_range_miles = match request.max_range_miles {
        Some(max_range_miles) if !is_valid_max_range(max_range_miles) => {
            return invalid_max_range(max_range_miles, now);
        }
        Some(max_range_miles) => max_range_miles,
        None => match state.read() {
            Ok(guard) => guard.settings().max_range_miles,
            Err(_) => {
                return internal_error(
                    "/api/battery/range",
                    "state lock poisoned while reading settings",
                );
            }
        },
    };

    let health = HealthEstimate {
        health_percent: request.health_percent,
    };
    let range = estimate_range(
        &health,
        max_range_miles,
        request.temperature_f,
        request.driving_style,
    );
    debug!(
        health_percent = request.health_percent,
        temperature_f = request.temperature_f,
        driving_style = %request.driving_style,
        range_miles = range.miles,
        "Range estimated"
    );

    match format_timestamp(now) {
        Ok(timestamp) => ApiResponse::Success {
            status: StatusCode::OK,
            body: RangeResponse {
                range_miles: range.miles,
                max_range_miles,
                range_band: RangeBand::classify(range.miles, max_range_miles),
                weather_impact: WeatherImpact::from_temperature(request.temperature_f)
                    .description()
                    .to_string(),
                driving_style: request.driving_style,
                timestamp,
            },
        },
        Err(_) => internal_error("/api/battery/range", "timestamp formatting failure"),
    }
}

fn build_report_response(
    state: SharedState,
    request: &ReportRequest,
    now: SystemTime,
) -> ApiResponse<BatteryReportResponse> {
    if let Some(max_range_miles) = request
        .max_range_miles
        .filter(|max_range_miles| !is_valid_max_range(*max_range_miles))
    {
        return invalid_max_range(max_range_miles, now);
    }

    let mut guard = match state.write() {
        Ok(guard) => guard,
        Err(_) => {
            return internal_error(
                "/api/battery/report",
                "state lock poisoned while storing report",
            );
        }
    };

    let max_range_miles = request
        .max_range_miles
        .unwrap_or(guard.settings().max_range_miles);
    let mut report = build_report(
        &request.factors,
        max_range_miles,
        request.temperature_f,
        request.driving_style,
    );
    if let Some(charge_percent) = request.charge_percent {
        report = report.with_charge(charge_percent);
    }
    guard.set_latest_report(report.clone(), now);
    drop(guard);

    info!(
        health_percent = report.health.health_percent,
        range_miles = report.range.miles,
        "Battery report updated"
    );

    match format_timestamp(now) {
        Ok(timestamp) => ApiResponse::Success {
            status: StatusCode::OK,
            body: report_body(&report, timestamp),
        },
        Err(_) => internal_error("/api/battery/report", "timestamp formatting failure"),
    }
}

fn build_latest_report_response(
    state: SharedState,
    now: SystemTime,
) -> ApiResponse<BatteryReportResponse> {
    let stored = match state.read() {
        Ok(guard) => guard.latest_report().cloned(),
        Err(_) => {
            return internal_error(
                "/api/battery/report",
                "state lock poisoned while reading report",
            );
        }
    };

    let Some(stored) = stored else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::NoData,
            "No battery report available",
            None,
            now,
        );
    };

    match format_timestamp(stored.timestamp) {
        Ok(timestamp) => ApiResponse::Success {
            status: StatusCode::OK,
            body: report_body(&stored.report, timestamp),
        },
        Err(_) => internal_error("/api/battery/report", "timestamp formatting failure"),
    }
}

fn report_body(report: &BatteryReport, timestamp: String) -> BatteryReportResponse {
    BatteryReportResponse {
        health_percent: report.health.health_percent,
        degradation_percent: report.health.degradation_percent(),
        health_tier: report.health_tier,
        range_miles: report.range.miles,
        max_range_miles: report.max_range_miles,
        range_band: report.range_band,
        weather_impact: report.weather_impact.description().to_string(),
        driving_style: report.driving_style,
        charge_level: report.charge_level,
        timestamp,
    }
}

fn build_projection_response(
    state: SharedState,
    mileage: u32,
    now: SystemTime,
) -> ApiResponse<ProjectionResponse> {
    let projections = match state.read() {
        Ok(guard) => project_tasks(&guard.settings().maintenance_tasks, mileage),
        Err(_) => {
            return internal_error(
                "/api/maintenance/projection",
                "state lock poisoned while reading maintenance tasks",
            );
        }
    };

    match format_timestamp(now) {
        Ok(timestamp) => ApiResponse::Success {
            status: StatusCode::OK,
            body: ProjectionResponse {
                mileage,
                tasks: projections.into_iter().map(map_projection).collect(),
                timestamp,
            },
        },
        Err(_) => internal_error("/api/maintenance/projection", "timestamp formatting failure"),
    }
}

fn map_projection(projection: TaskProjection) -> TaskProjectionResponse {
    TaskProjectionResponse {
        id: projection.task.id,
        name: projection.task.name,
        tip: projection.task.tip,
        interval_miles: projection.task.interval_miles,
        due_mileage: projection.due_mileage,
        miles_left: projection.miles_left,
        progress_percent: projection.progress_percent,
        urgency: projection.urgency,
        urgency_label: projection.urgency.label().to_string(),
    }
}

fn build_records_response(state: SharedState, now: SystemTime) -> ApiResponse<RecordsResponse> {
    let records = match state.read() {
        Ok(guard) => guard.records().to_vec(),
        Err(_) => return internal_error("/api/records", "state lock poisoned while reading records"),
    };

    let mut mapped = Vec::with_capacity(records.len());
    for record in &records {
        match map_record(record) {
            Ok(response) => mapped.push(response),
            Err(_) => return internal_error("/api/records", "timestamp formatting failure"),
        }
    }

    match format_timestamp(now) {
        Ok(timestamp) => ApiResponse::Success {
            status: StatusCode::OK,
            body: RecordsResponse {
                records: mapped,
                timestamp,
            },
        },
        Err(_) => internal_error("/api/records", "timestamp formatting failure"),
    }
}

fn build_create_record_response(
    state: SharedState,
    record: VehicleRecord,
    now: SystemTime,
) -> ApiResponse<RecordResponse> {
    let result = state
        .write()
        .map_err(|_| AppError::StateLock)
        .and_then(|mut guard| guard.add_record(record, now));

    match result {
        Ok(stored) => {
            info!(
                record_id = stored.id,
                make = %stored.record.make,
                model = %stored.record.model,
                mileage = stored.record.mileage,
                "Vehicle record saved"
            );
            match map_record(&stored) {
                Ok(body) => ApiResponse::Success {
                    status: StatusCode::CREATED,
                    body,
                },
                Err(_) => internal_error("/api/records", "timestamp formatting failure"),
            }
        }
        Err(AppError::InvalidRecord(err)) => {
            warn!(field = err.field(), error = %err, "Rejected vehicle record");
            error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::InvalidRecord,
                &err.to_string(),
                Some(err.field()),
                now,
            )
        }
        Err(err) => internal_error("/api/records", &err.to_string()),
    }
}

fn map_record(stored: &StoredRecord) -> Result<RecordResponse, TimestampError> {
    Ok(RecordResponse {
        id: stored.id,
        make: stored.record.make.clone(),
        model: stored.record.model.clone(),
        mileage: stored.record.mileage,
        notes: stored.record.notes.clone(),
        saved_at: format_timestamp(stored.saved_at)?,
    })
}

fn error_response<T>(
    status: StatusCode,
    error_code: ErrorCode,
    message: &str,
    field: Option<&str>,
    now: SystemTime,
) -> ApiResponse<T> {
    ApiResponse::Error {
        status,
        body: ErrorResponse {
            error_code,
            error_message: message.to_string(),
            field: field.map(str::to_string),
            timestamp: format_timestamp_or_now(now),
        },
    }
}

fn is_valid_max_range(max_range_miles: f64) -> bool {
    max_range_miles.is_finite() && max_range_miles > 0.0
}

fn invalid_max_range<T>(max_range_miles: f64, now: SystemTime) -> ApiResponse<T> {
    warn!(max_range_miles, "Rejected non-positive max range");
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InvalidInput,
        "max_range_miles must be a positive number",
        Some("max_range_miles"),
        now,
    )
}

fn internal_error<T>(endpoint: &str, message: &str) -> ApiResponse<T> {
    error!(
        endpoint = endpoint,
        message = message,
        "Internal error while handling request"
    );
    ApiResponse::Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: ErrorResponse {
            error_code: ErrorCode::InternalError,
            error_message: INTERNAL_ERROR_MESSAGE.to_string(),
            field: None,
            timestamp: format_timestamp_or_now(SystemTime::now()),
        },
    }
}

fn format_timestamp(timestamp: SystemTime) -> Result<String, TimestampError> {
    let datetime = OffsetDateTime::from(timestamp);
    datetime.format(&Rfc3339).map_err(TimestampError::Format)
}

fn format_timestamp_or_now(timestamp: SystemTime) -> String {
    format_timestamp(timestamp).unwrap_or_else(|err| {
        error!(error = %err, "Failed to format error timestamp");
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
    })
}
