use axum::Router;
use axum::routing::{get, post};

pub mod handlers;
pub mod responses;

use handlers::SharedState;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/status", get(handlers::get_status))
        .route("/api/battery/health", post(handlers::post_battery_health))
        .route("/api/battery/range", post(handlers::post_battery_range))
        .route(
            "/api/battery/report",
            get(handlers::get_battery_report).post(handlers::post_battery_report),
        )
        .route(
            "/api/maintenance/projection",
            post(handlers::post_maintenance_projection),
        )
        .route(
            "/api/records",
            get(handlers::get_records).post(handlers::post_record),
        )
        .with_state(state)
}
