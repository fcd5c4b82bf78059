//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Click log**: Verifies the log storage can accept entries
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let log_check = check_click_log(&state).await;

    let all_healthy = log_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            click_log: log_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks whether the click log storage is able to accept entries.
async fn check_click_log(state: &AppState) -> CheckStatus {
    if state.click_log.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Click log writable".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Click log storage unavailable".to_string()),
        }
    }
}
