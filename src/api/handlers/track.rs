//! Handler for the click tracking endpoint.

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::debug;

use crate::api::dto::track::TrackParams;
use crate::domain::log_entry::LogEntry;
use crate::error::AppError;
use crate::state::AppState;

/// Records a tracked click, or resets the click log.
///
/// # Endpoint
///
/// `GET /track?action=log|reset&url=&button=&redirect=&logref=`
///
/// # Actions
///
/// - `log` - appends a timestamped entry to the click log, then answers
///   `302 Found` with `Location: <url>` when `redirect=1` (the sync tracking
///   path rides on this redirect) or `204 No Content` otherwise (the beacon
///   path ignores the response entirely).
/// - `reset` - deletes the click log; `204 No Content`. Missing log counts
///   as success.
/// - anything else, including no action at all - `200 OK` with the
///   plain-text body `unknown action`.
///
/// Missing `log` parameters are defaulted, never rejected; see
/// [`LogEntry::from_params`].
///
/// # Errors
///
/// Returns 500 Internal Server Error when the log cannot be written.
/// Returns 400 Bad Request when `redirect=1` names a URL that cannot be sent
/// as a `Location` header.
pub async fn track_handler(
    State(state): State<AppState>,
    Query(params): Query<TrackParams>,
) -> Result<Response, AppError> {
    match params.action.as_deref() {
        Some("log") => log_click(&state, params).await,
        Some("reset") => {
            state.click_log.reset().await?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        other => {
            debug!(action = ?other, "unknown tracking action");
            Ok((StatusCode::OK, "unknown action").into_response())
        }
    }
}

async fn log_click(state: &AppState, params: TrackParams) -> Result<Response, AppError> {
    let entry = LogEntry::from_params(params.url, params.button, params.redirect, params.logref);

    state.click_log.append(&entry).await?;

    if entry.redirect {
        let location = HeaderValue::from_str(&entry.url).map_err(|_| {
            AppError::bad_request("Invalid redirect URL", json!({ "url": entry.url.clone() }))
        })?;

        Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
    } else {
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
