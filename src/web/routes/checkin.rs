use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::services::attendee_service;
use crate::services::checkin_service::{self, CheckinError};
use crate::web::routes::{registrations::FeedQuery, storage_error};
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckinBody {
    pub ticket_id: String,
}

pub async fn checkin_handler(
    State(state): State<AppState>,
    Json(body): Json<CheckinBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match checkin_service::checkin(&state.pool, &body.ticket_id).await {
        Ok(attendee) => Ok(Json(json!({
            "outcome": "checked_in",
            "attendee": attendee,
        }))),
        Err(CheckinError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({
                "outcome": "not_found",
                "error": "ticket_not_found",
            })),
        )),
        // Benign repeat scan, logged at info, never as an error.
        Err(CheckinError::AlreadyCheckedIn(ticket_id)) => {
            info!(%ticket_id, "repeat check-in attempt");
            Err((
                StatusCode::CONFLICT,
                Json(json!({
                    "outcome": "already_checked_in",
                    "ticket_id": ticket_id,
                })),
            ))
        }
        Err(CheckinError::Storage(e)) => Err(storage_error("checkin", e)),
    }
}

pub async fn recent_checkins_handler(
    State(state): State<AppState>,
    Query(q): Query<FeedQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let feed = attendee_service::recent_checkins(&state.pool, q.limit)
        .await
        .map_err(|e| storage_error("recent_checkins", e))?;
    Ok(Json(json!({ "checkins": feed })))
}
