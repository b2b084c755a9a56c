pub mod checkin;
pub mod export;
pub mod registrations;
pub mod stats;
pub mod tickets;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// Uniform 500 for storage failures; the request dies, the registry does
/// not (statements are atomic).
pub(crate) fn storage_error(context: &'static str, e: sqlx::Error) -> (StatusCode, Json<Value>) {
    tracing::error!(context, error = %e, "storage failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "storage_failure" })),
    )
}
