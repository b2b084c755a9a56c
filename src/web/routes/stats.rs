use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::services::stats_service;
use crate::web::routes::storage_error;
use crate::web::AppState;

pub async fn stats_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let snapshot = stats_service::aggregate(&state.pool)
        .await
        .map_err(|e| storage_error("stats_aggregate", e))?;
    Ok(Json(json!({ "stats": snapshot })))
}
