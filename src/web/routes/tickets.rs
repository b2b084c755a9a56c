use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::services::ticket_service::{self, TicketError};
use crate::web::routes::storage_error;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct BatchBody {
    pub prefix: Option<String>,
    pub count: usize,
}

/// Pre-print ticket stock: identifiers plus registration links, nothing
/// inserted into the registry.
pub async fn batch_tickets_handler(
    State(state): State<AppState>,
    Json(body): Json<BatchBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match ticket_service::generate_batch(&state.tickets, body.prefix.as_deref(), body.count) {
        Ok(tickets) => Ok(Json(json!({ "tickets": tickets }))),
        Err(e @ (TicketError::BatchSize(_) | TicketError::InvalidPrefix(_))) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_batch", "detail": e.to_string() })),
        )),
        Err(e) => {
            error!(error = %e, "batch generation failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "batch_failed" })),
            ))
        }
    }
}

pub async fn barcode_png_handler(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    match ticket_service::barcode_png(&state.pool, &ticket_id).await {
        Ok(png) => {
            let headers = [
                (header::CONTENT_TYPE, "image/png".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{ticket_id}.png\""),
                ),
            ];
            Ok((headers, png).into_response())
        }
        Err(TicketError::UnknownTicket(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "ticket_not_found" })),
        )),
        Err(TicketError::Storage(e)) => Err(storage_error("barcode_lookup", e)),
        Err(e) => {
            error!(error = %e, %ticket_id, "barcode rendering failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "barcode_failed" })),
            ))
        }
    }
}
