use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::services::attendee_service;
use crate::services::registration_service::{self, RegistrationError, RegistrationInput};
use crate::web::routes::storage_error;
use crate::web::AppState;

pub async fn create_registration_handler(
    State(state): State<AppState>,
    Json(input): Json<RegistrationInput>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    match registration_service::register(&state.pool, &state.tickets, input).await {
        Ok(receipt) => Ok((
            StatusCode::CREATED,
            Json(json!({ "registration": receipt })),
        )),
        Err(RegistrationError::MissingField(field)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "missing_required_field", "field": field })),
        )),
        Err(RegistrationError::IdExhausted) => {
            error!("ticket id collisions persisted across all retries");
            Err((
                StatusCode::CONFLICT,
                Json(json!({ "error": "ticket_id_exhausted" })),
            ))
        }
        Err(RegistrationError::Storage(e)) => Err(storage_error("registration_insert", e)),
    }
}

#[derive(Debug, Deserialize)]
pub struct TicketLookupQuery {
    /// Full or partial ticket id, case-sensitive.
    pub ticket: String,
}

pub async fn list_registrations_handler(
    State(state): State<AppState>,
    Query(q): Query<TicketLookupQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let matches = attendee_service::find_fuzzy(&state.pool, q.ticket.trim())
        .await
        .map_err(|e| storage_error("ticket_lookup", e))?;
    Ok(Json(json!({ "registrations": matches })))
}

pub async fn get_registration_handler(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let view = attendee_service::find_exact(&state.pool, &ticket_id)
        .await
        .map_err(|e| storage_error("ticket_get", e))?;

    match view {
        Some(attendee) => Ok(Json(json!({ "registration": attendee }))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "ticket_not_found" })),
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct NameSearchQuery {
    pub name: String,
}

pub async fn search_attendees_handler(
    State(state): State<AppState>,
    Query(q): Query<NameSearchQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let results = attendee_service::search_by_name(&state.pool, &q.name)
        .await
        .map_err(|e| storage_error("name_search", e))?;
    Ok(Json(json!({ "attendees": results })))
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
}

pub async fn recent_registrations_handler(
    State(state): State<AppState>,
    Query(q): Query<FeedQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let feed = attendee_service::recent_registrations(&state.pool, q.limit)
        .await
        .map_err(|e| storage_error("recent_registrations", e))?;
    Ok(Json(json!({ "registrations": feed })))
}

/// Administrative escape hatch; wipes every registration.
pub async fn clear_registrations_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let removed = attendee_service::clear_all(&state.pool)
        .await
        .map_err(|e| storage_error("clear_registrations", e))?;
    warn!(removed, "registry cleared");
    Ok(Json(json!({ "removed": removed })))
}
