use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::services::attendee_service::AttendeeView;
use crate::services::export_service::{self, ExportError};
use crate::web::routes::storage_error;
use crate::web::AppState;

const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub async fn export_csv_handler(
    State(state): State<AppState>,
    Query(q): Query<ExportQuery>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let filter = parse_query(&q)?;
    let rows = export_service::export_rows(&state.pool, &filter)
        .await
        .map_err(export_error)?;

    let csv = export_service::to_csv(&rows);
    let filename = export_service::filename(&filter);
    let headers = [
        (
            header::CONTENT_TYPE,
            "text/csv; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, csv).into_response())
}

pub async fn export_preview_handler(
    State(state): State<AppState>,
    Query(q): Query<ExportQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let filter = parse_query(&q)?;
    let rows = export_service::export_rows(&state.pool, &filter)
        .await
        .map_err(export_error)?;

    let summary = export_service::summarize(&rows);
    let preview: Vec<AttendeeView> = rows
        .into_iter()
        .take(PREVIEW_ROWS)
        .map(AttendeeView::from)
        .collect();

    Ok(Json(json!({
        "rows": preview,
        "summary": summary,
        "filename": export_service::filename(&filter),
    })))
}

fn parse_query(
    q: &ExportQuery,
) -> Result<crate::database::registrations_repo::ExportFilter, (StatusCode, Json<Value>)> {
    export_service::parse_filter(
        q.status.as_deref(),
        q.category.as_deref(),
        q.from.as_deref(),
        q.to.as_deref(),
    )
    .map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_filter", "detail": e.to_string() })),
        )
    })
}

fn export_error(e: ExportError) -> (StatusCode, Json<Value>) {
    match e {
        ExportError::Storage(e) => storage_error("export_read", e),
        other => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_filter", "detail": other.to_string() })),
        ),
    }
}
