pub mod routes;

use axum::{
    routing::{get, post},
    Json, Router,
};
use sqlx::SqlitePool;

use crate::ticket::TicketConfig;

/// Everything a handler needs, passed explicitly; no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tickets: TicketConfig,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { Json(serde_json::json!({ "status": "ok" })) }))
        .route(
            "/api/registrations",
            post(routes::registrations::create_registration_handler)
                .get(routes::registrations::list_registrations_handler)
                .delete(routes::registrations::clear_registrations_handler),
        )
        .route(
            "/api/registrations/recent",
            get(routes::registrations::recent_registrations_handler),
        )
        .route(
            "/api/registrations/:ticket_id",
            get(routes::registrations::get_registration_handler),
        )
        .route(
            "/api/attendees/search",
            get(routes::registrations::search_attendees_handler),
        )
        .route("/api/checkin", post(routes::checkin::checkin_handler))
        .route(
            "/api/checkins/recent",
            get(routes::checkin::recent_checkins_handler),
        )
        .route("/api/stats", get(routes::stats::stats_handler))
        .route("/api/export.csv", get(routes::export::export_csv_handler))
        .route(
            "/api/export/preview",
            get(routes::export::export_preview_handler),
        )
        .route(
            "/api/tickets/batch",
            post(routes::tickets::batch_tickets_handler),
        )
        .route(
            "/api/tickets/:ticket_id/barcode.png",
            get(routes::tickets::barcode_png_handler),
        )
        .with_state(state)
}
