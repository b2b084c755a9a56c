use sqlx::SqlitePool;
use tracing::info;

use crate::database::registrations_repo::{self, CheckinRow};
use crate::models::{now_timestamp, TicketStatus};

#[derive(Debug, thiserror::Error)]
pub enum CheckinError {
    #[error("no ticket matches {0:?}")]
    NotFound(String),
    #[error("ticket {0} is already checked in")]
    AlreadyCheckedIn(String),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckedIn {
    pub ticket_id: String,
    pub first_name: String,
    pub last_name: String,
    pub checkin_time: String,
}

/// Apply the one-way `registered -> checked_in` transition for the ticket
/// the identifier names. Exact match first; a fuzzy containment fallback
/// covers partial or scan-degraded identifiers, but only when it selects a
/// single registration. An ambiguous fragment never checks anyone in.
pub async fn checkin(pool: &SqlitePool, identifier: &str) -> Result<CheckedIn, CheckinError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(CheckinError::NotFound(String::new()));
    }

    let now = now_timestamp();

    if let Some(row) = registrations_repo::checkin_exact(pool, identifier, &now).await? {
        info!(ticket_id = %row.ticket_id, "checked in (exact match)");
        return Ok(checked_in(row));
    }

    if let Some(row) = registrations_repo::checkin_fuzzy_unique(pool, identifier, &now).await? {
        info!(ticket_id = %row.ticket_id, fragment = identifier, "checked in (fuzzy match)");
        return Ok(checked_in(row));
    }

    // Neither conditional update claimed a row; classify the miss.
    if let Some(existing) = registrations_repo::find_exact(pool, identifier).await? {
        if existing.status() == Some(TicketStatus::CheckedIn) {
            return Err(CheckinError::AlreadyCheckedIn(existing.ticket_id));
        }
        // The record appeared between our update and this read; the caller
        // can simply retry.
        return Err(CheckinError::NotFound(identifier.to_string()));
    }

    match registrations_repo::count_fuzzy(pool, identifier).await? {
        0 => Err(CheckinError::NotFound(identifier.to_string())),
        1 => {
            let matches = registrations_repo::find_fuzzy(pool, identifier).await?;
            match matches.first() {
                Some(row) if row.status() == Some(TicketStatus::CheckedIn) => {
                    Err(CheckinError::AlreadyCheckedIn(row.ticket_id.clone()))
                }
                _ => Err(CheckinError::NotFound(identifier.to_string())),
            }
        }
        // Two or more containing records: refusing is safer than checking
        // in the wrong attendee.
        _ => Err(CheckinError::NotFound(identifier.to_string())),
    }
}

fn checked_in(row: CheckinRow) -> CheckedIn {
    CheckedIn {
        ticket_id: row.ticket_id,
        first_name: row.first_name,
        last_name: row.last_name,
        checkin_time: row.checkin_time,
    }
}
