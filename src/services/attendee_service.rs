use sqlx::SqlitePool;

use crate::database::registrations_repo;
use crate::models::RegistrationRow;

/// Name search results are capped; a check-in desk scans a short list, it
/// does not page.
pub const NAME_SEARCH_LIMIT: i64 = 10;

const MAX_FEED_LIMIT: i64 = 50;

/// Full attendee record as the API exposes it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AttendeeView {
    pub ticket_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_notes: Option<String>,
    pub worship_team: bool,
    pub volunteer: bool,
    pub status: String,
    pub source_system: String,
    pub registration_time: String,
    pub checkin_time: Option<String>,
}

impl From<RegistrationRow> for AttendeeView {
    fn from(row: RegistrationRow) -> Self {
        AttendeeView {
            ticket_id: row.ticket_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            emergency_contact: row.emergency_contact,
            medical_notes: row.medical_notes,
            worship_team: row.worship_team != 0,
            volunteer: row.volunteer != 0,
            status: row.status,
            source_system: row.source_system,
            registration_time: row.registration_time,
            checkin_time: row.checkin_time,
        }
    }
}

/// Row of the live-activity feed.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RecentRegistrationView {
    pub ticket_id: String,
    pub first_name: String,
    pub last_name: String,
    pub status: String,
    pub registration_time: String,
}

/// Row of the recent check-ins sidebar.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RecentCheckinView {
    pub first_name: String,
    pub last_name: String,
    pub checkin_time: String,
}

/// Slim result line for name search at the desk.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchResultView {
    pub ticket_id: String,
    pub first_name: String,
    pub last_name: String,
    pub status: String,
}

pub async fn find_exact(
    pool: &SqlitePool,
    ticket_id: &str,
) -> sqlx::Result<Option<AttendeeView>> {
    Ok(registrations_repo::find_exact(pool, ticket_id)
        .await?
        .map(AttendeeView::from))
}

pub async fn find_fuzzy(pool: &SqlitePool, fragment: &str) -> sqlx::Result<Vec<AttendeeView>> {
    let rows = registrations_repo::find_fuzzy(pool, fragment).await?;
    Ok(rows.into_iter().map(AttendeeView::from).collect())
}

pub async fn search_by_name(
    pool: &SqlitePool,
    term: &str,
) -> sqlx::Result<Vec<SearchResultView>> {
    let rows = registrations_repo::search_by_name(pool, term.trim(), NAME_SEARCH_LIMIT).await?;
    Ok(rows
        .into_iter()
        .map(|row| SearchResultView {
            ticket_id: row.ticket_id,
            first_name: row.first_name,
            last_name: row.last_name,
            status: row.status,
        })
        .collect())
}

pub async fn recent_registrations(
    pool: &SqlitePool,
    limit: Option<i64>,
) -> sqlx::Result<Vec<RecentRegistrationView>> {
    let limit = clamp_limit(limit, 10);
    let rows = registrations_repo::recent_registrations(pool, limit).await?;
    Ok(rows
        .into_iter()
        .map(|row| RecentRegistrationView {
            ticket_id: row.ticket_id,
            first_name: row.first_name,
            last_name: row.last_name,
            status: row.status,
            registration_time: row.registration_time,
        })
        .collect())
}

pub async fn recent_checkins(
    pool: &SqlitePool,
    limit: Option<i64>,
) -> sqlx::Result<Vec<RecentCheckinView>> {
    let limit = clamp_limit(limit, 5);
    let rows = registrations_repo::recent_checkins(pool, limit).await?;
    Ok(rows
        .into_iter()
        .map(|row| RecentCheckinView {
            first_name: row.first_name,
            last_name: row.last_name,
            checkin_time: row.checkin_time.unwrap_or_default(),
        })
        .collect())
}

pub async fn clear_all(pool: &SqlitePool) -> sqlx::Result<u64> {
    registrations_repo::clear_all(pool).await
}

fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_FEED_LIMIT)
}
