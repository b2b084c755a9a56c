use sqlx::{sqlite::SqliteArguments, Arguments, SqlitePool};

use crate::models::{RegistrationRow, TicketStatus};

const SQL_INSERT_REGISTRATION: &str = r#"
INSERT INTO registrations (
  ticket_id,
  first_name,
  last_name,
  email,
  phone,
  emergency_contact,
  medical_notes,
  worship_team,
  volunteer,
  status,
  source_system,
  registration_time
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 'registered', ?, ?)
"#;

pub struct NewRegistration<'a> {
    pub ticket_id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub emergency_contact: Option<&'a str>,
    pub medical_notes: Option<&'a str>,
    pub worship_team: bool,
    pub volunteer: bool,
    pub source_system: &'a str,
    pub registration_time: &'a str,
}

pub async fn insert(pool: &SqlitePool, new: NewRegistration<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_REGISTRATION)
        .bind(new.ticket_id)
        .bind(new.first_name)
        .bind(new.last_name)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.emergency_contact)
        .bind(new.medical_notes)
        .bind(new.worship_team)
        .bind(new.volunteer)
        .bind(new.source_system)
        .bind(new.registration_time)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_FIND_EXACT: &str = r#"
SELECT
  ticket_id,
  first_name,
  last_name,
  email,
  phone,
  emergency_contact,
  medical_notes,
  worship_team,
  volunteer,
  status,
  source_system,
  registration_time,
  checkin_time
FROM registrations
WHERE ticket_id = ?1
LIMIT 1
"#;

pub async fn find_exact(
    pool: &SqlitePool,
    ticket_id: &str,
) -> sqlx::Result<Option<RegistrationRow>> {
    sqlx::query_as::<_, RegistrationRow>(SQL_FIND_EXACT)
        .bind(ticket_id)
        .fetch_optional(pool)
        .await
}

const SQL_FIND_FUZZY: &str = r#"
SELECT
  ticket_id,
  first_name,
  last_name,
  email,
  phone,
  emergency_contact,
  medical_notes,
  worship_team,
  volunteer,
  status,
  source_system,
  registration_time,
  checkin_time
FROM registrations
WHERE instr(ticket_id, ?1) > 0
ORDER BY id ASC
"#;

/// Case-sensitive substring containment on the ticket id, insertion order.
/// `instr` rather than LIKE: the id alphabet is uppercase and a partial
/// scan must not match across case.
pub async fn find_fuzzy(
    pool: &SqlitePool,
    fragment: &str,
) -> sqlx::Result<Vec<RegistrationRow>> {
    sqlx::query_as::<_, RegistrationRow>(SQL_FIND_FUZZY)
        .bind(fragment)
        .fetch_all(pool)
        .await
}

const SQL_COUNT_FUZZY: &str = r#"
SELECT COUNT(*) FROM registrations WHERE instr(ticket_id, ?1) > 0
"#;

pub async fn count_fuzzy(pool: &SqlitePool, fragment: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_FUZZY)
        .bind(fragment)
        .fetch_one(pool)
        .await
}

const SQL_SEARCH_BY_NAME: &str = r#"
SELECT
  ticket_id,
  first_name,
  last_name,
  email,
  phone,
  emergency_contact,
  medical_notes,
  worship_team,
  volunteer,
  status,
  source_system,
  registration_time,
  checkin_time
FROM registrations
WHERE lower(first_name) LIKE ?1
   OR lower(last_name) LIKE ?1
ORDER BY id ASC
LIMIT ?2
"#;

/// Case-insensitive name search. The pattern is bound, never interpolated
/// into the query text.
pub async fn search_by_name(
    pool: &SqlitePool,
    term: &str,
    limit: i64,
) -> sqlx::Result<Vec<RegistrationRow>> {
    let pattern = format!("%{}%", term.to_lowercase());
    sqlx::query_as::<_, RegistrationRow>(SQL_SEARCH_BY_NAME)
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await
}

const SQL_RECENT_REGISTRATIONS: &str = r#"
SELECT
  ticket_id,
  first_name,
  last_name,
  email,
  phone,
  emergency_contact,
  medical_notes,
  worship_team,
  volunteer,
  status,
  source_system,
  registration_time,
  checkin_time
FROM registrations
ORDER BY id DESC
LIMIT ?1
"#;

pub async fn recent_registrations(
    pool: &SqlitePool,
    limit: i64,
) -> sqlx::Result<Vec<RegistrationRow>> {
    sqlx::query_as::<_, RegistrationRow>(SQL_RECENT_REGISTRATIONS)
        .bind(limit)
        .fetch_all(pool)
        .await
}

const SQL_RECENT_CHECKINS: &str = r#"
SELECT
  ticket_id,
  first_name,
  last_name,
  email,
  phone,
  emergency_contact,
  medical_notes,
  worship_team,
  volunteer,
  status,
  source_system,
  registration_time,
  checkin_time
FROM registrations
WHERE status = 'checked_in'
ORDER BY checkin_time DESC, id DESC
LIMIT ?1
"#;

pub async fn recent_checkins(
    pool: &SqlitePool,
    limit: i64,
) -> sqlx::Result<Vec<RegistrationRow>> {
    sqlx::query_as::<_, RegistrationRow>(SQL_RECENT_CHECKINS)
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Identifying fields of a row the check-in transition just claimed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CheckinRow {
    pub ticket_id: String,
    pub first_name: String,
    pub last_name: String,
    pub checkin_time: String,
}

const SQL_CHECKIN_EXACT: &str = r#"
UPDATE registrations
SET status = 'checked_in', checkin_time = ?1
WHERE ticket_id = ?2
  AND status = 'registered'
RETURNING ticket_id, first_name, last_name, checkin_time
"#;

/// Conditional transition guarded by the current status. One statement, so
/// concurrent attempts on the same ticket cannot both observe 'registered':
/// exactly one returns a row.
pub async fn checkin_exact(
    pool: &SqlitePool,
    ticket_id: &str,
    checkin_time: &str,
) -> sqlx::Result<Option<CheckinRow>> {
    sqlx::query_as::<_, CheckinRow>(SQL_CHECKIN_EXACT)
        .bind(checkin_time)
        .bind(ticket_id)
        .fetch_optional(pool)
        .await
}

const SQL_CHECKIN_FUZZY_UNIQUE: &str = r#"
UPDATE registrations
SET status = 'checked_in', checkin_time = ?1
WHERE status = 'registered'
  AND instr(ticket_id, ?2) > 0
  AND (SELECT COUNT(*) FROM registrations WHERE instr(ticket_id, ?2) > 0) = 1
RETURNING ticket_id, first_name, last_name, checkin_time
"#;

/// Fuzzy fallback for partial or scan-degraded identifiers. Applies only
/// when the fragment selects exactly one registration overall; an ambiguous
/// fragment updates nothing.
pub async fn checkin_fuzzy_unique(
    pool: &SqlitePool,
    fragment: &str,
    checkin_time: &str,
) -> sqlx::Result<Option<CheckinRow>> {
    sqlx::query_as::<_, CheckinRow>(SQL_CHECKIN_FUZZY_UNIQUE)
        .bind(checkin_time)
        .bind(fragment)
        .fetch_optional(pool)
        .await
}

/// Which category flag an export is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    WorshipTeam,
    Volunteer,
}

/// Export predicate set. Dates are `YYYY-MM-DD`, inclusive on both ends.
#[derive(Debug, Clone, Default)]
pub struct ExportFilter {
    pub status: Option<TicketStatus>,
    pub category: Option<CategoryFilter>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

const SQL_EXPORT_BASE: &str = r#"
SELECT
  ticket_id,
  first_name,
  last_name,
  email,
  phone,
  emergency_contact,
  medical_notes,
  worship_team,
  volunteer,
  status,
  source_system,
  registration_time,
  checkin_time
FROM registrations
WHERE 1=1
"#;

pub async fn list_filtered(
    pool: &SqlitePool,
    filter: &ExportFilter,
) -> sqlx::Result<Vec<RegistrationRow>> {
    let mut sql = String::from(SQL_EXPORT_BASE);
    let mut args = SqliteArguments::default();

    if let Some(status) = filter.status {
        sql.push_str(" AND status = ?");
        args.add(status.as_str()).map_err(sqlx::Error::Encode)?;
    }
    match filter.category {
        Some(CategoryFilter::WorshipTeam) => sql.push_str(" AND worship_team = 1"),
        Some(CategoryFilter::Volunteer) => sql.push_str(" AND volunteer = 1"),
        None => {}
    }
    if let Some(from) = &filter.from_date {
        sql.push_str(" AND date(registration_time) >= date(?)");
        args.add(from.as_str()).map_err(sqlx::Error::Encode)?;
    }
    if let Some(to) = &filter.to_date {
        sql.push_str(" AND date(registration_time) <= date(?)");
        args.add(to.as_str()).map_err(sqlx::Error::Encode)?;
    }

    sql.push_str(" ORDER BY id ASC");

    sqlx::query_as_with::<_, RegistrationRow, _>(&sql, args)
        .fetch_all(pool)
        .await
}

const SQL_CLEAR_ALL: &str = "DELETE FROM registrations";

/// Administrative wipe. Sits outside the one-way status lattice; normal
/// operation never deletes.
pub async fn clear_all(pool: &SqlitePool) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_CLEAR_ALL).execute(pool).await?;
    Ok(res.rows_affected())
}
