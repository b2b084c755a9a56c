use sqlx::SqlitePool;

/// Registrations are the only durable entity. The UNIQUE constraint on
/// `ticket_id` is the enforcement point for identifier uniqueness; inserts
/// racing on the same id cannot both succeed.
pub const SQL_CREATE_REGISTRATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS registrations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ticket_id TEXT NOT NULL UNIQUE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    emergency_contact TEXT,
    medical_notes TEXT,
    worship_team INTEGER NOT NULL DEFAULT 0,
    volunteer INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'registered',
    source_system TEXT NOT NULL DEFAULT 'manual',
    registration_time TEXT NOT NULL,
    checkin_time TEXT
)
"#;

const SQL_CREATE_STATUS_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_registrations_status ON registrations (status)
"#;

/// Idempotent schema initialization, run once at startup and by every test
/// against its throwaway database.
pub async fn init_db(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_REGISTRATIONS).execute(pool).await?;
    sqlx::query(SQL_CREATE_STATUS_INDEX).execute(pool).await?;
    Ok(())
}
