use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use eventdesk::database::registrations_repo::{self, NewRegistration};
use eventdesk::database::schema;
use eventdesk::services::registration_service::RegistrationInput;
use eventdesk::ticket::TicketConfig;

/// One shared in-memory connection: a pool of more would hand each
/// connection its own empty database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    schema::init_db(&pool).await.expect("schema initialization");
    pool
}

pub fn ticket_config() -> TicketConfig {
    TicketConfig {
        base_url: "https://example.org".to_string(),
        default_prefix: "RWT".to_string(),
    }
}

pub fn input(first: &str, last: &str, email: &str) -> RegistrationInput {
    RegistrationInput {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone: None,
        emergency_contact: None,
        medical_notes: None,
        worship_team: false,
        volunteer: false,
        source_system: None,
    }
}

/// Insert directly at the repo layer with a chosen id and timestamp,
/// bypassing generation. Used to force collisions and date-range fixtures.
pub async fn insert_with_id(
    pool: &SqlitePool,
    ticket_id: &str,
    first: &str,
    last: &str,
    registration_time: &str,
) -> sqlx::Result<u64> {
    registrations_repo::insert(
        pool,
        NewRegistration {
            ticket_id,
            first_name: first,
            last_name: last,
            email: "fixture@example.org",
            phone: None,
            emergency_contact: None,
            medical_notes: None,
            worship_team: false,
            volunteer: false,
            source_system: "manual",
            registration_time,
        },
    )
    .await
}
