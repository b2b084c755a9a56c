use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::database::registrations_repo::{self, NewRegistration};
use crate::models::now_timestamp;
use crate::ticket::{self, TicketConfig};

/// How many fresh identifiers to try before giving up. Collisions need two
/// equal 8-char random suffixes, so a second attempt almost always lands.
const ID_ALLOCATION_ATTEMPTS: u32 = 3;

pub const DEFAULT_SOURCE: &str = "manual";

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("required field missing: {0}")]
    MissingField(&'static str),
    #[error("could not allocate a unique ticket id")]
    IdExhausted,
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegistrationInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub medical_notes: Option<String>,
    #[serde(default)]
    pub worship_team: bool,
    #[serde(default)]
    pub volunteer: bool,
    #[serde(default)]
    pub source_system: Option<String>,
}

/// What a successful registration hands back to the caller: the stored
/// identity plus the links a rendering layer turns into a scannable code.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RegistrationReceipt {
    pub ticket_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub registration_time: String,
    pub registration_url: String,
    pub checkin_url: String,
}

pub async fn register(
    pool: &SqlitePool,
    tickets: &TicketConfig,
    input: RegistrationInput,
) -> Result<RegistrationReceipt, RegistrationError> {
    let prefix = tickets.default_prefix.clone();
    register_with(pool, tickets, input, || ticket::generate_ticket_id(&prefix)).await
}

/// Registration with an injected identifier source. The registry's UNIQUE
/// constraint stays the enforcement point; on a collision the insert is
/// retried with the next generated id, bounded.
pub async fn register_with(
    pool: &SqlitePool,
    tickets: &TicketConfig,
    input: RegistrationInput,
    mut next_id: impl FnMut() -> String,
) -> Result<RegistrationReceipt, RegistrationError> {
    let first_name = required(&input.first_name, "first_name")?;
    let last_name = required(&input.last_name, "last_name")?;
    let email = required(&input.email, "email")?;

    let phone = optional(input.phone.as_deref());
    let emergency_contact = optional(input.emergency_contact.as_deref());
    let medical_notes = optional(input.medical_notes.as_deref());
    let source_system = optional(input.source_system.as_deref()).unwrap_or(DEFAULT_SOURCE);

    let registration_time = now_timestamp();

    for attempt in 0..ID_ALLOCATION_ATTEMPTS {
        let ticket_id = next_id();
        let new = NewRegistration {
            ticket_id: &ticket_id,
            first_name,
            last_name,
            email,
            phone,
            emergency_contact,
            medical_notes,
            worship_team: input.worship_team,
            volunteer: input.volunteer,
            source_system,
            registration_time: &registration_time,
        };
        match registrations_repo::insert(pool, new).await {
            Ok(_) => {
                info!(%ticket_id, source_system, "registration stored");
                return Ok(RegistrationReceipt {
                    registration_url: tickets.registration_url(&ticket_id),
                    checkin_url: tickets.checkin_url(&ticket_id),
                    ticket_id,
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    email: email.to_string(),
                    registration_time: registration_time.clone(),
                });
            }
            Err(e) if is_unique_violation(&e) => {
                warn!(%ticket_id, attempt, "ticket id collision, regenerating");
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(RegistrationError::IdExhausted)
}

fn required<'a>(
    value: &'a str,
    field: &'static str,
) -> Result<&'a str, RegistrationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(RegistrationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_whitespace_only() {
        assert!(matches!(
            required("   ", "email"),
            Err(RegistrationError::MissingField("email"))
        ));
        assert_eq!(required(" Jo ", "first_name").unwrap(), "Jo");
    }

    #[test]
    fn optional_drops_empty_strings() {
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(None), None);
        assert_eq!(optional(Some(" 555 ")), Some("555"));
    }
}
