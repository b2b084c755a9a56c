use chrono::Utc;

/// One row of the `registrations` table. Timestamps are stored as
/// `YYYY-MM-DD HH:MM:SS` UTC text so SQLite's `date()`/`strftime()` can
/// bucket them directly.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct RegistrationRow {
    pub ticket_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_notes: Option<String>,
    pub worship_team: i64,
    pub volunteer: i64,
    pub status: String,
    pub source_system: String,
    pub registration_time: String,
    pub checkin_time: Option<String>,
}

impl RegistrationRow {
    pub fn status(&self) -> Option<TicketStatus> {
        TicketStatus::parse(&self.status)
    }
}

/// Lifecycle of a ticket. `Registered` moves to `CheckedIn` exactly once
/// and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Registered,
    CheckedIn,
}

impl TicketStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Registered => "registered",
            TicketStatus::CheckedIn => "checked_in",
        }
    }

    pub fn parse(raw: &str) -> Option<TicketStatus> {
        match raw {
            "registered" => Some(TicketStatus::Registered),
            "checked_in" => Some(TicketStatus::CheckedIn),
            _ => None,
        }
    }
}

/// Current instant in the stored timestamp format.
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
