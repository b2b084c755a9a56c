//! Ticket identifiers and the scannable artifacts handed to attendees.
//!
//! Identifier generation makes no uniqueness promise on its own; the
//! registry's UNIQUE constraint is the enforcement point, and registration
//! retries with a fresh id when a collision surfaces.

pub mod barcode;

use uuid::Uuid;

/// Suffix length of a ticket id (`PREFIX-XXXXXXXX`).
pub const SUFFIX_LEN: usize = 8;

/// `prefix-RANDOM8`: the first 8 hex characters of a v4 UUID, uppercased.
pub fn generate_ticket_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, hex[..SUFFIX_LEN].to_uppercase())
}

/// Where generated ticket links point and which prefix registration uses
/// when the caller does not pick one.
#[derive(Debug, Clone)]
pub struct TicketConfig {
    pub base_url: String,
    pub default_prefix: String,
}

impl TicketConfig {
    pub fn registration_url(&self, ticket_id: &str) -> String {
        format!("{}/?ticket={}", self.base_url.trim_end_matches('/'), ticket_id)
    }

    pub fn checkin_url(&self, ticket_id: &str) -> String {
        format!(
            "{}/checkin?ticket={}",
            self.base_url.trim_end_matches('/'),
            ticket_id
        )
    }
}
