use sqlx::SqlitePool;

use crate::database::registrations_repo;
use crate::ticket::{self, barcode::BarcodeError, TicketConfig};

/// Upper bound on one pre-print batch, matching what a check-in desk can
/// reasonably print in one go.
pub const MAX_BATCH: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error("batch size must be between 1 and {MAX_BATCH}")]
    BatchSize(usize),
    #[error("ticket prefix must be alphabetic")]
    InvalidPrefix(String),
    #[error("unknown ticket {0:?}")]
    UnknownTicket(String),
    #[error(transparent)]
    Barcode(#[from] BarcodeError),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct GeneratedTicket {
    pub ticket_id: String,
    pub registration_url: String,
}

/// Pre-generate identifiers for printed ticket stock. Nothing is inserted;
/// these ids only enter the registry if someone registers with them.
pub fn generate_batch(
    tickets: &TicketConfig,
    prefix: Option<&str>,
    count: usize,
) -> Result<Vec<GeneratedTicket>, TicketError> {
    if count == 0 || count > MAX_BATCH {
        return Err(TicketError::BatchSize(count));
    }
    let prefix = match prefix.map(str::trim).filter(|p| !p.is_empty()) {
        None => tickets.default_prefix.clone(),
        Some(raw) => {
            if !raw.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(TicketError::InvalidPrefix(raw.to_string()));
            }
            raw.to_uppercase()
        }
    };

    Ok((0..count)
        .map(|_| {
            let ticket_id = ticket::generate_ticket_id(&prefix);
            GeneratedTicket {
                registration_url: tickets.registration_url(&ticket_id),
                ticket_id,
            }
        })
        .collect())
}

/// Scannable PNG for a registered ticket. Unknown identifiers 404 rather
/// than producing an artifact nobody can check in.
pub async fn barcode_png(pool: &SqlitePool, ticket_id: &str) -> Result<Vec<u8>, TicketError> {
    let Some(row) = registrations_repo::find_exact(pool, ticket_id).await? else {
        return Err(TicketError::UnknownTicket(ticket_id.to_string()));
    };
    Ok(ticket::barcode::render_png(&row.ticket_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TicketConfig {
        TicketConfig {
            base_url: "https://example.org".to_string(),
            default_prefix: "RWT".to_string(),
        }
    }

    #[test]
    fn batch_respects_bounds() {
        assert!(matches!(
            generate_batch(&config(), None, 0),
            Err(TicketError::BatchSize(0))
        ));
        assert!(matches!(
            generate_batch(&config(), None, MAX_BATCH + 1),
            Err(TicketError::BatchSize(_))
        ));
        assert_eq!(generate_batch(&config(), None, 5).unwrap().len(), 5);
    }

    #[test]
    fn batch_uses_requested_prefix_uppercased() {
        let batch = generate_batch(&config(), Some("vip"), 2).unwrap();
        assert!(batch.iter().all(|t| t.ticket_id.starts_with("VIP-")));
        assert!(batch[0]
            .registration_url
            .starts_with("https://example.org/?ticket=VIP-"));
    }

    #[test]
    fn numeric_prefix_is_rejected() {
        assert!(matches!(
            generate_batch(&config(), Some("R2D2"), 1),
            Err(TicketError::InvalidPrefix(_))
        ));
    }
}
