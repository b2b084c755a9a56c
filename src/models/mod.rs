pub mod registration;

pub use registration::{now_timestamp, RegistrationRow, TicketStatus};
