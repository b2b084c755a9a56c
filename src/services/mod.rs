pub mod attendee_service;
pub mod checkin_service;
pub mod export_service;
pub mod registration_service;
pub mod stats_service;
pub mod ticket_service;
