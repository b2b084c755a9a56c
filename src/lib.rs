//! Event registration and check-in backup service for a single live event.
//!
//! Attendees register and receive a ticket identifier encoded as a
//! scannable code; at the door they are checked in by exact or partial
//! identifier lookup. The registry enforces identifier uniqueness and a
//! one-way `registered -> checked_in` transition that stays correct under
//! concurrent check-in stations.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod ticket;
pub mod web;
