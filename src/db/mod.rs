//! Local SQLite mirror of the hosted tables.

pub mod events;
pub mod feedback;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod outbox;
pub mod people;
pub mod pool;
pub mod registrations;
