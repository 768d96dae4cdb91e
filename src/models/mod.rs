//! Domain records exchanged with the hosted backend.
//! Field names match the remote column names so the same structs serialize
//! to the REST tables and to the local SQLite mirror.

pub mod conductor;
pub mod event;
pub mod event_status;
pub mod event_type;
pub mod feedback;
pub mod people;
pub mod registration;
pub mod session;

pub use conductor::{ConductorKind, ConductorRef};
pub use event::Event;
pub use event_status::EventStatus;
pub use event_type::EventType;
pub use feedback::{Answer, Feedback};
pub use people::{Facilitator, TeamMember};
pub use registration::Registration;
pub use session::Session;

use chrono::Local;
use serde::{Deserialize, Deserializer};

/// Fresh record id (UUID v4, hyphenated).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Creation timestamp in ISO 8601, local offset.
pub fn now_rfc3339() -> String {
    Local::now().to_rfc3339()
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
