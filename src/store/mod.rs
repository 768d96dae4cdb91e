//! Persistence seam.
//!
//! The hosted backend owns the data; [`Store`] is everything this crate
//! asks of it. `SqliteStore` keeps a local mirror (offline use and tests),
//! `RestStore` talks to the hosted REST tables.

pub mod rest;
pub mod sqlite;

use crate::config::{Backend, Config};
use crate::db::log::LogEntry;
use crate::errors::{AppError, AppResult};
use crate::models::{
    ConductorKind, ConductorRef, Event, EventStatus, Facilitator, Feedback, Registration,
    TeamMember,
};

pub use rest::RestStore;
pub use sqlite::SqliteStore;

pub trait Store: Send {
    fn backend_name(&self) -> &'static str;

    // events
    fn insert_event(&self, event: &Event) -> AppResult<()>;
    fn get_event(&self, id: &str) -> AppResult<Event>;
    fn list_events(&self) -> AppResult<Vec<Event>>;
    fn update_event_status(&self, id: &str, status: EventStatus) -> AppResult<()>;
    fn delete_event(&self, id: &str) -> AppResult<()>;

    // registrations
    fn insert_registration(&self, registration: &Registration) -> AppResult<()>;
    fn list_registrations(&self, event_id: Option<&str>) -> AppResult<Vec<Registration>>;
    fn delete_registration(&self, id: &str) -> AppResult<()>;

    // conductors
    fn insert_facilitator(&self, facilitator: &Facilitator) -> AppResult<()>;
    fn list_facilitators(&self) -> AppResult<Vec<Facilitator>>;
    fn insert_team_member(&self, member: &TeamMember) -> AppResult<()>;
    fn list_team(&self) -> AppResult<Vec<TeamMember>>;

    // feedback
    fn insert_feedback(&self, feedback: &Feedback) -> AppResult<()>;
    fn list_feedback(&self, event_id: &str) -> AppResult<Vec<Feedback>>;

    /// Record an audit line. Backends without an audit table only trace it.
    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        tracing::info!(op = operation, subject = target, "{message}");
        Ok(())
    }

    fn load_log(&self) -> AppResult<Vec<LogEntry>> {
        Err(AppError::Unsupported {
            backend: self.backend_name(),
            operation: "log",
        })
    }
}

/// Open the backend selected in the configuration.
pub fn open_store(cfg: &Config) -> AppResult<Box<dyn Store>> {
    match cfg.backend {
        Backend::Sqlite => Ok(Box::new(SqliteStore::open(&cfg.database)?)),
        Backend::Rest => {
            let rest = cfg
                .rest
                .as_ref()
                .ok_or_else(|| AppError::Config("backend 'rest' needs a 'rest' section".into()))?;
            Ok(Box::new(RestStore::new(&rest.url, rest.api_key.as_deref())?))
        }
    }
}

/// Display name of an event's conductor, if it can be resolved.
pub fn conductor_name(store: &dyn Store, conductor: &ConductorRef) -> AppResult<Option<String>> {
    let name = match conductor.kind {
        ConductorKind::Facilitator => store
            .list_facilitators()?
            .into_iter()
            .find(|f| f.id == conductor.id)
            .map(|f| f.name),
        ConductorKind::Team => store
            .list_team()?
            .into_iter()
            .find(|t| t.id == conductor.id)
            .map(|t| t.name),
    };
    Ok(name)
}

/// Check that a conductor reference points at an existing person.
pub fn ensure_conductor(store: &dyn Store, conductor: &ConductorRef) -> AppResult<()> {
    match conductor_name(store, conductor)? {
        Some(_) => Ok(()),
        None => Err(AppError::not_found(
            match conductor.kind {
                ConductorKind::Facilitator => "Facilitator",
                ConductorKind::Team => "Team member",
            },
            conductor.id.clone(),
        )),
    }
}
