use super::Store;
use crate::db::initialize::init_db;
use crate::db::log::LogEntry;
use crate::db::pool::DbPool;
use crate::db::{events, feedback, log, people, registrations};
use crate::errors::AppResult;
use crate::models::{Event, EventStatus, Facilitator, Feedback, Registration, TeamMember};

/// Local SQLite backend. Migrations run on open.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Store for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn insert_event(&self, event: &Event) -> AppResult<()> {
        events::insert_event(&self.pool.conn, event)
    }

    fn get_event(&self, id: &str) -> AppResult<Event> {
        events::get_event(&self.pool.conn, id)
    }

    fn list_events(&self) -> AppResult<Vec<Event>> {
        events::list_events(&self.pool.conn)
    }

    fn update_event_status(&self, id: &str, status: EventStatus) -> AppResult<()> {
        events::update_status(&self.pool.conn, id, status)
    }

    fn delete_event(&self, id: &str) -> AppResult<()> {
        events::delete_event(&self.pool.conn, id)
    }

    fn insert_registration(&self, registration: &Registration) -> AppResult<()> {
        registrations::insert_registration(&self.pool.conn, registration)
    }

    fn list_registrations(&self, event_id: Option<&str>) -> AppResult<Vec<Registration>> {
        registrations::list_registrations(&self.pool.conn, event_id)
    }

    fn delete_registration(&self, id: &str) -> AppResult<()> {
        registrations::delete_registration(&self.pool.conn, id)
    }

    fn insert_facilitator(&self, facilitator: &Facilitator) -> AppResult<()> {
        people::insert_facilitator(&self.pool.conn, facilitator)
    }

    fn list_facilitators(&self) -> AppResult<Vec<Facilitator>> {
        people::list_facilitators(&self.pool.conn)
    }

    fn insert_team_member(&self, member: &TeamMember) -> AppResult<()> {
        people::insert_team_member(&self.pool.conn, member)
    }

    fn list_team(&self) -> AppResult<Vec<TeamMember>> {
        people::list_team(&self.pool.conn)
    }

    fn insert_feedback(&self, fb: &Feedback) -> AppResult<()> {
        feedback::insert_feedback(&self.pool.conn, fb)
    }

    fn list_feedback(&self, event_id: &str) -> AppResult<Vec<Feedback>> {
        feedback::list_feedback(&self.pool.conn, event_id)
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        log::audit(&self.pool.conn, operation, target, message)
    }

    fn load_log(&self) -> AppResult<Vec<LogEntry>> {
        log::load_log(&self.pool.conn)
    }
}
