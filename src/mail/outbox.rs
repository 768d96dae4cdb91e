use super::{Mailer, OutgoingMail};
use crate::db::initialize::init_db;
use crate::db::outbox::{self, OutboxEntry};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Queues mail in the local `outbox` table instead of sending it.
pub struct OutboxMailer {
    pool: DbPool,
}

impl OutboxMailer {
    pub fn open(database: &str) -> AppResult<Self> {
        let pool = DbPool::new(database)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    /// Every queued message, oldest first.
    pub fn entries(&self) -> AppResult<Vec<OutboxEntry>> {
        outbox::load(&self.pool.conn)
    }
}

impl Mailer for OutboxMailer {
    fn send(&self, mail: &OutgoingMail) -> AppResult<()> {
        let names: Vec<String> = mail.attachments.iter().map(|a| a.filename.clone()).collect();
        outbox::push(&self.pool.conn, &mail.to, &mail.subject, &mail.text, &names)
    }
}
