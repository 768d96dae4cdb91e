use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};
use serde::Serialize;

/// A message queued in the local outbox instead of being sent.
#[derive(Debug, Clone, Serialize)]
pub struct OutboxEntry {
    pub id: i64,
    pub created_at: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub attachments: String,
}

pub fn push(
    conn: &Connection,
    recipient: &str,
    subject: &str,
    body: &str,
    attachments: &[String],
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO outbox (created_at, recipient, subject, body, attachments)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            Local::now().to_rfc3339(),
            recipient,
            subject,
            body,
            attachments.join(";")
        ],
    )?;
    Ok(())
}

pub fn load(conn: &Connection) -> AppResult<Vec<OutboxEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, created_at, recipient, subject, body, attachments FROM outbox ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(OutboxEntry {
            id: row.get(0)?,
            created_at: row.get(1)?,
            recipient: row.get(2)?,
            subject: row.get(3)?,
            body: row.get(4)?,
            attachments: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
