use crate::errors::{AppError, AppResult};
use crate::models::Registration;
use rusqlite::{Connection, ErrorCode, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Registration> {
    Ok(Registration {
        id: row.get("id")?,
        event_id: row.get("event_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        country: row.get("country")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_registration(conn: &Connection, r: &Registration) -> AppResult<()> {
    let res = conn.execute(
        "INSERT INTO registrations (id, event_id, name, email, phone, country, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            r.id,
            r.event_id,
            r.name,
            r.email,
            r.phone,
            r.country,
            r.created_at
        ],
    );

    match res {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, msg))
            if e.code == ErrorCode::ConstraintViolation
                && msg.as_deref().is_some_and(|m| m.contains("UNIQUE")) =>
        {
            Err(AppError::DuplicateRegistration(r.email.clone()))
        }
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Err(AppError::not_found("Event", r.event_id.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Registrations of one event, or of every event, oldest first.
pub fn list_registrations(conn: &Connection, event_id: Option<&str>) -> AppResult<Vec<Registration>> {
    let mut out = Vec::new();

    match event_id {
        Some(id) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM registrations WHERE event_id = ?1 ORDER BY created_at ASC",
            )?;
            for r in stmt.query_map([id], map_row)? {
                out.push(r?);
            }
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT * FROM registrations ORDER BY event_id, created_at ASC")?;
            for r in stmt.query_map([], map_row)? {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn delete_registration(conn: &Connection, id: &str) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM registrations WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::not_found("Registration", id));
    }
    Ok(())
}
