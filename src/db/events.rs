use crate::errors::{AppError, AppResult};
use crate::models::{ConductorKind, Event, EventStatus, EventType};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::de::DeserializeOwned;

const COLUMNS: &str = "id, title, description, event_type, sessions, location, country, region,
     status, conductor_kind, conductor_id, agenda, images, created_at";

/// Decode a JSON text column.
pub(crate) fn json_column<T: DeserializeOwned>(row: &Row, col: &str) -> rusqlite::Result<T> {
    let raw: String = row.get(col)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
}

fn conversion(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> rusqlite::Result<Event> {
    let type_str: String = row.get("event_type")?;
    let event_type = EventType::from_db_str(&type_str)
        .ok_or_else(|| conversion(AppError::InvalidEventType(type_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = EventStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion(AppError::InvalidStatus(status_str.clone())))?;

    let conductor_kind = row
        .get::<_, Option<String>>("conductor_kind")?
        .as_deref()
        .and_then(ConductorKind::from_db_str);

    Ok(Event {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        event_type,
        sessions: json_column(row, "sessions")?,
        location: row.get("location")?,
        country: row.get("country")?,
        region: row.get("region")?,
        status,
        conductor_kind,
        conductor_id: row.get("conductor_id")?,
        agenda: json_column(row, "agenda")?,
        images: json_column(row, "images")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_event(conn: &Connection, ev: &Event) -> AppResult<()> {
    conn.execute(
        "INSERT INTO events (id, title, description, event_type, sessions, location, country, region,
                             status, conductor_kind, conductor_id, agenda, images, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            ev.id,
            ev.title,
            ev.description,
            ev.event_type.as_str(),
            serde_json::to_string(&ev.sessions)?,
            ev.location,
            ev.country,
            ev.region,
            ev.status.as_str(),
            ev.conductor_kind.map(|k| k.as_str()),
            ev.conductor_id,
            serde_json::to_string(&ev.agenda)?,
            serde_json::to_string(&ev.images)?,
            ev.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_event(conn: &Connection, id: &str) -> AppResult<Event> {
    let sql = format!("SELECT {COLUMNS} FROM events WHERE id = ?1");
    conn.query_row(&sql, [id], map_row)
        .optional()?
        .ok_or_else(|| AppError::not_found("Event", id))
}

pub fn list_events(conn: &Connection) -> AppResult<Vec<Event>> {
    let sql = format!("SELECT {COLUMNS} FROM events ORDER BY created_at ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_status(conn: &Connection, id: &str, status: EventStatus) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE events SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    if changed == 0 {
        return Err(AppError::not_found("Event", id));
    }
    Ok(())
}

/// Delete an event; registrations and feedback go with it (ON DELETE CASCADE).
pub fn delete_event(conn: &Connection, id: &str) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM events WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::not_found("Event", id));
    }
    Ok(())
}
