use crate::db::events::json_column;
use crate::errors::AppResult;
use crate::models::Feedback;
use rusqlite::{Connection, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Feedback> {
    Ok(Feedback {
        id: row.get("id")?,
        event_id: row.get("event_id")?,
        session_number: row.get("session_number")?,
        name: row.get("name")?,
        email: row.get("email")?,
        responses: json_column(row, "responses")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_feedback(conn: &Connection, f: &Feedback) -> AppResult<()> {
    conn.execute(
        "INSERT INTO event_feedback (id, event_id, session_number, name, email, responses, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            f.id,
            f.event_id,
            f.session_number,
            f.name,
            f.email,
            serde_json::to_string(&f.responses)?,
            f.created_at
        ],
    )?;
    Ok(())
}

pub fn list_feedback(conn: &Connection, event_id: &str) -> AppResult<Vec<Feedback>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM event_feedback WHERE event_id = ?1 ORDER BY created_at ASC",
    )?;

    let mut out = Vec::new();
    for r in stmt.query_map([event_id], map_row)? {
        out.push(r?);
    }
    Ok(out)
}
