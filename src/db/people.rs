use crate::errors::AppResult;
use crate::models::{Facilitator, TeamMember};
use rusqlite::{Connection, Row, params};

fn map_facilitator(row: &Row) -> rusqlite::Result<Facilitator> {
    Ok(Facilitator {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        organisation: row.get("organisation")?,
        bio: row.get("bio")?,
        photo_url: row.get("photo_url")?,
        created_at: row.get("created_at")?,
    })
}

fn map_team_member(row: &Row) -> rusqlite::Result<TeamMember> {
    Ok(TeamMember {
        id: row.get("id")?,
        name: row.get("name")?,
        role: row.get("role")?,
        email: row.get("email")?,
        bio: row.get("bio")?,
        photo_url: row.get("photo_url")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_facilitator(conn: &Connection, f: &Facilitator) -> AppResult<()> {
    conn.execute(
        "INSERT INTO facilitators (id, name, email, organisation, bio, photo_url, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            f.id,
            f.name,
            f.email,
            f.organisation,
            f.bio,
            f.photo_url,
            f.created_at
        ],
    )?;
    Ok(())
}

pub fn list_facilitators(conn: &Connection) -> AppResult<Vec<Facilitator>> {
    let mut stmt = conn.prepare("SELECT * FROM facilitators ORDER BY name ASC")?;
    let mut out = Vec::new();
    for r in stmt.query_map([], map_facilitator)? {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_team_member(conn: &Connection, t: &TeamMember) -> AppResult<()> {
    conn.execute(
        "INSERT INTO teams (id, name, role, email, bio, photo_url, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![t.id, t.name, t.role, t.email, t.bio, t.photo_url, t.created_at],
    )?;
    Ok(())
}

pub fn list_team(conn: &Connection) -> AppResult<Vec<TeamMember>> {
    let mut stmt = conn.prepare("SELECT * FROM teams ORDER BY name ASC")?;
    let mut out = Vec::new();
    for r in stmt.query_map([], map_team_member)? {
        out.push(r?);
    }
    Ok(out)
}
