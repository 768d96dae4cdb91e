//! Schema migrations for the local mirror.
//!
//! Applied migrations are recorded in the `log` table as
//! `operation = 'migration_applied'`, `target = <version>`.

use rusqlite::{Connection, OptionalExtension, Result, params};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_initial_schema",
        description: "Created events, registrations, facilitators, teams, event_feedback",
        sql: r#"
        CREATE TABLE IF NOT EXISTS facilitators (
            id            TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            email         TEXT NOT NULL DEFAULT '',
            organisation  TEXT NOT NULL DEFAULT '',
            bio           TEXT NOT NULL DEFAULT '',
            photo_url     TEXT,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS teams (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            role        TEXT NOT NULL DEFAULT '',
            email       TEXT NOT NULL DEFAULT '',
            bio         TEXT NOT NULL DEFAULT '',
            photo_url   TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS events (
            id              TEXT PRIMARY KEY,
            title           TEXT NOT NULL,
            description     TEXT NOT NULL DEFAULT '',
            event_type      TEXT NOT NULL DEFAULT 'general',
            sessions        TEXT NOT NULL DEFAULT '[]',
            location        TEXT NOT NULL DEFAULT '',
            country         TEXT NOT NULL DEFAULT '',
            region          TEXT NOT NULL DEFAULT '',
            status          TEXT NOT NULL DEFAULT 'upcoming'
                            CHECK(status IN ('upcoming','ongoing','completed')),
            conductor_kind  TEXT CHECK(conductor_kind IN ('facilitator','team')),
            conductor_id    TEXT,
            agenda          TEXT NOT NULL DEFAULT '[]',
            images          TEXT NOT NULL DEFAULT '[]',
            created_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS registrations (
            id          TEXT PRIMARY KEY,
            event_id    TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL,
            phone       TEXT NOT NULL DEFAULT '',
            country     TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL,
            UNIQUE(event_id, email)
        );

        CREATE TABLE IF NOT EXISTS event_feedback (
            id              TEXT PRIMARY KEY,
            event_id        TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            session_number  INTEGER,
            name            TEXT NOT NULL,
            email           TEXT NOT NULL,
            responses       TEXT NOT NULL DEFAULT '{}',
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_registrations_event ON registrations(event_id);
        CREATE INDEX IF NOT EXISTS idx_feedback_event ON event_feedback(event_id);
        "#,
    },
    Migration {
        version: "20250412_0002_outbox",
        description: "Created outbox table for locally queued mail",
        sql: r#"
        CREATE TABLE IF NOT EXISTS outbox (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at   TEXT NOT NULL,
            recipient    TEXT NOT NULL,
            subject      TEXT NOT NULL,
            body         TEXT NOT NULL,
            attachments  TEXT NOT NULL DEFAULT ''
        );
        "#,
    },
];

/// Ensure that the `log` table exists. It doubles as the migration ledger.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations, in order.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        conn.execute_batch(m.sql)?;

        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (?1, 'migration_applied', ?2, ?3)",
            params![chrono::Local::now().to_rfc3339(), m.version, m.description],
        )?;

        tracing::info!("Migration applied: {}", m.version);
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}
