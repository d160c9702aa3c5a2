use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
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

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// `seq` keeps insertion order among logs of the same date.
fn create_attendance_logs_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_logs (
            seq          INTEGER PRIMARY KEY AUTOINCREMENT,
            id           TEXT NOT NULL UNIQUE,
            date         TEXT NOT NULL,
            student_name TEXT NOT NULL,
            nim          TEXT NOT NULL,
            status       TEXT NOT NULL CHECK(status IN ('H','I','S','A')),
            note         TEXT NOT NULL DEFAULT '',
            proof_url    TEXT,
            proof_kind   TEXT CHECK(proof_kind IS NULL OR proof_kind IN ('image','pdf')),
            proof_name   TEXT,
            avatar_color TEXT NOT NULL DEFAULT 'blue',
            initials     TEXT NOT NULL DEFAULT '',
            batch        TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

/// Student profiles are stored whole, as JSON, in roster order.
fn create_students_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id        TEXT PRIMARY KEY,
            position  INTEGER NOT NULL,
            nim       TEXT NOT NULL UNIQUE,
            profile   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn migrate_add_date_indexes(conn: &Connection) -> Result<()> {
    let version = "20231024_0001_attendance_date_index";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance_logs(date);
        CREATE INDEX IF NOT EXISTS idx_attendance_date_nim ON attendance_logs(date, nim);
        "#,
    )?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added date indexes to attendance_logs')",
        [version],
    )?;

    success(format!("Migration applied: {}", version));
    Ok(())
}

/// Public entry point: run all pending migrations. Safe to call on every
/// start.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "attendance_logs")? {
        create_attendance_logs_table(conn)?;
    }
    if !table_exists(conn, "students")? {
        create_students_table(conn)?;
    }

    migrate_add_date_indexes(conn)?;
    Ok(())
}
