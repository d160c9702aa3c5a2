use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceLog, AttendanceStatus, Proof, ProofKind, StudentProfile};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const LOG_COLUMNS: &str = "id, date, student_name, nim, status, note, proof_url, proof_kind, \
                           proof_name, avatar_color, initials, batch";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<AttendanceLog> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(1, AppError::InvalidDate(date_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(4, AppError::InvalidStatus(status_str.clone())))?;

    let proof_url: Option<String> = row.get("proof_url")?;
    let proof_kind: Option<String> = row.get("proof_kind")?;
    let proof = match proof_url {
        Some(url) => {
            let kind = match proof_kind.as_deref() {
                Some("pdf") => ProofKind::Pdf,
                _ => ProofKind::Image,
            };
            Some(Proof {
                url,
                kind,
                file_name: row.get("proof_name")?,
            })
        }
        None => None,
    };

    Ok(AttendanceLog {
        id: row.get("id")?,
        date,
        student_name: row.get("student_name")?,
        nim: row.get("nim")?,
        status,
        note: row.get("note")?,
        proof,
        avatar_color: row.get("avatar_color")?,
        initials: row.get("initials")?,
        batch: row.get("batch")?,
    })
}

fn proof_kind_str(kind: ProofKind) -> &'static str {
    match kind {
        ProofKind::Image => "image",
        ProofKind::Pdf => "pdf",
    }
}

pub fn insert_log(conn: &Connection, log: &AttendanceLog) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO attendance_logs ({LOG_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
        ),
        params![
            log.id,
            log.date_str(),
            log.student_name,
            log.nim,
            log.status.to_db_str(),
            log.note,
            log.proof.as_ref().map(|p| p.url.clone()),
            log.proof.as_ref().map(|p| proof_kind_str(p.kind)),
            log.proof.as_ref().and_then(|p| p.file_name.clone()),
            log.avatar_color,
            log.initials,
            log.batch,
        ],
    )?;
    Ok(())
}

fn collect_logs(conn: &Connection, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<AttendanceLog>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Newest date first; insertion order within a date.
pub fn load_all_logs(conn: &Connection) -> Result<Vec<AttendanceLog>> {
    collect_logs(
        conn,
        &format!("SELECT {LOG_COLUMNS} FROM attendance_logs ORDER BY date DESC, seq ASC"),
        &[],
    )
}

pub fn load_logs_by_date(conn: &Connection, date: &NaiveDate) -> Result<Vec<AttendanceLog>> {
    let date_str = date.format("%Y-%m-%d").to_string();
    collect_logs(
        conn,
        &format!("SELECT {LOG_COLUMNS} FROM attendance_logs WHERE date = ?1 ORDER BY seq ASC"),
        &[&date_str],
    )
}

pub fn load_log_by_id(conn: &Connection, id: &str) -> Result<Option<AttendanceLog>> {
    conn.query_row(
        &format!("SELECT {LOG_COLUMNS} FROM attendance_logs WHERE id = ?1"),
        [id],
        map_row,
    )
    .optional()
}

pub fn count_logs(conn: &Connection) -> Result<usize> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM attendance_logs", [], |row| row.get(0))?;
    Ok(n as usize)
}

/// Replaces every log of `date` inside one transaction.
pub fn replace_day(conn: &mut Connection, date: &NaiveDate, logs: &[AttendanceLog]) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute(
        "DELETE FROM attendance_logs WHERE date = ?1",
        [date.format("%Y-%m-%d").to_string()],
    )?;
    for log in logs {
        insert_log(&tx, log)?;
    }
    tx.commit()
}

pub fn delete_log(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM attendance_logs WHERE id = ?1", [id])
}

pub fn delete_logs_by_date(conn: &Connection, date: &NaiveDate) -> Result<usize> {
    conn.execute(
        "DELETE FROM attendance_logs WHERE date = ?1",
        [date.format("%Y-%m-%d").to_string()],
    )
}

// ---------------------------
// Students
// ---------------------------

pub fn load_students(conn: &Connection) -> AppResult<Vec<StudentProfile>> {
    let mut stmt = conn.prepare("SELECT profile FROM students ORDER BY position ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(serde_json::from_str(&r?)?);
    }
    Ok(out)
}

/// Rewrites the whole roster, keeping the slice order.
pub fn save_students(conn: &mut Connection, students: &[StudentProfile]) -> AppResult<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM students", [])?;
    for (position, s) in students.iter().enumerate() {
        tx.execute(
            "INSERT INTO students (id, position, nim, profile) VALUES (?1, ?2, ?3, ?4)",
            params![s.id, position as i64, s.nim, serde_json::to_string(s)?],
        )?;
    }
    tx.commit()?;
    Ok(())
}

pub fn count_students(conn: &Connection) -> Result<usize> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
    Ok(n as usize)
}
