//! Data access for finalized attendance logs.
//!
//! The aggregator only talks to `AttendanceRepository`; the default backend
//! keeps everything in memory, `db::repository::SqliteRepository` stores the
//! same data in SQLite.

use crate::errors::AppResult;
use crate::models::AttendanceLog;
use chrono::{Local, NaiveDate};

/// One line of the operation audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub trait AttendanceRepository {
    fn get(&self, id: &str) -> AppResult<Option<AttendanceLog>>;

    /// Every log, newest date first; same-date logs keep insertion order.
    fn list_all(&self) -> AppResult<Vec<AttendanceLog>>;

    fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<AttendanceLog>>;

    /// Replaces everything stored for `date` with `logs`.
    fn save_day(&mut self, date: NaiveDate, logs: &[AttendanceLog]) -> AppResult<()>;

    /// Returns whether a log was removed.
    fn delete(&mut self, id: &str) -> AppResult<bool>;

    /// Returns how many logs were removed.
    fn delete_by_date(&mut self, date: NaiveDate) -> AppResult<usize>;

    fn record_operation(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()>;

    fn audit_log(&self) -> AppResult<Vec<AuditEntry>>;
}

/// Vector-backed repository, seeded from fixtures at startup.
#[derive(Debug, Default, Clone)]
pub struct MemoryRepository {
    logs: Vec<AttendanceLog>,
    audit: Vec<AuditEntry>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logs(logs: Vec<AttendanceLog>) -> Self {
        Self {
            logs,
            audit: Vec::new(),
        }
    }
}

fn newest_first(mut logs: Vec<AttendanceLog>) -> Vec<AttendanceLog> {
    logs.sort_by(|a, b| b.date.cmp(&a.date));
    logs
}

impl AttendanceRepository for MemoryRepository {
    fn get(&self, id: &str) -> AppResult<Option<AttendanceLog>> {
        Ok(self.logs.iter().find(|l| l.id == id).cloned())
    }

    fn list_all(&self) -> AppResult<Vec<AttendanceLog>> {
        Ok(newest_first(self.logs.clone()))
    }

    fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<AttendanceLog>> {
        Ok(self.logs.iter().filter(|l| l.date == date).cloned().collect())
    }

    fn save_day(&mut self, date: NaiveDate, logs: &[AttendanceLog]) -> AppResult<()> {
        let mut next: Vec<AttendanceLog> = logs.to_vec();
        next.extend(self.logs.iter().filter(|l| l.date != date).cloned());
        self.logs = next;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> AppResult<bool> {
        let before = self.logs.len();
        self.logs = self.logs.iter().filter(|l| l.id != id).cloned().collect();
        Ok(self.logs.len() != before)
    }

    fn delete_by_date(&mut self, date: NaiveDate) -> AppResult<usize> {
        let before = self.logs.len();
        self.logs = self.logs.iter().filter(|l| l.date != date).cloned().collect();
        Ok(before - self.logs.len())
    }

    fn record_operation(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        let id = self.audit.len() as i64 + 1;
        self.audit.push(AuditEntry {
            id,
            date: Local::now().to_rfc3339(),
            operation: operation.to_string(),
            target: target.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn audit_log(&self) -> AppResult<Vec<AuditEntry>> {
        Ok(self.audit.clone())
    }
}
