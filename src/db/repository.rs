use crate::core::repository::{AttendanceRepository, AuditEntry};
use crate::db::initialize::init_db;
use crate::db::log::{load_log, ttlog};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{AttendanceLog, StudentProfile};
use chrono::NaiveDate;

/// Attendance logs, roster and audit trail kept in one SQLite file.
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    /// Opens `path` and brings its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn log_count(&self) -> AppResult<usize> {
        Ok(queries::count_logs(&self.pool.conn)?)
    }

    pub fn student_count(&self) -> AppResult<usize> {
        Ok(queries::count_students(&self.pool.conn)?)
    }

    pub fn load_students(&self) -> AppResult<Vec<StudentProfile>> {
        queries::load_students(&self.pool.conn)
    }

    pub fn save_students(&mut self, students: &[StudentProfile]) -> AppResult<()> {
        queries::save_students(&mut self.pool.conn, students)
    }

    /// Imports seed data into empty tables. Returns `(students, logs)`
    /// imported.
    pub fn seed_if_empty(
        &mut self,
        students: &[StudentProfile],
        logs: &[AttendanceLog],
    ) -> AppResult<(usize, usize)> {
        let mut imported = (0, 0);

        if self.student_count()? == 0 && !students.is_empty() {
            self.save_students(students)?;
            imported.0 = students.len();
        }

        if self.log_count()? == 0 && !logs.is_empty() {
            let mut by_date: Vec<NaiveDate> = logs.iter().map(|l| l.date).collect();
            by_date.sort();
            by_date.dedup();
            for date in by_date {
                let day: Vec<AttendanceLog> =
                    logs.iter().filter(|l| l.date == date).cloned().collect();
                self.save_day(date, &day)?;
            }
            imported.1 = logs.len();
        }

        if imported != (0, 0) {
            self.record_operation(
                "seed",
                "fixtures",
                &format!("{} students, {} attendance logs", imported.0, imported.1),
            )?;
        }
        Ok(imported)
    }
}

impl AttendanceRepository for SqliteRepository {
    fn get(&self, id: &str) -> AppResult<Option<AttendanceLog>> {
        Ok(queries::load_log_by_id(&self.pool.conn, id)?)
    }

    fn list_all(&self) -> AppResult<Vec<AttendanceLog>> {
        Ok(queries::load_all_logs(&self.pool.conn)?)
    }

    fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<AttendanceLog>> {
        Ok(queries::load_logs_by_date(&self.pool.conn, &date)?)
    }

    fn save_day(&mut self, date: NaiveDate, logs: &[AttendanceLog]) -> AppResult<()> {
        self.pool
            .with_conn(|conn| queries::replace_day(conn, &date, logs))?;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> AppResult<bool> {
        Ok(queries::delete_log(&self.pool.conn, id)? > 0)
    }

    fn delete_by_date(&mut self, date: NaiveDate) -> AppResult<usize> {
        Ok(queries::delete_logs_by_date(&self.pool.conn, &date)?)
    }

    fn record_operation(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.pool.conn, operation, target, message)
    }

    fn audit_log(&self) -> AppResult<Vec<AuditEntry>> {
        load_log(&self.pool.conn)
    }
}
