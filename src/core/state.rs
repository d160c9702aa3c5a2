use crate::config::Config;
use crate::core::attendance::{
    self, AttendanceSheet, Confirmation, DeleteOutcome, HistoryQuery, SaveOutcome,
};
use crate::core::repository::AttendanceRepository;
use crate::core::roster::{self, RosterStore};
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceLog, RecordDraft, StudentProfile, StudentRecord};
use chrono::NaiveDate;

/// Single owner of everything a session mutates: the roster, the current
/// selection, the daily sheet and the attendance log storage.
pub struct AppState {
    config: Config,
    roster: RosterStore,
    selected: Option<String>,
    sheet: AttendanceSheet,
    repo: Box<dyn AttendanceRepository>,
}

impl AppState {
    pub fn new(
        config: Config,
        roster: RosterStore,
        repo: Box<dyn AttendanceRepository>,
        today: NaiveDate,
    ) -> Self {
        let sheet = AttendanceSheet::open(roster.all(), today);
        Self {
            config,
            roster,
            selected: None,
            sheet,
            repo,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    pub fn students(&self) -> &[StudentProfile] {
        self.roster.all()
    }

    // ---------------------------
    // Roster
    // ---------------------------

    /// Validates and inserts a new profile.
    pub fn add_student(&mut self, profile: StudentProfile) -> AppResult<()> {
        roster::ensure_valid(&profile)?;
        self.roster.add(profile)
    }

    pub fn update_student(&mut self, id: &str, profile: StudentProfile) -> AppResult<()> {
        roster::ensure_valid(&profile)?;
        self.roster.update(id, profile)
    }

    /// Removes a student; clears the selection when it pointed at them.
    pub fn remove_student(&mut self, id: &str) -> AppResult<StudentProfile> {
        let removed = self.roster.remove(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(removed)
    }

    pub fn add_record(&mut self, student_id: &str, draft: RecordDraft) -> AppResult<String> {
        self.roster.add_record_for(student_id, draft)
    }

    pub fn delete_record(&mut self, student_id: &str, record_id: &str) -> AppResult<StudentRecord> {
        self.roster.delete_record_for(student_id, record_id)
    }

    pub fn select(&mut self, id: &str) -> AppResult<&StudentProfile> {
        let student = self
            .roster
            .find_by_id(id)
            .ok_or_else(|| AppError::StudentNotFound(id.to_string()))?;
        self.selected = Some(student.id.clone());
        Ok(student)
    }

    pub fn selected(&self) -> Option<&StudentProfile> {
        self.selected
            .as_deref()
            .and_then(|id| self.roster.find_by_id(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ---------------------------
    // Attendance sheet
    // ---------------------------

    pub fn sheet(&self) -> &AttendanceSheet {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut AttendanceSheet {
        &mut self.sheet
    }

    /// Fresh input sheet for `date` over the current roster.
    pub fn open_sheet(&mut self, date: NaiveDate) {
        self.sheet.reset(self.roster.all(), date);
    }

    /// Edit mode for a stored day.
    pub fn load_attendance_for_date(&mut self, date: NaiveDate) -> AppResult<usize> {
        self.sheet
            .load_for_date(self.repo.as_ref(), self.roster.all(), date)
    }

    pub fn save_attendance(&mut self) -> AppResult<SaveOutcome> {
        self.sheet.save(self.repo.as_mut(), self.config.proof_policy)
    }

    // ---------------------------
    // History
    // ---------------------------

    pub fn repo(&self) -> &dyn AttendanceRepository {
        self.repo.as_ref()
    }

    pub fn history(&self, query: &HistoryQuery) -> AppResult<Vec<AttendanceLog>> {
        let logs = self.repo.list_all()?;
        Ok(attendance::filter_history(&logs, query))
    }

    pub fn delete_log(&mut self, id: &str, confirmation: Confirmation) -> AppResult<DeleteOutcome> {
        attendance::delete_single(self.repo.as_mut(), id, confirmation)
    }

    pub fn delete_logs_by_date(
        &mut self,
        date: NaiveDate,
        confirmation: Confirmation,
    ) -> AppResult<DeleteOutcome> {
        attendance::delete_by_date(self.repo.as_mut(), date, confirmation)
    }
}
