use crate::errors::{AppError, AppResult};
use crate::models::{RecordDraft, StudentProfile, StudentRecord};
use std::collections::HashSet;
use uuid::Uuid;

/// Fresh id for a new student profile.
pub fn new_student_id() -> String {
    format!("ST-{}", Uuid::new_v4())
}

/// In-memory list of student profiles, newest-added first.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    students: Vec<StudentProfile>,
}

impl RosterStore {
    /// Builds a store from loaded profiles. Ids and NIMs must be unique,
    /// the same as for `add`.
    pub fn try_from_vec(students: Vec<StudentProfile>) -> AppResult<Self> {
        ensure_unique(&students)?;
        Ok(Self { students })
    }

    pub fn all(&self) -> &[StudentProfile] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&StudentProfile> {
        self.students.iter().find(|s| s.id == id)
    }

    fn find_by_id_mut(&mut self, id: &str) -> AppResult<&mut StudentProfile> {
        self.students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::StudentNotFound(id.to_string()))
    }

    /// Prepends a record to the student's file; see [`add_record`].
    pub fn add_record_for(&mut self, id: &str, draft: RecordDraft) -> AppResult<String> {
        add_record(self.find_by_id_mut(id)?, draft)
    }

    pub fn delete_record_for(&mut self, id: &str, record_id: &str) -> AppResult<StudentRecord> {
        delete_record(self.find_by_id_mut(id)?, record_id)
    }

    pub fn find_by_nim(&self, nim: &str) -> Option<&StudentProfile> {
        self.students.iter().find(|s| s.nim == nim)
    }

    /// Inserts at the front. The id and the NIM must both be new.
    pub fn add(&mut self, profile: StudentProfile) -> AppResult<()> {
        if self.find_by_id(&profile.id).is_some() {
            return Err(AppError::DuplicateId(profile.id));
        }
        if self.find_by_nim(&profile.nim).is_some() {
            return Err(AppError::DuplicateNim(profile.nim));
        }
        self.students.insert(0, profile);
        Ok(())
    }

    /// Replaces the profile stored under `id`. The replacement keeps `id`
    /// and may not take another student's NIM.
    pub fn update(&mut self, id: &str, mut profile: StudentProfile) -> AppResult<()> {
        let pos = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AppError::StudentNotFound(id.to_string()))?;

        if self
            .students
            .iter()
            .any(|s| s.id != id && s.nim == profile.nim)
        {
            return Err(AppError::DuplicateNim(profile.nim));
        }

        profile.id = id.to_string();
        self.students[pos] = profile;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> AppResult<StudentProfile> {
        let pos = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AppError::StudentNotFound(id.to_string()))?;
        Ok(self.students.remove(pos))
    }
}

/// Fails on the first repeated id or NIM.
pub fn ensure_unique(students: &[StudentProfile]) -> AppResult<()> {
    let mut ids = HashSet::new();
    let mut nims = HashSet::new();
    for s in students {
        if !ids.insert(s.id.as_str()) {
            return Err(AppError::DuplicateId(s.id.clone()));
        }
        if !nims.insert(s.nim.as_str()) {
            return Err(AppError::DuplicateNim(s.nim.clone()));
        }
    }
    Ok(())
}

/// Names of the required form fields left blank.
pub fn validate_profile(profile: &StudentProfile) -> Vec<String> {
    let required = [
        (&profile.name, "Full Name"),
        (&profile.nim, "Student ID (NIM)"),
        (&profile.email, "Email Address"),
        (&profile.phone, "Phone Number"),
    ];

    required
        .iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, label)| label.to_string())
        .collect()
}

/// `validate_profile` as a `Result`, for callers that want to stop early.
pub fn ensure_valid(profile: &StudentProfile) -> AppResult<()> {
    let missing = validate_profile(profile);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(missing))
    }
}

/// Prepends a record built from `draft`. Title and date are required;
/// an empty verifier becomes `Admin`.
pub fn add_record(profile: &mut StudentProfile, draft: RecordDraft) -> AppResult<String> {
    let mut missing = Vec::new();
    if draft.title.trim().is_empty() {
        missing.push("Title".to_string());
    }
    if draft.date.trim().is_empty() {
        missing.push("Date".to_string());
    }
    if !missing.is_empty() {
        return Err(AppError::Validation(missing));
    }

    let id = Uuid::new_v4().to_string();
    let verified_by = if draft.verified_by.trim().is_empty() {
        "Admin".to_string()
    } else {
        draft.verified_by
    };

    profile.records.insert(
        0,
        StudentRecord {
            id: id.clone(),
            date: draft.date,
            title: draft.title,
            category: draft.category.unwrap_or(crate::models::RecordCategory::Academic),
            description: draft.description,
            grade_or_result: draft.grade_or_result,
            verified_by,
        },
    );
    Ok(id)
}

pub fn delete_record(profile: &mut StudentProfile, record_id: &str) -> AppResult<StudentRecord> {
    let pos = profile
        .records
        .iter()
        .position(|r| r.id == record_id)
        .ok_or_else(|| AppError::RecordNotFound(record_id.to_string()))?;
    Ok(profile.records.remove(pos))
}
