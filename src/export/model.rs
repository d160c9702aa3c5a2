use crate::models::{AttendanceLog, StandingThresholds, StudentProfile};
use serde::Serialize;

/// Flat roster row; derived attendance figures included.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct StudentExport {
    pub id: String,
    pub name: String,
    pub nim: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub major: String,
    pub batch: String,
    pub status: String,
    pub gpa: f64,
    pub total_credits: u32,
    pub h: u32,
    pub i: u32,
    pub s: u32,
    pub a: u32,
    pub pct: u32,
    pub standing: String,
    pub tuition_status: String,
}

impl StudentExport {
    pub fn from_profile(s: &StudentProfile, thresholds: &StandingThresholds) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            nim: s.nim.clone(),
            email: s.email.clone(),
            phone: s.phone.clone(),
            gender: s.gender.as_str().to_string(),
            major: s.major.clone(),
            batch: s.batch.clone(),
            status: s.status.as_str().to_string(),
            gpa: s.gpa,
            total_credits: s.total_credits,
            h: s.h,
            i: s.i,
            s: s.s,
            a: s.a,
            pct: s.pct(),
            standing: s.standing(thresholds).as_str().to_string(),
            tuition_status: s.tuition_status.as_str().to_string(),
        }
    }
}

/// Flat attendance log row.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LogExport {
    pub id: String,
    pub date: String,
    pub student_name: String,
    pub nim: String,
    pub batch: String,
    pub status: String,
    pub note: String,
    pub proof_url: String,
}

impl From<&AttendanceLog> for LogExport {
    fn from(l: &AttendanceLog) -> Self {
        Self {
            id: l.id.clone(),
            date: l.date_str(),
            student_name: l.student_name.clone(),
            nim: l.nim.clone(),
            batch: l.batch.clone(),
            status: l.status.code().to_string(),
            note: l.note.clone(),
            proof_url: l.proof.as_ref().map(|p| p.url.clone()).unwrap_or_default(),
        }
    }
}
