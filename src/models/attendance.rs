use super::attendance_status::AttendanceStatus;
use super::student::StudentProfile;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofKind {
    Image,
    Pdf,
}

impl ProofKind {
    /// Anything that is not an image is kept as a document.
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        let is_image = [".png", ".jpg", ".jpeg", ".gif", ".webp", ".bmp"]
            .iter()
            .any(|ext| lower.ends_with(ext));
        if is_image {
            ProofKind::Image
        } else {
            ProofKind::Pdf
        }
    }

    pub fn mime(&self, file_name: &str) -> &'static str {
        match self {
            ProofKind::Pdf => "application/pdf",
            ProofKind::Image => {
                let lower = file_name.to_lowercase();
                if lower.ends_with(".png") {
                    "image/png"
                } else if lower.ends_with(".gif") {
                    "image/gif"
                } else if lower.ends_with(".webp") {
                    "image/webp"
                } else {
                    "image/jpeg"
                }
            }
        }
    }
}

/// Supporting document for a permitted or sick absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Data URL or remote URL.
    pub url: String,
    pub kind: ProofKind,
    pub file_name: Option<String>,
}

/// One row of the daily input sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: String,
    pub name: String,
    pub nim: String,
    pub gender: String,
    pub initials: String,
    pub color: String,
    pub batch: String,
    pub major: String,
    pub status: Option<AttendanceStatus>,
    pub note: String,
    pub proof: Option<Proof>,
}

impl AttendanceEntry {
    /// Fresh, unset row for a roster student.
    pub fn for_student(student: &StudentProfile) -> Self {
        Self {
            student_id: student.id.clone(),
            name: student.name.clone(),
            nim: student.nim.clone(),
            gender: student.gender.short_code().to_string(),
            initials: student.initials.clone(),
            color: student.color.clone(),
            batch: student.batch.clone(),
            major: student.major.clone(),
            status: None,
            note: String::new(),
            proof: None,
        }
    }

    /// I/S rows without a proof attachment.
    pub fn is_missing_proof(&self) -> bool {
        self.status.is_some_and(|s| s.needs_proof()) && self.proof.is_none()
    }
}

/// A finalized attendance event for one student on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceLog {
    pub id: String,
    pub date: NaiveDate,
    pub student_name: String,
    pub nim: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub proof: Option<Proof>,
    pub avatar_color: String,
    pub initials: String,
    pub batch: String,
}

impl AttendanceLog {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Builds the log line a saved sheet row turns into.
    /// Returns `None` for rows that were never marked.
    pub fn from_entry(id: String, date: NaiveDate, entry: &AttendanceEntry) -> Option<Self> {
        let status = entry.status?;
        // present rows carry no evidence; proofs belong to I/S only
        let note = if status.is_present() {
            String::new()
        } else {
            entry.note.clone()
        };
        let proof = entry.proof.clone().filter(|_| status.needs_proof());
        Some(Self {
            id,
            date,
            student_name: entry.name.clone(),
            nim: entry.nim.clone(),
            status,
            note,
            proof,
            avatar_color: entry.color.clone(),
            initials: entry.initials.clone(),
            batch: entry.batch.clone(),
        })
    }
}
