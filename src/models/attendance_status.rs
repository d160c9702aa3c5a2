use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily attendance mark: Hadir, Izin, Sakit, Alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "H")]
    Present,
    #[serde(rename = "I")]
    Permitted,
    #[serde(rename = "S")]
    Sick,
    #[serde(rename = "A")]
    Absent,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Permitted,
        AttendanceStatus::Sick,
        AttendanceStatus::Absent,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "H",
            AttendanceStatus::Permitted => "I",
            AttendanceStatus::Sick => "S",
            AttendanceStatus::Absent => "A",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Hadir",
            AttendanceStatus::Permitted => "Izin",
            AttendanceStatus::Sick => "Sakit",
            AttendanceStatus::Absent => "Alpha",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.code()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "H" => Some(AttendanceStatus::Present),
            "I" => Some(AttendanceStatus::Permitted),
            "S" => Some(AttendanceStatus::Sick),
            "A" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }

    /// Accepts codes in any case as well as the full Indonesian labels.
    pub fn from_code(code: &str) -> Option<Self> {
        let trimmed = code.trim();
        Self::from_db_str(&trimmed.to_uppercase()).or_else(|| {
            Self::ALL
                .into_iter()
                .find(|s| s.label().eq_ignore_ascii_case(trimmed))
        })
    }

    /// Permitted and sick absences are expected to carry a proof document.
    pub fn needs_proof(&self) -> bool {
        matches!(self, AttendanceStatus::Permitted | AttendanceStatus::Sick)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
