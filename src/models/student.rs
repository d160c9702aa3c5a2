use super::payment::PaymentRecord;
use super::record::StudentRecord;
use super::semester::SemesterResult;
use super::standing::{AttendanceCounts, AttendanceStanding, StandingThresholds};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Accepts the full word or the L/P code, in any case.
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "l" => Some(Gender::Male),
            "female" | "p" => Some(Gender::Female),
            _ => None,
        }
    }

    /// L (laki-laki) / P (perempuan), as shown on the attendance sheet.
    pub fn short_code(&self) -> &'static str {
        match self {
            Gender::Male => "L",
            Gender::Female => "P",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    Active,
    Inactive,
    Graduated,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "Active",
            EnrollmentStatus::Inactive => "Inactive",
            EnrollmentStatus::Graduated => "Graduated",
        }
    }

    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(EnrollmentStatus::Active),
            "inactive" => Some(EnrollmentStatus::Inactive),
            "graduated" => Some(EnrollmentStatus::Graduated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TuitionStatus {
    Paid,
    Unpaid,
    Pending,
}

impl TuitionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuitionStatus::Paid => "Paid",
            TuitionStatus::Unpaid => "Unpaid",
            TuitionStatus::Pending => "Pending",
        }
    }

    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paid" => Some(TuitionStatus::Paid),
            "unpaid" => Some(TuitionStatus::Unpaid),
            "pending" => Some(TuitionStatus::Pending),
            _ => None,
        }
    }
}

fn default_target_credits() -> u32 {
    144
}

fn default_economic_tier() -> u8 {
    3
}

fn default_color() -> String {
    "blue".to_string()
}

/// One student's full record.
///
/// Attendance percentage and standing are not stored: they are derived from
/// the `h`/`i`/`s`/`a` counters every time they are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: String,
    pub name: String,
    pub nim: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,

    pub major: String,
    pub batch: String,
    pub gpa: f64,
    pub total_credits: u32,
    #[serde(default = "default_target_credits")]
    pub target_credits: u32,
    pub status: EnrollmentStatus,

    #[serde(default)]
    pub h: u32,
    #[serde(default)]
    pub i: u32,
    #[serde(default)]
    pub s: u32,
    #[serde(default)]
    pub a: u32,

    pub tuition_status: TuitionStatus,
    #[serde(default)]
    pub tuition_date: String,
    #[serde(default)]
    pub tuition_invoice_url: Option<String>,
    #[serde(default = "default_economic_tier")]
    pub economic_tier: u8,
    #[serde(default)]
    pub is_scholarship: bool,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,

    #[serde(default)]
    pub discipline_points: u32,
    #[serde(default)]
    pub good_standing_note: String,
    #[serde(default)]
    pub achievement_count: u32,

    #[serde(default)]
    pub initials: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub avatar_url: String,

    /// Newest first.
    #[serde(default)]
    pub records: Vec<StudentRecord>,
    /// Chronological.
    #[serde(default)]
    pub academic_history: Vec<SemesterResult>,
}

impl StudentProfile {
    /// Blank profile with the defaults of the "add student" form.
    pub fn draft(id: String, batch: String) -> Self {
        Self {
            id,
            name: String::new(),
            nim: String::new(),
            email: String::new(),
            phone: String::new(),
            gender: Gender::Male,
            major: "Computer Science".to_string(),
            batch,
            gpa: 0.0,
            total_credits: 0,
            target_credits: default_target_credits(),
            status: EnrollmentStatus::Active,
            h: 0,
            i: 0,
            s: 0,
            a: 0,
            tuition_status: TuitionStatus::Pending,
            tuition_date: String::new(),
            tuition_invoice_url: None,
            economic_tier: default_economic_tier(),
            is_scholarship: false,
            payments: Vec::new(),
            discipline_points: 100,
            good_standing_note: String::new(),
            achievement_count: 0,
            initials: "NS".to_string(),
            color: default_color(),
            avatar_url: String::new(),
            records: Vec::new(),
            academic_history: Vec::new(),
        }
    }

    /// Renames the student and refreshes the derived initials.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        self.initials = initials_from_name(name);
    }

    pub fn attendance(&self) -> AttendanceCounts {
        AttendanceCounts::from_counters(self.h, self.i, self.s, self.a)
    }

    pub fn pct(&self) -> u32 {
        self.attendance().pct()
    }

    pub fn standing(&self, thresholds: &StandingThresholds) -> AttendanceStanding {
        self.attendance().standing(thresholds)
    }

    /// Progress toward the graduation credit target, capped at 100.
    pub fn credit_progress(&self) -> u32 {
        if self.target_credits == 0 {
            return 0;
        }
        let pct = (self.total_credits as f64 / self.target_credits as f64 * 100.0).round();
        (pct as u32).min(100)
    }
}

/// First letter of up to two words, uppercased.
pub fn initials_from_name(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
