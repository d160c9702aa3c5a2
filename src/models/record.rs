use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordCategory {
    Academic,
    Achievement,
    Activity,
    Discipline,
}

impl RecordCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordCategory::Academic => "Academic",
            RecordCategory::Achievement => "Achievement",
            RecordCategory::Activity => "Activity",
            RecordCategory::Discipline => "Discipline",
        }
    }

    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "academic" => Some(RecordCategory::Academic),
            "achievement" => Some(RecordCategory::Achievement),
            "activity" => Some(RecordCategory::Activity),
            "discipline" => Some(RecordCategory::Discipline),
            _ => None,
        }
    }
}

/// Academic, achievement, activity or discipline entry on a student's file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    pub date: String,
    pub title: String,
    pub category: RecordCategory,
    #[serde(default)]
    pub description: String,
    /// e.g. "A", "1st Place", "Participated"
    #[serde(default)]
    pub grade_or_result: String,
    pub verified_by: String,
}

/// Form input for a new record; `id` is assigned on insert.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub date: String,
    pub title: String,
    pub category: Option<RecordCategory>,
    pub description: String,
    pub grade_or_result: String,
    pub verified_by: String,
}
