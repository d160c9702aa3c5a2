use serde::{Deserialize, Serialize};

/// Closed-semester snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterResult {
    pub id: String,
    /// e.g. "Semester 1 (Ganjil) 2022/2023"
    pub semester_name: String,
    /// IPS: that semester's own average.
    pub gpa: f64,
    /// SKS taken that semester.
    pub credits: u32,
    /// IPK as of that semester's close.
    pub cumulative_gpa: f64,
}
