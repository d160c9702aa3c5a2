pub mod attendance;
pub mod attendance_status;
pub mod payment;
pub mod record;
pub mod semester;
pub mod standing;
pub mod student;

pub use attendance::{AttendanceEntry, AttendanceLog, Proof, ProofKind};
pub use attendance_status::AttendanceStatus;
pub use payment::{PaymentRecord, PaymentStatus};
pub use record::{RecordCategory, RecordDraft, StudentRecord};
pub use semester::SemesterResult;
pub use standing::{AttendanceCounts, AttendanceStanding, StandingThresholds};
pub use student::{EnrollmentStatus, Gender, StudentProfile, TuitionStatus};
