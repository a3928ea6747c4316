//! Data models for `admission-sim`

pub mod course;
pub mod grade;
pub mod student;

pub use course::{Course, CutoffHistoryEntry, ExamRequirement, InstitutionType};
pub use grade::{ExamRecord, SubjectGrade};
pub use student::{CourseGroup, StudentProfile, StudentRecord};
