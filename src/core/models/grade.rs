//! Grade records held by a student

use serde::{Deserialize, Serialize};

/// A secondary-school classification for one subject in one school year.
///
/// Grades are on the 0–20 scale and `year_level` is one of 10, 11 or 12.
/// Values are not range-checked here; the record store validates at its boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectGrade {
    /// Subject name (e.g., "Matemática A")
    #[serde(alias = "subject")]
    pub subject_name: String,

    /// School year the grade belongs to (10, 11 or 12)
    #[serde(alias = "year")]
    pub year_level: u8,

    /// Classification on the 0–20 scale
    pub grade: f64,
}

impl SubjectGrade {
    /// Create a new subject grade
    #[must_use]
    pub fn new(subject_name: impl Into<String>, year_level: u8, grade: f64) -> Self {
        Self {
            subject_name: subject_name.into(),
            year_level,
            grade,
        }
    }

    /// Natural key used for upserts: (subject, year)
    #[must_use]
    pub fn key(&self) -> (&str, u8) {
        (&self.subject_name, self.year_level)
    }
}

/// A national exam result on the 0–200 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Exam code (e.g., "19" for Matemática A)
    #[serde(alias = "code")]
    pub exam_code: String,

    /// Exam grade on the 0–200 scale
    pub grade: f64,

    /// Year the exam was sat; metadata only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_year: Option<u16>,
}

impl ExamRecord {
    /// Create a new exam record without a year
    #[must_use]
    pub fn new(exam_code: impl Into<String>, grade: f64) -> Self {
        Self {
            exam_code: exam_code.into(),
            grade,
            exam_year: None,
        }
    }

    /// Set the year the exam was sat
    #[must_use]
    pub const fn with_year(mut self, year: u16) -> Self {
        self.exam_year = Some(year);
        self
    }
}
