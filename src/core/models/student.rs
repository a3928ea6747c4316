//! Student record and derived profile

use super::grade::{ExamRecord, SubjectGrade};
use crate::core::average;
use serde::{Deserialize, Serialize};

/// Secondary-school track the student follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseGroup {
    /// Ciências e Tecnologias
    #[default]
    Ciencias,
    /// Ciências Socioeconómicas
    Economia,
    /// Línguas e Humanidades
    Humanidades,
    /// Artes Visuais
    Artes,
    /// Ensino Profissional
    Profissional,
}

impl CourseGroup {
    /// Human-readable name of the track
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ciencias => "Ciências e Tecnologias",
            Self::Economia => "Ciências Socioeconómicas",
            Self::Humanidades => "Línguas e Humanidades",
            Self::Artes => "Artes Visuais",
            Self::Profissional => "Ensino Profissional",
        }
    }
}

/// The inputs the admission scorer needs for one student.
///
/// Always produced by [`StudentRecord::profile`]; it is a snapshot, not state.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    /// Secondary average on the 0–20 scale
    pub secondary_average: f64,
    /// Exam results held by the student
    pub exam_records: Vec<ExamRecord>,
}

/// A student's grades and exams with upsert semantics.
///
/// The secondary average is never stored: every read recomputes it from the
/// current grades and exams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Secondary-school track
    #[serde(default)]
    pub course_group: CourseGroup,

    /// Final average reported by a professional course, used instead of subject grades
    #[serde(default)]
    pub professional_average: Option<f64>,

    #[serde(default)]
    grades: Vec<SubjectGrade>,

    #[serde(default)]
    exams: Vec<ExamRecord>,
}

impl StudentRecord {
    /// Create an empty record for the given track
    #[must_use]
    pub const fn new(course_group: CourseGroup) -> Self {
        Self {
            course_group,
            professional_average: None,
            grades: Vec::new(),
            exams: Vec::new(),
        }
    }

    /// Insert a grade, replacing any grade for the same (subject, year)
    pub fn upsert_grade(&mut self, grade: SubjectGrade) {
        match self.grades.iter_mut().find(|g| g.key() == grade.key()) {
            Some(existing) => *existing = grade,
            None => self.grades.push(grade),
        }
    }

    /// Remove the grade for (subject, year). Returns the removed grade, if any.
    pub fn remove_grade(&mut self, subject_name: &str, year_level: u8) -> Option<SubjectGrade> {
        let idx = self
            .grades
            .iter()
            .position(|g| g.key() == (subject_name, year_level))?;
        Some(self.grades.remove(idx))
    }

    /// Insert an exam result, replacing any result for the same exam code
    pub fn upsert_exam(&mut self, exam: ExamRecord) {
        match self
            .exams
            .iter_mut()
            .find(|e| e.exam_code == exam.exam_code)
        {
            Some(existing) => *existing = exam,
            None => self.exams.push(exam),
        }
    }

    /// Remove the exam result for a code. Returns the removed record, if any.
    pub fn remove_exam(&mut self, exam_code: &str) -> Option<ExamRecord> {
        let idx = self.exams.iter().position(|e| e.exam_code == exam_code)?;
        Some(self.exams.remove(idx))
    }

    /// All subject grades, in insertion order
    #[must_use]
    pub fn grades(&self) -> &[SubjectGrade] {
        &self.grades
    }

    /// All exam results, in insertion order
    #[must_use]
    pub fn exams(&self) -> &[ExamRecord] {
        &self.exams
    }

    /// Codes of the exams the student holds
    pub fn exam_codes(&self) -> impl Iterator<Item = &str> {
        self.exams.iter().map(|e| e.exam_code.as_str())
    }

    /// Official final classification (CFA) of the secondary course
    #[must_use]
    pub fn classification(&self) -> f64 {
        average::classification_for_group(
            self.course_group,
            &self.grades,
            self.professional_average,
        )
    }

    /// Secondary average (0–20) blended with the best exam results
    #[must_use]
    pub fn secondary_average(&self) -> f64 {
        average::secondary_average(&self.grades, &self.exams)
    }

    /// Snapshot of the scorer inputs
    #[must_use]
    pub fn profile(&self) -> StudentProfile {
        StudentProfile {
            secondary_average: self.secondary_average(),
            exam_records: self.exams.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_grade_replaces_same_subject_and_year() {
        let mut record = StudentRecord::new(CourseGroup::Ciencias);
        record.upsert_grade(SubjectGrade::new("Português", 10, 12.0));
        record.upsert_grade(SubjectGrade::new("Português", 11, 13.0));
        record.upsert_grade(SubjectGrade::new("Português", 10, 15.0));

        assert_eq!(record.grades().len(), 2);
        assert!((record.grades()[0].grade - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn upsert_exam_overwrites_by_code() {
        let mut record = StudentRecord::default();
        record.upsert_exam(ExamRecord::new("19", 120.0));
        record.upsert_exam(ExamRecord::new("19", 170.0));

        assert_eq!(record.exams().len(), 1);
        assert!((record.exams()[0].grade - 170.0).abs() < f64::EPSILON);
    }

    #[test]
    fn removing_records() {
        let mut record = StudentRecord::default();
        record.upsert_grade(SubjectGrade::new("Filosofia", 10, 14.0));
        record.upsert_exam(ExamRecord::new("06", 140.0));

        assert!(record.remove_grade("Filosofia", 11).is_none());
        assert!(record.remove_grade("Filosofia", 10).is_some());
        assert!(record.remove_exam("06").is_some());
        assert!(record.remove_exam("06").is_none());
        assert!(record.grades().is_empty());
        assert!(record.exams().is_empty());
    }

    #[test]
    fn secondary_average_follows_every_change() {
        let mut record = StudentRecord::default();
        record.upsert_grade(SubjectGrade::new("Português", 10, 14.0));
        record.upsert_grade(SubjectGrade::new("Matemática A", 10, 16.0));
        assert!((record.secondary_average() - 15.0).abs() < 1e-9);

        // one exam at 180 (18.0 on the 0-20 scale): 15 * 0.85 + 18 * 0.15
        record.upsert_exam(ExamRecord::new("19", 180.0));
        assert!((record.secondary_average() - 15.45).abs() < 1e-9);

        record.upsert_grade(SubjectGrade::new("Português", 10, 16.0));
        assert!((record.secondary_average() - (16.0 * 0.85 + 18.0 * 0.15)).abs() < 1e-9);

        record.remove_exam("19");
        assert!((record.secondary_average() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn profile_snapshot_carries_exams() {
        let mut record = StudentRecord::default();
        record.upsert_grade(SubjectGrade::new("Inglês", 12, 18.0));
        record.upsert_exam(ExamRecord::new("13", 190.0));

        let profile = record.profile();
        assert_eq!(profile.exam_records.len(), 1);
        assert!((profile.secondary_average - record.secondary_average()).abs() < f64::EPSILON);
    }

    #[test]
    fn professional_track_uses_reported_average() {
        let mut record = StudentRecord::new(CourseGroup::Profissional);
        record.professional_average = Some(16.4);
        record.upsert_grade(SubjectGrade::new("Português", 10, 10.0));

        assert!((record.classification() - 16.4).abs() < f64::EPSILON);
    }

    #[test]
    fn course_group_labels() {
        assert_eq!(CourseGroup::Artes.label(), "Artes Visuais");
        let group: CourseGroup = serde_json::from_str("\"HUMANIDADES\"").expect("group");
        assert_eq!(group, CourseGroup::Humanidades);
    }
}
