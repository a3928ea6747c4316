//! TOML dataset loader
//!
//! A dataset is a read-only snapshot of one student and a course catalog:
//!
//! ```toml
//! [student]
//! course_group = "CIENCIAS"
//! grades = [{ subject = "Português", year = 10, grade = 15 }]
//! exams = [{ code = "19", grade = 182 }]
//!
//! [questionnaire]
//! interests = "gosto de programar"
//!
//! [[courses]]
//! id = "up-inf"
//! name = "Engenharia Informática"
//! area = "Informática e Dados"
//! requirements = [{ exam_code = "19", weight = 1.0 }]
//! ```

use crate::core::models::{Course, StudentRecord};
use crate::core::recommendation::QuestionnaireAnswers;
use crate::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::Path;

/// One student, their questionnaire, and the catalog to evaluate them against
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dataset {
    /// Student grades and exams
    #[serde(default)]
    pub student: StudentRecord,

    /// Questionnaire answers, when the student filled it in
    #[serde(default)]
    pub questionnaire: Option<QuestionnaireAnswers>,

    /// Course catalog, in display order
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Dataset {
    /// Find a course by id
    #[must_use]
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Query text for ranking: the combined questionnaire answers, if any
    #[must_use]
    pub fn query_text(&self) -> String {
        self.questionnaire
            .as_ref()
            .map(QuestionnaireAnswers::combined_text)
            .unwrap_or_default()
    }
}

/// Parse a dataset from TOML text
///
/// Repeated grades for the same (subject, year) and repeated exam codes keep
/// the last occurrence, as if each row had been upserted in file order.
///
/// # Errors
/// Returns an error if the text is not a valid dataset or two courses share an id
pub fn parse_dataset(content: &str) -> Result<Dataset, Box<dyn Error>> {
    let mut dataset: Dataset = toml::from_str(content)?;

    let mut seen = HashSet::new();
    for course in &dataset.courses {
        if course.id.trim().is_empty() {
            return Err(format!("Course '{}' has an empty id", course.name).into());
        }
        if !seen.insert(course.id.as_str()) {
            return Err(format!("Duplicate course id '{}'", course.id).into());
        }
    }

    let raw = std::mem::take(&mut dataset.student);
    let mut student = StudentRecord::new(raw.course_group);
    student.professional_average = raw.professional_average;
    for grade in raw.grades() {
        student.upsert_grade(grade.clone());
    }
    for exam in raw.exams() {
        student.upsert_exam(exam.clone());
    }
    dataset.student = student;

    debug!(
        "Parsed dataset: {} grades, {} exams, {} courses",
        dataset.student.grades().len(),
        dataset.student.exams().len(),
        dataset.courses.len()
    );
    Ok(dataset)
}

/// Load a dataset file
///
/// # Arguments
/// * `path` - Path to the TOML dataset
///
/// # Errors
/// Returns an error if the file cannot be read or parsed
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, Box<dyn Error>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read dataset {}: {e}", path.display()))?;
    parse_dataset(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseGroup, InstitutionType};

    const SAMPLE: &str = r#"
[student]
course_group = "ECONOMIA"
grades = [
    { subject = "Português", year = 10, grade = 12 },
    { subject = "Português", year = 10, grade = 14 },
    { subject = "Economia A", year = 11, grade = 16 },
]
exams = [
    { code = "19", grade = 150 },
    { code = "19", grade = 170, exam_year = 2025 },
]

[questionnaire]
interests = "finanças e mercados"
career_values = "estabilidade"

[[courses]]
id = "nova-eco"
name = "Economia"
institution = "Universidade Nova de Lisboa"
area = "Economia, Gestão e Contabilidade"
district = "Lisboa"
type = "publica"
secondary_weight = 0.5
exam_weight = 0.5
minimum_threshold = 100
last_admitted_score = 171.3

[[courses.requirements]]
exam_code = "19"
weight = 1.0

[[courses.history]]
year = 2023
score = 165.0

[[courses.history]]
year = 2024
score = 171.3
"#;

    #[test]
    fn parses_full_dataset() {
        let dataset = parse_dataset(SAMPLE).expect("dataset");

        assert_eq!(dataset.student.course_group, CourseGroup::Economia);
        assert_eq!(dataset.student.grades().len(), 2);
        assert!((dataset.student.grades()[0].grade - 14.0).abs() < f64::EPSILON);
        assert_eq!(dataset.student.exams().len(), 1);
        assert_eq!(dataset.student.exams()[0].exam_year, Some(2025));

        let course = dataset.course("nova-eco").expect("course");
        assert_eq!(course.institution_type, InstitutionType::Public);
        assert_eq!(course.requirements[0].alternative_group, 1);
        assert_eq!(course.cutoff_trend().map(|t| (t * 10.0).round()), Some(63.0));

        assert_eq!(dataset.query_text(), "finanças e mercados estabilidade");
    }

    #[test]
    fn empty_document_is_an_empty_dataset() {
        let dataset = parse_dataset("").expect("dataset");
        assert!(dataset.courses.is_empty());
        assert!(dataset.questionnaire.is_none());
        assert!(dataset.query_text().is_empty());
    }

    #[test]
    fn rejects_duplicate_course_ids() {
        let text = r#"
[[courses]]
id = "a"
name = "Um"

[[courses]]
id = "a"
name = "Dois"
"#;
        let err = parse_dataset(text).expect_err("duplicate");
        assert!(err.to_string().contains("Duplicate course id 'a'"));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(parse_dataset("[[courses]]\nname = ").is_err());
    }
}
