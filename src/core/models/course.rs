//! Course model

use serde::{Deserialize, Serialize};

const fn default_alternative_group() -> u32 {
    1
}

/// One exam a course accepts, as part of an alternative set.
///
/// Requirements sharing the same `alternative_group` form one set: the student
/// must hold every exam in the set for that admission route to be usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRequirement {
    /// Exam code (e.g., "07" for Física e Química A)
    pub exam_code: String,

    /// Weight of this exam inside its set; a set's weights are expected to sum to 1
    pub weight: f64,

    /// Identifier of the alternative set this requirement belongs to
    #[serde(default = "default_alternative_group")]
    pub alternative_group: u32,
}

impl ExamRequirement {
    /// Create a requirement in the given alternative set
    #[must_use]
    pub fn new(exam_code: impl Into<String>, weight: f64, alternative_group: u32) -> Self {
        Self {
            exam_code: exam_code.into(),
            weight,
            alternative_group,
        }
    }
}

/// Public or private institution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstitutionType {
    /// Public institution
    #[default]
    #[serde(alias = "publica")]
    Public,
    /// Private institution
    #[serde(alias = "privada")]
    Private,
}

/// Last-admitted score recorded for a past admission round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoffHistoryEntry {
    /// Admission year
    pub year: u16,
    /// Score of the last admitted applicant (0–200)
    pub score: f64,
}

/// A higher-education course offering and its admission rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course identifier
    pub id: String,

    /// Course name (e.g., "Engenharia Informática")
    pub name: String,

    /// Institution offering the course
    #[serde(default)]
    pub institution: String,

    /// Study area (e.g., "Informática e Dados")
    #[serde(default)]
    pub area: String,

    /// District where the institution is located
    #[serde(default)]
    pub district: String,

    /// Public or private
    #[serde(default, rename = "type")]
    pub institution_type: InstitutionType,

    /// Number of places available
    #[serde(default)]
    pub capacity: Option<u32>,

    /// Weight of the secondary average in the admission score
    #[serde(default)]
    pub secondary_weight: Option<f64>,

    /// Weight of the exam component in the admission score
    #[serde(default)]
    pub exam_weight: Option<f64>,

    /// Minimum grade (0–200) required of the secondary average and of each exam
    #[serde(default)]
    pub minimum_threshold: Option<f64>,

    /// Score of the last admitted applicant in the latest round (0–200)
    #[serde(default)]
    pub last_admitted_score: Option<f64>,

    /// Exam requirements, grouped into alternative sets by `alternative_group`
    #[serde(default)]
    pub requirements: Vec<ExamRequirement>,

    /// Past last-admitted scores, oldest first
    #[serde(default)]
    pub history: Vec<CutoffHistoryEntry>,
}

impl Course {
    /// Create a course with no requirements and unset weights
    ///
    /// # Arguments
    /// * `id` - Course identifier
    /// * `name` - Course name
    /// * `area` - Study area
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            institution: String::new(),
            area: area.into(),
            district: String::new(),
            institution_type: InstitutionType::default(),
            capacity: None,
            secondary_weight: None,
            exam_weight: None,
            minimum_threshold: None,
            last_admitted_score: None,
            requirements: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Set the secondary/exam weights
    #[must_use]
    pub const fn with_weights(mut self, secondary_weight: f64, exam_weight: f64) -> Self {
        self.secondary_weight = Some(secondary_weight);
        self.exam_weight = Some(exam_weight);
        self
    }

    /// Set the minimum grade threshold
    #[must_use]
    pub const fn with_minimum(mut self, minimum_threshold: f64) -> Self {
        self.minimum_threshold = Some(minimum_threshold);
        self
    }

    /// Set the last admitted score
    #[must_use]
    pub const fn with_cutoff(mut self, score: f64) -> Self {
        self.last_admitted_score = Some(score);
        self
    }

    /// Add an exam requirement
    pub fn add_requirement(&mut self, requirement: ExamRequirement) {
        self.requirements.push(requirement);
    }

    /// Exam codes mentioned by any requirement, in declaration order without duplicates
    #[must_use]
    pub fn exam_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::new();
        for req in &self.requirements {
            if !codes.contains(&req.exam_code.as_str()) {
                codes.push(&req.exam_code);
            }
        }
        codes
    }

    /// Change in last-admitted score between the oldest and newest history entry
    ///
    /// Returns `None` when fewer than two entries are recorded.
    #[must_use]
    pub fn cutoff_trend(&self) -> Option<f64> {
        match self.history.as_slice() {
            [first, .., last] => Some(last.score - first.score),
            _ => None,
        }
    }
}
