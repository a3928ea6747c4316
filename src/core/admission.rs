//! Admission score computation
//!
//! A course declares its accepted exams as one or more *alternative sets*:
//! requirements sharing an `alternative_group` must all be held for that route
//! to count, and different sets are independent routes into the same course.
//! The applicant's score is the best score over every route they satisfy.

use crate::core::average::round1;
use crate::core::models::{Course, ExamRecord, ExamRequirement, StudentProfile};
use crate::debug;
use serde::{Deserialize, Serialize};

/// Defaults applied when a course record leaves a weight or threshold unset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Weight of the secondary average when the course has none
    pub secondary_weight: f64,
    /// Weight of the exam component when the course has none
    pub exam_weight: f64,
    /// Minimum grade (0–200) when the course has none
    pub minimum_threshold: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            secondary_weight: 0.5,
            exam_weight: 0.5,
            minimum_threshold: 95.0,
        }
    }
}

/// Outcome of scoring one student against one course
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdmissionResult {
    /// Best admission score on the 0–200 scale, rounded to one decimal; 0 when no route is usable
    pub final_grade: f64,
    /// Whether the secondary average and every exam of the chosen route reach the minimum
    pub meets_minimum: bool,
    /// Whether at least one alternative set is fully held; `final_grade` is meaningless otherwise
    pub has_required_exams: bool,
}

impl AdmissionResult {
    /// Result returned when the student holds no complete alternative set
    pub const MISSING_EXAMS: Self = Self {
        final_grade: 0.0,
        meets_minimum: false,
        has_required_exams: false,
    };
}

/// Score a student against a course using the default policy.
///
/// # Arguments
/// * `secondary_average` - Secondary average on the 0–20 scale
/// * `exams` - Exam results held by the student (0–200)
/// * `course` - Course with its requirements, weights and threshold
#[must_use]
pub fn score(secondary_average: f64, exams: &[ExamRecord], course: &Course) -> AdmissionResult {
    score_with_policy(secondary_average, exams, course, &ScoringPolicy::default())
}

/// Score a student against a course, filling unset course fields from `policy`.
///
/// Ties between alternative sets keep the first satisfied set in declaration order.
#[must_use]
pub fn score_with_policy(
    secondary_average: f64,
    exams: &[ExamRecord],
    course: &Course,
    policy: &ScoringPolicy,
) -> AdmissionResult {
    let ms200 = secondary_average * 10.0;
    let secondary_weight = course.secondary_weight.unwrap_or(policy.secondary_weight);
    let exam_weight = course.exam_weight.unwrap_or(policy.exam_weight);
    let minimum = course
        .minimum_threshold
        .unwrap_or(policy.minimum_threshold);

    let mut best: Option<(f64, bool)> = None;

    for set in alternative_sets(&course.requirements) {
        let Some(held) = held_grades(set.as_slice(), exams) else {
            continue;
        };

        let exam_component: f64 = held.iter().map(|(req, grade)| grade * req.weight).sum();
        let candidate = round1(ms200.mul_add(secondary_weight, exam_component * exam_weight));
        let meets = ms200 >= minimum && held.iter().all(|(_, grade)| *grade >= minimum);

        if best.is_none_or(|(grade, _)| candidate > grade) {
            best = Some((candidate, meets));
        }
    }

    match best {
        Some((final_grade, meets_minimum)) => AdmissionResult {
            final_grade,
            meets_minimum,
            has_required_exams: true,
        },
        None => {
            debug!("No alternative exam set satisfied for course {}", course.id);
            AdmissionResult::MISSING_EXAMS
        }
    }
}

/// Group requirements into alternative sets, in order of first declaration.
fn alternative_sets(requirements: &[ExamRequirement]) -> Vec<Vec<&ExamRequirement>> {
    let mut groups: Vec<(u32, Vec<&ExamRequirement>)> = Vec::new();
    for req in requirements {
        match groups
            .iter_mut()
            .find(|(id, _)| *id == req.alternative_group)
        {
            Some((_, members)) => members.push(req),
            None => groups.push((req.alternative_group, vec![req])),
        }
    }
    groups.into_iter().map(|(_, members)| members).collect()
}

/// Pair each requirement in a set with the student's grade; `None` if any exam is missing.
fn held_grades<'a>(
    set: &[&'a ExamRequirement],
    exams: &[ExamRecord],
) -> Option<Vec<(&'a ExamRequirement, f64)>> {
    set.iter()
        .map(|req| {
            exams
                .iter()
                .find(|e| e.exam_code == req.exam_code)
                .map(|e| (*req, e.grade))
        })
        .collect()
}

/// Where an admission result stands against the course's last cutoff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No alternative set is held; the score cannot be compared
    MissingExams,
    /// The course has no recorded cutoff
    NoCutoff,
    /// The minimum grade is not met
    BelowMinimum,
    /// Minimum met but the score is under the cutoff
    BelowCutoff,
    /// Minimum met and the score reaches the cutoff
    AboveCutoff,
}

impl Verdict {
    /// Short label for tables
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MissingExams => "missing exams",
            Self::NoCutoff => "no cutoff",
            Self::BelowMinimum => "below minimum",
            Self::BelowCutoff => "below cutoff",
            Self::AboveCutoff => "above cutoff",
        }
    }
}

/// Comparison of an admission result with the last admitted score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CutoffStanding {
    /// Classification of the result
    pub verdict: Verdict,
    /// `final_grade - cutoff` (0–200 scale) when both are available
    pub gap: Option<f64>,
}

impl CutoffStanding {
    /// Compare a result with the course's `last_admitted_score`
    #[must_use]
    pub fn evaluate(result: &AdmissionResult, course: &Course) -> Self {
        if !result.has_required_exams {
            return Self {
                verdict: Verdict::MissingExams,
                gap: None,
            };
        }
        let Some(cutoff) = course.last_admitted_score else {
            let verdict = if result.meets_minimum {
                Verdict::NoCutoff
            } else {
                Verdict::BelowMinimum
            };
            return Self { verdict, gap: None };
        };

        let gap = result.final_grade - cutoff;
        let verdict = if !result.meets_minimum {
            Verdict::BelowMinimum
        } else if result.final_grade >= cutoff {
            Verdict::AboveCutoff
        } else {
            Verdict::BelowCutoff
        };
        Self {
            verdict,
            gap: Some(gap),
        }
    }

    /// Whether the result is competitive for the course
    #[must_use]
    pub const fn is_admissible(&self) -> bool {
        matches!(self.verdict, Verdict::AboveCutoff)
    }
}

/// One scored row of a catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseScore {
    /// Course identifier
    pub course_id: String,
    /// Scorer output
    pub result: AdmissionResult,
    /// Standing against the cutoff
    pub standing: CutoffStanding,
}

/// Score every course of a catalog for one student, in catalog order.
#[must_use]
pub fn score_catalog(
    profile: &StudentProfile,
    courses: &[Course],
    policy: &ScoringPolicy,
) -> Vec<CourseScore> {
    courses
        .iter()
        .map(|course| {
            let result = score_with_policy(
                profile.secondary_average,
                &profile.exam_records,
                course,
                policy,
            );
            CourseScore {
                course_id: course.id.clone(),
                result,
                standing: CutoffStanding::evaluate(&result, course),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course_ab() -> Course {
        let mut course = Course::new("c", "Bioquímica", "Ciências Exatas e da Natureza")
            .with_weights(0.5, 0.5)
            .with_minimum(95.0);
        course.add_requirement(ExamRequirement::new("A", 0.5, 1));
        course.add_requirement(ExamRequirement::new("B", 0.5, 1));
        course
    }

    #[test]
    fn groups_sets_in_declaration_order() {
        let reqs = vec![
            ExamRequirement::new("02", 0.5, 7),
            ExamRequirement::new("07", 1.0, 3),
            ExamRequirement::new("19", 0.5, 7),
        ];
        let sets = alternative_sets(&reqs);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].len(), 2);
        assert_eq!(sets[0][1].exam_code, "19");
        assert_eq!(sets[1][0].exam_code, "07");
    }

    #[test]
    fn scores_single_set() {
        let exams = vec![ExamRecord::new("A", 180.0), ExamRecord::new("B", 160.0)];
        let result = score(16.0, &exams, &course_ab());

        assert!((result.final_grade - 165.0).abs() < 1e-9);
        assert!(result.meets_minimum);
        assert!(result.has_required_exams);
    }

    #[test]
    fn missing_exam_voids_set() {
        let exams = vec![ExamRecord::new("A", 180.0)];
        let result = score(16.0, &exams, &course_ab());
        assert_eq!(result, AdmissionResult::MISSING_EXAMS);
    }

    #[test]
    fn course_without_requirements_has_no_route() {
        let course = Course::new("x", "Teatro", "Artes e Design");
        let result = score(18.0, &[ExamRecord::new("03", 190.0)], &course);
        assert!(!result.has_required_exams);
    }

    #[test]
    fn policy_fills_unset_course_fields() {
        let mut course = Course::new("c", "Economia", "Economia, Gestão e Contabilidade");
        course.add_requirement(ExamRequirement::new("19", 1.0, 1));
        let exams = vec![ExamRecord::new("19", 150.0)];

        // defaults 0.5/0.5: 140 * 0.5 + 150 * 0.5
        let default_result = score(14.0, &exams, &course);
        assert!((default_result.final_grade - 145.0).abs() < 1e-9);

        let policy = ScoringPolicy {
            secondary_weight: 0.6,
            exam_weight: 0.4,
            minimum_threshold: 100.0,
        };
        let custom = score_with_policy(14.0, &exams, &course, &policy);
        assert!((custom.final_grade - 144.0).abs() < 1e-9);
        assert!(custom.meets_minimum);
    }

    #[test]
    fn minimum_applies_to_each_exam_and_to_secondary() {
        let course = course_ab();
        let low_exam = vec![ExamRecord::new("A", 200.0), ExamRecord::new("B", 94.0)];
        assert!(!score(16.0, &low_exam, &course).meets_minimum);

        let ok_exams = vec![ExamRecord::new("A", 150.0), ExamRecord::new("B", 150.0)];
        assert!(!score(9.0, &ok_exams, &course).meets_minimum);
        assert!(score(9.5, &ok_exams, &course).meets_minimum);
    }

    #[test]
    fn tie_keeps_first_declared_set() {
        let mut course = Course::new("c", "Física", "Ciências Exatas e da Natureza")
            .with_weights(0.5, 0.5)
            .with_minimum(120.0);
        course.add_requirement(ExamRequirement::new("A", 1.0, 1));
        course.add_requirement(ExamRequirement::new("B", 0.5, 2));
        course.add_requirement(ExamRequirement::new("C", 0.5, 2));

        // both sets score 150; only set 1 meets the minimum (C is below 120)
        let exams = vec![
            ExamRecord::new("A", 150.0),
            ExamRecord::new("B", 200.0),
            ExamRecord::new("C", 100.0),
        ];
        let result = score(15.0, &exams, &course);
        assert!((result.final_grade - 150.0).abs() < 1e-9);
        assert!(result.meets_minimum);

        let mut reversed = course.clone();
        reversed.requirements.reverse();
        let result = score(15.0, &exams, &reversed);
        assert!((result.final_grade - 150.0).abs() < 1e-9);
        assert!(!result.meets_minimum);
    }

    #[test]
    fn standing_classification() {
        let course = course_ab().with_cutoff(160.0);
        let above = AdmissionResult {
            final_grade: 165.0,
            meets_minimum: true,
            has_required_exams: true,
        };
        let standing = CutoffStanding::evaluate(&above, &course);
        assert_eq!(standing.verdict, Verdict::AboveCutoff);
        assert!((standing.gap.unwrap_or_default() - 5.0).abs() < 1e-9);
        assert!(standing.is_admissible());

        let below = AdmissionResult {
            final_grade: 150.0,
            ..above
        };
        assert_eq!(
            CutoffStanding::evaluate(&below, &course).verdict,
            Verdict::BelowCutoff
        );

        let gated = AdmissionResult {
            meets_minimum: false,
            ..above
        };
        assert_eq!(
            CutoffStanding::evaluate(&gated, &course).verdict,
            Verdict::BelowMinimum
        );

        let missing = CutoffStanding::evaluate(&AdmissionResult::MISSING_EXAMS, &course);
        assert_eq!(missing.verdict, Verdict::MissingExams);
        assert!(missing.gap.is_none());

        let no_cutoff = CutoffStanding::evaluate(&above, &course_ab());
        assert_eq!(no_cutoff.verdict, Verdict::NoCutoff);
    }
}
