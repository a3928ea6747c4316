//! Secondary-school averages
//!
//! Two aggregates are derived from a student's records:
//!
//! - the **classification** (CFA): each subject's year grades are averaged and
//!   rounded to an integer *before* the cross-subject mean is taken.
//! - the **secondary average** used as the scorer input: the plain mean of all
//!   subject grades, blended with the student's best exam results.

use crate::core::models::{CourseGroup, ExamRecord, SubjectGrade};

/// Share of the blend taken by the exam average when two or more exams exist
pub const TWO_EXAM_BLEND: f64 = 0.30;

/// Share of the blend taken by the exam grade when exactly one exam exists
pub const ONE_EXAM_BLEND: f64 = 0.15;

/// Round to the nearest integer, halves upward.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal place, halves upward.
pub(crate) fn round1(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// Final classification (CFA) from subject grades.
///
/// Subjects are grouped by name; a subject's value is the mean of its recorded
/// years rounded to an integer. Subjects whose rounded value is 0 carry no data
/// and are dropped. The remaining values are averaged and rounded to one decimal.
/// Returns 0 when no subject contributes.
///
/// # Examples
/// ```
/// use admission_sim::core::average::aggregate;
/// use admission_sim::core::models::SubjectGrade;
///
/// let grades = vec![
///     SubjectGrade::new("Física e Química A", 10, 14.0),
///     SubjectGrade::new("Física e Química A", 11, 15.0),
///     SubjectGrade::new("Português", 12, 12.0),
/// ];
/// // (round(14.5) + 12) / 2
/// assert!((aggregate(&grades) - 13.5).abs() < 1e-9);
/// ```
#[must_use]
pub fn aggregate(grades: &[SubjectGrade]) -> f64 {
    // (subject, sum, count) in first-appearance order
    let mut subjects: Vec<(&str, f64, usize)> = Vec::new();
    for grade in grades {
        match subjects
            .iter_mut()
            .find(|(name, _, _)| *name == grade.subject_name)
        {
            Some((_, sum, count)) => {
                *sum += grade.grade;
                *count += 1;
            }
            None => subjects.push((&grade.subject_name, grade.grade, 1)),
        }
    }

    let per_subject: Vec<f64> = subjects
        .iter()
        .map(|&(_, sum, count)| round_half_up(sum / count as f64))
        .filter(|&value| value != 0.0)
        .collect();

    if per_subject.is_empty() {
        return 0.0;
    }

    let total: f64 = per_subject.iter().sum();
    round1(total / per_subject.len() as f64)
}

/// Classification for a student's track.
///
/// Professional-track students are classified by the average their course
/// reports (0 when absent); every other track uses [`aggregate`].
#[must_use]
pub fn classification_for_group(
    group: CourseGroup,
    grades: &[SubjectGrade],
    professional_average: Option<f64>,
) -> f64 {
    match group {
        CourseGroup::Profissional => professional_average.unwrap_or(0.0),
        _ => aggregate(grades),
    }
}

/// Mean of every subject grade across all years; 0 when there are none.
#[must_use]
pub fn internal_average(grades: &[SubjectGrade]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    grades.iter().map(|g| g.grade).sum::<f64>() / grades.len() as f64
}

/// Secondary average (0–20) used as the admission scorer input.
///
/// Starts from [`internal_average`]. With two or more exams, the mean of the two
/// best (brought to the 0–20 scale) takes a 30% share; with exactly one exam it
/// takes 15%; with none the internal average is returned unchanged. A student
/// with no subject grades has no secondary average and gets 0.
#[must_use]
pub fn secondary_average(grades: &[SubjectGrade], exams: &[ExamRecord]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    let internal = internal_average(grades);

    let mut best: Vec<f64> = exams.iter().map(|e| e.grade).collect();
    best.sort_by(|a, b| b.total_cmp(a));

    match best.as_slice() {
        [] => internal,
        [only] => internal.mul_add(1.0 - ONE_EXAM_BLEND, only / 10.0 * ONE_EXAM_BLEND),
        [first, second, ..] => {
            let exam_avg = (first + second) / 2.0 / 10.0;
            internal.mul_add(1.0 - TWO_EXAM_BLEND, exam_avg * TWO_EXAM_BLEND)
        }
    }
}
