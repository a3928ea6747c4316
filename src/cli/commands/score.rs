//! Score command handler

use super::{clip, open_dataset};
use admission_sim::core::admission::{score_catalog, CourseScore};
use admission_sim::core::catalog::CourseFilter;
use admission_sim::core::config::Config;
use admission_sim::core::models::Course;
use admission_sim::{debug, info};
use std::path::Path;

/// Score the student against every course that passes the filter.
///
/// # Arguments
/// * `dataset` - Path to the TOML dataset
/// * `course_id` - Restrict to a single course
/// * `filter` - Catalog filter applied before scoring
/// * `json` - Print JSON instead of a table
/// * `config` - Supplies the scoring policy
///
/// # Errors
/// Returns a message when the dataset cannot be loaded or the course id is unknown
pub fn run(
    dataset: &Path,
    course_id: Option<&str>,
    filter: &CourseFilter,
    json: bool,
    config: &Config,
) -> Result<(), String> {
    let data = open_dataset(dataset, config)?;
    let held: Vec<&str> = data.student.exam_codes().collect();

    let courses: Vec<Course> = match course_id {
        Some(id) => {
            let course = data
                .course(id)
                .ok_or_else(|| format!("Unknown course id: '{id}'"))?;
            vec![course.clone()]
        }
        None => filter.apply(&data.courses, &held).into_iter().cloned().collect(),
    };
    debug!(
        "{} of {} courses selected for scoring",
        courses.len(),
        data.courses.len()
    );

    let policy = config.scoring_policy();
    let rows = score_catalog(&data.student.profile(), &courses, &policy);
    info!("Scored {} courses", rows.len());

    if json {
        let out = serde_json::to_string_pretty(&rows)
            .map_err(|e| format!("Failed to serialize results: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    print_table(&courses, &rows);
    Ok(())
}

fn print_table(courses: &[Course], rows: &[CourseScore]) {
    if rows.is_empty() {
        println!("No courses match.");
        return;
    }

    println!(
        "\n{:<12} {:<32} {:>7} {:>5} {:>7} {:>7}  {}",
        "ID", "COURSE", "SCORE", "MIN", "CUTOFF", "GAP", "STANDING"
    );
    for (course, row) in courses.iter().zip(rows) {
        let score = if row.result.has_required_exams {
            format!("{:.1}", row.result.final_grade)
        } else {
            "-".to_string()
        };
        let minimum = if row.result.meets_minimum { "yes" } else { "no" };
        let cutoff = course
            .last_admitted_score
            .map_or_else(|| "-".to_string(), |c| format!("{c:.1}"));
        let gap = row
            .standing
            .gap
            .map_or_else(|| "-".to_string(), |g| format!("{g:+.1}"));

        println!(
            "{:<12} {:<32} {:>7} {:>5} {:>7} {:>7}  {}",
            clip(&course.id, 12),
            clip(&course.name, 32),
            score,
            minimum,
            cutoff,
            gap,
            row.standing.verdict.label()
        );
    }

    let admissible = rows.iter().filter(|r| r.standing.is_admissible()).count();
    println!("\n{admissible} of {} courses at or above last cutoff", rows.len());
}
