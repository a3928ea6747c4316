//! Average command handler

use super::open_dataset;
use admission_sim::core::average::internal_average;
use admission_sim::core::config::Config;
use admission_sim::verbose;
use std::path::Path;

/// Print the final classification, internal average and secondary average.
///
/// # Errors
/// Returns a message when the dataset cannot be loaded
pub fn run(dataset: &Path, config: &Config) -> Result<(), String> {
    let data = open_dataset(dataset, config)?;
    let student = &data.student;

    verbose!(
        "{} grades and {} exams for track {}",
        student.grades().len(),
        student.exams().len(),
        student.course_group.label()
    );

    println!("\n=== Averages ({}) ===\n", student.course_group.label());
    println!("  Final classification (CFA): {:>6.1}", student.classification());
    println!("  Internal average:           {:>6.2}", internal_average(student.grades()));
    println!("  Secondary average:          {:>6.2}", student.secondary_average());
    println!(
        "  On the 0-200 scale:         {:>6.1}",
        student.secondary_average() * 10.0
    );
    Ok(())
}
