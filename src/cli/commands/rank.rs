//! Rank command handler

use super::{clip, open_dataset};
use admission_sim::core::catalog::AREAS;
use admission_sim::core::config::Config;
use admission_sim::core::ranking::{rank_with_weights, RankedCourse};
use admission_sim::core::recommendation::{FileProfileSource, RecommendationSource};
use admission_sim::{info, verbose, warn};
use std::path::{Path, PathBuf};

/// Options of the `rank` subcommand
#[derive(Debug, Default)]
pub struct RankOptions {
    /// Query text overriding the questionnaire answers
    pub query: Option<String>,
    /// Captured recommendation reply
    pub profile: Option<PathBuf>,
    /// Ignore the configured profile file
    pub no_profile: bool,
    /// Number of rows to print
    pub limit: Option<usize>,
    /// Print JSON instead of a table
    pub json: bool,
}

impl RankOptions {
    /// Profile file to read: the flag, else the configured one, unless disabled
    fn profile_path(&self, config: &Config) -> Option<PathBuf> {
        if self.no_profile {
            return None;
        }
        self.profile.clone().or_else(|| {
            (!config.paths.profile_file.is_empty())
                .then(|| PathBuf::from(&config.paths.profile_file))
        })
    }
}

/// Rank the dataset's courses for the student.
///
/// # Errors
/// Returns a message when the dataset cannot be loaded
pub fn run(dataset: &Path, options: &RankOptions, config: &Config) -> Result<(), String> {
    let data = open_dataset(dataset, config)?;
    let answers = data.questionnaire.clone().unwrap_or_default();
    let query = options.query.clone().unwrap_or_else(|| data.query_text());

    let profile = options
        .profile_path(config)
        .and_then(|path| FileProfileSource::new(path).recommend(&answers, AREAS));
    if let Some(profile) = &profile {
        verbose!("Profile: {}", profile.summary);
        verbose!("Keywords: {}", profile.keywords.join(", "));
    }

    if query.trim().is_empty() && profile.as_ref().is_none_or(|p| p.is_empty()) {
        warn!("No questionnaire answers, query or profile; every course scores 0");
    }

    let ranked = rank_with_weights(
        &query,
        &data.courses,
        profile.as_ref(),
        &config.ranking_weights(),
    );
    info!("Ranked {} courses", ranked.len());

    let limit = options
        .limit
        .or(config.ranking.limit)
        .unwrap_or(ranked.len());
    let shown = &ranked[..limit.min(ranked.len())];

    if options.json {
        let out = serde_json::to_string_pretty(shown)
            .map_err(|e| format!("Failed to serialize ranking: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    print_table(&data.courses, shown);
    Ok(())
}

fn print_table(courses: &[admission_sim::core::models::Course], ranked: &[RankedCourse]) {
    if ranked.is_empty() {
        println!("No courses to rank.");
        return;
    }

    println!("\n{:>3}  {:<12} {:<32} {:<28} {:>6}", "#", "ID", "COURSE", "AREA", "SCORE");
    for (pos, row) in ranked.iter().enumerate() {
        let (name, area) = courses
            .iter()
            .find(|c| c.id == row.id)
            .map_or(("", ""), |c| (c.name.as_str(), c.area.as_str()));
        println!(
            "{:>3}  {:<12} {:<32} {:<28} {:>6.3}",
            pos + 1,
            clip(&row.id, 12),
            clip(name, 32),
            clip(area, 28),
            row.score
        );
    }
}
