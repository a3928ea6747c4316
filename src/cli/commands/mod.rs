//! CLI command handlers for `admissionsim`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod average;
pub mod config;
pub mod rank;
pub mod score;

use admission_sim::core::config::Config;
use admission_sim::core::dataset::{load_dataset, Dataset};
use admission_sim::{error, info};
use std::path::{Path, PathBuf};

/// Resolve a dataset argument: existing paths are used as given, other
/// relative paths are looked up under the configured `data_dir`.
fn resolve_dataset(path: &Path, config: &Config) -> PathBuf {
    if path.exists() || path.is_absolute() || config.paths.data_dir.is_empty() {
        return path.to_path_buf();
    }
    let candidate = Path::new(&config.paths.data_dir).join(path);
    if candidate.exists() {
        candidate
    } else {
        path.to_path_buf()
    }
}

/// Load the dataset named on the command line
fn open_dataset(path: &Path, config: &Config) -> Result<Dataset, String> {
    let resolved = resolve_dataset(path, config);
    let dataset = load_dataset(&resolved).map_err(|e| {
        error!("Failed to load dataset {}: {e}", resolved.display());
        format!("Failed to load {}: {e}", resolved.display())
    })?;
    info!(
        "Dataset loaded: {} ({} courses)",
        resolved.display(),
        dataset.courses.len()
    );
    Ok(dataset)
}

/// Truncate text to `width` characters for table columns
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}
