//! Configuration module for `admission-sim`

use crate::core::admission::ScoringPolicy;
use crate::core::ranking::RankingWeights;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the application config directory
const DIR_VARIABLE: &str = "$ADMISSION_SIM";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Fallbacks used when a course leaves its weights or minimum unset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight of the secondary average (0–1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_weight: Option<f64>,
    /// Weight of the exam component (0–1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_weight: Option<f64>,
    /// Minimum grade on the 0–200 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_threshold: Option<f64>,
}

/// Course ranking multipliers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Multiplier for AI keyword tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_boost: Option<f64>,
    /// Multiplier for course-name tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_weight: Option<f64>,
    /// Multiplier for course-area tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_weight: Option<f64>,
    /// Share of the score taken by the AI area weight (0–1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_blend: Option<f64>,
    /// Number of courses printed by `rank`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory where relative dataset paths are resolved
    #[serde(default)]
    pub data_dir: String,
    /// Captured recommendation reply used by `rank` when no `--profile` is given
    #[serde(default)]
    pub profile_file: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Scoring fallbacks
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Ranking weights
    #[serde(default)]
    pub ranking: RankingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override data directory
    pub data_dir: Option<String>,
    /// Override profile file
    pub profile_file: Option<String>,
}

/// Every key accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: &[&str] = &[
    "level",
    "file",
    "verbose",
    "secondary_weight",
    "exam_weight",
    "minimum_threshold",
    "keyword_boost",
    "name_weight",
    "area_weight",
    "area_blend",
    "limit",
    "data_dir",
    "profile_file",
];

fn parse_ratio(key: &str, value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if (0.0..=1.0).contains(&v) => Ok(v),
        _ => Err(format!("Invalid value for '{key}': '{value}' (expected 0 to 1)")),
    }
}

fn parse_non_negative(key: &str, value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!("Invalid value for '{key}': '{value}' (expected a non-negative number)")),
    }
}

fn parse_grade(key: &str, value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if (0.0..=200.0).contains(&v) => Ok(v),
        _ => Err(format!("Invalid value for '{key}': '{value}' (expected 0 to 200)")),
    }
}

fn show(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn fill<T: Copy>(slot: &mut Option<T>, default: Option<T>) -> bool {
    if slot.is_none() && default.is_some() {
        *slot = default;
        true
    } else {
        false
    }
}

fn fill_str(slot: &mut String, default: &str) -> bool {
    if slot.is_empty() && !default.is_empty() {
        default.clone_into(slot);
        true
    } else {
        false
    }
}

impl Config {
    /// Get the `$ADMISSION_SIM` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/admissionsim`
    /// - macOS: `~/Library/Application Support/admissionsim`
    /// - Windows: `%APPDATA%\admissionsim`
    #[must_use]
    pub fn get_app_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("admissionsim")
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_app_dir`](Self::get_app_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_app_dir().join(CONFIG_FILE_NAME)
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are unset here and set in `defaults` are copied, so new
    /// fields appear after an upgrade while user settings survive.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = fill_str(&mut self.logging.level, &defaults.logging.level);
        changed |= fill_str(&mut self.logging.file, &defaults.logging.file);

        let scoring = &defaults.scoring;
        changed |= fill(&mut self.scoring.secondary_weight, scoring.secondary_weight);
        changed |= fill(&mut self.scoring.exam_weight, scoring.exam_weight);
        changed |= fill(&mut self.scoring.minimum_threshold, scoring.minimum_threshold);

        let ranking = &defaults.ranking;
        changed |= fill(&mut self.ranking.keyword_boost, ranking.keyword_boost);
        changed |= fill(&mut self.ranking.name_weight, ranking.name_weight);
        changed |= fill(&mut self.ranking.area_weight, ranking.area_weight);
        changed |= fill(&mut self.ranking.area_blend, ranking.area_blend);
        changed |= fill(&mut self.ranking.limit, ranking.limit);

        changed |= fill_str(&mut self.paths.data_dir, &defaults.paths.data_dir);
        changed |= fill_str(&mut self.paths.profile_file, &defaults.paths.profile_file);

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; nothing is written back to disk.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(data_dir) = &overrides.data_dir {
            self.paths.data_dir = Self::expand_variables(data_dir);
        }
        if let Some(profile_file) = &overrides.profile_file {
            self.paths.profile_file = Self::expand_variables(profile_file);
        }
    }

    /// Expand `$ADMISSION_SIM` to the application directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let app_dir = Self::get_app_dir();
            value.replace(DIR_VARIABLE, app_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// `$ADMISSION_SIM` is expanded in path values. Missing fields use their serde
    /// defaults (empty strings, `false`, unset numbers).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_dir = Self::expand_variables(&config.paths.data_dir);
        config.paths.profile_file = Self::expand_variables(&config.paths.profile_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    /// The defaults are compiled into the binary, so this cannot happen at runtime.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, or create it from defaults
    ///
    /// An existing file is merged with defaults (and re-saved if fields were
    /// added). On first run the directory and file are created. Any error falls
    /// back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Same as [`load`](Self::load) for an explicit file path
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save_to(config_file);
                    }
                    return config;
                }
            }
        } else {
            let _ = defaults.save_to(config_file);
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to an explicit file path, creating parent directories
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key (see [`CONFIG_KEYS`])
    ///
    /// Unset numeric values read as an empty string. Returns `None` for unknown keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "secondary_weight" => show(self.scoring.secondary_weight),
            "exam_weight" => show(self.scoring.exam_weight),
            "minimum_threshold" => show(self.scoring.minimum_threshold),
            "keyword_boost" => show(self.ranking.keyword_boost),
            "name_weight" => show(self.ranking.name_weight),
            "area_weight" => show(self.ranking.area_weight),
            "area_blend" => show(self.ranking.area_blend),
            "limit" => show(self.ranking.limit),
            "data_dir" | "data-dir" => self.paths.data_dir.clone(),
            "profile_file" | "profile-file" => self.paths.profile_file.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key
    ///
    /// Values are validated: weights and the blend ratio must lie in [0, 1], the
    /// minimum threshold in [0, 200], boosts must be non-negative and `limit` a
    /// positive integer. Call [`save`](Self::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "secondary_weight" => self.scoring.secondary_weight = Some(parse_ratio(key, value)?),
            "exam_weight" => self.scoring.exam_weight = Some(parse_ratio(key, value)?),
            "minimum_threshold" => self.scoring.minimum_threshold = Some(parse_grade(key, value)?),
            "keyword_boost" => self.ranking.keyword_boost = Some(parse_non_negative(key, value)?),
            "name_weight" => self.ranking.name_weight = Some(parse_non_negative(key, value)?),
            "area_weight" => self.ranking.area_weight = Some(parse_non_negative(key, value)?),
            "area_blend" => self.ranking.area_blend = Some(parse_ratio(key, value)?),
            "limit" => {
                let limit = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| format!("Invalid value for 'limit': '{value}'"))?;
                self.ranking.limit = Some(limit);
            }
            "data_dir" | "data-dir" => self.paths.data_dir = value.to_string(),
            "profile_file" | "profile-file" => self.paths.profile_file = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset a single value to the one in `defaults`. Call [`save`](Self::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "secondary_weight" => self.scoring.secondary_weight = defaults.scoring.secondary_weight,
            "exam_weight" => self.scoring.exam_weight = defaults.scoring.exam_weight,
            "minimum_threshold" => {
                self.scoring.minimum_threshold = defaults.scoring.minimum_threshold;
            }
            "keyword_boost" => self.ranking.keyword_boost = defaults.ranking.keyword_boost,
            "name_weight" => self.ranking.name_weight = defaults.ranking.name_weight,
            "area_weight" => self.ranking.area_weight = defaults.ranking.area_weight,
            "area_blend" => self.ranking.area_blend = defaults.ranking.area_blend,
            "limit" => self.ranking.limit = defaults.ranking.limit,
            "data_dir" | "data-dir" => self.paths.data_dir.clone_from(&defaults.paths.data_dir),
            "profile_file" | "profile-file" => self
                .paths
                .profile_file
                .clone_from(&defaults.paths.profile_file),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the user config file
    ///
    /// The next [`load`](Self::load) recreates it. Succeeds if the file is absent.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Scoring fallbacks, with built-in values for anything unset
    #[must_use]
    pub fn scoring_policy(&self) -> ScoringPolicy {
        let base = ScoringPolicy::default();
        ScoringPolicy {
            secondary_weight: self.scoring.secondary_weight.unwrap_or(base.secondary_weight),
            exam_weight: self.scoring.exam_weight.unwrap_or(base.exam_weight),
            minimum_threshold: self.scoring.minimum_threshold.unwrap_or(base.minimum_threshold),
        }
    }

    /// Ranking multipliers, with built-in values for anything unset
    #[must_use]
    pub fn ranking_weights(&self) -> RankingWeights {
        let base = RankingWeights::default();
        RankingWeights {
            keyword_boost: self.ranking.keyword_boost.unwrap_or(base.keyword_boost),
            name_weight: self.ranking.name_weight.unwrap_or(base.name_weight),
            area_weight: self.ranking.area_weight.unwrap_or(base.area_weight),
            area_blend: self.ranking.area_blend.unwrap_or(base.area_blend),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[scoring]")?;
        for key in ["secondary_weight", "exam_weight", "minimum_threshold"] {
            writeln!(f, "  {key} = {}", self.get(key).unwrap_or_default())?;
        }

        writeln!(f, "\n[ranking]")?;
        for key in ["keyword_boost", "name_weight", "area_weight", "area_blend", "limit"] {
            writeln!(f, "  {key} = {}", self.get(key).unwrap_or_default())?;
        }

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_dir = \"{}\"", self.paths.data_dir)?;
        writeln!(f, "  profile_file = \"{}\"", self.paths.profile_file)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_key_is_readable() {
        let config = Config::from_defaults();
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_some(), "missing key {key}");
        }
        assert!(config.get("token").is_none());
    }

    #[test]
    fn set_validates_numbers() {
        let mut config = Config::default();
        assert!(config.set("exam_weight", "0.65").is_ok());
        assert!(config.set("exam_weight", "1.5").is_err());
        assert!(config.set("minimum_threshold", "250").is_err());
        assert!(config.set("keyword_boost", "-1").is_err());
        assert!(config.set("limit", "0").is_err());
        assert!(config.set("limit", "ten").is_err());
        assert_eq!(config.get("exam_weight").as_deref(), Some("0.65"));
    }

    #[test]
    fn unset_numbers_fall_back_to_built_in_policy() {
        let config = Config::default();
        assert_eq!(config.scoring_policy(), ScoringPolicy::default());
        assert_eq!(config.ranking_weights(), RankingWeights::default());
        assert_eq!(config.get("minimum_threshold").as_deref(), Some(""));
    }
}
