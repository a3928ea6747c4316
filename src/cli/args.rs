//! CLI argument definitions for `admissionsim`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use admission_sim::core::config::ConfigOverrides;
use admission_sim::core::models::InstitutionType;
use admission_sim::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Institution type filter
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum InstitutionArg {
    /// Public institutions
    #[value(alias = "publica")]
    Public,
    /// Private institutions
    #[value(alias = "privada")]
    Private,
}

impl From<InstitutionArg> for InstitutionType {
    fn from(arg: InstitutionArg) -> Self {
        match arg {
            InstitutionArg::Public => Self::Public,
            InstitutionArg::Private => Self::Private,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `exam_weight`, `data_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show the student's final classification and secondary average.
    Average {
        /// Path to a TOML dataset (relative paths also resolve against `data_dir`)
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,
    },
    /// Compute admission scores against the dataset's courses.
    ///
    /// Prints one row per course with the best admission score, whether the
    /// minimum is met, and how it compares with the last admitted score.
    Score {
        /// Path to a TOML dataset
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// Score a single course by id
        #[arg(long, value_name = "ID")]
        course: Option<String>,

        /// Case-insensitive text matched against course name or institution
        #[arg(short, long, value_name = "TEXT")]
        search: Option<String>,

        /// Keep only courses in these areas
        #[arg(long = "area", value_name = "AREA")]
        areas: Vec<String>,

        /// Keep only courses in these districts
        #[arg(long = "district", value_name = "DISTRICT")]
        districts: Vec<String>,

        /// Keep only public or private institutions
        #[arg(long = "type", value_enum)]
        institution_type: Option<InstitutionArg>,

        /// Keep only courses requiring at least one of these exam codes
        #[arg(long = "exam", value_name = "CODE")]
        exam_codes: Vec<String>,

        /// Keep only courses whose every required exam the student holds
        #[arg(long)]
        only_qualified: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rank the dataset's courses against the student's interests.
    Rank {
        /// Path to a TOML dataset
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// Query text (defaults to the dataset questionnaire answers)
        #[arg(short, long, value_name = "TEXT")]
        query: Option<String>,

        /// Captured recommendation reply (JSON or NDJSON stream); defaults to config `profile_file`
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Ignore any configured profile file
        #[arg(long, conflicts_with = "profile")]
        no_profile: bool,

        /// Number of courses to print (defaults to config `limit`)
        #[arg(short = 'n', long, value_name = "N")]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "admissionsim",
    about = "Portuguese higher-education admission simulator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config data directory
    #[arg(long = "config-data-dir", value_name = "DIR")]
    pub config_data_dir: Option<PathBuf>,

    /// Override config data directory (short form)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override config profile file
    #[arg(long = "config-profile-file", value_name = "FILE")]
    pub config_profile_file: Option<PathBuf>,

    /// Override config profile file (short form)
    #[arg(long = "profile-file", value_name = "FILE")]
    pub profile_file: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--data-dir`) take precedence over long-form flags
    /// (e.g., `--config-data-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            data_dir: path_string(self.data_dir.as_ref())
                .or_else(|| path_string(self.config_data_dir.as_ref())),
            profile_file: path_string(self.profile_file.as_ref())
                .or_else(|| path_string(self.config_profile_file.as_ref())),
        }
    }
}
