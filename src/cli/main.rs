//! Command-line interface entry point for `admissionsim`

mod args;
mod commands;

use admission_sim::core::config::Config;
use admission_sim::info;
use admission_sim::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use args::{Cli, Command};
use clap::Parser;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let outcome = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
            Ok(())
        }
        Command::Average { dataset } => commands::average::run(&dataset, &config),
        Command::Score {
            dataset,
            course,
            search,
            areas,
            districts,
            institution_type,
            exam_codes,
            only_qualified,
            json,
        } => {
            let filter = admission_sim::core::catalog::CourseFilter {
                search,
                areas,
                districts,
                institution_type: institution_type.map(Into::into),
                exam_codes,
                only_qualified,
            };
            commands::score::run(&dataset, course.as_deref(), &filter, json, &config)
        }
        Command::Rank {
            dataset,
            query,
            profile,
            no_profile,
            limit,
            json,
        } => {
            let options = commands::rank::RankOptions {
                query,
                profile,
                no_profile,
                limit,
                json,
            };
            commands::rank::run(&dataset, &options, &config)
        }
    };

    if let Err(e) = outcome {
        admission_sim::error!("{e}");
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}
