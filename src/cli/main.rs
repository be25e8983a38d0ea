//! Command-line interface entry point for `csgraph`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use cs_amc_graph::config::Config;
use cs_amc_graph::logger::{self, enable_verbose, info, parse_level, Level};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let level = if args.debug_flag {
        Level::Debug
    } else {
        args.log_level
            .map(Level::from)
            .or_else(|| parse_level(&config.logging.level))
            .unwrap_or(Level::Warn)
    };

    if config.logging.verbose {
        enable_verbose();
    }

    let log_path = (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));
    match logger::init(level, log_path.as_deref()) {
        Ok(()) => {
            if let Some(path) = &log_path {
                info!("File logging initialized at: {}", path.display());
            }
        }
        Err(e) => eprintln!("✗ {e}"),
    }

    let result = match args.command {
        Some(Command::Config { subcommand }) => {
            commands::config::run(subcommand, &mut config, &defaults)
        }
        Some(Command::Render { .. }) | None => commands::render::run(&config),
        Some(Command::Summary { tree, .. }) => commands::summary::run(&config, tree),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
