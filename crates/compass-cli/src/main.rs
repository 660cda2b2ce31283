//! Compass CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use compass::CompassError;
use compass_cli::{Args, error_adapter::to_reportable};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Compass");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = compass_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &to_reportable(&err))
            .expect("Writing to String buffer is infallible");

        error!("{writer}");
        process::exit(exit_code(&err));
    }

    info!("Completed successfully");
}

/// Exit status: 2 for denied collisions, 1 for every other failure.
fn exit_code(err: &CompassError) -> i32 {
    match err {
        CompassError::Collisions { count } => {
            eprintln!("compass: {count} overlapping node pair(s), no layout written");
            2
        }
        _ => 1,
    }
}
