//! Sidestep CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use sidestep_cli::{Args, error_adapter::to_reportable};

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

    info!(log_level:?; "Starting Sidestep");
    debug!(args:?; "Parsed arguments");

    match sidestep_cli::run(&args) {
        Ok(summary) => {
            println!("{summary}");
            info!("Completed successfully");
        }
        Err(err) => {
            let mut writer = String::new();
            miette::GraphicalReportHandler::new()
                .render_report(&mut writer, &to_reportable(&err))
                .expect("Writing to String buffer is infallible");
            error!("{writer}");

            process::exit(1);
        }
    }
}
