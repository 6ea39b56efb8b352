//! Command-line argument definitions for the Sidestep CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the scene to replay, the configuration
//! file, the random seed, the optional SVG trail and logging verbosity.

use clap::Parser;

/// Replay a scene through the Sidestep placement engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the scene file (TOML)
    #[arg(help = "Path to the scene file")]
    pub scene: String,

    /// Path to write the dodge trail as SVG
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for reproducible trails
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of dodges to simulate when the scene has no event script
    #[arg(short, long, default_value_t = 12)]
    pub dodges: u32,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
