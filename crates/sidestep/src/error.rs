//! Error types for Sidestep operations.
//!
//! Placement itself never fails: unavailable metrics are a silent no-op and
//! degenerate geometry is clamped. [`SidestepError`] covers the surfaces
//! around the engine, namely configuration, scene descriptions and export.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// The main error type for Sidestep operations.
#[derive(Debug, Error)]
pub enum SidestepError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid scene: {0}")]
    Scene(String),

    #[error("Export error: {0}")]
    Export(String),
}
