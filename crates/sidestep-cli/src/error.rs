//! Errors raised by the CLI layer.

use std::{ops::Range, path::PathBuf};

use thiserror::Error;

use sidestep::SidestepError;

/// The error type returned by [`run`](crate::run).
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Sidestep(#[from] SidestepError),

    #[error("Missing file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to parse `{path}`: {message}")]
    Toml {
        path: String,
        src: String,
        message: String,
        span: Option<Range<usize>>,
    },
}

impl CliError {
    /// Wraps a TOML deserialization error, keeping the source text for reporting.
    pub fn toml(path: impl Into<String>, src: impl Into<String>, err: &toml::de::Error) -> Self {
        Self::Toml {
            path: path.into(),
            src: src.into(),
            message: err.message().to_string(),
            span: err.span(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Sidestep(SidestepError::Io(err))
    }
}
