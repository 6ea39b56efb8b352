//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! This module provides the bridge between the CLI's error type and miette's
//! rich diagnostic formatting. TOML errors keep their source text, so the
//! offending value is shown with a label under it.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use sidestep::SidestepError;

use crate::error::CliError;

/// Adapter that renders a [`CliError`] through miette.
pub struct Reportable<'a>(&'a CliError);

impl fmt::Debug for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Sidestep(SidestepError::Io(_)) => "sidestep::io",
            CliError::Sidestep(SidestepError::Config(_)) => "sidestep::config",
            CliError::Sidestep(SidestepError::Scene(_)) => "sidestep::scene",
            CliError::Sidestep(SidestepError::Export(_)) => "sidestep::export",
            CliError::MissingFile(_) => "sidestep::missing_file",
            CliError::Toml { .. } => "sidestep::toml",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Sidestep(SidestepError::Config(_)) => {
                "paddings must be non-negative, jump fractions must lie in (0, 1] and retry_budget is capped"
            }
            CliError::Sidestep(SidestepError::Scene(_)) => {
                "sizes must be non-negative and rectangles need right >= left, bottom >= top"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self.0 {
            CliError::Toml { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let CliError::Toml {
            message,
            span: Some(span),
            ..
        } = self.0
        else {
            return None;
        };

        let label =
            LabeledSpan::new_primary_with_span(Some(message.clone()), SourceSpan::from(span.clone()));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Wrap a [`CliError`] so it can be rendered by miette.
pub fn to_reportable(err: &CliError) -> Reportable<'_> {
    Reportable(err)
}
