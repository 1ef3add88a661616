//! Exit codes for `llmsfetch`.
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Run completed, including runs where some packages had no llms.txt |
//! | 1 | Unexpected failure, such as a write error or HTTP client setup |
//! | 2 | Usage problem: bad flags, missing manifest or config, nothing to fetch |
//!
//! Per-package resolution failures never reach this module; they are
//! printed as result lines and counted in the summary.

use std::fmt;

/// Which kind of failure ended the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Something went wrong outside the user's control (exit code 1).
    Internal = 1,
    /// The invocation or its inputs were wrong (exit code 2).
    Usage = 2,
}

impl ErrorCategory {
    /// Process exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
        })
    }
}

/// An error that has already been classified for the exit code.
#[derive(Debug)]
pub struct CliError {
    /// How the run failed.
    pub category: ErrorCategory,
    /// The error with its context chain.
    pub source: anyhow::Error,
}

impl CliError {
    /// Wrap `source` as an internal failure.
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self {
            category: ErrorCategory::Internal,
            source: source.into(),
        }
    }

    /// Wrap `source` as a usage problem.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self {
            category: ErrorCategory::Usage,
            source: source.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Exit code for a failed run.
///
/// The first [`CliError`] in the chain wins. A core configuration error
/// (malformed config file or bad environment override) counts as usage.
/// Everything else is internal.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| {
            if let Some(cli_err) = cause.downcast_ref::<CliError>() {
                return Some(cli_err.category);
            }
            matches!(
                cause.downcast_ref::<llmsfetch_core::Error>(),
                Some(llmsfetch_core::Error::Config(_))
            )
            .then_some(ErrorCategory::Usage)
        })
        .unwrap_or(ErrorCategory::Internal)
        .exit_code()
}
