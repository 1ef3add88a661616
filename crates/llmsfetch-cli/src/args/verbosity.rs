//! Output verbosity.
//!
//! | Level | stdout | log level |
//! |-------|--------|-----------|
//! | `Quiet` | nothing | `ERROR` |
//! | `Normal` | per-package lines and summary | `WARN` |
//! | `Verbose` | plus the effective options | `DEBUG` |
//!
//! Errors always reach stderr regardless of level.

use std::fmt;
use tracing::Level;

/// Verbosity level for CLI output, ordered `Quiet < Normal < Verbose`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verbosity {
    /// Only errors, on stderr.
    Quiet,
    /// Results and summary (default).
    #[default]
    Normal,
    /// Effective options and cascade diagnostics as well.
    Verbose,
}

impl Verbosity {
    /// Create a Verbosity from the `--quiet` / `--verbose` flags.
    ///
    /// Verbose takes precedence over quiet.
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Whether result lines and the summary are printed.
    #[must_use]
    pub const fn show_results(self) -> bool {
        matches!(self, Self::Normal | Self::Verbose)
    }

    /// Whether verbose details are printed.
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Maximum `tracing` level for this verbosity.
    #[must_use]
    pub const fn log_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}
