//! Result lines and the end-of-run summary.
//!
//! Lines are built as plain text and colored only when printed, so their
//! wording can be tested independently of terminal settings.

use colored::Colorize;
use llmsfetch_core::{FallbackType, FetchResult};
use std::fmt;

use crate::args::Verbosity;

/// What happened to one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOutcome {
    /// A real llms.txt was found.
    Found {
        /// Where it came from.
        location: String,
    },
    /// A substitute was used.
    Fallback {
        /// Kind of substitute.
        kind: FallbackType,
    },
    /// Nothing was found.
    NotFound,
    /// Resolution failed outright.
    Failed {
        /// Error text.
        error: String,
    },
}

impl PackageOutcome {
    /// Outcome for a resolved result.
    pub fn from_result(result: &FetchResult) -> Self {
        match result.fallback_type() {
            Some(kind) => Self::Fallback { kind },
            None => Self::Found {
                location: result.location().to_string(),
            },
        }
    }

    /// Whether the package counts as a success.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Found { .. } | Self::Fallback { .. })
    }

    /// The result line for `name`, uncolored.
    pub fn line(&self, name: &str) -> String {
        match self {
            Self::Found { location } => format!("✅ {name}: Found llms.txt at {location}"),
            Self::Fallback { kind } => format!("⚠️ {name}: Using {kind} fallback"),
            Self::NotFound => format!("❌ {name}: No llms.txt found"),
            Self::Failed { error } => format!("❌ {name}: {error}"),
        }
    }
}

/// Running totals for the summary block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Packages processed.
    pub total: usize,
    /// Packages with a real llms.txt or a substitute.
    pub success: usize,
    /// Successes that were substitutes.
    pub fallback: usize,
}

impl Summary {
    /// Count one outcome.
    pub const fn record(&mut self, outcome: &PackageOutcome) {
        self.total += 1;
        match outcome {
            PackageOutcome::Found { .. } => self.success += 1,
            PackageOutcome::Fallback { .. } => {
                self.success += 1;
                self.fallback += 1;
            },
            PackageOutcome::NotFound | PackageOutcome::Failed { .. } => {},
        }
    }

    /// Packages without any result.
    pub const fn failed(&self) -> usize {
        self.total - self.success
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Summary ---")?;
        writeln!(f, "Total packages: {}", self.total)?;
        writeln!(
            f,
            "Success: {} (including {} fallback)",
            self.success, self.fallback
        )?;
        write!(f, "Failed: {}", self.failed())
    }
}

/// Writes user-facing lines to stdout according to verbosity.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    verbosity: Verbosity,
}

impl Printer {
    /// A printer for `verbosity`.
    pub const fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Plain informational line.
    pub fn info(&self, line: &str) {
        if self.verbosity.show_results() {
            println!("{line}");
        }
    }

    /// Line shown only with `--verbose`.
    pub fn detail(&self, line: &str) {
        if self.verbosity.is_verbose() {
            println!("{}", line.dimmed());
        }
    }

    /// Result line for one package.
    pub fn outcome(&self, name: &str, outcome: &PackageOutcome) {
        if !self.verbosity.show_results() {
            return;
        }
        let line = outcome.line(name);
        match outcome {
            PackageOutcome::Found { .. } => println!("{}", line.green()),
            PackageOutcome::Fallback { .. } => println!("{}", line.yellow()),
            PackageOutcome::NotFound | PackageOutcome::Failed { .. } => {
                println!("{}", line.red());
            },
        }
    }

    /// The summary block, preceded by a blank line.
    pub fn summary(&self, summary: &Summary) {
        if self.verbosity.show_results() {
            println!();
            println!("{}", summary.to_string().bold());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let found = PackageOutcome::Found {
            location: "https://zod.dev/llms.txt".to_string(),
        };
        assert_eq!(found.line("zod"), "✅ zod: Found llms.txt at https://zod.dev/llms.txt");
        assert_eq!(
            PackageOutcome::Fallback {
                kind: FallbackType::Readme
            }
            .line("lodash"),
            "⚠️ lodash: Using readme fallback"
        );
        assert_eq!(PackageOutcome::NotFound.line("x"), "❌ x: No llms.txt found");
        assert_eq!(
            PackageOutcome::Failed {
                error: "boom".to_string()
            }
            .line("y"),
            "❌ y: boom"
        );
    }

    #[test]
    fn test_from_result() {
        let found = FetchResult::found("https://a.dev/llms.txt", "# A");
        assert!(matches!(PackageOutcome::from_result(&found), PackageOutcome::Found { .. }));

        let empty = FetchResult::fallback("fallback:empty", "# a", FallbackType::Empty).unwrap();
        assert_eq!(
            PackageOutcome::from_result(&empty),
            PackageOutcome::Fallback {
                kind: FallbackType::Empty
            }
        );
    }

    #[test]
    fn test_summary_counts_and_render() {
        let mut summary = Summary::default();
        summary.record(&PackageOutcome::Found {
            location: "u".to_string(),
        });
        summary.record(&PackageOutcome::Fallback {
            kind: FallbackType::Empty,
        });
        summary.record(&PackageOutcome::NotFound);
        summary.record(&PackageOutcome::Failed {
            error: "e".to_string(),
        });

        assert_eq!(summary.total, 4);
        assert_eq!(summary.success, 2);
        assert_eq!(summary.fallback, 1);
        assert_eq!(summary.failed(), 2);
        assert_eq!(
            summary.to_string(),
            "--- Summary ---\nTotal packages: 4\nSuccess: 2 (including 1 fallback)\nFailed: 2"
        );
    }
}
