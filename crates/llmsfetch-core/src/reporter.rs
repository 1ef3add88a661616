//! Leveled diagnostics injected into the resolver.
//!
//! The cascade never logs through a process-wide channel directly; it talks to
//! a [`Reporter`] handed to it at construction. [`TracingReporter`] forwards to
//! `tracing`, [`MemoryReporter`] captures messages for assertions.

use std::fmt;
use std::sync::Mutex;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Step-by-step cascade tracing.
    Debug,
    /// Notable progress.
    Info,
    /// Something unexpected but handled.
    Warn,
    /// A failure surfaced to the caller.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Sink for leveled messages about a package or a probed URL.
pub trait Reporter: Send + Sync {
    /// Record `message` about `subject` at `level`.
    fn report(&self, level: Level, subject: &str, message: &str);

    /// Shorthand for [`Level::Debug`].
    fn debug(&self, subject: &str, message: &str) {
        self.report(Level::Debug, subject, message);
    }

    /// Shorthand for [`Level::Info`].
    fn info(&self, subject: &str, message: &str) {
        self.report(Level::Info, subject, message);
    }

    /// Shorthand for [`Level::Warn`].
    fn warn(&self, subject: &str, message: &str) {
        self.report(Level::Warn, subject, message);
    }

    /// Shorthand for [`Level::Error`].
    fn error(&self, subject: &str, message: &str) {
        self.report(Level::Error, subject, message);
    }
}

/// Forwards messages to `tracing` with a `subject` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, level: Level, subject: &str, message: &str) {
        match level {
            Level::Debug => tracing::debug!(subject, "{message}"),
            Level::Info => tracing::info!(subject, "{message}"),
            Level::Warn => tracing::warn!(subject, "{message}"),
            Level::Error => tracing::error!(subject, "{message}"),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _level: Level, _subject: &str, _message: &str) {}
}

/// One captured message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Severity.
    pub level: Level,
    /// Package name or URL the message is about.
    pub subject: String,
    /// Message text.
    pub message: String,
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    records: Mutex<Vec<Record>>,
}

impl MemoryReporter {
    /// An empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages captured so far.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Whether any message at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.records()
            .iter()
            .any(|r| r.level == level && r.message.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, level: Level, subject: &str, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(Record {
                level,
                subject: subject.to_string(),
                message: message.to_string(),
            });
        }
    }
}
