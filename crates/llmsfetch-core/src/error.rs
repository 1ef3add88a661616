//! Error types for llmsfetch-core operations.
//!
//! Only one failure escapes the resolution cascade: [`Error::MetadataUnavailable`].
//! Transport failures and rejected content are absorbed by the stage that hit
//! them and simply advance the cascade to its next candidate. The remaining
//! variants surface from the ambient parts of the crate (configuration,
//! manifest loading, client construction).
//!
//! ```rust
//! use llmsfetch_core::Error;
//!
//! let err = Error::metadata_unavailable("left-pad", "registry returned 404");
//! assert_eq!(err.category(), "metadata_unavailable");
//! assert!(!err.is_recoverable());
//! ```

use thiserror::Error;

/// The main error type for llmsfetch-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Package metadata could not be obtained.
    ///
    /// Raised when the registry does not know the package, answers with a
    /// non-success status, or returns a body that cannot be decoded. This is
    /// the only error the resolution engine propagates; it aborts resolution
    /// for that one package and leaves others untouched.
    #[error("Metadata unavailable for '{package}': {reason}")]
    MetadataUnavailable {
        /// Package whose metadata was requested.
        package: String,
        /// Human-readable cause.
        reason: String,
    },

    /// HTTP client or request failure reported by `reqwest`.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request could not be completed (connection refused, timeout, bad URL).
    ///
    /// Used by fetch implementations that are not backed by `reqwest`.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Response content was rejected as documentation.
    ///
    /// Built from a rejected [`Verdict`](crate::Verdict) by
    /// [`ContentValidator::check`](crate::ContentValidator::check).
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Build a [`Error::MetadataUnavailable`] for `package`.
    pub fn metadata_unavailable(package: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MetadataUnavailable {
            package: package.into(),
            reason: reason.into(),
        }
    }

    /// Check if the error might go away on a later attempt.
    ///
    /// Timeouts and connection failures are recoverable; malformed input and
    /// unknown packages are not. The cascade itself never retries, but batch
    /// drivers may use this to decide whether to re-run a package.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Transport(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a stable string identifier.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::MetadataUnavailable { .. } => "metadata_unavailable",
            Self::Network(_) | Self::Transport(_) => "transport",
            Self::InvalidContent(_) => "invalid_content",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
