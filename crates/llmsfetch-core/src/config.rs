//! Configuration for llmsfetch.
//!
//! Settings are layered, each layer overriding the previous one:
//!
//! 1. built-in defaults
//! 2. `config.toml` in the platform config directory, or an explicit path
//! 3. `LLMSFETCH_*` environment variables
//! 4. command-line flags (applied by the CLI)
//!
//! ## Example configuration file
//!
//! ```toml
//! [resolve]
//! fallback = "readme"
//! timeout_secs = 15
//! registry = "https://registry.npmjs.org"
//! jobs = 8
//!
//! [output]
//! directory = "docs/llms"
//! filename = "{name}"
//! extension = "txt"
//!
//! [output.sanitizer]
//! space_replacement = "_"
//! slash_replacement = "-"
//! at_replacement = ""
//! ```

use crate::naming::SanitizerOptions;
use crate::registry::DEFAULT_REGISTRY;
use crate::types::FallbackStrategy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides the registry base URL.
pub const ENV_REGISTRY: &str = "LLMSFETCH_REGISTRY";
/// Overrides the request timeout, in seconds.
pub const ENV_TIMEOUT: &str = "LLMSFETCH_TIMEOUT";
/// Overrides the fallback strategy.
pub const ENV_FALLBACK: &str = "LLMSFETCH_FALLBACK";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How packages are resolved.
    pub resolve: ResolveConfig,
    /// Where and how results are written.
    pub output: OutputConfig,
}

/// Resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Strategy applied when no llms.txt is found. Unknown values read as
    /// `none`.
    pub fallback: FallbackStrategy,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Metadata registry base URL.
    pub registry: String,
    /// Packages resolved concurrently.
    pub jobs: usize,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackStrategy::None,
            timeout_secs: 10,
            registry: DEFAULT_REGISTRY.to_string(),
            jobs: 4,
        }
    }
}

impl ResolveConfig {
    /// Timeout as a [`Duration`].
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory files are written to.
    pub directory: PathBuf,
    /// Filename pattern containing `{name}`.
    pub filename: String,
    /// File extension.
    pub extension: String,
    /// Filename sanitizer replacements.
    pub sanitizer: SanitizerOptions,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("docs/llms"),
            filename: "{name}".to_string(),
            extension: "txt".to_string(),
            sanitizer: SanitizerOptions::default(),
        }
    }
}

impl Config {
    /// Load from the platform config directory, falling back to defaults
    /// when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        Self::parse(&content)
    }

    /// Parse TOML configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML or invalid values.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Write the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization or any write fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content).map_err(|e| Error::Config(format!("Failed to write config: {e}")))
    }

    /// Platform location of `config.toml`.
    ///
    /// - Linux: `~/.config/llmsfetch/config.toml`
    /// - macOS: `~/Library/Application Support/dev.llmsfetch.llmsfetch/config.toml`
    /// - Windows: `%APPDATA%\llmsfetch\llmsfetch\config\config.toml`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no home directory can be found.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("dev", "llmsfetch", "llmsfetch")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Apply `LLMSFETCH_*` overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `LLMSFETCH_TIMEOUT` is not a number.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`, keyed by environment variable
    /// name. Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the timeout value is not a number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(registry) = get(ENV_REGISTRY) {
            self.resolve.registry = registry;
        }
        if let Some(timeout) = get(ENV_TIMEOUT) {
            self.resolve.timeout_secs = timeout.trim().parse().map_err(|_| {
                Error::Config(format!("{ENV_TIMEOUT} must be a whole number of seconds, got '{timeout}'"))
            })?;
        }
        if let Some(fallback) = get(ENV_FALLBACK) {
            self.resolve.fallback = FallbackStrategy::lenient(&fallback);
        }
        Ok(())
    }
}
