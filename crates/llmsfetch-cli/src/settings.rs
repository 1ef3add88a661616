//! Effective settings for a run: config file and environment, then flags.

use anyhow::{Context, Result};
use llmsfetch_core::{Config, FallbackStrategy, SanitizerOptions};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::args::Verbosity;
use crate::cli::Cli;
use crate::error::CliError;

/// Everything the fetch command needs, after layering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Strategy when no llms.txt is found.
    pub fallback: FallbackStrategy,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Registry base URL.
    pub registry: String,
    /// Concurrent resolutions.
    pub jobs: usize,
    /// Output directory.
    pub output_dir: PathBuf,
    /// Filename pattern.
    pub filename: String,
    /// File extension.
    pub extension: String,
    /// Filename sanitizer.
    pub sanitizer: SanitizerOptions,
    /// Resolve without writing.
    pub dry_run: bool,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

impl Settings {
    /// Load configuration and apply `cli` on top.
    ///
    /// An explicit `--config` path must exist; the platform default may be
    /// absent.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::usage(anyhow::anyhow!(
                        "config file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                Config::load_from(path)?
            },
            // No home directory means no platform config to read.
            None => match Config::default_path() {
                Ok(path) => Config::load_from(&path)?,
                Err(_) => Config::default(),
            },
        };

        config
            .apply_env()
            .context("invalid environment override")?;
        Ok(Self::from_parts(cli, config))
    }

    /// Apply flags from `cli` over `config`.
    pub fn from_parts(cli: &Cli, config: Config) -> Self {
        let Config { resolve, output } = config;

        let fallback = cli
            .fallback
            .as_deref()
            .map_or(resolve.fallback, parse_fallback_flag);

        let sanitizer = SanitizerOptions {
            space_replacement: cli
                .space_replacement
                .clone()
                .unwrap_or(output.sanitizer.space_replacement),
            slash_replacement: cli
                .slash_replacement
                .clone()
                .unwrap_or(output.sanitizer.slash_replacement),
            at_replacement: cli
                .at_replacement
                .clone()
                .unwrap_or(output.sanitizer.at_replacement),
        };

        Self {
            fallback,
            timeout: cli.timeout.map_or(resolve.timeout(), Duration::from_secs),
            registry: cli.registry.clone().unwrap_or(resolve.registry),
            jobs: cli.jobs.map_or(resolve.jobs, usize::from).max(1),
            output_dir: cli.output.clone().unwrap_or(output.directory),
            filename: cli.filename.clone().unwrap_or(output.filename),
            extension: cli.extension.clone().unwrap_or(output.extension),
            sanitizer,
            dry_run: cli.dry_run,
            verbosity: cli.verbosity(),
        }
    }

    /// Lines describing the effective options, for `--verbose`.
    pub fn describe(&self) -> Vec<String> {
        vec![
            "Running with options:".to_string(),
            format!("  Output directory: {}", self.output_dir.display()),
            format!("  Filename pattern: {}.{}", self.filename, self.extension),
            format!("  Fallback: {}", self.fallback),
            format!("  Registry: {}", self.registry),
            format!("  Timeout: {}s", self.timeout.as_secs()),
            format!("  Jobs: {}", self.jobs),
            format!("  Dry run: {}", self.dry_run),
        ]
    }
}

/// Parse `--fallback`, warning on and ignoring unknown values.
fn parse_fallback_flag(value: &str) -> FallbackStrategy {
    value.parse().unwrap_or_else(|_| {
        warn!(
            "Unknown fallback strategy '{value}', using 'none' (expected one of: {})",
            FallbackStrategy::VARIANTS.join(", ")
        );
        FallbackStrategy::None
    })
}
