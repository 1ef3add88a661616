//! # Command-line interface
//!
//! `llmsfetch` takes package names, or reads them from a `package.json`, and
//! writes each package's llms.txt into an output directory.
//!
//! ```bash
//! # Explicit packages
//! llmsfetch zod @tanstack/react-query
//!
//! # Production dependencies of ./package.json, README substitutes allowed
//! llmsfetch --deps prod --fallback readme
//!
//! # Preview only
//! llmsfetch --dry-run -o vendor/llms -e md
//! ```
//!
//! Options left unset fall back to the config file, then built-in defaults.

use clap::Parser;
use std::path::PathBuf;

use crate::args::Verbosity;

/// Fetch llms.txt documentation for npm packages
#[derive(Parser, Clone, Debug)]
#[command(name = "llmsfetch")]
#[command(version)]
#[command(about = "Fetch llms.txt documentation for npm packages", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Package names to fetch; when empty, dependencies are read from the manifest
    #[arg(value_name = "PACKAGES")]
    pub packages: Vec<String>,

    /// Path to the package.json to read dependencies from
    #[arg(short = 'p', long = "package", value_name = "PATH", default_value = "./package.json")]
    pub package_path: PathBuf,

    /// Dependency types to include: prod, dev, peer, optional, all
    #[arg(short = 'd', long, value_name = "LIST", default_value = "all")]
    pub deps: String,

    /// Output directory [default: docs/llms]
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Filename pattern; `{name}` is replaced by the package name [default: {name}]
    #[arg(short = 'f', long, value_name = "PATTERN")]
    pub filename: Option<String>,

    /// File extension [default: txt]
    #[arg(short = 'e', long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Fallback when no llms.txt exists: none, readme, empty, skip [default: none]
    #[arg(long, value_name = "STRATEGY")]
    pub fallback: Option<String>,

    /// Resolve packages but do not write any files
    #[arg(long)]
    pub dry_run: bool,

    /// Only show errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show resolution details
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Replacement for spaces in filenames [default: _]
    #[arg(long, value_name = "STR")]
    pub space_replacement: Option<String>,

    /// Replacement for `/` in filenames [default: -]
    #[arg(long, value_name = "STR")]
    pub slash_replacement: Option<String>,

    /// Replacement for a leading `@` in filenames [default: empty]
    #[arg(long, value_name = "STR")]
    pub at_replacement: Option<String>,

    /// Package registry base URL [default: https://registry.npmjs.org]
    #[arg(long, value_name = "URL", env = "LLMSFETCH_REGISTRY")]
    pub registry: Option<String>,

    /// Per-request timeout in seconds [default: 10]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Packages resolved concurrently [default: 4]
    #[arg(short = 'j', long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Configuration file (overrides the platform default). Also via `LLMSFETCH_CONFIG`.
    #[arg(long, value_name = "FILE", env = "LLMSFETCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    /// Verbosity selected by `--quiet` / `--verbose`.
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
