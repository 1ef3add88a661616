//! llmsfetch CLI - fetch llms.txt documentation for npm packages
//!
//! Parses arguments, installs logging, and runs the fetch command. The binary
//! in `main.rs` only maps the returned error to an exit code.

use anyhow::Result;
use clap::Parser;

pub mod args;
mod cli;
mod commands;
pub mod error;
mod output;
mod settings;
mod utils;

use crate::cli::Cli;
use crate::utils::initialize_logging;

/// Execute the llmsfetch CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if logging setup fails, the package list cannot be
/// built, or results cannot be written.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    commands::fetch(&cli).await
}
