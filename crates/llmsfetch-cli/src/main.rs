//! llmsfetch - fetch llms.txt documentation for npm packages

use colored::Colorize;
use std::process::ExitCode;

use llmsfetch_cli::error::exit_code_from_error;

#[tokio::main]
async fn main() -> ExitCode {
    match llmsfetch_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
