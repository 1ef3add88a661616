//! Logging initialization and color control.

use anyhow::Result;
use colored::control as color_control;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

/// Whether colored output is allowed for this run.
///
/// `NO_COLOR` only counts when set to a non-empty value.
pub fn colors_enabled(no_color_flag: bool, no_color_env: Option<&str>) -> bool {
    !no_color_flag && no_color_env.is_none_or(str::is_empty)
}

/// Install a stderr subscriber at the level implied by `-q`/`-v`, so stdout
/// stays reserved for result lines.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let no_color_env = std::env::var("NO_COLOR").ok();
    let colors = colors_enabled(cli.no_color, no_color_env.as_deref());
    if !colors {
        color_control::set_override(false);
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.verbosity().log_level())
        .with_ansi(colors)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
