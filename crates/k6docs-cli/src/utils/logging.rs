//! Logging initialization and configuration.
//!
//! Log lines go to stderr so stdout carries nothing but documentation.

use anyhow::Result;
use colored::control as color_control;
use is_terminal::IsTerminal;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

/// Initialize the logging subsystem based on CLI flags.
///
/// `--verbose` logs at DEBUG, `--quiet` only logs errors, and the default is
/// WARN.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose, cli.quiet))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Color control: disable when requested, NO_COLOR is set, or stdout is piped
    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if cli.no_color || env_no_color || !std::io::stdout().is_terminal() {
        color_control::set_override(false);
    }
    Ok(())
}

const fn log_level(verbose: bool, quiet: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    }
}
