//! k6docs CLI - Browse k6 documentation from the terminal
//!
//! This is the main entry point for the k6docs command-line interface.
//! Command implementations live in [`commands`]; formatting helpers in
//! [`output`].

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use k6docs_core::Config;
use std::io;
use std::process::ExitCode;

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use cli::{Cli, Commands};
use commands::Session;
use error::{ErrorCategory, exit_code_from_error};
use output::{OutputFormat, OutputSink};
use utils::initialize_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = initialize_logging(&cli) {
        report(&err);
        return ErrorCategory::Internal.as_exit_code();
    }

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        // Pipeline truncation (`k6docs --all | head`) is not a failure
        Err(err) if is_broken_pipe(&err) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    match &cli.command {
        Some(Commands::Prepare {
            docs_path,
            k6_version,
            output_dir,
        }) => {
            let mut stdout = io::stdout().lock();
            commands::prepare_bundle(docs_path, k6_version, output_dir.as_deref(), &config, &mut stdout)
        },
        Some(Commands::Search { term }) => {
            let session = open_session(cli, &config)?;
            let mut stdout = io::stdout().lock();
            commands::search(&session, &term.join(" "), cli.format, &mut stdout)
        },
        Some(Commands::BestPractices) => {
            let session = open_session(cli, &config)?;
            render(&config, |out| commands::print_best_practices(&session, out))
        },
        None => {
            let session = open_session(cli, &config)?;
            if cli.list && cli.format == OutputFormat::Json {
                let mut stdout = io::stdout().lock();
                return commands::list_topics(&session.index, &cli.topic, cli.format, &mut stdout);
            }
            render(&config, |out| {
                if cli.all {
                    commands::print_all(&session, out)
                } else if cli.list {
                    commands::list_topics(&session.index, &cli.topic, cli.format, out)
                } else if cli.topic.is_empty() {
                    commands::print_toc(&session.index, &session.version, out)
                } else {
                    commands::show_topic(&session, &cli.topic, out)
                }
            })
        },
    }
}

fn open_session(cli: &Cli, config: &Config) -> Result<Session> {
    Session::open(cli.docs_version.as_deref(), cli.cache_dir.as_deref(), config)
}

/// Run `f` against stdout, through the configured renderer when stdout is a
/// terminal.
fn render(config: &Config, f: impl FnOnce(&mut dyn io::Write) -> Result<()>) -> Result<()> {
    let mut sink = OutputSink::new(config.renderer_command());
    f(&mut sink)?;
    sink.finish()?;
    Ok(())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|e| e.kind() == io::ErrorKind::BrokenPipe)
}

fn report(err: &anyhow::Error) {
    eprintln!("{} {err:#}", "Error:".red().bold());

    if let Some(k6docs_core::Error::NotCached { version, .. }) = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<k6docs_core::Error>())
    {
        eprintln!(
            "{} build it with `k6docs prepare --docs-path <k6-docs checkout> --k6-version {version}`",
            "hint:".yellow()
        );
    }
}
