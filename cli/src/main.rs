//! cgv - command-line front end for CLIgen variables.

mod cli;
mod commands;
mod common;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Command};

fn main() -> ExitCode {
    // Install panic handler for user-friendly crash reporting
    common::panic::install_handler();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();
    let global = cli.global();

    tracing::debug!(div_precision = %cli.div_precision, "starting");

    match cli.command {
        Command::Eval(args) => commands::eval::run(args, &global),
        Command::Run(args) => commands::run::run(args, &global),
        Command::Parse(args) => commands::parse::run(args, &global),
        Command::Types => {
            commands::types::run();
            ExitCode::SUCCESS
        }
        Command::Repl => match commands::repl::run(&global) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => common::error::render_and_exit(e, global.no_color),
        },
        Command::Completions(args) => {
            commands::completions::run(args);
            ExitCode::SUCCESS
        }
    }
}
