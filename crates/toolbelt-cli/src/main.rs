//! toolbelt CLI
//!
//! Finds tools declared in manifests, plus the built-in ones, and runs them.

mod builtin;
mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{} failed to set up logging: {}", "warning:".yellow().bold(), e);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let context = Context::from_cli(&cli)?;
    tracing::debug!(runner = ?context.runner, "runner ready");

    match cli.command {
        Commands::Run { tool, args } => commands::run_tool(&context.runner, &tool, &args),
        Commands::Task {
            parallel,
            delimiter,
            args,
        } => commands::run_task(&context.runner, parallel, &delimiter, &args),
        Commands::List => commands::run_list(&context.runner),
        Commands::Check => commands::run_check(&context.runner),
    }
}
