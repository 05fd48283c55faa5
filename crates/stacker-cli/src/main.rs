//! Stacker CLI
//!
//! Reviews and applies CloudFormation stacks described by a directory of
//! configuration documents.

mod cli;
mod commands;
mod context;
mod error;
mod prompt;
mod render;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use context::Context;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("failed to set tracing subscriber: {e}")))?;
        tracing::debug!(path = %cli.path.display(), "Verbose mode enabled");
    }

    match cli.command {
        Some(command) => commands::dispatch(&Context::new(&cli.path), command),
        None => {
            println!("{} CloudFormation stack manager", "stacker".green().bold());
            println!();
            println!("Run {} for available commands.", "stacker --help".cyan());
            Ok(())
        }
    }
}
