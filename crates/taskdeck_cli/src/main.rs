//! Taskdeck CLI entry point.
//!
//! # Responsibility
//! - Parse arguments and hand off to command handlers.
//! - Keep process exit behavior in one place.

use clap::Parser;

mod cli;
mod commands;

fn main() {
    let cli = cli::Cli::parse();
    if let Err(error) = commands::run(cli) {
        eprintln!("taskdeck error: {error:#}");
        std::process::exit(1);
    }
}
