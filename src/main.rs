//! Playlint CLI entry point

use clap::Parser;
use playlint::cli::init::{InitOutcome, run_init};
use playlint::cli::{Cli, Command};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.command.verbose() { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let exit_code = match cli.command {
        Command::Init { force } => match run_init(force) {
            Ok(InitOutcome::Skipped) => {
                println!("playlint.toml already exists. Use --force to overwrite it.");
                0
            }
            Ok(_) => {
                println!("Created playlint.toml.");
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                2
            }
        },
        Command::Check {
            paths,
            format,
            config,
            ..
        } => playlint::cli::check::run_check(&paths, format, config.as_deref(), cli.color),
        Command::List { format, config } => {
            playlint::cli::list::run_list(format, config.as_deref())
        }
    };

    process::exit(exit_code);
}
