//! CLI argument parsing using clap

use crate::config::{ColorOption, OutputFormat as ConfigOutputFormat};
use clap::{Parser, Subcommand, ValueEnum};

/// Output format for playlint commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

impl From<ConfigOutputFormat> for OutputFormat {
    fn from(format: ConfigOutputFormat) -> Self {
        match format {
            ConfigOutputFormat::Human => OutputFormat::Human,
            ConfigOutputFormat::Jsonl => OutputFormat::Jsonl,
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

impl From<ColorOption> for ColorChoice {
    fn from(color: ColorOption) -> Self {
        match color {
            ColorOption::Auto => ColorChoice::Auto,
            ColorOption::Always => ColorChoice::Always,
            ColorOption::Never => ColorChoice::Never,
        }
    }
}

impl From<ColorChoice> for termcolor::ColorChoice {
    fn from(color: ColorChoice) -> Self {
        match color {
            ColorChoice::Auto => termcolor::ColorChoice::Auto,
            ColorChoice::Always => termcolor::ColorChoice::Always,
            ColorChoice::Never => termcolor::ColorChoice::Never,
        }
    }
}

/// Playlint CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "playlint")]
#[command(about = "Policy lint rules for Ansible playbooks")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (defaults to the [output] setting, then auto)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,
}

/// Available playlint subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lint playbooks and task files
    Check {
        /// Paths to check (defaults to current directory)
        #[arg(default_value = ".")]
        paths: Vec<String>,

        /// Output format (defaults to the [output] setting)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Configuration file (defaults to ./playlint.toml when present)
        #[arg(short, long)]
        config: Option<String>,

        /// Enable debug logging on stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// List all enabled rules
    List {
        /// Output format (defaults to the config's [output] format)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Configuration file (defaults to ./playlint.toml when present)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Write a default playlint.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Command {
    /// Whether debug logging was requested
    pub fn verbose(&self) -> bool {
        matches!(self, Command::Check { verbose: true, .. })
    }
}
