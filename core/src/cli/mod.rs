pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "swift-outline")]
#[command(author, version, about = "Summarize Swift sources into compact outlines", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the structural outline of a single Swift file
    Outline {
        /// Path to the Swift source file
        file: PathBuf,
    },

    /// Outline every Swift file under a directory
    Map {
        /// Root directory (defaults to the current directory)
        path: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Outline { file } => commands::outline::run(&file, cli.format),
        Commands::Map { path } => commands::map::run(path.as_deref(), cli.format),
    }
}
