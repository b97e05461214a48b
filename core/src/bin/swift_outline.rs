//! swift-outline binary - outline Swift sources from the command line.
//!
//! Shares its implementation with the `swift_outline` library; this is
//! only argument parsing and process exit handling.

use clap::Parser;
use swift_outline::cli::{run, Cli};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
