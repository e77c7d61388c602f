//! Monoforge CLI - build orchestration for multi-component repositories
//!
//! Entry point for the monoforge command-line application.

use clap::Parser;

use monoforge::cli::output::{display_error, OutputConfig};
use monoforge::cli::Cli;
use monoforge::config::defaults::FAILURE_EXIT_CODE;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    OutputConfig::new(cli.quiet, cli.verbose).init_tracing();

    if let Err(e) = cli.run().await {
        display_error(&e);
        std::process::exit(FAILURE_EXIT_CODE);
    }
}
