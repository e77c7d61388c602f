//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use commands::Commands;

/// Monoforge - build orchestration for multi-component repositories
///
/// With no command, installs dependencies, generates manifests, bootstraps
/// the monorepo and builds every component.
#[derive(Parser, Debug)]
#[command(name = "monoforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true, env = "MONOFORGE_ROOT")]
    pub root: Option<PathBuf>,

    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let current_dir =
            std::env::current_dir().context("Failed to determine current directory")?;
        // Relative roots (`--root ../..` from a component) are anchored here
        // so spawned tools see absolute paths.
        let root = match self.root {
            Some(root) => current_dir.join(root),
            None => current_dir,
        };
        self.command.unwrap_or(Commands::Build).run(&root).await
    }
}
