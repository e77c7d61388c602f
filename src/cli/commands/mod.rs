//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod compile;

use anyhow::Result;
use clap::Subcommand;
use std::path::Path;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline (the default when no command is given)
    Build,

    /// Transpile one component in place
    Compile {
        /// Component name (its directory under the components directory)
        component: String,

        /// Also stage and compile the component's tests
        #[arg(long)]
        test: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, root: &Path) -> Result<()> {
        match self {
            Self::Build => build::execute(root).await,
            Self::Compile { component, test } => compile::execute(root, &component, test).await,
        }
    }
}
