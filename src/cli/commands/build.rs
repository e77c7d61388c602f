//! Pipeline command implementation
//!
//! Runs the full build pipeline: resource file, dependency install, monorepo
//! manifest, component manifests, bootstrap and build.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::output::status;
use crate::core::config::Settings;
use crate::core::pipeline::Pipeline;
use crate::core::workspace::Workspace;
use crate::infra::process::SystemRunner;

/// Execute the pipeline in `root`
pub async fn execute(root: &Path) -> Result<()> {
    let settings = Settings::load(root)
        .with_context(|| format!("Failed to load settings from {}", root.display()))?;
    let workspace = Workspace::new(root.to_path_buf(), settings);
    let runner = SystemRunner;

    tracing::info!("Building workspace {}", root.display());
    let report = Pipeline::new(&workspace, &runner).run().await?;

    println!(
        "{} Built {} components",
        status::SUCCESS,
        report.components.len()
    );
    Ok(())
}
