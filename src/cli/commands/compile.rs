//! Compile command implementation
//!
//! Implements `monoforge compile <component>`, the build script every
//! generated component manifest points at.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::output::status;
use crate::core::compile::{CompileDriver, CompileOptions};
use crate::core::config::Settings;
use crate::core::workspace::Workspace;
use crate::infra::process::SystemRunner;

/// Execute the compile command
pub async fn execute(root: &Path, component: &str, test: bool) -> Result<()> {
    let settings = Settings::load(root)
        .with_context(|| format!("Failed to load settings from {}", root.display()))?;
    let workspace = Workspace::new(root.to_path_buf(), settings);
    let runner = SystemRunner;

    let report = CompileDriver::new(&workspace, &runner)
        .compile(component, CompileOptions { test })
        .await?;

    if report.directives.is_empty() {
        println!("{} Nothing to compile in {component}", status::INFO);
    } else {
        println!("{} Compiled {component}:", status::SUCCESS);
        for directive in &report.directives {
            println!("  {directive}");
        }
    }
    Ok(())
}
