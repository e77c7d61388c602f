//! Top-level build pipeline
//!
//! Runs the fixed sequence of orchestration steps:
//!
//! ```text
//! Init → BootstrapConfigWritten → DependenciesInstalled → ManifestWritten
//!      → PerComponentManifestsWritten → Bootstrapped → Built → Done
//! ```
//!
//! Each step is awaited before the next starts. The first error moves the
//! pipeline to [`PipelineState::Failed`] and nothing after it runs.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::files;
use crate::core::manifest::{
    self, BowerManifest, ComponentContext, Mappings, RootManifest,
};
use crate::core::workspace::Workspace;
use crate::error::{ConfigError, MonoforgeError};
use crate::infra::filesystem;
use crate::infra::process::{Invocation, ProcessRunner};

/// Pipeline progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing done yet
    Init,
    /// Dependency-manager resource file written
    BootstrapConfigWritten,
    /// Dependencies installed
    DependenciesInstalled,
    /// Monorepo manifest written
    ManifestWritten,
    /// Every component manifest written
    PerComponentManifestsWritten,
    /// Monorepo bootstrapped
    Bootstrapped,
    /// Every component built
    Built,
    /// Finished successfully
    Done,
    /// A step failed
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::BootstrapConfigWritten => "bootstrap config written",
            Self::DependenciesInstalled => "dependencies installed",
            Self::ManifestWritten => "manifest written",
            Self::PerComponentManifestsWritten => "component manifests written",
            Self::Bootstrapped => "bootstrapped",
            Self::Built => "built",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A pipeline step failed
#[derive(Error, Debug)]
#[error("Pipeline failed after '{reached}'")]
pub struct PipelineError {
    /// Last state reached before the failure
    pub reached: PipelineState,
    /// What went wrong
    #[source]
    pub error: MonoforgeError,
}

/// Summary of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Components whose manifests were generated, in order
    pub components: Vec<String>,
}

/// The build pipeline for one workspace
pub struct Pipeline<'a, R> {
    workspace: &'a Workspace,
    runner: &'a R,
    state: PipelineState,
}

impl<'a, R: ProcessRunner> Pipeline<'a, R> {
    /// Create a pipeline in the `Init` state
    pub fn new(workspace: &'a Workspace, runner: &'a R) -> Self {
        Self {
            workspace,
            runner,
            state: PipelineState::Init,
        }
    }

    /// Current state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run every step to completion or to the first failure
    pub async fn run(&mut self) -> Result<PipelineReport, PipelineError> {
        match self.run_steps().await {
            Ok(report) => Ok(report),
            Err(error) => {
                let reached = self.state;
                self.state = PipelineState::Failed;
                tracing::error!("Pipeline failed after '{reached}': {error}");
                Err(PipelineError { reached, error })
            }
        }
    }

    async fn run_steps(&mut self) -> Result<PipelineReport, MonoforgeError> {
        let workspace = self.workspace;
        let settings = workspace.settings();

        self.write_resource_file()?;
        self.transition(PipelineState::BootstrapConfigWritten);

        self.run_tool("installer", &settings.installer_command())
            .await?;
        self.transition(PipelineState::DependenciesInstalled);

        self.write_monorepo_manifest()?;
        self.transition(PipelineState::ManifestWritten);

        let components = self.write_component_manifests()?;
        self.transition(PipelineState::PerComponentManifestsWritten);

        self.run_tool("bootstrap", &settings.bootstrap_command())
            .await?;
        self.transition(PipelineState::Bootstrapped);

        self.run_tool("build", &settings.build_command()).await?;
        self.transition(PipelineState::Built);

        self.transition(PipelineState::Done);
        Ok(PipelineReport { components })
    }

    fn transition(&mut self, next: PipelineState) {
        tracing::info!("Pipeline: {} -> {next}", self.state);
        self.state = next;
    }

    fn write_resource_file(&self) -> Result<(), MonoforgeError> {
        let settings = self.workspace.settings();
        let file =
            manifest::create_resource_file(settings.components_dir(), settings.registries());
        let path = self.workspace.resource_file_path();
        tracing::debug!("Writing {}", path.display());
        manifest::write_json(&path, &file)
    }

    async fn run_tool(&self, tool: &str, command: &[String]) -> Result<(), MonoforgeError> {
        let invocation = Invocation::from_command(command)
            .ok_or_else(|| ConfigError::EmptyCommand {
                tool: tool.to_string(),
            })?
            .current_dir(self.workspace.root());
        self.runner.run(&invocation).await?;
        Ok(())
    }

    fn write_monorepo_manifest(&self) -> Result<(), MonoforgeError> {
        let root: RootManifest = manifest::read_json(&self.workspace.root_manifest_path())?;
        let monorepo = manifest::create_monorepo_manifest(
            &root,
            self.workspace.settings().components_dir(),
        )?;
        manifest::write_json(&self.workspace.monorepo_manifest_path(), &monorepo)
    }

    fn write_component_manifests(&self) -> Result<Vec<String>, MonoforgeError> {
        let mappings = Mappings::load(&self.workspace.mappings_path())?;
        let root_from_component = self.workspace.root_from_component();
        let context = ComponentContext {
            mappings: &mappings,
            root_from_component: &root_from_component,
        };

        let mut components = Vec::new();
        for dir in filesystem::list_subdirectories(&self.workspace.components_dir())? {
            components.push(write_component_manifest(&dir, &context)?);
        }
        tracing::info!("Generated {} component manifests", components.len());
        Ok(components)
    }
}

/// Derive and write one component's `package.json`; returns the component name
fn write_component_manifest(
    dir: &Path,
    context: &ComponentContext<'_>,
) -> Result<String, MonoforgeError> {
    let bower_path: PathBuf = dir.join(files::COMPONENT_MANIFEST);
    let bower: BowerManifest = manifest::read_json(&bower_path)?;
    let generated = manifest::create_component_manifest(&bower_path, &bower, context)?;
    manifest::write_json(&dir.join(files::PACKAGE_MANIFEST), &generated)?;

    let name = bower.name.unwrap_or_default();
    tracing::debug!("Wrote manifest for {name} as {}", generated.name);
    Ok(name)
}
