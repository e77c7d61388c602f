//! Per-component compile driver
//!
//! Transpiles one component in place:
//!
//! 1. `src/` → `dist/` when `src/` exists
//! 2. `main.js` → `browser.js` when `main.js` exists
//! 3. with tests requested, `test/` is staged to `test.src/` and compiled
//!    back into `test/`
//!
//! All existence checks happen once, up front, in [`CompilePlan::probe`]; the
//! plan is then executed step by step and the first failure aborts the rest.
//!
//! Test staging always replaces `test.src/` with the current `test/`. After
//! a run `test/` holds compiled output, so a second `--test` run stages that
//! output as its sources.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::build_env::ProcessEnvironment;
use crate::core::workspace::Workspace;
use crate::error::CompileError;
use crate::infra::filesystem;
use crate::infra::process::{Invocation, ProcessRunner};

/// Library source directory
pub const SOURCE_DIR: &str = "src";
/// Compiled library directory
pub const DIST_DIR: &str = "dist";
/// Entry file
pub const ENTRY_FILE: &str = "main.js";
/// Compiled entry file
pub const BROWSER_FILE: &str = "browser.js";
/// Test directory (sources before the first run, output afterwards)
pub const TEST_DIR: &str = "test";
/// Staged test sources
pub const STAGED_TEST_DIR: &str = "test.src";
/// Config file argument, relative to the component
pub const CONFIG_FILE_ARG: &str = "--configFile=./package.json";
/// Copy non-compilable files through unchanged
pub const COPY_FILES_ARG: &str = "--copy-files";

/// Whether the transpiler writes a directory or a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `--out-dir`
    Directory,
    /// `--out-file`
    File,
}

impl OutputMode {
    /// Command-line flag for this mode
    pub fn flag(self) -> &'static str {
        match self {
            OutputMode::Directory => "--out-dir",
            OutputMode::File => "--out-file",
        }
    }
}

/// One transpiler run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDirective {
    /// Source path, relative to the component
    pub source: String,
    /// Destination path, relative to the component
    pub destination: String,
    /// Output mode
    pub mode: OutputMode,
}

impl BuildDirective {
    /// Compile a directory into a directory
    pub fn directory(source: &str, destination: &str) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            mode: OutputMode::Directory,
        }
    }

    /// Compile a single file into a file
    pub fn file(source: &str, destination: &str) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            mode: OutputMode::File,
        }
    }

    /// Whether the test tree must be staged before this run
    pub fn compiles_staged_tests(&self) -> bool {
        self.source == STAGED_TEST_DIR
    }

    /// Render as a transpiler invocation
    pub fn to_invocation(&self, transpiler: &str) -> Invocation {
        Invocation::new(transpiler)
            .arg(self.source.as_str())
            .arg(self.mode.flag())
            .arg(self.destination.as_str())
            .arg(CONFIG_FILE_ARG)
            .arg(COPY_FILES_ARG)
    }
}

impl fmt::Display for BuildDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// Compile options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Also compile tests
    pub test: bool,
}

/// The existence checks for one component, evaluated once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilePlan {
    /// Component directory
    pub dir: PathBuf,
    /// `src/` is present
    pub sources: bool,
    /// `main.js` is present
    pub entry: bool,
    /// Tests were requested and `test/` is present
    pub tests: bool,
}

impl CompilePlan {
    /// Inspect a component directory
    pub fn probe(dir: &Path, options: CompileOptions) -> Self {
        let sources = dir.join(SOURCE_DIR).is_dir();
        let entry = dir.join(ENTRY_FILE).is_file();
        let tests = options.test && dir.join(TEST_DIR).is_dir();

        Self {
            dir: dir.to_path_buf(),
            sources,
            entry,
            tests,
        }
    }

    /// Transpiler runs this plan will issue, in order
    pub fn directives(&self) -> Vec<BuildDirective> {
        let mut directives = Vec::new();
        if self.sources {
            directives.push(BuildDirective::directory(SOURCE_DIR, DIST_DIR));
        }
        if self.entry {
            directives.push(BuildDirective::file(ENTRY_FILE, BROWSER_FILE));
        }
        if self.tests {
            directives.push(BuildDirective::directory(STAGED_TEST_DIR, TEST_DIR));
        }
        directives
    }

    /// Whether nothing needs compiling
    pub fn is_empty(&self) -> bool {
        !self.sources && !self.entry && !self.tests
    }
}

/// Result of compiling one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    /// Component name
    pub component: String,
    /// Transpiler runs that completed
    pub directives: Vec<BuildDirective>,
}

/// Compiles components of a workspace through a [`ProcessRunner`]
pub struct CompileDriver<'a, R> {
    workspace: &'a Workspace,
    runner: &'a R,
}

impl<'a, R: ProcessRunner> CompileDriver<'a, R> {
    /// Create a driver
    pub fn new(workspace: &'a Workspace, runner: &'a R) -> Self {
        Self { workspace, runner }
    }

    /// Compile one component
    pub async fn compile(
        &self,
        name: &str,
        options: CompileOptions,
    ) -> Result<CompileReport, CompileError> {
        let dir = self.workspace.component_dir(name);
        if !dir.is_dir() {
            return Err(CompileError::ComponentNotFound {
                name: name.to_string(),
                path: dir,
            });
        }

        let plan = CompilePlan::probe(&dir, options);
        if !plan.sources {
            tracing::debug!("{name}: no {SOURCE_DIR}/, skipping");
        }
        if !plan.entry {
            tracing::debug!("{name}: no {ENTRY_FILE}, skipping");
        }
        if plan.is_empty() {
            tracing::debug!("Nothing to compile for {name}");
        }

        let environment =
            ProcessEnvironment::for_component(dir.clone(), self.workspace.local_bin_dir());
        let env = environment
            .to_env_map(std::env::var_os("PATH").as_deref())
            .map_err(|e| CompileError::Environment {
                component: name.to_string(),
                error: e.to_string(),
            })?;

        let mut report = CompileReport {
            component: name.to_string(),
            directives: Vec::new(),
        };

        for directive in plan.directives() {
            if directive.compiles_staged_tests() {
                stage_tests(&dir).map_err(|error| CompileError::Staging {
                    component: name.to_string(),
                    error,
                })?;
            }
            self.transpile(name, &directive, &environment, &env).await?;
            report.directives.push(directive);
        }

        tracing::info!(
            "Compiled {name} ({} transpiler runs)",
            report.directives.len()
        );
        Ok(report)
    }

    async fn transpile(
        &self,
        name: &str,
        directive: &BuildDirective,
        environment: &ProcessEnvironment,
        env: &std::collections::HashMap<String, std::ffi::OsString>,
    ) -> Result<(), CompileError> {
        tracing::debug!("{name}: compiling {directive}");
        let invocation = directive
            .to_invocation(self.workspace.settings().transpiler())
            .with_environment(environment, env.clone());

        self.runner
            .run(&invocation)
            .await
            .map_err(|error| CompileError::Transpile {
                component: name.to_string(),
                source_path: directive.source.clone(),
                error,
            })
    }
}

/// Prepare the test tree of a component for compilation
///
/// Any earlier `test.src/` is removed, then `test/` is moved onto it.
fn stage_tests(dir: &Path) -> Result<(), crate::error::FilesystemError> {
    let staged = dir.join(STAGED_TEST_DIR);
    filesystem::remove_dir_all(&staged)?;
    filesystem::move_path(&dir.join(TEST_DIR), &staged)
}
