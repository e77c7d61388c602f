//! Process environment for tool invocations
//!
//! Every transpiler run gets an explicit environment record: the working
//! directory and a `PATH` with project-local tool directories in front of the
//! inherited search path. The current process environment is never mutated.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Name of the search path variable
pub const PATH_VAR: &str = "PATH";

/// Environment overlay for one external command
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessEnvironment {
    /// Working directory
    pub cwd: PathBuf,
    /// Directories searched before the inherited `PATH`, in order
    pub bin_dirs: Vec<PathBuf>,
}

impl ProcessEnvironment {
    /// Environment rooted at `cwd` with no path overrides
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            bin_dirs: Vec::new(),
        }
    }

    /// Environment for compiling a component: runs inside the component with
    /// the workspace's local binaries first on the search path
    pub fn for_component(component_dir: PathBuf, local_bin: PathBuf) -> Self {
        Self::new(component_dir).with_bin_dir(local_bin)
    }

    /// Prepend a directory to the search path
    #[must_use]
    pub fn with_bin_dir(mut self, dir: PathBuf) -> Self {
        self.bin_dirs.push(dir);
        self
    }

    /// Compute the search path given the inherited one
    ///
    /// An unset or empty inherited path contributes nothing, so the result
    /// never ends in an empty (current directory) entry.
    pub fn search_path(&self, inherited: Option<&OsStr>) -> Result<OsString, BuildEnvError> {
        let mut dirs = self.bin_dirs.clone();
        if let Some(inherited) = inherited.filter(|p| !p.is_empty()) {
            dirs.extend(std::env::split_paths(inherited));
        }
        std::env::join_paths(dirs).map_err(|e| BuildEnvError::InvalidValue {
            variable: PATH_VAR.to_string(),
            reason: e.to_string(),
        })
    }

    /// Convert to the variable overlay applied to the child process
    ///
    /// `PATH` is only set when there is something to prepend.
    pub fn to_env_map(
        &self,
        inherited_path: Option<&OsStr>,
    ) -> Result<HashMap<String, OsString>, BuildEnvError> {
        let mut env = HashMap::new();
        if !self.bin_dirs.is_empty() {
            env.insert(PATH_VAR.to_string(), self.search_path(inherited_path)?);
        }
        Ok(env)
    }
}

/// Build environment errors
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEnvError {
    /// Variable has invalid value
    InvalidValue { variable: String, reason: String },
}

impl std::fmt::Display for BuildEnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { variable, reason } => {
                write!(f, "Invalid value for {variable}: {reason}")
            }
        }
    }
}

impl std::error::Error for BuildEnvError {}
