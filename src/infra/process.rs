//! External process execution
//!
//! Every external tool (installer, monorepo tool, transpiler) is run through
//! a [`ProcessRunner`]. [`SystemRunner`] spawns real processes with inherited
//! standard streams and waits for them; tests substitute a recording runner.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::core::build_env::{ProcessEnvironment, PATH_VAR};
use crate::error::ProcessError;

/// One external command
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: HashMap<String, OsString>,
}

impl Invocation {
    /// Create an invocation of `program` with no arguments
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            cwd: None,
            env: HashMap::new(),
        }
    }

    /// Create an invocation from a `[program, args...]` list
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program).args(args))
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory
    #[must_use]
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Apply an environment overlay: working directory and variables
    #[must_use]
    pub fn with_environment(
        mut self,
        environment: &ProcessEnvironment,
        env: HashMap<String, OsString>,
    ) -> Self {
        self.cwd = Some(environment.cwd.clone());
        self.env.extend(env);
        self
    }

    /// Program name as given
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Working directory, if overridden
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Environment overlay
    pub fn env(&self) -> &HashMap<String, OsString> {
        &self.env
    }

    /// Search path override, if any
    pub fn search_path(&self) -> Option<&OsString> {
        self.env.get(PATH_VAR)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs external commands to completion
pub trait ProcessRunner {
    /// Run `invocation`, failing on a nonzero exit
    fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<(), ProcessError>>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Locate the program, honouring the invocation's search path override
    fn resolve_program(invocation: &Invocation) -> Result<PathBuf, ProcessError> {
        let not_found = |_| ProcessError::NotFound {
            program: invocation.program.clone(),
        };
        match invocation.search_path() {
            Some(path) => {
                let cwd = match invocation.cwd() {
                    Some(cwd) => cwd.to_path_buf(),
                    None => std::env::current_dir().map_err(|e| ProcessError::SpawnFailed {
                        command: invocation.to_string(),
                        error: e.to_string(),
                    })?,
                };
                which::which_in(&invocation.program, Some(path), cwd).map_err(not_found)
            }
            None => which::which(&invocation.program).map_err(not_found),
        }
    }
}

impl ProcessRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<(), ProcessError> {
        let command_line = invocation.to_string();
        let program = Self::resolve_program(invocation)?;
        tracing::info!("Running: {command_line}");
        tracing::debug!("Resolved {} to {}", invocation.program, program.display());

        let mut cmd = tokio::process::Command::new(&program);
        cmd.args(&invocation.args);
        if let Some(cwd) = &invocation.cwd {
            cmd.current_dir(cwd);
        }
        cmd.envs(&invocation.env);

        let status = cmd.status().await.map_err(|e| ProcessError::SpawnFailed {
            command: command_line.clone(),
            error: e.to_string(),
        })?;

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(_) => Err(ProcessError::ExitStatus {
                command: command_line,
                status: status.to_string(),
            }),
            None => Err(ProcessError::Terminated {
                command: command_line,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display_joins_arguments() {
        let invocation = Invocation::new("babel")
            .arg("src")
            .args(["--out-dir", "dist", "--configFile=./package.json", "--copy-files"]);

        assert_eq!(
            invocation.to_string(),
            "babel src --out-dir dist --configFile=./package.json --copy-files"
        );
    }

    #[test]
    fn test_from_command_splits_program() {
        let command = vec!["lerna".to_string(), "run".to_string(), "build".to_string()];
        let invocation = Invocation::from_command(&command).unwrap();

        assert_eq!(invocation.program(), "lerna");
        assert_eq!(invocation.arguments(), &["run", "build"]);
        assert!(Invocation::from_command(&[]).is_none());
    }

    #[test]
    fn test_with_environment_sets_cwd_and_path() {
        let environment = ProcessEnvironment::for_component(
            PathBuf::from("/repo/components/a"),
            PathBuf::from("/repo/node_modules/.bin"),
        );
        let env = environment.to_env_map(None).unwrap();
        let invocation = Invocation::new("babel").with_environment(&environment, env);

        assert_eq!(invocation.cwd(), Some(Path::new("/repo/components/a")));
        assert_eq!(
            invocation.search_path(),
            Some(&OsString::from("/repo/node_modules/.bin"))
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_success_and_failure() {
        assert!(SystemRunner.run(&Invocation::new("true")).await.is_ok());

        let result = SystemRunner.run(&Invocation::new("false")).await;
        assert!(matches!(result, Err(ProcessError::ExitStatus { .. })));
    }

    #[tokio::test]
    async fn test_system_runner_missing_program() {
        let result = SystemRunner
            .run(&Invocation::new("monoforge-no-such-program-xyz"))
            .await;
        assert!(matches!(result, Err(ProcessError::NotFound { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_uses_search_path_override() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let tool = temp.path().join("local-tool");
        std::fs::write(&tool, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let environment =
            ProcessEnvironment::new(temp.path().to_path_buf()).with_bin_dir(temp.path().to_path_buf());
        let env = environment.to_env_map(std::env::var_os("PATH").as_deref()).unwrap();
        let invocation = Invocation::new("local-tool").with_environment(&environment, env);

        assert!(SystemRunner.run(&invocation).await.is_ok());
    }
}
