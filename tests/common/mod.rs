//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test workspace context
///
/// Creates a temporary directory for a workspace and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the workspace
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new workspace in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the workspace directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the workspace
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a JSON file in the workspace
    #[allow(dead_code)]
    pub fn create_json(&self, name: &str, value: &serde_json::Value) {
        let content = serde_json::to_string_pretty(value).expect("Failed to serialize JSON");
        self.create_file(name, &content);
    }

    /// Create a directory in the workspace
    #[allow(dead_code)]
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the workspace
    #[allow(dead_code)]
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Read and parse a JSON file from the workspace
    #[allow(dead_code)]
    pub fn read_json(&self, name: &str) -> serde_json::Value {
        serde_json::from_str(&self.read_file(name)).expect("Failed to parse JSON")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Run monoforge in `dir` with the given arguments
#[allow(dead_code)]
pub fn run_monoforge(dir: &Path, args: &[&str]) -> Output {
    monoforge_command(dir, args)
        .output()
        .expect("Failed to execute monoforge")
}

/// Build a monoforge command without running it
pub fn monoforge_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_monoforge"));
    cmd.current_dir(dir);
    cmd.env_remove("MONOFORGE_ROOT");
    cmd.args(args);
    cmd
}

/// Root `package.json` pinning the monorepo tool
#[allow(dead_code)]
pub const SAMPLE_ROOT_MANIFEST: &str = r#"{
  "name": "components-monorepo",
  "private": true,
  "devDependencies": {
    "lerna": "^3.22.1"
  }
}"#;

/// Alias and version tables
#[allow(dead_code)]
pub const SAMPLE_MAPPINGS: &str = r#"{
  "name": {
    "o-colors": "@financial-times/o-colors",
    "o-grid": "@financial-times/o-grid"
  },
  "version": {
    "o-grid": "^4.3.0"
  }
}"#;
