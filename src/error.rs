//! Error types for monoforge
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// External process errors
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Program could not be located on the search path
    #[error("Program '{program}' not found in search path")]
    NotFound { program: String },

    /// Process could not be started
    #[error("Failed to spawn '{command}': {error}")]
    SpawnFailed { command: String, error: String },

    /// Process exited with a nonzero status
    #[error("Command '{command}' failed with {status}")]
    ExitStatus { command: String, status: String },

    /// Process was terminated by a signal
    #[error("Command '{command}' was terminated by a signal")]
    Terminated { command: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to move a path
    #[error("Failed to move '{from}' to '{to}': {error}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to list a directory
    #[error("Failed to list directory '{path}': {error}")]
    ListDir { path: PathBuf, error: String },
}

/// Manifest generation errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// JSON document could not be parsed
    #[error("Failed to parse '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// JSON document could not be serialized
    #[error("Failed to serialize '{path}': {error}")]
    Serialize { path: PathBuf, error: String },

    /// Required field missing
    #[error("Manifest '{path}' is missing required field '{field}'")]
    MissingField { path: PathBuf, field: String },

    /// Version string is not valid semver
    #[error("Component '{component}' has invalid version '{version}': {error}")]
    InvalidVersion {
        component: String,
        version: String,
        error: String,
    },

    /// Root manifest does not pin the monorepo tool
    #[error("Root manifest does not declare a '{tool}' dependency")]
    MissingToolVersion { tool: String },
}

/// Settings file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read settings file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse settings file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: String, error: String },

    /// A tool command was configured as an empty list
    #[error("Tool command '{tool}' is empty")]
    EmptyCommand { tool: String },
}

/// Compile driver errors
#[derive(Error, Debug)]
pub enum CompileError {
    /// Component directory does not exist
    #[error("Component '{name}' not found at '{path}'")]
    ComponentNotFound { name: String, path: PathBuf },

    /// Search path could not be assembled
    #[error("Invalid build environment for component '{component}': {error}")]
    Environment { component: String, error: String },

    /// Transpiler invocation failed
    #[error("Failed to compile '{source_path}' for component '{component}': {error}")]
    Transpile {
        component: String,
        source_path: String,
        #[source]
        error: ProcessError,
    },

    /// Test staging failed
    #[error("Failed to stage tests for component '{component}': {error}")]
    Staging {
        component: String,
        #[source]
        error: FilesystemError,
    },
}

/// Top-level monoforge error type
#[derive(Error, Debug)]
pub enum MonoforgeError {
    /// Process error
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Settings error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Compile error
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),
}
