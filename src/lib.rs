//! Monoforge - build orchestration for multi-component repositories
//!
//! This library drives a repository of front-end components through
//! dependency installation, manifest generation, monorepo bootstrap and a
//! per-component transpile step.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Pipeline, manifest generation and compile logic
//! - [`infra`] - Infrastructure layer (filesystem, processes)
//! - [`config`] - Constants and defaults
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
