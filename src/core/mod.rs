//! Core business logic module
//!
//! # Submodules
//!
//! - [`dictionary`] - String table helpers
//! - [`transpile_config`] - Transpiler configuration model
//! - [`redirects`] - Import redirects derived from the alias table
//! - [`manifest`] - Generated manifests and the mappings file
//! - [`workspace`] - Repository layout
//! - [`config`] - `monoforge.toml` settings
//! - [`build_env`] - Environment for spawned tools
//! - [`compile`] - Per-component compile driver
//! - [`pipeline`] - Top-level build pipeline

pub mod build_env;
pub mod compile;
pub mod config;
pub mod dictionary;
pub mod manifest;
pub mod pipeline;
pub mod redirects;
pub mod transpile_config;
pub mod workspace;
