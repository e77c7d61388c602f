//! Configuration constants
//!
//! - [`defaults`] - Default tool commands and layout
//! - [`files`] - Well-known file names

pub mod defaults;
pub mod files;
