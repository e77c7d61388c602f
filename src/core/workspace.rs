//! Workspace layout
//!
//! Resolves every path the pipeline and the compile driver touch from the
//! workspace root and its [`Settings`].

use std::path::{Path, PathBuf};

use crate::config::files;
use crate::core::config::Settings;

/// A monorepo workspace rooted at one directory
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    settings: Settings,
}

impl Workspace {
    /// Create a workspace view over `root`
    pub fn new(root: PathBuf, settings: Settings) -> Self {
        Self { root, settings }
    }

    /// Workspace root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Active settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve a path relative to the root
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Directory holding all components
    pub fn components_dir(&self) -> PathBuf {
        self.resolve(self.settings.components_dir())
    }

    /// Directory of one component
    pub fn component_dir(&self, name: &str) -> PathBuf {
        self.components_dir().join(name)
    }

    /// Local tool binaries
    pub fn local_bin_dir(&self) -> PathBuf {
        self.resolve(self.settings.local_bin())
    }

    /// Alias and version mappings file
    pub fn mappings_path(&self) -> PathBuf {
        self.resolve(self.settings.mappings_file())
    }

    /// Dependency-manager resource file
    pub fn resource_file_path(&self) -> PathBuf {
        self.resolve(files::RESOURCE_FILE)
    }

    /// Root package manifest
    pub fn root_manifest_path(&self) -> PathBuf {
        self.resolve(files::PACKAGE_MANIFEST)
    }

    /// Monorepo manifest
    pub fn monorepo_manifest_path(&self) -> PathBuf {
        self.resolve(files::MONOREPO_MANIFEST)
    }

    /// Relative path from a component directory back to the root
    ///
    /// Used in component build scripts, which run inside the component.
    pub fn root_from_component(&self) -> String {
        let depth = Path::new(self.settings.components_dir())
            .components()
            .filter(|c| matches!(c, std::path::Component::Normal(_)))
            .count()
            + 1;
        vec![".."; depth].join("/")
    }
}
