//! Well-known file names inside the workspace

/// Dependency-manager resource file, in the root
pub const RESOURCE_FILE: &str = ".bowerrc";

/// Monorepo manifest, in the root
pub const MONOREPO_MANIFEST: &str = "lerna.json";

/// Package manifest, in the root and in every component
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Published-dependency manifest, in every component
pub const COMPONENT_MANIFEST: &str = "bower.json";
