//! Default configuration values

/// Exit status for any pipeline or compile failure
pub const FAILURE_EXIT_CODE: i32 = 22;

/// Settings file looked up in the workspace root
pub const SETTINGS_FILE: &str = "monoforge.toml";

/// Directory components are installed into, relative to the root
pub const COMPONENTS_DIR: &str = "components";

/// Alias and version mappings, relative to the root
pub const MAPPINGS_FILE: &str = "mappings.json";

/// Local tool binaries, relative to the root
pub const LOCAL_BIN_DIR: &str = "node_modules/.bin";

/// Dependency installer invocation (exact versions)
pub const INSTALLER_COMMAND: &[&str] = &["bower", "install", "-F"];

/// Monorepo bootstrap invocation (hoisting shared dependencies)
pub const BOOTSTRAP_COMMAND: &[&str] = &["lerna", "bootstrap", "--hoist"];

/// Monorepo build invocation
pub const BUILD_COMMAND: &[&str] = &["lerna", "run", "build"];

/// Transpiler binary
pub const TRANSPILER: &str = "babel";

/// Monorepo tool whose version is pinned in the monorepo manifest
pub const MONOREPO_TOOL: &str = "lerna";

/// Registries written into the dependency-manager resource file
pub const REGISTRIES: &[&str] = &["https://registry.bower.io"];
