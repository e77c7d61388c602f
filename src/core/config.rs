//! Workspace settings
//!
//! Reads optional settings from `monoforge.toml` in the workspace root.
//! Every key is optional; unset keys fall back to [`crate::config::defaults`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::defaults;
use crate::error::ConfigError;

/// Settings for one workspace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory layout
    #[serde(default)]
    pub layout: LayoutConfig,

    /// External tool commands
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Dependency registry settings
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Directory layout, relative to the workspace root
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Where components are installed
    pub components_dir: Option<String>,

    /// Alias and version mappings file
    pub mappings: Option<String>,

    /// Local tool binaries prepended to the transpiler search path
    pub local_bin: Option<String>,
}

/// External tool commands, program first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Dependency installer
    pub installer: Option<Vec<String>>,

    /// Monorepo bootstrap
    pub bootstrap: Option<Vec<String>>,

    /// Monorepo build
    pub build: Option<Vec<String>>,

    /// Transpiler program
    pub transpiler: Option<String>,
}

/// Registry configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registries searched by the dependency installer
    pub search: Option<Vec<String>>,
}

fn owned(command: &[&str]) -> Vec<String> {
    command.iter().map(|s| (*s).to_string()).collect()
}

impl Settings {
    /// Load settings from `monoforge.toml` in `root`
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        Self::load_from_path(&root.join(defaults::SETTINGS_FILE))
    }

    /// Load settings from a specific path
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject tool commands configured as empty lists
    pub fn validate(&self) -> Result<(), ConfigError> {
        let commands = [
            ("installer", &self.tools.installer),
            ("bootstrap", &self.tools.bootstrap),
            ("build", &self.tools.build),
        ];
        for (tool, command) in commands {
            if command.as_ref().is_some_and(Vec::is_empty) {
                return Err(ConfigError::EmptyCommand {
                    tool: tool.to_string(),
                });
            }
        }
        if self.tools.transpiler.as_deref() == Some("") {
            return Err(ConfigError::EmptyCommand {
                tool: "transpiler".to_string(),
            });
        }
        Ok(())
    }

    /// Effective components directory
    #[must_use]
    pub fn components_dir(&self) -> &str {
        self.layout
            .components_dir
            .as_deref()
            .unwrap_or(defaults::COMPONENTS_DIR)
    }

    /// Effective mappings file
    #[must_use]
    pub fn mappings_file(&self) -> &str {
        self.layout
            .mappings
            .as_deref()
            .unwrap_or(defaults::MAPPINGS_FILE)
    }

    /// Effective local binary directory
    #[must_use]
    pub fn local_bin(&self) -> &str {
        self.layout
            .local_bin
            .as_deref()
            .unwrap_or(defaults::LOCAL_BIN_DIR)
    }

    /// Effective installer command
    #[must_use]
    pub fn installer_command(&self) -> Vec<String> {
        self.tools
            .installer
            .clone()
            .unwrap_or_else(|| owned(defaults::INSTALLER_COMMAND))
    }

    /// Effective bootstrap command
    #[must_use]
    pub fn bootstrap_command(&self) -> Vec<String> {
        self.tools
            .bootstrap
            .clone()
            .unwrap_or_else(|| owned(defaults::BOOTSTRAP_COMMAND))
    }

    /// Effective build command
    #[must_use]
    pub fn build_command(&self) -> Vec<String> {
        self.tools
            .build
            .clone()
            .unwrap_or_else(|| owned(defaults::BUILD_COMMAND))
    }

    /// Effective transpiler program
    #[must_use]
    pub fn transpiler(&self) -> &str {
        self.tools
            .transpiler
            .as_deref()
            .unwrap_or(defaults::TRANSPILER)
    }

    /// Effective registry list
    #[must_use]
    pub fn registries(&self) -> Vec<String> {
        self.registry
            .search
            .clone()
            .unwrap_or_else(|| owned(defaults::REGISTRIES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.components_dir(), "components");
        assert_eq!(settings.mappings_file(), "mappings.json");
        assert_eq!(settings.local_bin(), "node_modules/.bin");
        assert_eq!(settings.installer_command(), vec!["bower", "install", "-F"]);
        assert_eq!(settings.bootstrap_command(), vec!["lerna", "bootstrap", "--hoist"]);
        assert_eq!(settings.build_command(), vec!["lerna", "run", "build"]);
        assert_eq!(settings.transpiler(), "babel");
        assert_eq!(settings.registries(), vec!["https://registry.bower.io"]);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load(temp_dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_valid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
[layout]
components_dir = "packages"

[tools]
installer = ["bower", "install", "--force-latest"]
transpiler = "npx-babel"
"#;
        fs::write(temp_dir.path().join("monoforge.toml"), content).unwrap();

        let settings = Settings::load(temp_dir.path()).unwrap();
        assert_eq!(settings.components_dir(), "packages");
        assert_eq!(
            settings.installer_command(),
            vec!["bower", "install", "--force-latest"]
        );
        assert_eq!(settings.transpiler(), "npx-babel");
        // untouched keys keep defaults
        assert_eq!(settings.build_command(), vec!["lerna", "run", "build"]);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("monoforge.toml"), "invalid toml [[[").unwrap();

        let result = Settings::load(temp_dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("monoforge.toml"),
            "[tools]\nbootstrap = []\n",
        )
        .unwrap();

        let result = Settings::load(temp_dir.path());
        assert!(matches!(
            result,
            Err(ConfigError::EmptyCommand { ref tool }) if tool == "bootstrap"
        ));
    }
}
