//! Generated manifests
//!
//! Derives the files the pipeline writes before handing over to the external
//! tools:
//!
//! - the dependency-manager resource file (`.bowerrc`)
//! - the monorepo manifest (`lerna.json`), from the root `package.json`
//! - one `package.json` per component, from its `bower.json`, carrying the
//!   transpiler configuration under the `babel` key
//!
//! Derivation is pure; [`read_json`] and [`write_json`] do the file I/O.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

use crate::config::defaults;
use crate::core::compile::BROWSER_FILE;
use crate::core::dictionary::Dictionary;
use crate::core::redirects::create_configuration;
use crate::core::transpile_config::Configuration;
use crate::error::{ManifestError, MonoforgeError};
use crate::infra::filesystem;

/// Name used in generated build scripts
pub const BIN_NAME: &str = env!("CARGO_PKG_NAME");

/// Version every component is released under in the monorepo manifest
pub const INDEPENDENT_VERSIONING: &str = "independent";

/// Read and parse a JSON document
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, MonoforgeError> {
    let content = filesystem::read_file(path)?;
    serde_json::from_str(&content).map_err(|e| {
        ManifestError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        }
        .into()
    })
}

/// Serialize and write a JSON document, pretty-printed with a trailing newline
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), MonoforgeError> {
    let mut content = serde_json::to_string_pretty(value).map_err(|e| ManifestError::Serialize {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    content.push('\n');
    filesystem::write_file(path, &content)?;
    Ok(())
}

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?)").expect("version pattern is valid")
});

/// Extract the concrete version from a version or range (`^3.4.0` → `3.4.0`)
pub fn concrete_version(range: &str) -> Option<String> {
    VERSION_RE
        .captures(range)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

// ============================================
// Mappings
// ============================================

/// Alias and version tables shared by every component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mappings {
    /// Component name → published module name
    #[serde(default)]
    pub name: Dictionary,

    /// Component name → published version range
    #[serde(default)]
    pub version: Dictionary,
}

impl Mappings {
    /// Load mappings; a missing file yields empty tables
    pub fn load(path: &Path) -> Result<Self, MonoforgeError> {
        if !path.exists() {
            tracing::warn!(
                "No mappings file at {}, components keep their own names",
                path.display()
            );
            return Ok(Self::default());
        }
        read_json(path)
    }

    /// The alias table
    pub fn aliases(&self) -> &Dictionary {
        &self.name
    }

    /// Published name of a component, or the component name itself
    pub fn module_name<'a>(&'a self, component: &'a str) -> &'a str {
        self.name.get(component).map_or(component, String::as_str)
    }
}

// ============================================
// Dependency-manager resource file
// ============================================

/// Registry section of the resource file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySearch {
    /// Registries searched in order
    pub search: Vec<String>,
}

/// The dependency-manager resource file (`.bowerrc`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceFile {
    /// Install directory, relative to the root
    pub directory: String,

    /// Registry configuration
    pub registry: RegistrySearch,
}

/// Create the default resource file
pub fn create_resource_file(components_dir: &str, registries: Vec<String>) -> ResourceFile {
    ResourceFile {
        directory: components_dir.to_string(),
        registry: RegistrySearch { search: registries },
    }
}

// ============================================
// Monorepo manifest
// ============================================

/// The parts of the root `package.json` the pipeline reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootManifest {
    /// Runtime dependencies
    #[serde(default)]
    pub dependencies: Dictionary,

    /// Development dependencies
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: Dictionary,
}

impl RootManifest {
    /// Declared range of a dependency, development dependencies first
    pub fn dependency_range(&self, name: &str) -> Option<&str> {
        self.dev_dependencies
            .get(name)
            .or_else(|| self.dependencies.get(name))
            .map(String::as_str)
    }
}

/// The monorepo manifest (`lerna.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonorepoManifest {
    /// Monorepo tool version
    pub lerna: String,

    /// Component globs
    pub packages: Vec<String>,

    /// Versioning mode
    pub version: String,

    /// Package client
    #[serde(rename = "npmClient")]
    pub npm_client: String,
}

/// Derive the monorepo manifest from the root manifest
pub fn create_monorepo_manifest(
    root: &RootManifest,
    components_dir: &str,
) -> Result<MonorepoManifest, ManifestError> {
    let tool = defaults::MONOREPO_TOOL;
    let version = root
        .dependency_range(tool)
        .and_then(concrete_version)
        .ok_or_else(|| ManifestError::MissingToolVersion {
            tool: tool.to_string(),
        })?;

    Ok(MonorepoManifest {
        lerna: version,
        packages: vec![format!("{}/*", components_dir.trim_end_matches('/'))],
        version: INDEPENDENT_VERSIONING.to_string(),
        npm_client: "npm".to_string(),
    })
}

// ============================================
// Component manifests
// ============================================

/// The parts of a component's `bower.json` the pipeline reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BowerManifest {
    /// Component name
    pub name: Option<String>,

    /// Released version
    pub version: Option<String>,

    /// Description
    pub description: Option<String>,

    /// License, a string or a list
    pub license: Option<serde_json::Value>,

    /// Keywords
    pub keywords: Option<Vec<String>>,

    /// Dependencies, name → range or `owner/repo#range`
    #[serde(default)]
    pub dependencies: Dictionary,
}

/// A generated component `package.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentManifest {
    /// Published module name
    pub name: String,

    /// Semver version
    pub version: String,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// License
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<serde_json::Value>,

    /// Keywords
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Entry point
    pub main: String,

    /// Browser entry point
    pub browser: String,

    /// Published dependencies
    #[serde(default)]
    pub dependencies: Dictionary,

    /// Lifecycle scripts
    #[serde(default)]
    pub scripts: Dictionary,

    /// Transpiler configuration
    pub babel: Configuration,
}

/// Inputs shared by every component manifest
#[derive(Debug, Clone)]
pub struct ComponentContext<'a> {
    /// Alias and version tables
    pub mappings: &'a Mappings,
    /// Path from a component directory back to the workspace root
    pub root_from_component: &'a str,
}

/// Build script that compiles a component with this tool
pub fn build_script(component: &str, root_from_component: &str) -> String {
    format!("{BIN_NAME} compile {component} --root {root_from_component}")
}

fn component_version(
    component: &str,
    bower: &BowerManifest,
    mappings: &Mappings,
) -> Result<String, ManifestError> {
    let Some(raw) = bower.version.as_deref() else {
        return Ok(mappings
            .version
            .get(component)
            .and_then(|range| concrete_version(range))
            .unwrap_or_else(|| "0.0.0".to_string()));
    };

    let trimmed = raw.trim().trim_start_matches('v');
    semver::Version::parse(trimmed)
        .map(|v| v.to_string())
        .map_err(|e| ManifestError::InvalidVersion {
            component: component.to_string(),
            version: raw.to_string(),
            error: e.to_string(),
        })
}

fn rewrite_dependencies(bower: &BowerManifest, mappings: &Mappings) -> Dictionary {
    bower
        .dependencies
        .iter()
        .map(|(dependency, range)| {
            let name = mappings.module_name(dependency).to_string();
            let range = mappings.version.get(dependency).cloned().unwrap_or_else(|| {
                // `owner/repo#^1.2.3` → `^1.2.3`
                range.rsplit('#').next().unwrap_or(range).to_string()
            });
            (name, range)
        })
        .collect()
}

/// Derive a component `package.json` from its `bower.json`
///
/// `path` is only used in error messages.
pub fn create_component_manifest(
    path: &Path,
    bower: &BowerManifest,
    context: &ComponentContext<'_>,
) -> Result<ComponentManifest, ManifestError> {
    let component = bower.name.as_deref().ok_or_else(|| ManifestError::MissingField {
        path: path.to_path_buf(),
        field: "name".to_string(),
    })?;

    let mut scripts = Dictionary::new();
    scripts.insert(
        "build".to_string(),
        build_script(component, context.root_from_component),
    );

    Ok(ComponentManifest {
        name: context.mappings.module_name(component).to_string(),
        version: component_version(component, bower, context.mappings)?,
        description: bower.description.clone(),
        license: bower.license.clone(),
        keywords: bower.keywords.clone(),
        main: BROWSER_FILE.to_string(),
        browser: BROWSER_FILE.to_string(),
        dependencies: rewrite_dependencies(bower, context.mappings),
        scripts,
        babel: create_configuration(context.mappings.aliases()),
    })
}
