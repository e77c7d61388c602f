//! Transpiler configuration documents
//!
//! A [`Configuration`] is the document the transpiler reads from a
//! component's `package.json`. It is assembled with [`ConfigurationBuilder`],
//! whose directives are recorded in exactly the order they are called:
//! transpiler semantics depend on preset, plugin and override order.
//!
//! ```
//! use monoforge::core::transpile_config::ConfigurationBuilder;
//!
//! let config = ConfigurationBuilder::new()
//!     .plugin("a")
//!     .plugin("b")
//!     .test("./main.js")
//!     .build();
//! assert_eq!(config.plugins.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A preset or plugin directive
///
/// Serialized as a bare name, or as a `[name, options]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    /// Directive without options
    Name(String),
    /// Directive with an options object
    WithOptions(String, Value),
}

impl Item {
    /// Directive name, verbatim
    pub fn name(&self) -> &str {
        match self {
            Item::Name(name) | Item::WithOptions(name, _) => name,
        }
    }

    /// Options object, if any
    pub fn options(&self) -> Option<&Value> {
        match self {
            Item::Name(_) => None,
            Item::WithOptions(_, options) => Some(options),
        }
    }
}

/// A `test` or `exclude` file filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    /// One glob
    One(String),
    /// Several globs
    Many(Vec<String>),
}

impl From<&str> for Filter {
    fn from(pattern: &str) -> Self {
        Filter::One(pattern.to_string())
    }
}

impl From<String> for Filter {
    fn from(pattern: String) -> Self {
        Filter::One(pattern)
    }
}

impl From<Vec<String>> for Filter {
    fn from(patterns: Vec<String>) -> Self {
        Filter::Many(patterns)
    }
}

impl From<&[&str]> for Filter {
    fn from(patterns: &[&str]) -> Self {
        Filter::Many(patterns.iter().map(|p| (*p).to_string()).collect())
    }
}

/// A finalized transpiler configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Presets in declaration order
    #[serde(default)]
    pub presets: Vec<Item>,

    /// Plugins in declaration order
    #[serde(default)]
    pub plugins: Vec<Item>,

    /// Files this configuration applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<Filter>,

    /// Files this configuration skips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Filter>,

    /// Nested configurations in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Configuration>,
}

impl Configuration {
    /// Serialize to a JSON value
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Fluent accumulator for a [`Configuration`]
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl ConfigurationBuilder {
    /// Start an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a preset
    #[must_use]
    pub fn preset(mut self, name: &str) -> Self {
        self.config.presets.push(Item::Name(name.to_string()));
        self
    }

    /// Append a preset with options
    #[must_use]
    pub fn preset_with(mut self, name: &str, options: Value) -> Self {
        self.config
            .presets
            .push(Item::WithOptions(name.to_string(), options));
        self
    }

    /// Append a plugin
    #[must_use]
    pub fn plugin(mut self, name: &str) -> Self {
        self.config.plugins.push(Item::Name(name.to_string()));
        self
    }

    /// Append a plugin with options
    #[must_use]
    pub fn plugin_with(mut self, name: &str, options: Value) -> Self {
        self.config
            .plugins
            .push(Item::WithOptions(name.to_string(), options));
        self
    }

    /// Set the `test` filter, replacing any earlier one
    #[must_use]
    pub fn test(mut self, filter: impl Into<Filter>) -> Self {
        self.config.test = Some(filter.into());
        self
    }

    /// Set the `exclude` filter, replacing any earlier one
    #[must_use]
    pub fn exclude(mut self, filter: impl Into<Filter>) -> Self {
        self.config.exclude = Some(filter.into());
        self
    }

    /// Append a nested configuration
    #[must_use]
    pub fn with_override(mut self, nested: impl Into<Configuration>) -> Self {
        self.config.overrides.push(nested.into());
        self
    }

    /// Finalize the configuration
    pub fn build(self) -> Configuration {
        self.config
    }
}

impl From<ConfigurationBuilder> for Configuration {
    fn from(builder: ConfigurationBuilder) -> Self {
        builder.build()
    }
}
