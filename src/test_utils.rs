//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    use crate::core::dictionary::Dictionary;

    /// Generate a component name (lowercase alphanumeric with hyphens)
    pub fn component_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,12}"
    }

    /// Generate a published module name, optionally scoped
    pub fn module_name() -> impl Strategy<Value = String> {
        (prop::option::of("[a-z]{2,8}"), "[a-z][a-z0-9-]{0,12}").prop_map(|(scope, name)| {
            match scope {
                Some(scope) => format!("@{scope}/{name}"),
                None => name,
            }
        })
    }

    /// Generate an alias table
    pub fn alias_table() -> impl Strategy<Value = Dictionary> {
        proptest::collection::vec((component_name(), module_name()), 0..8)
            .prop_map(|pairs| pairs.into_iter().collect())
    }

    /// Generate a preset or plugin name, including odd ones
    pub fn directive_name() -> impl Strategy<Value = String> {
        prop_oneof![
            "@babel/[a-z-]{1,20}",
            "module:[a-z-]{1,20}",
            ".{0,10}",
        ]
    }

    /// Generate a valid semver version string
    pub fn semver_version() -> impl Strategy<Value = String> {
        (0u32..100, 0u32..100, 0u32..100)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_component_name_generator(name in component_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(!name.contains('/'));
        }

        #[test]
        fn test_module_name_generator(name in module_name()) {
            prop_assert!(!name.is_empty());
            if name.starts_with('@') {
                prop_assert!(name.contains('/'));
            }
        }

        #[test]
        fn test_semver_version_generator(version in semver_version()) {
            prop_assert!(semver::Version::parse(&version).is_ok());
        }
    }
}
