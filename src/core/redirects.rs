//! Import redirects and the standard transpiler configuration
//!
//! Components import each other by component name and by source path
//! (`o-colors/src/util`). Once published, those imports must point at the
//! module name and the compiled output (`@scope/o-colors/dist/util`). The
//! redirect table produced here tells the transpiler how to rewrite them.

use serde_json::json;

use crate::core::dictionary::{self, Dictionary};
use crate::core::transpile_config::{Configuration, ConfigurationBuilder};

/// Plugin that resolves bare component names through the alias table
pub const MODULE_RESOLVER_PLUGIN: &str = "module:babel-plugin-module-resolver";

/// Plugin that rewrites import specifiers through a redirect table
pub const IMPORT_REDIRECT_PLUGIN: &str = "module:babel-plugin-import-redirect";

/// Derive a redirect table from an alias table
///
/// Starts from a copy of `base`, then adds `"{component}/src/(.*)"` →
/// `"{module}/dist/$1"` for every alias. Alias-derived rules overwrite
/// colliding base keys.
pub fn derive_redirects(aliases: &Dictionary, base: &Dictionary) -> Dictionary {
    dictionary::reduce(
        aliases,
        base.clone(),
        |mut redirects, module_name, component_name| {
            redirects.insert(
                format!("{component_name}/src/(.*)"),
                format!("{module_name}/dist/$1"),
            );
            redirects
        },
    )
}

/// Build the transpiler configuration written into every component manifest
///
/// Three overrides cover the three things a component compiles: library
/// sources, the `main.js` entry file, and the staged tests in `test.src`.
pub fn create_configuration(aliases: &Dictionary) -> Configuration {
    let library = ConfigurationBuilder::new()
        .preset_with("@babel/preset-env", json!({ "useBuiltIns": false }))
        .plugin("@babel/plugin-transform-modules-commonjs")
        .plugin("module:babel-plugin-add-module-exports")
        .plugin("module:babel-plugin-transform-es3-member-expression-literals")
        .plugin("module:babel-plugin-transform-es3-property-literals")
        .plugin_with(
            IMPORT_REDIRECT_PLUGIN,
            json!({ "redirect": derive_redirects(aliases, &Dictionary::new()) }),
        )
        .exclude("./test.src/**");

    let entry = ConfigurationBuilder::new()
        .plugin_with(
            IMPORT_REDIRECT_PLUGIN,
            json!({
                "redirect": derive_redirects(
                    aliases,
                    &dictionary::from_pairs([("./src/(.*)", "./dist/$1")]),
                )
            }),
        )
        .test("./main.js");

    // `./fixture/main` maps to itself so the `../main` rule cannot catch it.
    let tests = ConfigurationBuilder::new()
        .plugin_with(
            IMPORT_REDIRECT_PLUGIN,
            json!({
                "root": "test",
                "redirect": derive_redirects(
                    aliases,
                    &dictionary::from_pairs([
                        ("../src/(.*)", "../dist/$1"),
                        ("./fixture/main", "./fixture/main"),
                        ("../main", "../browser.js"),
                    ]),
                )
            }),
        )
        .test("./test.src/**");

    ConfigurationBuilder::new()
        .plugin_with(MODULE_RESOLVER_PLUGIN, json!({ "alias": aliases }))
        .with_override(library)
        .with_override(entry)
        .with_override(tests)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transpile_config::Filter;
    use crate::test_utils::generators::alias_table;
    use proptest::prelude::*;

    fn sample_aliases() -> Dictionary {
        dictionary::from_pairs([
            ("o-colors", "@financial-times/o-colors"),
            ("o-grid", "@financial-times/o-grid"),
        ])
    }

    #[test]
    fn test_derive_redirects_from_empty_base() {
        let redirects = derive_redirects(&sample_aliases(), &Dictionary::new());

        assert_eq!(redirects.len(), 2);
        assert_eq!(
            redirects["o-colors/src/(.*)"],
            "@financial-times/o-colors/dist/$1"
        );
        assert_eq!(redirects["o-grid/src/(.*)"], "@financial-times/o-grid/dist/$1");
    }

    #[test]
    fn test_derive_redirects_keeps_base_entries() {
        let base = dictionary::from_pairs([("./src/(.*)", "./dist/$1")]);
        let redirects = derive_redirects(&sample_aliases(), &base);

        assert_eq!(redirects.len(), 3);
        assert_eq!(redirects["./src/(.*)"], "./dist/$1");
        // base is not mutated
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_alias_rule_overwrites_colliding_base_key() {
        let base = dictionary::from_pairs([("o-colors/src/(.*)", "somewhere/else/$1")]);
        let redirects = derive_redirects(&sample_aliases(), &base);

        assert_eq!(redirects.len(), 2);
        assert_eq!(
            redirects["o-colors/src/(.*)"],
            "@financial-times/o-colors/dist/$1"
        );
    }

    #[test]
    fn test_configuration_shape() {
        let config = create_configuration(&sample_aliases());

        assert!(config.presets.is_empty());
        assert_eq!(config.plugins.len(), 1);
        assert_eq!(config.plugins[0].name(), MODULE_RESOLVER_PLUGIN);
        assert_eq!(
            config.plugins[0].options().unwrap()["alias"]["o-grid"],
            "@financial-times/o-grid"
        );
        assert_eq!(config.overrides.len(), 3);

        let library = &config.overrides[0];
        assert_eq!(library.presets[0].name(), "@babel/preset-env");
        assert_eq!(library.plugins.len(), 5);
        assert_eq!(library.plugins[4].name(), IMPORT_REDIRECT_PLUGIN);
        assert_eq!(library.exclude, Some(Filter::from("./test.src/**")));
        assert_eq!(library.test, None);

        let entry = &config.overrides[1];
        assert_eq!(entry.test, Some(Filter::from("./main.js")));
        assert_eq!(
            entry.plugins[0].options().unwrap()["redirect"]["./src/(.*)"],
            "./dist/$1"
        );

        let tests = &config.overrides[2];
        let options = tests.plugins[0].options().unwrap();
        assert_eq!(options["root"], "test");
        assert_eq!(options["redirect"]["../main"], "../browser.js");
        assert_eq!(options["redirect"]["./fixture/main"], "./fixture/main");
        assert_eq!(
            options["redirect"]["o-colors/src/(.*)"],
            "@financial-times/o-colors/dist/$1"
        );
        assert_eq!(tests.test, Some(Filter::from("./test.src/**")));
    }

    fn redirect_keys(config: &serde_json::Value, index: usize) -> Vec<String> {
        let options = &config["overrides"][index]["plugins"];
        let plugin = options
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p[0] == IMPORT_REDIRECT_PLUGIN)
            .unwrap();
        plugin[1]["redirect"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    fn test_redirect_rules_serialize_in_declaration_order() {
        // deliberately not in sorted order
        let aliases = dictionary::from_pairs([
            ("o-grid", "@financial-times/o-grid"),
            ("o-colors", "@financial-times/o-colors"),
        ]);
        let config = create_configuration(&aliases).to_json().unwrap();

        assert_eq!(
            redirect_keys(&config, 0),
            vec!["o-grid/src/(.*)", "o-colors/src/(.*)"]
        );
        assert_eq!(
            redirect_keys(&config, 1),
            vec!["./src/(.*)", "o-grid/src/(.*)", "o-colors/src/(.*)"]
        );
        assert_eq!(
            redirect_keys(&config, 2),
            vec![
                "../src/(.*)",
                "./fixture/main",
                "../main",
                "o-grid/src/(.*)",
                "o-colors/src/(.*)",
            ]
        );
    }

    #[test]
    fn test_fixture_rule_precedes_main_rule_in_output() {
        let config = create_configuration(&Dictionary::new());
        let text = serde_json::to_string(&config).unwrap();

        let fixture = text.find("\"./fixture/main\"").unwrap();
        let main = text.find("\"../main\"").unwrap();
        assert!(fixture < main, "rendered: {text}");
    }

    #[test]
    fn test_alias_table_keeps_insertion_order() {
        let aliases = dictionary::from_pairs([("o-b", "b"), ("o-a", "a")]);
        let config = create_configuration(&aliases).to_json().unwrap();

        let keys: Vec<&String> = config["plugins"][0][1]["alias"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, vec!["o-b", "o-a"]);
    }

    #[test]
    fn test_configuration_with_no_aliases() {
        let config = create_configuration(&Dictionary::new());
        let redirect = &config.overrides[0].plugins[4].options().unwrap()["redirect"];
        assert_eq!(redirect, &serde_json::json!({}));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_redirects_cover_base_and_aliases(aliases in alias_table(), base in alias_table()) {
            let redirects = derive_redirects(&aliases, &base);

            for key in base.keys() {
                prop_assert!(redirects.contains_key(key));
            }
            for (component, module) in &aliases {
                let key = format!("{component}/src/(.*)");
                prop_assert_eq!(&redirects[&key], &format!("{module}/dist/$1"));
            }
            // generated names never contain '/', so alias keys cannot hit base keys
            prop_assert_eq!(redirects.len(), base.len() + aliases.len());
        }

        #[test]
        fn prop_redirect_derivation_is_deterministic(aliases in alias_table(), base in alias_table()) {
            prop_assert_eq!(derive_redirects(&aliases, &base), derive_redirects(&aliases, &base));
        }
    }
}
