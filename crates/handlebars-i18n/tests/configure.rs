//! Integration tests for configuration tables and format presets.

use handlebars_i18n::{
    ConfigEntry, ConfigError, Environment, FormatKind, FormatPresets, InvocationOptions,
    RenderValue, parse_table,
};
use i18n_catalog::{BundleError, Catalog, options};
use serde_json::{Value, json};

fn env() -> Environment {
    Environment::new(Catalog::with_language("en"))
}

fn translate(env: &Environment, key: &str) -> String {
    let value = env
        .init()
        .call("translate", &[json!(key)], Some(&InvocationOptions::new()))
        .unwrap();
    value.to_string()
}

fn format(env: &Environment, helper: &str, value: Value, hash: Value) -> String {
    let Value::Object(hash) = hash else {
        panic!("hash must be an object");
    };
    match env
        .init()
        .call(helper, &[value], Some(&InvocationOptions::with_hash(hash)))
        .unwrap()
    {
        RenderValue::Escaped(text) => text,
        other => panic!("expected escaped output, got {other:?}"),
    }
}

// =========================================================================
// Argument validation
// =========================================================================

#[test]
fn configure_argument_contract() {
    let env = env();
    assert!(!env.configure(&[]));
    assert!(env.configure(&[json!([])]));
    assert!(!env.configure(&[json!("en")]));
    assert!(!env.configure(&[json!("en"), json!("not-a-resource-object")]));
}

#[test]
fn empty_table_installs_nothing() {
    let env = env();
    assert!(env.configure(&[json!([])]));
    assert_eq!(translate(&env, "hello"), "hello");
    assert!(env.with_presets(FormatPresets::is_empty));
}

#[test]
fn rejection_reasons() {
    assert_eq!(parse_table(&[]), Err(ConfigError::NoArguments));
    assert_eq!(
        parse_table(&[json!("en")]),
        Err(ConfigError::NotATable { found: "string" })
    );
    assert_eq!(
        parse_table(&[json!(["en", "NumberFormat", {"minimumFractionDigits": 2}])]),
        Err(ConfigError::EntryNotArray {
            index: 0,
            found: "string"
        })
    );
    assert_eq!(
        parse_table(&[json!([["en", {}], 5])]),
        Err(ConfigError::EntryNotArray {
            index: 1,
            found: "number"
        })
    );
    assert_eq!(
        parse_table(&[json!([["en"]])]),
        Err(ConfigError::Arity { index: 0, len: 1 })
    );
    assert_eq!(
        parse_table(&[json!([[7, {}]])]),
        Err(ConfigError::Language { index: 0 })
    );
    assert_eq!(
        parse_table(&[json!([["", {}]])]),
        Err(ConfigError::Language { index: 0 })
    );
    assert!(matches!(
        parse_table(&[json!("en"), json!("not-a-resource-object")]),
        Err(ConfigError::Shape { index: 0, .. })
    ));
    assert!(matches!(
        parse_table(&[json!([["en", "Currency", "eur", {}]])]),
        Err(ConfigError::Shape { index: 0, .. })
    ));
}

#[test]
fn unsupported_resource_values_are_rejected() {
    let err = parse_table(&[json!([["en", {"menu": {"items": [1, 2]}}]])]).unwrap_err();
    assert_eq!(
        err,
        ConfigError::Bundle {
            index: 0,
            source: BundleError::UnsupportedValue {
                key: "menu.items".to_string(),
                found: "array"
            }
        }
    );
}

#[test]
fn entry_shapes() {
    let entries = parse_table(&[json!([
        ["en", {"a": "A"}],
        ["de", "common", {"b": "B"}],
        ["en", "NumberFormat", {"maximumFractionDigits": 1}],
        ["all", "PriceFormat", "usd", {"currency": "USD"}]
    ])])
    .unwrap();
    assert_eq!(
        entries,
        vec![
            ConfigEntry::Resources {
                language: "en".to_string(),
                namespace: None,
                resources: options! { "a" => "A" },
            },
            ConfigEntry::Resources {
                language: "de".to_string(),
                namespace: Some("common".to_string()),
                resources: options! { "b" => "B" },
            },
            ConfigEntry::Format {
                language: "en".to_string(),
                kind: FormatKind::Number,
                name: None,
                options: options! { "maximumFractionDigits" => 1 },
            },
            ConfigEntry::Format {
                language: "all".to_string(),
                kind: FormatKind::Price,
                name: Some("usd".to_string()),
                options: options! { "currency" => "USD" },
            },
        ]
    );
}

// =========================================================================
// Installation
// =========================================================================

#[test]
fn resources_are_merged_into_the_engine() {
    let env = env();
    assert!(env.configure(&[json!([
        ["en", {"hello": "Hello", "nav": {"home": "Home"}}],
        ["de", {"hello": "Hallo"}]
    ])]));
    assert!(env.configure(&[json!("en"), json!({"nav": {"back": "Back"}})]));

    assert_eq!(translate(&env, "hello"), "Hello");
    assert_eq!(translate(&env, "nav.home"), "Home");
    assert_eq!(translate(&env, "nav.back"), "Back");

    env.engine().write().unwrap().set_language("de");
    assert_eq!(translate(&env, "hello"), "Hallo");
}

#[test]
fn namespaced_resources() {
    let env = env();
    assert!(env.configure(&[json!("en"), json!("common"), json!({"ok": "OK"})]));
    assert_eq!(translate(&env, "common:ok"), "OK");
    assert_eq!(translate(&env, "ok"), "ok");
}

#[test]
fn invalid_table_installs_nothing() {
    let env = env();
    assert!(!env.configure(&[json!([
        ["en", {"hello": "Hello"}],
        ["en", "NumberFormat", {"maximumFractionDigits": 0}],
        ["de", 42]
    ])]));
    assert_eq!(translate(&env, "hello"), "hello");
    assert!(env.with_presets(FormatPresets::is_empty));
}

#[test]
fn try_configure_reports_reason() {
    let env = env();
    let err = env.try_configure(&[json!([["de", 42]])]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "entry 0: expected a resource object, a namespace and resource object, or a format type and options"
    );
}

// =========================================================================
// Format presets
// =========================================================================

#[test]
fn standard_preset_applies_without_hash() {
    let env = env();
    assert!(env.configure(&[
        json!("en"),
        json!("NumberFormat"),
        json!({"minimumFractionDigits": 2})
    ]));
    assert_eq!(env.with_presets(FormatPresets::len), 1);
    assert_eq!(format(&env, "formatNumber", json!(3), json!({})), "3.00");
}

#[test]
fn explicit_hash_replaces_standard_preset() {
    let env = env();
    assert!(env.configure(&[json!([["en", "NumberFormat", {"minimumFractionDigits": 2}]])]));
    assert_eq!(format(&env, "formatNumber", json!(1234.5), json!({})), "1,234.50");
    assert_eq!(
        format(&env, "formatNumber", json!(1234.5), json!({"useGrouping": false})),
        "1234.5"
    );
}

#[test]
fn named_preset_merges_hash_options() {
    let env = env();
    assert!(env.configure(&[json!([
        ["en", "PriceFormat", "dollars", {"currency": "USD", "currencyDisplay": "code"}]
    ])]));
    assert_eq!(
        format(&env, "formatPrice", json!(12), json!({"format": "dollars"})),
        "USD\u{a0}12.00"
    );
    assert_eq!(
        format(
            &env,
            "formatPrice",
            json!(12),
            json!({"format": "dollars", "currencyDisplay": "symbol"})
        ),
        "$12.00"
    );
}

#[test]
fn all_language_presets_are_a_fallback() {
    let env = env();
    assert!(env.configure(&[json!([
        ["all", "NumberFormat", {"maximumFractionDigits": 1}],
        ["de", "NumberFormat", {"maximumFractionDigits": 2}]
    ])]));
    assert_eq!(format(&env, "formatNumber", json!(3.14159), json!({})), "3.1");

    env.engine().write().unwrap().set_language("de");
    assert_eq!(format(&env, "formatNumber", json!(3.14159), json!({})), "3,14");
}

#[test]
fn unknown_named_preset_uses_defaults() {
    let env = env();
    assert_eq!(
        format(&env, "formatNumber", json!(3.14159), json!({"format": "missing"})),
        "3.142"
    );
}

#[test]
fn reset_clears_presets_only() {
    let env = env();
    assert!(env.configure(&[json!([
        ["en", {"hello": "Hello"}],
        ["en", "NumberFormat", {"minimumFractionDigits": 2}]
    ])]));
    assert_eq!(env.with_presets(FormatPresets::len), 1);

    env.reset();
    assert!(env.with_presets(FormatPresets::is_empty));
    assert_eq!(format(&env, "formatNumber", json!(3), json!({})), "3");
    assert_eq!(translate(&env, "hello"), "Hello");
}

#[test]
fn flat_entry_as_table_is_rejected() {
    let env = env();
    assert!(!env.configure(&[json!(["en", {"hello": "Hello"}])]));
    assert!(!env.configure(&[json!(["en", "NumberFormat", {"minimumFractionDigits": 2}])]));
    assert!(env.with_presets(FormatPresets::is_empty));
    assert_eq!(translate(&env, "hello"), "hello");
}

#[test]
fn presets_are_shared_by_registries() {
    let env = env();
    let registry = env.init();
    assert!(env.configure(&[json!([["en", "NumberFormat", {"minimumFractionDigits": 1}]])]));
    assert_eq!(
        registry
            .call("formatNumber", &[json!(2)], Some(&InvocationOptions::new()))
            .unwrap(),
        RenderValue::Escaped("2.0".to_string())
    );
}
