//! Integration tests for the helper contract.

use std::sync::{Arc, Mutex};

use handlebars_i18n::{
    Environment, FormatError, Formatter, HELPER_NAMES, HelperError, InvocationOptions,
    RenderValue, init, share,
};
use i18n_catalog::{Catalog, Map, Value, options};
use serde_json::json;

fn catalog() -> Catalog {
    let mut catalog = Catalog::with_language("en");
    catalog
        .load_json_str(
            "en",
            "translation",
            r#"{
                "hello": "Hello!",
                "greeting": "Hello, <b>{{name}}</b>",
                "apples_one": "{{count}} apple",
                "apples_other": "{{count}} apples"
            }"#,
        )
        .unwrap();
    catalog
        .load_json_str("de", "translation", r#"{ "hello": "Hallo!" }"#)
        .unwrap();
    catalog
}

fn env() -> Environment {
    Environment::new(catalog())
}

fn opts() -> InvocationOptions {
    InvocationOptions::new()
}

fn set_language(env: &Environment, language: &str) {
    env.engine().write().unwrap().set_language(language);
}

// =========================================================================
// Registry
// =========================================================================

#[test]
fn init_registers_all_helpers() {
    let registry = env().init();
    assert_eq!(registry.len(), 6);
    for name in HELPER_NAMES {
        assert!(registry.contains(name), "missing helper {name}");
    }
    let mut expected = HELPER_NAMES.to_vec();
    expected.sort_unstable();
    assert_eq!(registry.names().collect::<Vec<_>>(), expected);
}

#[test]
fn aliases_resolve_to_same_helpers() {
    let registry = env().init();
    let args = [json!("hello")];
    assert_eq!(
        registry.call("__", &args, Some(&opts())).unwrap(),
        registry.call("translate", &args, Some(&opts())).unwrap()
    );
    assert_eq!(
        registry.call("_locale", &[], Some(&opts())).unwrap(),
        RenderValue::Escaped("en".to_string())
    );
    assert!(registry.contains("_num"));
    assert!(!registry.contains("localeis"));
}

#[test]
fn unknown_helper_is_an_error() {
    let registry = env().init();
    assert_eq!(
        registry.call("pluralize", &[], Some(&opts())),
        Err(HelperError::UnknownHelper {
            name: "pluralize".to_string()
        })
    );
}

#[test]
fn init_twice_gives_independent_registries() {
    let engine = share(catalog());
    let first = init(Some(Arc::clone(&engine)));
    let second = init(Some(Arc::clone(&engine)));

    let args = [json!("hello")];
    assert_eq!(
        first.call("translate", &args, Some(&opts())),
        second.call("translate", &args, Some(&opts()))
    );

    drop(first);
    assert_eq!(
        second.call("translate", &args, Some(&opts())).unwrap(),
        RenderValue::Raw("Hello!".to_string())
    );

    engine.write().unwrap().set_language("de");
    let third = init(Some(engine));
    assert_eq!(
        second.call("translate", &args, Some(&opts())),
        third.call("translate", &args, Some(&opts()))
    );
}

// =========================================================================
// translate
// =========================================================================

#[test]
fn translate_returns_raw_text() {
    let registry = env().init();
    let value = registry
        .call("translate", &[json!("greeting")], Some(&options! { "name" => "Ann" }.into()))
        .unwrap();
    assert!(value.is_raw());
    assert_eq!(value.as_str(), Some("Hello, <b>Ann</b>"));
}

#[test]
fn translate_passes_hash_to_engine() {
    let registry = env().init();
    let value = registry
        .call("translate", &[json!("apples")], Some(&options! { "count" => 3 }.into()))
        .unwrap();
    assert_eq!(value, RenderValue::Raw("3 apples".to_string()));
}

#[test]
fn translate_missing_key_returns_key() {
    let registry = env().init();
    let value = registry
        .call("translate", &[json!("nav.missing")], Some(&opts()))
        .unwrap();
    assert_eq!(value, RenderValue::Raw("nav.missing".to_string()));
}

#[test]
fn translate_without_options_fails_the_same_way() {
    let registry = env().init();
    let no_args = registry.call("translate", &[], None).unwrap_err();
    let key_only = registry.call("translate", &[json!("hello")], None).unwrap_err();
    assert_eq!(no_args, key_only);
    assert_eq!(no_args, HelperError::MissingOptions { helper: "translate" });
    assert_eq!(
        no_args.to_string(),
        "missing invocation options for helper 'translate'"
    );
}

#[test]
fn translate_requires_string_key() {
    let registry = env().init();
    assert_eq!(
        registry.call("translate", &[], Some(&opts())),
        Err(HelperError::MissingArgument {
            helper: "translate",
            index: 0
        })
    );
    assert_eq!(
        registry.call("translate", &[json!(7)], Some(&opts())),
        Err(HelperError::InvalidArgument {
            helper: "translate",
            index: 0,
            expected: "string",
            found: "number"
        })
    );
}

// =========================================================================
// currentLocale / localeIs
// =========================================================================

#[test]
fn current_locale_follows_engine() {
    let env = env();
    let registry = env.init();
    for language in ["en", "de", "pt-BR"] {
        set_language(&env, language);
        assert_eq!(
            registry.call("currentLocale", &[], Some(&opts())).unwrap(),
            RenderValue::Escaped(language.to_string())
        );
        assert_eq!(
            registry.call("localeIs", &[json!(language)], Some(&opts())).unwrap(),
            RenderValue::Bool(true)
        );
        for other in ["en", "de", "pt-BR", "fr"].into_iter().filter(|l| *l != language) {
            assert_eq!(
                registry.call("localeIs", &[json!(other)], Some(&opts())).unwrap(),
                RenderValue::Bool(false),
                "{other} while {language} is active"
            );
        }
    }
}

#[test]
fn current_locale_ignores_arguments() {
    let registry = env().init();
    assert_eq!(
        registry.call("currentLocale", &[json!("de"), json!(1)], None).unwrap(),
        RenderValue::Escaped("en".to_string())
    );
}

#[test]
fn unset_locale_is_missing() {
    let registry = Environment::new(Catalog::new()).init();
    let value = registry.call("currentLocale", &[], Some(&opts())).unwrap();
    assert!(value.is_missing());
    assert_eq!(value.to_string(), "");
    for candidate in [json!("en"), json!(""), json!(null)] {
        assert_eq!(
            registry.call("localeIs", &[candidate], Some(&opts())).unwrap(),
            RenderValue::Bool(false)
        );
    }
    assert_eq!(
        registry.call("localeIs", &[], Some(&opts())).unwrap(),
        RenderValue::Bool(false)
    );
}

#[test]
fn locale_is_is_case_sensitive() {
    let env = env();
    set_language(&env, "pt-BR");
    let registry = env.init();
    assert_eq!(
        registry.call("localeIs", &[json!("pt-br")], Some(&opts())).unwrap(),
        RenderValue::Bool(false)
    );
    assert_eq!(
        registry.call("localeIs", &[json!(42)], Some(&opts())).unwrap(),
        RenderValue::Bool(false)
    );
}

// =========================================================================
// Formatting helpers
// =========================================================================

#[test]
fn format_number_uses_active_locale() {
    let env = env();
    let registry = env.init();
    assert_eq!(
        registry.call("formatNumber", &[json!(1234.5)], Some(&opts())).unwrap(),
        RenderValue::Escaped("1,234.5".to_string())
    );
    set_language(&env, "de");
    assert_eq!(
        registry.call("formatNumber", &[json!(1234.5)], Some(&opts())).unwrap(),
        RenderValue::Escaped("1.234,5".to_string())
    );
}

#[test]
fn format_helpers_default_to_english_without_locale() {
    let registry = Environment::new(Catalog::new()).init();
    assert_eq!(
        registry.call("formatNumber", &[json!(1000)], Some(&opts())).unwrap(),
        RenderValue::Escaped("1,000".to_string())
    );
}

#[test]
fn format_failures_propagate() {
    let registry = env().init();
    let err = registry
        .call("formatNumber", &[json!("many")], Some(&opts()))
        .unwrap_err();
    assert_eq!(
        err,
        HelperError::Format(FormatError::NotANumber {
            found: "string \"many\"".to_string()
        })
    );

    let err = registry
        .call("formatDate", &[json!("not a date")], Some(&opts()))
        .unwrap_err();
    assert!(matches!(err, HelperError::Format(FormatError::InvalidDate { .. })));

    let err = registry
        .call(
            "formatPrice",
            &[json!(5)],
            Some(&options! { "currency" => "euro" }.into()),
        )
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid currency code 'euro'"
    );
}

#[test]
fn format_helpers_require_options() {
    let registry = env().init();
    for name in ["formatDate", "formatNumber", "formatPrice"] {
        let err = registry.call(name, &[json!(1)], None).unwrap_err();
        assert!(
            matches!(err, HelperError::MissingOptions { helper } if helper == name),
            "{name}: {err}"
        );
    }
}

type Calls = Arc<Mutex<Vec<(String, Value, Map<String, Value>)>>>;

/// Records what the helpers hand to the formatter.
#[derive(Default)]
struct Recorder {
    calls: Calls,
}

impl Formatter for Recorder {
    fn format_date(
        &self,
        locale: &str,
        value: &Value,
        options: &Map<String, Value>,
    ) -> Result<String, FormatError> {
        self.calls
            .lock()
            .unwrap()
            .push((locale.to_string(), value.clone(), options.clone()));
        Ok("<date>".to_string())
    }

    fn format_number(
        &self,
        _locale: &str,
        _value: &Value,
        _options: &Map<String, Value>,
    ) -> Result<String, FormatError> {
        Ok("n".to_string())
    }

    fn format_price(
        &self,
        _locale: &str,
        _value: &Value,
        _options: &Map<String, Value>,
    ) -> Result<String, FormatError> {
        Err(FormatError::InvalidCurrency {
            code: "XXX".to_string(),
        })
    }
}

#[test]
fn format_helpers_delegate_unmodified() {
    let calls = Calls::default();
    let env = env().with_formatter(Recorder {
        calls: Arc::clone(&calls),
    });
    let registry = env.init();

    let value = registry
        .call(
            "formatDate",
            &[json!([2020, 3, 11])],
            Some(&options! { "dateStyle" => "long" }.into()),
        )
        .unwrap();
    assert_eq!(value, RenderValue::Escaped("<date>".to_string()));

    registry.call("formatDate", &[], Some(&opts())).unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "en");
    assert_eq!(calls[0].1, json!([2020, 3, 11]));
    assert_eq!(calls[0].2, options! { "dateStyle" => "long" });
    assert_eq!(calls[1].1, Value::Null);
    assert!(calls[1].2.is_empty());
    drop(calls);

    assert_eq!(
        registry.call("formatPrice", &[json!(1)], Some(&opts())),
        Err(HelperError::Format(FormatError::InvalidCurrency {
            code: "XXX".to_string()
        }))
    );
}
