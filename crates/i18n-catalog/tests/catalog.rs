//! Integration tests for catalog lookup.

use i18n_catalog::{Catalog, options};

fn english() -> Catalog {
    let mut catalog = Catalog::with_language("en");
    catalog
        .load_json_str(
            "en",
            "translation",
            r#"{
                "hello": "Hello!",
                "greeting": "Hello, {{name}}!",
                "raw": "Markup: {{- html}}",
                "menu": { "file": { "open": "Open file" } },
                "flat.key": "Flat",
                "item_one": "{{count}} item",
                "item_other": "{{count}} items",
                "item_zero": "no items",
                "friend": "A friend",
                "friend_male": "A boyfriend",
                "friend_female": "A girlfriend",
                "friend_female_other": "{{count}} girlfriends",
                "welcome": "$t(hello) Welcome back.",
                "loop": "$t(loop)",
                "user": "User {{user.name}}",
                "answer": 42
            }"#,
        )
        .unwrap();
    catalog
}

// =========================================================================
// Basic Lookup
// =========================================================================

#[test]
fn catalog_default_has_no_language() {
    let catalog = Catalog::new();
    assert_eq!(catalog.language(), None);
    assert_eq!(catalog.default_namespace(), "translation");
}

#[test]
fn simple_key_resolves() {
    assert_eq!(english().translate("hello", &options! {}), "Hello!");
}

#[test]
fn missing_key_returns_key() {
    assert_eq!(english().translate("nope.nothing", &options! {}), "nope.nothing");
}

#[test]
fn missing_key_without_language_returns_key() {
    let catalog = Catalog::new();
    assert_eq!(catalog.translate("someKey", &options! {}), "someKey");
}

#[test]
fn default_value_used_when_missing() {
    let text = english().translate(
        "nope",
        &options! { "defaultValue" => "Fallback {{name}}", "name" => "Bo" },
    );
    assert_eq!(text, "Fallback Bo");
}

#[test]
fn nested_and_flat_keys_resolve() {
    let catalog = english();
    assert_eq!(catalog.translate("menu.file.open", &options! {}), "Open file");
    assert_eq!(catalog.translate("flat.key", &options! {}), "Flat");
}

#[test]
fn object_value_is_treated_as_missing() {
    assert_eq!(english().translate("menu.file", &options! {}), "menu.file");
}

#[test]
fn number_leaf_is_rendered() {
    assert_eq!(english().translate("answer", &options! {}), "42");
}

// =========================================================================
// Interpolation
// =========================================================================

#[test]
fn interpolation_escapes_html() {
    let text = english().translate("greeting", &options! { "name" => "<b>Ada</b>" });
    assert_eq!(text, "Hello, &lt;b&gt;Ada&lt;&#x2F;b&gt;!");
}

#[test]
fn raw_interpolation_is_not_escaped() {
    let text = english().translate("raw", &options! { "html" => "<i>x</i>" });
    assert_eq!(text, "Markup: <i>x</i>");
}

#[test]
fn unknown_variable_is_left_in_place() {
    assert_eq!(english().translate("greeting", &options! {}), "Hello, {{name}}!");
}

#[test]
fn dotted_variable_reads_nested_option() {
    let mut opts = options! {};
    opts.insert("user".to_string(), serde_json::json!({ "name": "Kim" }));
    assert_eq!(english().translate("user", &opts), "User Kim");
}

#[test]
fn nesting_resolves_other_key() {
    assert_eq!(
        english().translate("welcome", &options! {}),
        "Hello! Welcome back."
    );
}

#[test]
fn self_nesting_stops_at_depth_limit() {
    assert_eq!(english().translate("loop", &options! {}), "loop");
}

// =========================================================================
// Plurals and Context
// =========================================================================

#[test]
fn english_plural_suffixes() {
    let catalog = english();
    assert_eq!(catalog.translate("item", &options! { "count" => 1 }), "1 item");
    assert_eq!(catalog.translate("item", &options! { "count" => 5 }), "5 items");
    assert_eq!(catalog.translate("item", &options! { "count" => 0 }), "no items");
}

#[test]
fn russian_plural_categories() {
    let mut catalog = Catalog::with_language("ru");
    catalog
        .load_json_str(
            "ru",
            "translation",
            r#"{"file_one": "{{count}} файл", "file_few": "{{count}} файла", "file_many": "{{count}} файлов"}"#,
        )
        .unwrap();
    assert_eq!(catalog.translate("file", &options! { "count" => 1 }), "1 файл");
    assert_eq!(catalog.translate("file", &options! { "count" => 3 }), "3 файла");
    assert_eq!(catalog.translate("file", &options! { "count" => 7 }), "7 файлов");
}

#[test]
fn context_suffix_selected() {
    let catalog = english();
    assert_eq!(
        catalog.translate("friend", &options! { "context" => "male" }),
        "A boyfriend"
    );
    assert_eq!(
        catalog.translate("friend", &options! { "context" => "unknown" }),
        "A friend"
    );
}

#[test]
fn context_with_plural() {
    let text = english().translate("friend", &options! { "context" => "female", "count" => 2 });
    assert_eq!(text, "2 girlfriends");
}

// =========================================================================
// Languages and Namespaces
// =========================================================================

#[test]
fn region_falls_back_to_base_language() {
    let mut catalog = english();
    catalog.change_language("en-GB");
    assert_eq!(catalog.translate("hello", &options! {}), "Hello!");
}

#[test]
fn fallback_language_consulted_last() {
    let mut catalog = Catalog::builder()
        .language("de")
        .fallback_language("en")
        .build();
    catalog.add_resource("en", "translation", "only.english", "English only");
    catalog.add_resource("de", "translation", "hello", "Hallo!");
    assert_eq!(catalog.translate("hello", &options! {}), "Hallo!");
    assert_eq!(catalog.translate("only.english", &options! {}), "English only");
}

#[test]
fn lng_option_overrides_language() {
    let mut catalog = english();
    catalog.add_resource("de", "translation", "hello", "Hallo!");
    assert_eq!(catalog.translate("hello", &options! { "lng" => "de" }), "Hallo!");
}

#[test]
fn namespace_prefix_and_option() {
    let mut catalog = english();
    catalog.add_resource("en", "common", "save", "Save");
    assert_eq!(catalog.translate("common:save", &options! {}), "Save");
    assert_eq!(catalog.translate("save", &options! { "ns" => "common" }), "Save");
    assert_eq!(catalog.translate("save", &options! {}), "save");
}

#[test]
fn bundles_merge_deeply() {
    let mut catalog = english();
    catalog
        .load_json_str("en", "translation", r#"{"menu": {"file": {"close": "Close"}}}"#)
        .unwrap();
    assert_eq!(catalog.translate("menu.file.open", &options! {}), "Open file");
    assert_eq!(catalog.translate("menu.file.close", &options! {}), "Close");
}

#[test]
fn keys_are_flattened_and_sorted() {
    let mut catalog = Catalog::new();
    catalog
        .load_json_str("en", "translation", r#"{"b": "B", "a": {"y": "Y", "x": "X"}}"#)
        .unwrap();
    assert_eq!(catalog.keys("en", "translation"), vec!["a.x", "a.y", "b"]);
    assert_eq!(catalog.languages(), vec!["en"]);
    assert_eq!(catalog.namespaces("en"), vec!["translation"]);
}

#[test]
fn remove_resource_bundle() {
    let mut catalog = english();
    assert!(catalog.has_resource_bundle("en", "translation"));
    assert!(catalog.remove_resource_bundle("en", "translation"));
    assert!(!catalog.has_resource_bundle("en", "translation"));
    assert!(catalog.languages().is_empty());
}

#[test]
fn exists_reports_resolution() {
    let catalog = english();
    assert!(catalog.exists("hello", &options! {}));
    assert!(!catalog.exists("nope", &options! {}));
}

#[test]
fn plural_and_context_forms_snapshot() {
    let catalog = english();
    let forms = [
        catalog.translate("item", &options! { "count" => 0 }),
        catalog.translate("item", &options! { "count" => 1 }),
        catalog.translate("item", &options! { "count" => 5 }),
        catalog.translate("friend", &options! { "context" => "male" }),
        catalog.translate("friend", &options! { "context" => "female", "count" => 2 }),
        catalog.translate("friend", &options! { "context" => "unknown" }),
    ];
    insta::assert_snapshot!(forms.join("\n"), @r"
    no items
    1 item
    5 items
    A boyfriend
    2 girlfriends
    A friend
    ");
}
