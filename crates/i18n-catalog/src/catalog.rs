//! Translation catalog: language selection, resource loading and key lookup.

use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use serde_json::{Map, Value};

use crate::error::{BundleError, LoadError};
use crate::interpolation::parse_interpolation;
use crate::plural::plural_category_decimal;
use crate::store::{ResourceStore, validate_bundle, value_kind};

/// Namespace used when neither the key nor the options name one.
pub const DEFAULT_NAMESPACE: &str = "translation";

/// Maximum `$t(...)` nesting depth before the nested key is returned as-is.
const MAX_NESTING_DEPTH: usize = 10;

/// A translation catalog.
///
/// The catalog owns a [`ResourceStore`] and resolves translation keys
/// against it. Lookup walks a language chain (requested language, its base
/// language, then the fallback language) and, per language, a list of
/// candidate keys derived from the `context` and `count` options. When no
/// candidate resolves, `defaultValue` is used, and failing that the key
/// itself is returned unchanged.
///
/// # Example
///
/// ```
/// use i18n_catalog::{Catalog, options};
///
/// let mut catalog = Catalog::builder().language("en").build();
/// catalog
///     .load_json_str("en", "translation", r#"{"greeting": "Hello, {{name}}!"}"#)
///     .unwrap();
///
/// let text = catalog.translate("greeting", &options! { "name" => "Ada" });
/// assert_eq!(text, "Hello, Ada!");
/// assert_eq!(catalog.translate("missing.key", &options! {}), "missing.key");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct Catalog {
    /// Active language tag, unset until a language is chosen.
    #[builder(into)]
    language: Option<String>,

    /// Language consulted after the active language and its base language.
    #[builder(into)]
    fallback_language: Option<String>,

    /// Namespace used for keys without an explicit namespace.
    #[builder(into, default = DEFAULT_NAMESPACE.to_string())]
    default_namespace: String,

    /// Separator between nested key segments.
    #[builder(into, default = ".".to_string())]
    key_separator: String,

    /// Separator between a namespace prefix and the key.
    #[builder(into, default = ":".to_string())]
    namespace_separator: String,

    #[builder(skip)]
    store: ResourceStore,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builder().build()
    }
}

impl Catalog {
    /// Create an empty catalog with no active language.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty catalog with the given active language.
    pub fn with_language(language: impl Into<String>) -> Self {
        Catalog::builder().language(language).build()
    }

    // =========================================================================
    // Language Management
    // =========================================================================

    /// The active language, if one has been chosen.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Change the active language.
    ///
    /// Resources for the language do not need to be loaded first; lookups
    /// simply fall through to the fallback chain.
    pub fn change_language(&mut self, language: impl Into<String>) {
        let language = language.into();
        tracing::debug!(language = %language, "changing catalog language");
        self.language = Some(language);
    }

    /// The fallback language, if any.
    pub fn fallback_language(&self) -> Option<&str> {
        self.fallback_language.as_deref()
    }

    /// Set or clear the fallback language.
    pub fn set_fallback_language(&mut self, language: Option<impl Into<String>>) {
        self.fallback_language = language.map(Into::into);
    }

    /// The namespace used for keys without a namespace prefix.
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// The separator between nested key segments.
    pub fn key_separator(&self) -> &str {
        &self.key_separator
    }

    // =========================================================================
    // Resources
    // =========================================================================

    /// The underlying resource store (read-only).
    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Deep-merge `resources` into a bundle, replacing existing leaves.
    pub fn add_resource_bundle(
        &mut self,
        language: &str,
        namespace: &str,
        resources: &Map<String, Value>,
    ) {
        tracing::debug!(language, namespace, keys = resources.len(), "adding resource bundle");
        self.store.add_bundle(language, namespace, resources, true);
    }

    /// Add or replace a single key. `key` may be a nested path.
    pub fn add_resource(&mut self, language: &str, namespace: &str, key: &str, value: &str) {
        let resources = if self.key_separator.is_empty() {
            let mut flat = Map::new();
            flat.insert(key.to_string(), Value::String(value.to_string()));
            flat
        } else {
            nest_key(key, &self.key_separator, value)
        };
        self.store.add_bundle(language, namespace, &resources, true);
    }

    /// Remove a bundle. Returns whether it existed.
    pub fn remove_resource_bundle(&mut self, language: &str, namespace: &str) -> bool {
        self.store.remove_bundle(language, namespace)
    }

    /// Whether a bundle is loaded for `language`/`namespace`.
    pub fn has_resource_bundle(&self, language: &str, namespace: &str) -> bool {
        self.store.bundle(language, namespace).is_some()
    }

    /// Languages with loaded resources.
    pub fn languages(&self) -> Vec<&str> {
        self.store.languages().collect()
    }

    /// Namespaces loaded for a language.
    pub fn namespaces(&self, language: &str) -> Vec<&str> {
        self.store.namespaces(language)
    }

    /// All leaf keys of a bundle, joined with the key separator.
    pub fn keys(&self, language: &str, namespace: &str) -> Vec<String> {
        self.store.keys(language, namespace, &self.key_separator)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load a JSON bundle from a string. Returns the number of leaf keys.
    pub fn load_json_str(
        &mut self,
        language: &str,
        namespace: &str,
        content: &str,
    ) -> Result<usize, LoadError> {
        self.load_json_internal(language, namespace, content, None)
    }

    /// Load a JSON bundle from a file. Returns the number of leaf keys.
    pub fn load_json_file(
        &mut self,
        language: &str,
        namespace: &str,
        path: impl AsRef<Path>,
    ) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.load_json_internal(language, namespace, &content, Some(path))
    }

    /// Load every `<dir>/<language>/<namespace>.json` file.
    ///
    /// Returns the number of bundles loaded. Entries that are not
    /// directories or `.json` files are skipped.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, LoadError> {
        let mut loaded = 0;
        for language_dir in read_entries(dir.as_ref())? {
            if !language_dir.is_dir() {
                continue;
            }
            let Some(language) = language_dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            for file in read_entries(&language_dir)? {
                if file.extension().is_none_or(|ext| ext != "json") {
                    continue;
                }
                let Some(namespace) = file.file_stem().and_then(|n| n.to_str()) else {
                    continue;
                };
                self.load_json_file(language, namespace, &file)?;
                loaded += 1;
            }
        }
        Ok(loaded)
    }

    fn load_json_internal(
        &mut self,
        language: &str,
        namespace: &str,
        content: &str,
        path: Option<&Path>,
    ) -> Result<usize, LoadError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| LoadError::json(path.map(Path::to_path_buf), &e))?;
        let bundle_err = |source| LoadError::Bundle {
            language: language.to_string(),
            namespace: namespace.to_string(),
            source,
        };
        let resources = match value {
            Value::Object(resources) => resources,
            other => {
                return Err(bundle_err(BundleError::NotAnObject {
                    found: value_kind(&other),
                }));
            }
        };
        validate_bundle(&resources).map_err(bundle_err)?;
        self.add_resource_bundle(language, namespace, &resources);
        Ok(self.store.keys(language, namespace, &self.key_separator).len())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Whether `key` resolves to a stored value for the given options.
    pub fn exists(&self, key: &str, options: &Map<String, Value>) -> bool {
        self.resolve(key, options).is_some()
    }

    /// Translate `key`.
    ///
    /// Recognized options:
    /// - `lng`: language override for this lookup
    /// - `ns`: namespace override
    /// - `count`: selects a plural suffix (`_one`, `_other`, `_zero`, ...)
    /// - `context`: selects a context suffix (`_male`, `_female`, ...)
    /// - `defaultValue`: returned (interpolated) when the key is missing
    ///
    /// All options are also available as interpolation variables.
    pub fn translate(&self, key: &str, options: &Map<String, Value>) -> String {
        self.translate_at_depth(key, options, 0)
    }

    fn translate_at_depth(&self, key: &str, options: &Map<String, Value>, depth: usize) -> String {
        if let Some(text) = self.resolve(key, options) {
            return self.interpolate(&text, options, depth);
        }
        if let Some(default) = options.get("defaultValue").and_then(Value::as_str) {
            return self.interpolate(default, options, depth);
        }
        tracing::trace!(key, language = ?self.language, "missing translation, returning key");
        key.to_string()
    }

    fn interpolate(&self, text: &str, options: &Map<String, Value>, depth: usize) -> String {
        let template = parse_interpolation(text);
        if template.is_literal() {
            return text.to_string();
        }
        template.render(options, &mut |nested_key| {
            if depth >= MAX_NESTING_DEPTH {
                tracing::debug!(key = nested_key, "nesting depth exceeded");
                return nested_key.to_string();
            }
            self.translate_at_depth(nested_key, options, depth + 1)
        })
    }

    /// Find the raw stored text for `key`, walking languages and candidates.
    fn resolve(&self, key: &str, options: &Map<String, Value>) -> Option<String> {
        let (namespace, path) = self.split_namespace(key, options);
        let count = options.get("count").and_then(count_value);
        let context = options
            .get("context")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty());

        self.language_chain(options).into_iter().find_map(|language| {
            candidate_keys(path, context, count, &language)
                .into_iter()
                .find_map(|candidate| {
                    self.store
                        .lookup(&language, namespace, &candidate, &self.key_separator)
                        .and_then(leaf_text)
                })
        })
    }

    fn split_namespace<'k>(
        &'k self,
        key: &'k str,
        options: &'k Map<String, Value>,
    ) -> (&'k str, &'k str) {
        let explicit = options.get("ns").and_then(Value::as_str);
        if !self.namespace_separator.is_empty() {
            if let Some((namespace, path)) = key.split_once(self.namespace_separator.as_str()) {
                if !namespace.is_empty() && !path.is_empty() {
                    return (namespace, path);
                }
            }
        }
        (explicit.unwrap_or(&self.default_namespace), key)
    }

    fn language_chain(&self, options: &Map<String, Value>) -> Vec<String> {
        let requested = options
            .get("lng")
            .and_then(Value::as_str)
            .or(self.language.as_deref());
        let mut chain: Vec<String> = Vec::new();
        let mut push = |language: &str| {
            if !language.is_empty() && !chain.iter().any(|l| l == language) {
                chain.push(language.to_string());
            }
        };
        if let Some(language) = requested {
            push(language);
            if let Some((base, _)) = language.split_once('-') {
                push(base);
            }
        }
        if let Some(fallback) = &self.fallback_language {
            push(fallback);
        }
        chain
    }
}

/// Candidate keys in lookup order for the given context and count.
fn candidate_keys(path: &str, context: Option<&str>, count: Option<f64>, language: &str) -> Vec<String> {
    let category = count.map(|n| plural_category_decimal(language, n));
    let is_zero = count == Some(0.0);
    let mut keys = Vec::with_capacity(6);
    let plural_forms = |base: &str, keys: &mut Vec<String>| {
        if is_zero {
            keys.push(format!("{base}_zero"));
        }
        if let Some(category) = category {
            keys.push(format!("{base}_{category}"));
        }
    };
    if let Some(context) = context {
        let base = format!("{path}_{context}");
        plural_forms(&base, &mut keys);
        keys.push(base);
    }
    plural_forms(path, &mut keys);
    keys.push(path.to_string());
    keys.dedup();
    keys
}

/// Directory entries of `dir`, sorted by path.
fn read_entries(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort();
    Ok(entries)
}

fn count_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn leaf_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn nest_key(key: &str, separator: &str, value: &str) -> Map<String, Value> {
    let mut segments: Vec<&str> = key.split(separator).collect();
    let mut current = Value::String(value.to_string());
    while let Some(segment) = segments.pop() {
        let mut map = Map::new();
        map.insert(segment.to_string(), current);
        current = Value::Object(map);
    }
    match current {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
