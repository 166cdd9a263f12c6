//! Resource store for translation bundles.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::BundleError;

/// Translation resources indexed by language, then namespace.
///
/// Each bundle is a JSON object whose leaves are the translated strings.
/// Nested objects form key paths (`menu.file.open`).
#[derive(Debug, Default, Clone)]
pub struct ResourceStore {
    bundles: BTreeMap<String, BTreeMap<String, Map<String, Value>>>,
}

impl ResourceStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `resources` into the bundle for `language`/`namespace`.
    ///
    /// Nested objects are merged recursively. Existing leaves are replaced
    /// when `overwrite` is set and kept otherwise.
    pub fn add_bundle(
        &mut self,
        language: &str,
        namespace: &str,
        resources: &Map<String, Value>,
        overwrite: bool,
    ) {
        let bundle = self
            .bundles
            .entry(language.to_string())
            .or_default()
            .entry(namespace.to_string())
            .or_default();
        deep_merge(bundle, resources, overwrite);
    }

    /// Remove a single bundle. Returns whether it existed.
    pub fn remove_bundle(&mut self, language: &str, namespace: &str) -> bool {
        let Some(namespaces) = self.bundles.get_mut(language) else {
            return false;
        };
        let removed = namespaces.remove(namespace).is_some();
        if namespaces.is_empty() {
            self.bundles.remove(language);
        }
        removed
    }

    /// Get the bundle for a language and namespace.
    pub fn bundle(&self, language: &str, namespace: &str) -> Option<&Map<String, Value>> {
        self.bundles.get(language)?.get(namespace)
    }

    /// Languages with at least one bundle, in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    /// Namespaces loaded for `language`, in sorted order.
    pub fn namespaces(&self, language: &str) -> Vec<&str> {
        self.bundles
            .get(language)
            .map(|namespaces| namespaces.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Look up the value at `path` in a bundle.
    ///
    /// A flat key containing the separator wins over the nested path, so
    /// bundles written as `{"a.b": "x"}` and `{"a": {"b": "x"}}` both resolve.
    pub fn lookup(
        &self,
        language: &str,
        namespace: &str,
        path: &str,
        separator: &str,
    ) -> Option<&Value> {
        let bundle = self.bundle(language, namespace)?;
        if let Some(value) = bundle.get(path) {
            return Some(value);
        }
        if separator.is_empty() {
            return None;
        }
        let mut segments = path.split(separator);
        let mut current = bundle.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// All leaf key paths of a bundle, joined with `separator`, sorted.
    pub fn keys(&self, language: &str, namespace: &str, separator: &str) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(bundle) = self.bundle(language, namespace) {
            collect_keys(bundle, "", separator, &mut keys);
        }
        keys.sort();
        keys
    }
}

fn collect_keys(map: &Map<String, Value>, prefix: &str, separator: &str, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{separator}{key}")
        };
        match value {
            Value::Object(nested) => collect_keys(nested, &path, separator, out),
            _ => out.push(path),
        }
    }
}

fn deep_merge(target: &mut Map<String, Value>, source: &Map<String, Value>, overwrite: bool) {
    for (key, value) in source {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                deep_merge(existing, incoming, overwrite);
            }
            (Some(_), _) if !overwrite => {}
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// JSON type name of a value, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check that every leaf of a bundle is a string, number or boolean.
///
/// Returns the first offending key path (dot separated) otherwise.
pub fn validate_bundle(resources: &Map<String, Value>) -> Result<(), BundleError> {
    validate_level(resources, "")
}

fn validate_level(map: &Map<String, Value>, prefix: &str) -> Result<(), BundleError> {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {}
            Value::Object(nested) => validate_level(nested, &path)?,
            Value::Null | Value::Array(_) => {
                return Err(BundleError::UnsupportedValue {
                    key: path,
                    found: value_kind(value),
                });
            }
        }
    }
    Ok(())
}
