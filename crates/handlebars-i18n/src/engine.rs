//! The localization engine contract consumed by the helpers.

use std::sync::{Arc, RwLock};

use i18n_catalog::Catalog;
use serde_json::{Map, Value};

/// Operations the helpers need from a localization engine.
///
/// The engine is owned by the host application. Helpers only read the
/// active language and translate keys; `configure` installs resources.
pub trait Localizer: Send + Sync {
    /// The active language tag, or `None` before one is established.
    fn current_language(&self) -> Option<&str>;

    /// Make `language` the active language.
    fn set_language(&mut self, language: &str);

    /// Resolve `key` with named options (`count`, `context`, interpolation
    /// variables, ...). Unresolvable keys follow the engine's fallback policy.
    fn lookup(&self, key: &str, options: &Map<String, Value>) -> String;

    /// Merge resources into the store. `None` selects the default namespace.
    fn install_resources(
        &mut self,
        language: &str,
        namespace: Option<&str>,
        resources: &Map<String, Value>,
    );
}

/// A localization engine shared between the host and helper closures.
pub type SharedLocalizer = Arc<RwLock<dyn Localizer>>;

/// Wrap an engine for sharing with helpers.
pub fn share<L: Localizer + 'static>(localizer: L) -> SharedLocalizer {
    Arc::new(RwLock::new(localizer))
}

impl Localizer for Catalog {
    fn current_language(&self) -> Option<&str> {
        self.language()
    }

    fn set_language(&mut self, language: &str) {
        self.change_language(language);
    }

    fn lookup(&self, key: &str, options: &Map<String, Value>) -> String {
        self.translate(key, options)
    }

    fn install_resources(
        &mut self,
        language: &str,
        namespace: Option<&str>,
        resources: &Map<String, Value>,
    ) {
        let namespace = namespace.unwrap_or(self.default_namespace()).to_string();
        self.add_resource_bundle(language, &namespace, resources);
    }
}
