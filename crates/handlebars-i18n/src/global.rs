//! Process-wide default environment.
//!
//! Used by [`init`] when no engine is passed, and by the free
//! [`configure`] and [`reset`] functions.

use std::sync::LazyLock;

use i18n_catalog::Catalog;
use serde_json::Value;

use crate::engine::SharedLocalizer;
use crate::environment::Environment;
use crate::registry::HelperRegistry;

static DEFAULT_ENVIRONMENT: LazyLock<Environment> = LazyLock::new(|| Environment::new(Catalog::new()));

/// The default environment, created on first use around an empty [`Catalog`].
pub fn environment() -> &'static Environment {
    &DEFAULT_ENVIRONMENT
}

/// Build a helper registry for `engine`, or for the default environment's
/// engine when `None`.
///
/// Registries built for an explicit engine get their own format presets.
pub fn init(engine: Option<SharedLocalizer>) -> HelperRegistry {
    match engine {
        Some(engine) => Environment::with_engine(engine).init(),
        None => environment().init(),
    }
}

/// Install a configuration table into the default environment.
pub fn configure(args: &[Value]) -> bool {
    environment().configure(args)
}

/// Clear the default environment's format presets.
pub fn reset() {
    environment().reset();
}

/// Sets the active language of the default engine.
pub fn set_language(language: &str) {
    let mut engine = environment()
        .engine()
        .write()
        .expect("localizer lock poisoned");
    engine.set_language(language);
}

/// Returns the active language of the default engine.
pub fn language() -> Option<String> {
    let engine = environment()
        .engine()
        .read()
        .expect("localizer lock poisoned");
    engine.current_language().map(str::to_string)
}
