use std::fmt;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::bindings::HelperBindings;
use crate::configure::{ConfigEntry, parse_table};
use crate::engine::{Localizer, SharedLocalizer, share};
use crate::error::ConfigError;
use crate::format::{Formatter, IcuFormatter};
use crate::presets::FormatPresets;
use crate::registry::HelperRegistry;

/// A localization engine together with its format presets and formatter.
///
/// Registries built by [`Environment::init`] share the engine and presets,
/// so resources and presets installed by [`Environment::configure`] are seen
/// by every registry of the environment.
#[derive(Clone)]
pub struct Environment {
    engine: SharedLocalizer,
    presets: Arc<RwLock<FormatPresets>>,
    formatter: Arc<dyn Formatter>,
}

impl Environment {
    /// An environment around `localizer`, formatting with [`IcuFormatter`].
    pub fn new<L: Localizer + 'static>(localizer: L) -> Self {
        Self::with_engine(share(localizer))
    }

    /// An environment around an engine the host already shares.
    pub fn with_engine(engine: SharedLocalizer) -> Self {
        Self {
            engine,
            presets: Arc::new(RwLock::new(FormatPresets::new())),
            formatter: Arc::new(IcuFormatter::new()),
        }
    }

    /// Replace the formatting delegate.
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    pub fn engine(&self) -> &SharedLocalizer {
        &self.engine
    }

    /// Read access to the installed format presets.
    pub fn with_presets<T>(&self, f: impl FnOnce(&FormatPresets) -> T) -> T {
        let guard = self.presets.read().expect("format presets lock poisoned");
        f(&guard)
    }

    /// Build a fresh helper registry bound to this environment.
    pub fn init(&self) -> HelperRegistry {
        HelperRegistry::new(HelperBindings::new(
            Arc::clone(&self.engine),
            Arc::clone(&self.presets),
            Arc::clone(&self.formatter),
        ))
    }

    /// Install a configuration table. Returns `false`, leaving the engine
    /// and presets untouched, when any entry is malformed.
    pub fn configure(&self, args: &[Value]) -> bool {
        match self.try_configure(args) {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(%error, "configuration rejected");
                false
            }
        }
    }

    /// [`Environment::configure`] with the rejection reason.
    pub fn try_configure(&self, args: &[Value]) -> Result<(), ConfigError> {
        let entries = parse_table(args)?;
        self.install(entries);
        Ok(())
    }

    /// Install validated entries while holding both write locks.
    pub fn install(&self, entries: Vec<ConfigEntry>) {
        if entries.is_empty() {
            return;
        }
        let mut engine = self.engine.write().expect("localizer lock poisoned");
        let mut presets = self.presets.write().expect("format presets lock poisoned");
        for entry in entries {
            match entry {
                ConfigEntry::Resources {
                    language,
                    namespace,
                    resources,
                } => {
                    tracing::debug!(
                        language = language.as_str(),
                        namespace = namespace.as_deref(),
                        keys = resources.len(),
                        "installing resources"
                    );
                    engine.install_resources(&language, namespace.as_deref(), &resources);
                }
                ConfigEntry::Format {
                    language,
                    kind,
                    name,
                    options,
                } => {
                    tracing::debug!(
                        language = language.as_str(),
                        kind = kind.config_name(),
                        preset = name.as_deref(),
                        "installing format preset"
                    );
                    presets.insert(&language, kind, name.as_deref(), options);
                }
            }
        }
    }

    /// Remove every format preset. Resources stay installed.
    pub fn reset(&self) {
        self.presets
            .write()
            .expect("format presets lock poisoned")
            .clear();
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let language = self
            .engine
            .read()
            .ok()
            .and_then(|engine| engine.current_language().map(str::to_string));
        f.debug_struct("Environment")
            .field("language", &language)
            .field("presets", &self.with_presets(FormatPresets::len))
            .finish_non_exhaustive()
    }
}
