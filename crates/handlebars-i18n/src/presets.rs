//! Configured formatting presets.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::format::FormatKind;

/// Language key for presets that apply to every language.
pub const ALL_LANGUAGES: &str = "all";

/// Hash option that selects a named preset.
pub const PRESET_OPTION: &str = "format";

type PresetKey = (String, FormatKind, Option<String>);

/// Formatting options installed through `configure`, keyed by language,
/// format kind and an optional preset name.
#[derive(Debug, Default, Clone)]
pub struct FormatPresets {
    presets: BTreeMap<PresetKey, Map<String, Value>>,
}

impl FormatPresets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a preset, replacing any previous one with the same key.
    pub fn insert(
        &mut self,
        language: &str,
        kind: FormatKind,
        name: Option<&str>,
        options: Map<String, Value>,
    ) {
        self.presets
            .insert((language.to_string(), kind, name.map(str::to_string)), options);
    }

    pub fn get(&self, language: &str, kind: FormatKind, name: Option<&str>) -> Option<&Map<String, Value>> {
        self.presets
            .get(&(language.to_string(), kind, name.map(str::to_string)))
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn clear(&mut self) {
        self.presets.clear();
    }

    /// A preset for `language`, or the same preset registered for all languages.
    fn lookup(&self, language: &str, kind: FormatKind, name: Option<&str>) -> Option<&Map<String, Value>> {
        self.get(language, kind, name)
            .or_else(|| self.get(ALL_LANGUAGES, kind, name))
    }

    /// The options a formatting helper call should use.
    ///
    /// 1. `format="name"` selects a named preset; other hash options override
    ///    the preset's values.
    /// 2. Otherwise explicit hash options are used as given.
    /// 3. Otherwise the language's standard preset, then the `all` preset.
    /// 4. Otherwise no options, leaving the formatter's defaults.
    pub fn resolve(&self, language: &str, kind: FormatKind, hash: &Map<String, Value>) -> Map<String, Value> {
        let explicit: Map<String, Value> = hash
            .iter()
            .filter(|(key, _)| key.as_str() != PRESET_OPTION)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if let Some(name) = hash.get(PRESET_OPTION).and_then(Value::as_str) {
            match self.lookup(language, kind, Some(name)) {
                Some(preset) => {
                    let mut merged = preset.clone();
                    merged.extend(explicit);
                    return merged;
                }
                None => {
                    tracing::debug!(language, preset = name, kind = kind.config_name(), "unknown format preset");
                }
            }
        }

        if !explicit.is_empty() {
            return explicit;
        }

        self.lookup(language, kind, None).cloned().unwrap_or_default()
    }
}
