//! Validation of configuration tables.
//!
//! A table is a list of entries, each `[language, ...]`:
//!
//! | entry | effect |
//! |---|---|
//! | `[lang, {keys}]` | merge resources into the default namespace |
//! | `[lang, "namespace", {keys}]` | merge resources into `namespace` |
//! | `[lang, "NumberFormat", {options}]` | standard preset for a format kind |
//! | `[lang, "NumberFormat", "name", {options}]` | named preset |
//!
//! The format kinds are `DateTimeFormat`, `NumberFormat` and `PriceFormat`;
//! the language `all` applies a preset to every language.

use i18n_catalog::{validate_bundle, value_kind};
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::format::FormatKind;

/// One validated configuration entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEntry {
    Resources {
        language: String,
        namespace: Option<String>,
        resources: Map<String, Value>,
    },
    Format {
        language: String,
        kind: FormatKind,
        name: Option<String>,
        options: Map<String, Value>,
    },
}

/// Parse `configure` arguments into entries.
///
/// Accepts either one table argument (an array of entry arrays) or the parts
/// of a single entry given positionally. The whole table is validated before
/// anything is returned.
pub fn parse_table(args: &[Value]) -> Result<Vec<ConfigEntry>, ConfigError> {
    match args {
        [] => Err(ConfigError::NoArguments),
        [Value::Array(entries)] => entries
            .iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                Value::Array(parts) => parse_entry(index, parts),
                other => Err(ConfigError::EntryNotArray {
                    index,
                    found: value_kind(other),
                }),
            })
            .collect(),
        [single] => Err(ConfigError::NotATable {
            found: value_kind(single),
        }),
        parts => parse_entry(0, parts).map(|entry| vec![entry]),
    }
}

fn parse_entry(index: usize, parts: &[Value]) -> Result<ConfigEntry, ConfigError> {
    if !(2..=4).contains(&parts.len()) {
        return Err(ConfigError::Arity {
            index,
            len: parts.len(),
        });
    }
    let language = parts[0]
        .as_str()
        .filter(|language| !language.is_empty())
        .ok_or(ConfigError::Language { index })?
        .to_string();
    let shape = |message: &str| ConfigError::Shape {
        index,
        message: message.to_string(),
    };

    match &parts[1..] {
        [Value::Object(resources)] => {
            validate_resources(index, resources)?;
            Ok(ConfigEntry::Resources {
                language,
                namespace: None,
                resources: resources.clone(),
            })
        }
        [Value::String(selector), Value::Object(map)] => match FormatKind::from_config_name(selector) {
            Some(kind) => Ok(ConfigEntry::Format {
                language,
                kind,
                name: None,
                options: map.clone(),
            }),
            None if selector.is_empty() => Err(shape("namespace must not be empty")),
            None => {
                validate_resources(index, map)?;
                Ok(ConfigEntry::Resources {
                    language,
                    namespace: Some(selector.clone()),
                    resources: map.clone(),
                })
            }
        },
        [Value::String(kind), Value::String(name), Value::Object(options)] => {
            let kind = FormatKind::from_config_name(kind).ok_or_else(|| {
                shape("expected DateTimeFormat, NumberFormat or PriceFormat before a preset name")
            })?;
            if name.is_empty() {
                return Err(shape("preset name must not be empty"));
            }
            Ok(ConfigEntry::Format {
                language,
                kind,
                name: Some(name.clone()),
                options: options.clone(),
            })
        }
        _ => Err(shape(
            "expected a resource object, a namespace and resource object, or a format type and options",
        )),
    }
}

fn validate_resources(index: usize, resources: &Map<String, Value>) -> Result<(), ConfigError> {
    validate_bundle(resources).map_err(|source| ConfigError::Bundle { index, source })
}
