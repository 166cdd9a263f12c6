//! Error types for resource loading.

use std::path::PathBuf;

use thiserror::Error;

/// A resource bundle contains a value the catalog cannot store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleError {
    /// A leaf is neither a string, number, boolean nor nested object.
    #[error("unsupported {found} value at key '{key}'")]
    UnsupportedValue { key: String, found: &'static str },

    /// The bundle root is not a JSON object.
    #[error("resource bundle must be an object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Errors that occur while loading translation resources.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a resource file or directory.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON with location context.
    #[error("{}:{line}:{column}: {message}", path.as_ref().map_or_else(|| "<string>".to_string(), |p| p.display().to_string()))]
    Json {
        path: Option<PathBuf>,
        line: usize,
        column: usize,
        message: String,
    },

    /// Well-formed JSON that is not a valid resource bundle.
    #[error("invalid bundle '{language}/{namespace}': {source}")]
    Bundle {
        language: String,
        namespace: String,
        #[source]
        source: BundleError,
    },
}

impl LoadError {
    pub(crate) fn json(path: Option<PathBuf>, err: &serde_json::Error) -> Self {
        LoadError::Json {
            path,
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
