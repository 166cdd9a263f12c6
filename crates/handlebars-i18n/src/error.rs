//! Error types for helper calls and configuration.

use i18n_catalog::BundleError;
use thiserror::Error;

use crate::format::FormatError;

/// An error raised by a helper call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HelperError {
    /// The helper was called without its trailing invocation options.
    #[error("missing invocation options for helper '{helper}'")]
    MissingOptions { helper: &'static str },

    /// A required positional argument is absent.
    #[error("helper '{helper}' expects a positional argument at index {index}")]
    MissingArgument { helper: &'static str, index: usize },

    /// A positional argument has the wrong type.
    #[error("helper '{helper}' argument {index} must be a {expected}, found {found}")]
    InvalidArgument {
        helper: &'static str,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// The formatting delegate rejected the value or options.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// No helper is registered under this name.
    #[error("unknown helper '{name}'")]
    UnknownHelper { name: String },
}

/// Why `configure` rejected its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Called with no arguments at all.
    #[error("configure expects a table or an entry, got no arguments")]
    NoArguments,

    /// A lone argument that is not a table of entries.
    #[error("a single argument must be a table of entries, found {found}")]
    NotATable { found: &'static str },

    /// A table element that is not an array.
    #[error("entry {index}: expected an array, found {found}")]
    EntryNotArray { index: usize, found: &'static str },

    /// An entry with too few or too many parts.
    #[error("entry {index}: expected 2 to 4 parts, found {len}")]
    Arity { index: usize, len: usize },

    /// The first part of an entry is not a language tag.
    #[error("entry {index}: language must be a non-empty string")]
    Language { index: usize },

    /// The parts after the language do not form a known entry shape.
    #[error("entry {index}: {message}")]
    Shape { index: usize, message: String },

    /// A resource map contains unsupported values.
    #[error("entry {index}: {source}")]
    Bundle {
        index: usize,
        #[source]
        source: BundleError,
    },
}
