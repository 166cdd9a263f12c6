//! Miette diagnostic wrapper for resource file errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic pointing into a JSON file.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(hbs_i18n::json))]
pub struct JsonDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl JsonDiagnostic {
    /// Create a diagnostic at a 1-based line and column of `content`.
    pub fn at(path: &Path, content: &str, line: usize, column: usize, message: String) -> Self {
        let offset = byte_offset(content, line, column);
        JsonDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message,
            help: None,
        }
    }

    /// Attach a help message.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Convert a 1-based line:column into a byte offset, clamped to `content`.
///
/// serde_json reports column 0 for errors at the start of a line.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let offset = content
        .lines()
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum::<usize>()
        + column.saturating_sub(1);
    offset.min(content.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::byte_offset;

    #[test]
    fn offsets_count_previous_lines() {
        let content = "{\n  \"a\": 1,\n  oops\n}";
        assert_eq!(byte_offset(content, 1, 1), 0);
        assert_eq!(byte_offset(content, 3, 3), 14);
    }

    #[test]
    fn offsets_are_clamped() {
        assert_eq!(byte_offset("{}", 9, 9), 1);
        assert_eq!(byte_offset("", 1, 1), 0);
    }
}
