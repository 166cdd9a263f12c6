//! Interpolation parser using winnow.
//!
//! Translated strings may contain:
//! - `{{name}}` placeholders, HTML-escaped on substitution
//! - `{{- name}}` placeholders, substituted verbatim
//! - `$t(other.key)` nesting, resolved against the same catalog
//!
//! Anything that does not parse as one of these is kept as literal text.

use serde_json::{Map, Value};
use winnow::ascii::multispace0;
use winnow::combinator::{alt, delimited, opt, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_till, take_while};

/// A piece of a parsed translation string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text.
    Literal(String),
    /// A `{{...}}` placeholder.
    Variable {
        /// Dotted path into the options map.
        path: String,
        /// Whether the substituted value is HTML-escaped.
        escape: bool,
        /// Source text, restored when the variable has no value.
        source: String,
    },
    /// A `$t(key)` reference to another translation.
    Nested(String),
}

/// A parsed translation string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Whether the template is plain text with nothing to substitute.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Literal(_)))
    }

    /// Substitute variables from `options` and resolve nested keys with
    /// `nested`.
    pub fn render(
        &self,
        options: &Map<String, Value>,
        nested: &mut dyn FnMut(&str) -> String,
    ) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable {
                    path,
                    escape,
                    source,
                } => match lookup_path(options, path).and_then(display_value) {
                    Some(text) if *escape => out.push_str(&escape_html(&text)),
                    Some(text) => out.push_str(&text),
                    None => out.push_str(source),
                },
                Segment::Nested(key) => out.push_str(&nested(key)),
            }
        }
        out
    }
}

/// Parse a translation string into segments.
///
/// Parsing never fails: unrecognized syntax becomes literal text.
pub fn parse_interpolation(input: &str) -> Template {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) if remaining.is_empty() => t,
        _ => Template {
            segments: vec![Segment::Literal(input.to_string())],
        },
    }
}

fn template(input: &mut &str) -> ModalResult<Template> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((variable, nesting, literal_char)).parse_next(input)
}

/// Parse `{{ name }}` or `{{- name }}`.
fn variable(input: &mut &str) -> ModalResult<Segment> {
    let start = *input;
    let (raw, path) = delimited(
        ("{{", multispace0),
        (
            opt(('-', multispace0)),
            take_while(1.., |c: char| !c.is_whitespace() && c != '}'),
        ),
        (multispace0, "}}"),
    )
    .parse_next(input)?;
    let consumed = start.len() - input.len();
    Ok(Segment::Variable {
        path: path.to_string(),
        escape: raw.is_none(),
        source: start[..consumed].to_string(),
    })
}

/// Parse `$t(key)`.
fn nesting(input: &mut &str) -> ModalResult<Segment> {
    delimited("$t(", take_till(1.., ')'), ')')
        .map(|key: &str| Segment::Nested(key.trim().to_string()))
        .parse_next(input)
}

fn literal_char(input: &mut &str) -> ModalResult<Segment> {
    any.map(|c: char| Segment::Literal(c.to_string()))
        .parse_next(input)
}

fn lookup_path<'a>(options: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    if let Some(value) = options.get(path) {
        return Some(value);
    }
    let mut segments = path.split('.');
    let mut current = options.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Escape the characters HTML treats specially.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}
