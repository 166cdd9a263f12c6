use std::fmt;

use serde_json::Value;

/// The result of a helper call.
///
/// `Raw` output is inserted into the template verbatim; `Escaped` output
/// goes through the template engine's escaping. Translations are always
/// `Raw` because resources may carry markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderValue {
    /// Pre-escaped text inserted without further escaping.
    Raw(String),
    /// Plain text the template engine escapes.
    Escaped(String),
    /// A boolean, usable in `{{#if}}` subexpressions.
    Bool(bool),
    /// No value (an unset locale).
    Missing,
}

impl RenderValue {
    /// The text of a `Raw` or `Escaped` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RenderValue::Raw(text) | RenderValue::Escaped(text) => Some(text),
            RenderValue::Bool(_) | RenderValue::Missing => None,
        }
    }

    /// The boolean of a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RenderValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, RenderValue::Raw(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RenderValue::Missing)
    }

    /// Convert to JSON for subexpression results.
    pub fn to_json(&self) -> Value {
        match self {
            RenderValue::Raw(text) | RenderValue::Escaped(text) => Value::String(text.clone()),
            RenderValue::Bool(b) => Value::Bool(*b),
            RenderValue::Missing => Value::Null,
        }
    }
}

impl fmt::Display for RenderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderValue::Raw(text) | RenderValue::Escaped(text) => write!(f, "{text}"),
            RenderValue::Bool(b) => write!(f, "{b}"),
            RenderValue::Missing => Ok(()),
        }
    }
}
