//! Locale-aware formatting of dates, numbers and prices.
//!
//! The helpers delegate to a [`Formatter`]. [`IcuFormatter`] is the default
//! implementation, backed by ICU4X. Option names follow the `Intl` API
//! (`minimumFractionDigits`, `currency`, `dateStyle`, ...).

mod currency;
mod date_input;
mod icu;

use serde_json::{Map, Value};
use thiserror::Error;

pub use currency::{currency_digits, currency_symbol};
pub use date_input::parse_date_input;
pub use icu::IcuFormatter;

/// The three formatting kinds, also used to key configured presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatKind {
    DateTime,
    Number,
    Price,
}

impl FormatKind {
    pub const ALL: [FormatKind; 3] = [FormatKind::DateTime, FormatKind::Number, FormatKind::Price];

    /// Name used for this kind in configuration tables.
    pub fn config_name(self) -> &'static str {
        match self {
            FormatKind::DateTime => "DateTimeFormat",
            FormatKind::Number => "NumberFormat",
            FormatKind::Price => "PriceFormat",
        }
    }

    /// Parse a configuration table name.
    pub fn from_config_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.config_name() == name)
    }
}

/// A formatting failure, surfaced to the template unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("invalid locale '{locale}'")]
    InvalidLocale { locale: String },

    #[error("expected a number, found {found}")]
    NotANumber { found: String },

    #[error("cannot format non-finite number {value}")]
    NonFinite { value: f64 },

    #[error("invalid date '{input}'")]
    InvalidDate { input: String },

    #[error("invalid currency code '{code}'")]
    InvalidCurrency { code: String },

    #[error("invalid value for option '{option}': {value}")]
    InvalidOption { option: String, value: String },

    #[error("no {kind} formatter available for locale '{locale}': {message}")]
    Unavailable {
        kind: &'static str,
        locale: String,
        message: String,
    },
}

/// Locale-aware formatting operations, one per formatting helper.
///
/// `locale` is a BCP 47 tag. `value` is the helper's first positional
/// argument (`Value::Null` when absent). Implementations reject values they
/// cannot format rather than returning a placeholder.
pub trait Formatter: Send + Sync {
    fn format_date(
        &self,
        locale: &str,
        value: &Value,
        options: &Map<String, Value>,
    ) -> Result<String, FormatError>;

    fn format_number(
        &self,
        locale: &str,
        value: &Value,
        options: &Map<String, Value>,
    ) -> Result<String, FormatError>;

    fn format_price(
        &self,
        locale: &str,
        value: &Value,
        options: &Map<String, Value>,
    ) -> Result<String, FormatError>;

    /// Dispatch on `kind`.
    fn format(
        &self,
        kind: FormatKind,
        locale: &str,
        value: &Value,
        options: &Map<String, Value>,
    ) -> Result<String, FormatError> {
        match kind {
            FormatKind::DateTime => self.format_date(locale, value, options),
            FormatKind::Number => self.format_number(locale, value, options),
            FormatKind::Price => self.format_price(locale, value, options),
        }
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}
