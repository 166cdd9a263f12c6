//! ICU4X-backed formatting.

use std::fmt::Debug;
use std::str::FromStr;

use fixed_decimal::{Decimal, FloatPrecision};
use icu_calendar::{Date, Iso};
use icu_datetime::DateTimeFormatter;
use icu_datetime::input::{DateTime, Time};
use icu_datetime::fieldsets::{
    self,
    enums::{DateAndTimeFieldSet, DateFieldSet, TimeFieldSet},
};
use icu_datetime::options::Length;
use icu_decimal::DecimalFormatter;
use icu_decimal::options::{DecimalFormatterOptions, GroupingStrategy};
use icu_locale_core::Locale;
use serde_json::{Map, Value};
use time::PrimitiveDateTime;

use super::currency::{currency_digits, currency_symbol, is_prefix_locale, normalize_code};
use super::date_input::parse_date_input;
use super::{FormatError, Formatter, describe};

/// Currency used by `formatPrice` when none is given.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Fraction digits shown for plain numbers when no maximum is given.
const DEFAULT_MAX_FRACTION_DIGITS: i16 = 3;

// These ranges mirror the Intl.NumberFormat limits.
const MAX_FRACTION_DIGITS: i64 = 20;
const MAX_INTEGER_DIGITS: i64 = 21;

/// The default [`Formatter`], built on ICU4X compiled data.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcuFormatter;

impl IcuFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for IcuFormatter {
    fn format_date(
        &self,
        locale: &str,
        value: &Value,
        options: &Map<String, Value>,
    ) -> Result<String, FormatError> {
        let locale = parse_locale(locale)?;
        let datetime = parse_date_input(value)?;
        let date_style = length_option(options, "dateStyle")?;
        let time_style = length_option(options, "timeStyle")?;
        format_datetime(&locale, &datetime, date_style, time_style)
    }

    fn format_number(
        &self,
        locale: &str,
        value: &Value,
        options: &Map<String, Value>,
    ) -> Result<String, FormatError> {
        let locale = parse_locale(locale)?;
        let number = number_value(value)?;
        let digits = DigitOptions::from_options(options, 0, DEFAULT_MAX_FRACTION_DIGITS)?;
        format_decimal(&locale, number, &digits)
    }

    fn format_price(
        &self,
        locale: &str,
        value: &Value,
        options: &Map<String, Value>,
    ) -> Result<String, FormatError> {
        let tag = locale;
        let locale = parse_locale(tag)?;
        let number = number_value(value)?;

        let code = match options.get("currency") {
            None | Some(Value::Null) => DEFAULT_CURRENCY.to_string(),
            Some(Value::String(code)) => {
                normalize_code(code).ok_or_else(|| FormatError::InvalidCurrency { code: code.clone() })?
            }
            Some(other) => {
                return Err(FormatError::InvalidCurrency {
                    code: describe(other),
                });
            }
        };
        let minor = currency_digits(&code);
        let digits = DigitOptions::from_options(options, minor, minor)?;
        let amount = format_decimal(&locale, number.abs(), &digits)?;

        let display = match options.get("currencyDisplay").and_then(Value::as_str) {
            None | Some("symbol") => currency_symbol(&code).unwrap_or(&code).to_string(),
            Some("code") => code.clone(),
            Some(other) => {
                return Err(FormatError::InvalidOption {
                    option: "currencyDisplay".to_string(),
                    value: other.to_string(),
                });
            }
        };
        let sign = if number < 0.0 { "-" } else { "" };
        // A symbol made of letters needs a space to stay readable.
        let spaced = display.chars().all(|c| c.is_ascii_alphabetic());

        Ok(if is_prefix_locale(tag) {
            let gap = if spaced { "\u{a0}" } else { "" };
            format!("{sign}{display}{gap}{amount}")
        } else {
            format!("{sign}{amount}\u{a0}{display}")
        })
    }
}

fn parse_locale(tag: &str) -> Result<Locale, FormatError> {
    Locale::from_str(tag).map_err(|_| FormatError::InvalidLocale {
        locale: tag.to_string(),
    })
}

fn number_value(value: &Value) -> Result<f64, FormatError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| FormatError::NotANumber {
        found: describe(value),
    })?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(FormatError::NonFinite { value: number })
    }
}

/// Fraction, integer and grouping options shared by numbers and prices.
#[derive(Debug, Default)]
struct DigitOptions {
    min_fraction: i16,
    max_fraction: i16,
    min_integer: Option<i16>,
    grouping: Option<GroupingStrategy>,
}

impl DigitOptions {
    fn from_options(
        options: &Map<String, Value>,
        default_min: i16,
        default_max: i16,
    ) -> Result<Self, FormatError> {
        let min = int_option(options, "minimumFractionDigits", 0, MAX_FRACTION_DIGITS)?;
        let max = int_option(options, "maximumFractionDigits", 0, MAX_FRACTION_DIGITS)?;
        let (min_fraction, max_fraction) = match (min, max) {
            (Some(min), Some(max)) if min > max => {
                return Err(FormatError::InvalidOption {
                    option: "maximumFractionDigits".to_string(),
                    value: format!("{max} is less than minimumFractionDigits {min}"),
                });
            }
            (Some(min), Some(max)) => (min, max),
            (Some(min), None) => (min, default_max.max(min)),
            (None, Some(max)) => (default_min.min(max), max),
            (None, None) => (default_min, default_max),
        };
        Ok(Self {
            min_fraction,
            max_fraction,
            min_integer: int_option(options, "minimumIntegerDigits", 1, MAX_INTEGER_DIGITS)?,
            grouping: grouping_option(options)?,
        })
    }
}

fn int_option(
    options: &Map<String, Value>,
    name: &str,
    min: i64,
    max: i64,
) -> Result<Option<i16>, FormatError> {
    let Some(value) = options.get(name) else {
        return Ok(None);
    };
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| (min..=max).contains(n))
        .and_then(|n| i16::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| FormatError::InvalidOption {
            option: name.to_string(),
            value: value.to_string(),
        })
}

fn grouping_option(options: &Map<String, Value>) -> Result<Option<GroupingStrategy>, FormatError> {
    let strategy = match options.get("useGrouping") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Bool(true)) => GroupingStrategy::Auto,
        Some(Value::Bool(false)) => GroupingStrategy::Never,
        Some(Value::String(s)) => match s.as_str() {
            "auto" | "true" => GroupingStrategy::Auto,
            "false" => GroupingStrategy::Never,
            "always" => GroupingStrategy::Always,
            "min2" => GroupingStrategy::Min2,
            _ => return Err(invalid_option("useGrouping", s)),
        },
        Some(other) => return Err(invalid_option("useGrouping", &other.to_string())),
    };
    Ok(Some(strategy))
}

fn invalid_option(option: &str, value: &str) -> FormatError {
    FormatError::InvalidOption {
        option: option.to_string(),
        value: value.to_string(),
    }
}

fn format_decimal(locale: &Locale, number: f64, digits: &DigitOptions) -> Result<String, FormatError> {
    let mut decimal = Decimal::try_from_f64(number, FloatPrecision::RoundTrip)
        .map_err(|_| FormatError::NonFinite { value: number })?;

    // Rounding pads to the rounding position, so only round numbers that
    // are more precise than the limit.
    if *decimal.magnitude_range().start() < -digits.max_fraction {
        decimal.round(-digits.max_fraction);
        decimal.trim_end();
    }
    decimal.pad_end(-digits.min_fraction);
    if let Some(min_integer) = digits.min_integer {
        decimal.pad_start(min_integer);
    }

    let mut options = DecimalFormatterOptions::default();
    options.grouping_strategy = digits.grouping;
    let formatter = DecimalFormatter::try_new(locale.clone().into(), options).map_err(|e| {
        FormatError::Unavailable {
            kind: "number",
            locale: locale.to_string(),
            message: format!("{e:?}"),
        }
    })?;
    Ok(formatter.format(&decimal).to_string())
}

fn length_option(options: &Map<String, Value>, name: &str) -> Result<Option<Length>, FormatError> {
    match options.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => match s.as_str() {
            "short" => Ok(Some(Length::Short)),
            "medium" => Ok(Some(Length::Medium)),
            // ICU has no separate "full" length for these field sets.
            "long" | "full" => Ok(Some(Length::Long)),
            _ => Err(invalid_option(name, s)),
        },
        Some(other) => Err(invalid_option(name, &other.to_string())),
    }
}

fn format_datetime(
    locale: &Locale,
    datetime: &PrimitiveDateTime,
    date_style: Option<Length>,
    time_style: Option<Length>,
) -> Result<String, FormatError> {
    let input = to_icu_datetime(datetime)?;
    let unavailable = |e: &dyn Debug| FormatError::Unavailable {
        kind: "date",
        locale: locale.to_string(),
        message: format!("{e:?}"),
    };

    let formatted = match (date_style, time_style) {
        (Some(date_len), Some(time_len)) => {
            let ymd = fieldsets::YMD::for_length(date_len);
            let ymdt = match time_len {
                Length::Short => ymd.with_time_hm(),
                _ => ymd.with_time_hms(),
            };
            DateTimeFormatter::<DateAndTimeFieldSet>::try_new(
                locale.clone().into(),
                DateAndTimeFieldSet::YMDT(ymdt),
            )
            .map_err(|e| unavailable(&e))?
            .format(&input)
            .to_string()
        }
        (None, Some(time_len)) => {
            let fields = match time_len {
                Length::Short => fieldsets::T::hm().with_length(time_len),
                _ => fieldsets::T::hms().with_length(time_len),
            };
            DateTimeFormatter::<TimeFieldSet>::try_new(locale.clone().into(), TimeFieldSet::T(fields))
                .map_err(|e| unavailable(&e))?
                .format(&input)
                .to_string()
        }
        (date_len, None) => DateTimeFormatter::<DateFieldSet>::try_new(
            locale.clone().into(),
            DateFieldSet::YMD(fieldsets::YMD::for_length(date_len.unwrap_or(Length::Medium))),
        )
        .map_err(|e| unavailable(&e))?
        .format(&input)
        .to_string(),
    };
    Ok(formatted)
}

fn to_icu_datetime(
    datetime: &PrimitiveDateTime,
) -> Result<DateTime<Iso>, FormatError> {
    let invalid = || FormatError::InvalidDate {
        input: datetime.to_string(),
    };
    let date = Date::try_new_iso(
        datetime.year(),
        u8::from(datetime.month()),
        datetime.day(),
    )
    .map_err(|_| invalid())?;
    let time = Time::try_new(
        datetime.hour(),
        datetime.minute(),
        datetime.second(),
        datetime.nanosecond(),
    )
    .map_err(|_| invalid())?;
    Ok(DateTime { date, time })
}
