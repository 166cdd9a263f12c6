//! Conversion of template values into calendar date-times.

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use super::{FormatError, describe};

/// Interpret a template value as a UTC date-time.
///
/// Accepted inputs:
/// - `null` (no argument): the current time
/// - a number: milliseconds since the Unix epoch
/// - a string: RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`,
///   `YYYY-MM-DD`, or a JSON array literal such as `"[2020, 3, 11]"`
/// - an array `[year, month, day, hour?, minute?, second?]` with a 1-based month
pub fn parse_date_input(value: &Value) -> Result<PrimitiveDateTime, FormatError> {
    match value {
        Value::Null => Ok(to_utc(OffsetDateTime::now_utc())),
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .ok_or_else(|| invalid(value))?;
            let nanos = i128::from(millis) * 1_000_000;
            OffsetDateTime::from_unix_timestamp_nanos(nanos)
                .map(to_utc)
                .map_err(|_| invalid(value))
        }
        Value::String(s) => parse_date_string(s.trim()).ok_or_else(|| FormatError::InvalidDate {
            input: s.clone(),
        }),
        Value::Array(parts) => parse_date_parts(parts).ok_or_else(|| invalid(value)),
        Value::Bool(_) | Value::Object(_) => Err(FormatError::InvalidDate {
            input: describe(value),
        }),
    }
}

fn invalid(value: &Value) -> FormatError {
    FormatError::InvalidDate {
        input: value.to_string(),
    }
}

fn to_utc(datetime: OffsetDateTime) -> PrimitiveDateTime {
    let utc = datetime.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(utc.date(), utc.time())
}

fn parse_date_string(input: &str) -> Option<PrimitiveDateTime> {
    if input.starts_with('[') {
        let parts: Vec<Value> = serde_json::from_str(input).ok()?;
        return parse_date_parts(&parts);
    }
    if let Ok(datetime) = OffsetDateTime::parse(input, &Rfc3339) {
        return Some(to_utc(datetime));
    }
    if let Ok(datetime) = PrimitiveDateTime::parse(
        input,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(datetime);
    }
    if let Ok(datetime) = PrimitiveDateTime::parse(
        input,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Some(datetime);
    }
    Date::parse(input, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT))
}

fn parse_date_parts(parts: &[Value]) -> Option<PrimitiveDateTime> {
    if !(3..=6).contains(&parts.len()) {
        return None;
    }
    let numbers: Vec<i64> = parts.iter().map(Value::as_i64).collect::<Option<_>>()?;
    let component = |index: usize| -> Option<u8> {
        numbers
            .get(index)
            .map_or(Some(0), |n| u8::try_from(*n).ok())
    };
    let year = i32::try_from(numbers[0]).ok()?;
    let month = Month::try_from(component(1)?).ok()?;
    let date = Date::from_calendar_date(year, month, component(2)?).ok()?;
    let time = Time::from_hms(component(3)?, component(4)?, component(5)?).ok()?;
    Some(PrimitiveDateTime::new(date, time))
}
