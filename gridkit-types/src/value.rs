//! Cell values and type-aware coercion.
//!
//! Rows are opaque JSON records; the engine only reads individual cells by
//! field name. A cell is coerced into a [`TypedValue`] according to the
//! column's [`FieldType`] before it is compared. Cells that cannot be
//! coerced (null, empty strings, `"abc"` in a number column) coerce to
//! `None` and are treated as null by every consumer.

use crate::FieldType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;

/// A row record keyed by field name.
pub type Row = serde_json::Map<String, Value>;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Returns true for null, empty or whitespace-only strings, and empty arrays.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Reads a cell, mapping a missing field to `Value::Null`.
pub fn cell<'a>(row: &'a Row, field: &str) -> &'a Value {
    static NULL: Value = Value::Null;
    row.get(field).unwrap_or(&NULL)
}

/// Coerces a value to a number. Numeric strings are accepted.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
        _ => None,
    }
}

/// Coerces a value to a UTC instant.
///
/// Accepts RFC 3339 strings, naive `YYYY-MM-DDTHH:MM[:SS[.fff]]` strings
/// (read as UTC), plain dates (midnight UTC) and epoch milliseconds.
pub fn to_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::String(s) => parse_datetime(s.trim()),
        _ => None,
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Coerces a value to a calendar date (day granularity).
pub fn to_date(value: &Value) -> Option<NaiveDate> {
    if let Value::String(s) = value {
        if let Ok(date) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
            return Some(date);
        }
    }
    to_datetime(value).map(|dt| dt.date_naive())
}

/// Renders a scalar value as text. Null yields `None`.
pub fn to_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// Canonical key of a scalar value, used for option and list membership.
///
/// `1` and `"1"` share the key `"1"`. Arrays, objects and null have no key.
pub fn to_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Case-insensitive ordering with the raw ordering as tie-break.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

/// A cell value coerced according to its column's [`FieldType`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue<'a> {
    Number(f64),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Text(Cow<'a, str>),
}

impl<'a> TypedValue<'a> {
    /// Coerces `value` for a column of type `field_type`.
    ///
    /// Blank values and values that do not parse as the column's type
    /// yield `None`.
    pub fn coerce(value: &'a Value, field_type: FieldType) -> Option<Self> {
        if is_blank(value) {
            return None;
        }
        match field_type {
            FieldType::Number => to_number(value).map(Self::Number),
            FieldType::Date => to_date(value).map(Self::Date),
            FieldType::DateTime => to_datetime(value).map(Self::DateTime),
            FieldType::Text | FieldType::List => to_text(value).map(Self::Text),
        }
    }

    /// Orders two values of the same variant. Mixed variants are unordered.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(compare_text(a, b)),
            _ => None,
        }
    }
}
