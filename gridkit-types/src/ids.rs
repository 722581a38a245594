//! Row identifiers.
//!
//! A row id is supplied by the host through its `get_row_id` function and is
//! either an integer or a string. Ids must be unique within a row collection
//! and must not change while the row is being edited.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const TEMPORARY_PREFIX: &str = "new-";

/// Stable identifier of a row within the current row collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Str(String),
}

impl RowId {
    /// Mints an id for a row that does not exist in the host's collection yet.
    ///
    /// Uses UUID v7 so ids minted in one session sort by creation time.
    #[must_use]
    pub fn temporary() -> Self {
        Self::Str(format!("{TEMPORARY_PREFIX}{}", Uuid::now_v7()))
    }

    /// Returns true for ids minted by [`RowId::temporary`].
    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::Str(s) if s.starts_with(TEMPORARY_PREFIX))
    }

    /// Extracts a row id from a JSON value.
    ///
    /// Accepts strings and integers. Everything else, including empty
    /// strings and fractional numbers, is rejected.
    pub fn from_value(value: &Value) -> crate::Result<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Ok(Self::Str(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .ok_or_else(|| crate::Error::InvalidRowId(n.to_string())),
            other => Err(crate::Error::InvalidRowId(other.to_string())),
        }
    }

    /// Reads the id stored under `field` of a row.
    pub fn from_field(row: &crate::Row, field: &str) -> crate::Result<Self> {
        match row.get(field) {
            Some(value) => Self::from_value(value),
            None => Err(crate::Error::InvalidRowId(format!("missing field `{field}`"))),
        }
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RowId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<RowId> for Value {
    fn from(id: RowId) -> Self {
        match id {
            RowId::Int(n) => Value::from(n),
            RowId::Str(s) => Value::String(s),
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl FromStr for RowId {
    type Err = Infallible;

    /// Integers parse to [`RowId::Int`]; anything else is kept as a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>().map_or_else(|_| Self::Str(s.to_string()), Self::Int))
    }
}
