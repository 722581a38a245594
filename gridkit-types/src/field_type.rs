use serde::{Deserialize, Serialize};
use std::fmt;

/// The data type of a column.
///
/// Governs which filter operators apply and how cell values are coerced
/// for filtering, sorting and validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    DateTime,
    /// A value drawn from a fixed set of options.
    List,
}

impl FieldType {
    /// Whether values of this type are ordered by magnitude or time rather
    /// than by text.
    pub fn is_ordinal(&self) -> bool {
        matches!(self, Self::Number | Self::Date | Self::DateTime)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::List => "list",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
