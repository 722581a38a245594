//! Configuration errors.
//!
//! These are programmer errors in the host's grid configuration. They are
//! returned immediately at the point of misuse and never degraded silently,
//! since continuing would corrupt row identity or selection.

use gridkit_types::RowId;
use thiserror::Error;

/// Result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Two columns share the same field key.
    #[error("duplicate column field: {0}")]
    DuplicateField(String),

    /// A column was declared with an empty field key.
    #[error("column field must not be empty")]
    EmptyField,

    /// A filter, sort or edit referenced a field with no column.
    #[error("unknown column field: {0}")]
    UnknownField(String),

    /// A filter was set on a column whose filter is disabled.
    #[error("filtering is disabled for column: {0}")]
    FilterDisabled(String),

    /// A sort was requested on a column that is not sortable.
    #[error("column is not sortable: {0}")]
    NotSortable(String),

    /// The same field appears twice in a sort state.
    #[error("field appears more than once in sort state: {0}")]
    DuplicateSortField(String),

    /// Page sizes must be positive.
    #[error("invalid page size: {0}")]
    InvalidPageSize(usize),

    /// The host's row id function produced no id for a row.
    #[error("row at index {index} has no id: {reason}")]
    MissingRowId { index: usize, reason: String },

    /// Two rows of the collection share an id.
    #[error("duplicate row id: {0}")]
    DuplicateRowId(RowId),

    /// A row id that is not in the current collection.
    #[error("unknown row id: {0}")]
    UnknownRowId(RowId),

    /// Malformed configuration document.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
