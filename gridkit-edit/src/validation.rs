//! Validation engine.
//!
//! For each column with validators, editability is resolved first; a
//! column that is not editable for the row is skipped entirely. Validators
//! then run in declaration order and the first failure is the column's
//! only error. Errors accumulate across columns in column order.

use gridkit_model::{ColumnDef, ColumnSet, ConfigResult};
use gridkit_types::Row;
use serde::{Deserialize, Serialize};

/// How serious a validation error is. Only `Error` exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Validates a whole draft row. Empty when the row is valid.
///
/// Editability is resolved against `original`, or against the draft itself
/// for rows that have no original yet.
pub fn validate_row(draft: &Row, columns: &ColumnSet, original: Option<&Row>) -> Vec<ValidationError> {
    let gate = original.unwrap_or(draft);
    columns
        .iter()
        .filter_map(|column| check_column(column, draft, gate))
        .collect()
}

/// Validates one field of a draft row, for on-blur checks.
///
/// Returns at most one error. An unknown field is a configuration error.
pub fn validate_field(
    field: &str,
    draft: &Row,
    columns: &ColumnSet,
    original: Option<&Row>,
) -> ConfigResult<Vec<ValidationError>> {
    let column = columns.require(field)?;
    let gate = original.unwrap_or(draft);
    Ok(check_column(column, draft, gate).into_iter().collect())
}

fn check_column(column: &ColumnDef, draft: &Row, gate: &Row) -> Option<ValidationError> {
    if column.validators.is_empty() || !column.is_editable(gate) {
        return None;
    }
    let value = column.value(draft);
    column
        .validators
        .iter()
        .find_map(|validator| validator.check(value, draft))
        .map(|message| ValidationError::new(&column.field, message))
}
