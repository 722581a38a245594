use crate::validation::ValidationError;
use gridkit_types::{Row, RowId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Whether the edited row already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    Create,
    Update,
}

/// Errors of one row, keyed by field.
pub type FieldErrors = BTreeMap<String, Vec<ValidationError>>;

/// The row currently being edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveEdit {
    pub row_id: RowId,
    pub mode: EditMode,
    pub draft_values: Row,
    /// `None` in create mode.
    pub original_row: Option<Row>,
}

/// Snapshot published by the edit store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditState {
    /// `None` while idle.
    pub active: Option<ActiveEdit>,
    pub row_errors: BTreeMap<RowId, FieldErrors>,
}

impl EditState {
    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    pub fn edit_row_id(&self) -> Option<&RowId> {
        self.active.as_ref().map(|a| &a.row_id)
    }

    pub fn is_editing_row(&self, row_id: &RowId) -> bool {
        self.edit_row_id() == Some(row_id)
    }

    pub fn mode(&self) -> Option<EditMode> {
        self.active.as_ref().map(|a| a.mode)
    }

    pub fn draft_values(&self) -> Option<&Row> {
        self.active.as_ref().map(|a| &a.draft_values)
    }

    pub fn draft_value(&self, field: &str) -> Option<&Value> {
        self.draft_values().and_then(|d| d.get(field))
    }

    pub fn original_row(&self) -> Option<&Row> {
        self.active.as_ref().and_then(|a| a.original_row.as_ref())
    }

    pub fn errors_for(&self, row_id: &RowId) -> Option<&FieldErrors> {
        self.row_errors.get(row_id)
    }

    /// Errors of one field; empty when valid or never checked.
    pub fn field_errors(&self, row_id: &RowId, field: &str) -> &[ValidationError] {
        self.row_errors
            .get(row_id)
            .and_then(|fields| fields.get(field))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
