//! The edit session state machine.
//!
//! `Idle → Editing(update | create) → Idle`. At most one row is edited at a
//! time: starting an edit on a different row is refused until the current
//! session is saved or cancelled. Validation runs synchronously inside
//! [`EditSession::save`]; there is no separate validating state.

use crate::error::{EditError, EditResult};
use crate::handler::{EditHandler, NoopHandler};
use crate::state::{ActiveEdit, EditMode, EditState, FieldErrors};
use crate::validation::{self, ValidationError};
use gridkit_model::ColumnSet;
use gridkit_store::{Observable, StoreReader};
use gridkit_types::{Row, RowId};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of [`EditSession::save`].
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The draft was valid and handed to the commit hook. The session is idle.
    Committed {
        row_id: RowId,
        mode: EditMode,
        values: Row,
    },
    /// Validation failed. The session is still editing the row.
    Invalid(Vec<ValidationError>),
}

impl SaveOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Owns the edit store and the only code allowed to write it.
pub struct EditSession {
    columns: Arc<ColumnSet>,
    store: Observable<EditState>,
    handler: Rc<dyn EditHandler>,
}

impl EditSession {
    pub fn new(columns: Arc<ColumnSet>) -> Self {
        Self::with_handler(columns, Rc::new(NoopHandler))
    }

    pub fn with_handler(columns: Arc<ColumnSet>, handler: Rc<dyn EditHandler>) -> Self {
        Self {
            columns,
            store: Observable::default(),
            handler,
        }
    }

    pub fn set_handler(&mut self, handler: Rc<dyn EditHandler>) {
        self.handler = handler;
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Read and subscribe access to the edit state.
    pub fn store(&self) -> StoreReader<EditState> {
        self.store.reader()
    }

    pub fn state(&self) -> Rc<EditState> {
        self.store.get_snapshot()
    }

    pub fn is_editing(&self) -> bool {
        self.state().is_editing()
    }

    pub fn edit_row_id(&self) -> Option<RowId> {
        self.state().edit_row_id().cloned()
    }

    /// Starts editing an existing row. The draft is a copy of `row`.
    ///
    /// Does nothing if this row is already being edited; fails with
    /// [`EditError::Busy`] if another row is.
    pub fn start_edit(&self, row_id: RowId, row: &Row) -> EditResult<()> {
        if !self.ensure_free(&row_id)? {
            return Ok(());
        }
        self.begin(ActiveEdit {
            row_id: row_id.clone(),
            mode: EditMode::Update,
            draft_values: row.clone(),
            original_row: Some(row.clone()),
        });
        debug!("Started editing row {}", row_id);
        self.handler.on_edit_start(&row_id, row);
        Ok(())
    }

    /// Starts editing a row that does not exist yet, with an empty draft.
    pub fn start_new_row_edit(&self, row_id: RowId) -> EditResult<()> {
        if !self.ensure_free(&row_id)? {
            return Ok(());
        }
        self.begin(ActiveEdit {
            row_id: row_id.clone(),
            mode: EditMode::Create,
            draft_values: Row::new(),
            original_row: None,
        });
        debug!("Started creating row {}", row_id);
        self.handler.on_edit_start(&row_id, &Row::new());
        Ok(())
    }

    /// Ok(true) when a new session may start, Ok(false) when `row_id` is
    /// already the active row.
    fn ensure_free(&self, row_id: &RowId) -> EditResult<bool> {
        match self.state().edit_row_id() {
            None => Ok(true),
            Some(active) if active == row_id => {
                debug!("Row {} is already being edited", row_id);
                Ok(false)
            }
            Some(active) => {
                warn!("Refusing to edit row {} while row {} is being edited", row_id, active);
                Err(EditError::Busy {
                    active: active.clone(),
                    requested: row_id.clone(),
                })
            }
        }
    }

    fn begin(&self, active: ActiveEdit) {
        self.store.modify(|state| {
            state.row_errors.remove(&active.row_id);
            state.active = Some(active);
        });
    }

    /// Sets one draft value. Does not validate.
    pub fn set_draft_value(&self, field: &str, value: Value) -> EditResult<()> {
        if !self.is_editing() {
            return Err(EditError::NotEditing);
        }
        self.columns.require(field)?;
        self.store.modify(|state| {
            if let Some(active) = state.active.as_mut() {
                active.draft_values.insert(field.to_string(), value);
            }
        });
        Ok(())
    }

    /// Validates one field of the draft and records the result in the
    /// store, replacing that field's previous errors.
    pub fn validate_field(&self, field: &str) -> EditResult<Vec<ValidationError>> {
        let state = self.state();
        let active = state.active.as_ref().ok_or(EditError::NotEditing)?;
        let errors = validation::validate_field(
            field,
            &active.draft_values,
            &self.columns,
            active.original_row.as_ref(),
        )?;

        let row_id = active.row_id.clone();
        self.store.modify(|state| {
            let fields = state.row_errors.entry(row_id.clone()).or_default();
            if errors.is_empty() {
                fields.remove(field);
            } else {
                fields.insert(field.to_string(), errors.clone());
            }
            if fields.is_empty() {
                state.row_errors.remove(&row_id);
            }
        });
        Ok(errors)
    }

    /// Validates the whole draft.
    ///
    /// On failure the errors are published, the validation-fail hook runs and
    /// the session stays open. On success the commit hook receives the draft
    /// and the session returns to idle.
    pub fn save(&self) -> EditResult<SaveOutcome> {
        let state = self.state();
        let active = state.active.as_ref().ok_or(EditError::NotEditing)?;
        let errors = validation::validate_row(
            &active.draft_values,
            &self.columns,
            active.original_row.as_ref(),
        );

        if !errors.is_empty() {
            debug!("Row {} failed validation with {} errors", active.row_id, errors.len());
            let mut by_field = FieldErrors::new();
            for error in &errors {
                by_field.entry(error.field.clone()).or_default().push(error.clone());
            }
            self.store.modify(|state| {
                state.row_errors.insert(active.row_id.clone(), by_field);
            });
            self.handler.on_validation_fail(&active.row_id, &errors);
            return Ok(SaveOutcome::Invalid(errors));
        }

        info!("Committing {:?} of row {}", active.mode, active.row_id);
        self.handler
            .on_edit_commit(&active.row_id, active.mode, &active.draft_values);
        self.finish(&active.row_id);
        Ok(SaveOutcome::Committed {
            row_id: active.row_id.clone(),
            mode: active.mode,
            values: active.draft_values.clone(),
        })
    }

    /// Discards the draft and returns to idle. Returns the row that was
    /// being edited, or `None` if the session was already idle.
    pub fn cancel(&self) -> Option<RowId> {
        let row_id = self.edit_row_id()?;
        self.finish(&row_id);
        debug!("Cancelled edit of row {}", row_id);
        self.handler.on_edit_cancel(&row_id);
        Some(row_id)
    }

    fn finish(&self, row_id: &RowId) {
        self.store.modify(|state| {
            state.active = None;
            state.row_errors.remove(row_id);
        });
    }
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("columns", &self.columns.len())
            .field("state", &self.store.get_snapshot())
            .finish_non_exhaustive()
    }
}
