use crate::state::EditMode;
use crate::validation::ValidationError;
use gridkit_types::{Row, RowId};

/// Collaborator hooks invoked by an [`EditSession`](crate::EditSession).
///
/// Every method defaults to doing nothing; implement the ones you need.
/// Hooks run synchronously inside the transition that triggers them.
pub trait EditHandler {
    /// An edit session started. `row` is empty for new rows.
    fn on_edit_start(&self, row_id: &RowId, row: &Row) {
        let _ = (row_id, row);
    }

    /// The session was cancelled and its draft discarded.
    fn on_edit_cancel(&self, row_id: &RowId) {
        let _ = row_id;
    }

    /// The draft passed validation. Persisting it is up to the host.
    fn on_edit_commit(&self, row_id: &RowId, mode: EditMode, values: &Row) {
        let _ = (row_id, mode, values);
    }

    /// `save` found errors; the session stays open.
    fn on_validation_fail(&self, row_id: &RowId, errors: &[ValidationError]) {
        let _ = (row_id, errors);
    }
}

/// Handler that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl EditHandler for NoopHandler {}
