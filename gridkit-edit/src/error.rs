//! Error types for edit sessions.

use gridkit_model::ConfigError;
use gridkit_types::RowId;
use thiserror::Error;

/// Result type for edit session operations.
pub type EditResult<T> = Result<T, EditError>;

/// A transition the session refused. The session state is unchanged.
#[derive(Debug, Error)]
pub enum EditError {
    /// The operation needs an active edit.
    #[error("no row is being edited")]
    NotEditing,

    /// Another row is already being edited.
    #[error("row {active} is being edited; save or cancel it before editing row {requested}")]
    Busy { active: RowId, requested: RowId },

    /// Misuse of the column configuration, e.g. an unknown field.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
