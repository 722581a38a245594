use gridkit_edit::EditError;
use gridkit_model::ConfigError;
use thiserror::Error;

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

#[derive(Debug, Error)]
pub enum GridError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Edit(#[from] EditError),
}
