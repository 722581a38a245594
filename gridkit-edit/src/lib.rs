//! Row editing for gridkit.
//!
//! - [`validation`]: runs column validator chains against a draft row
//! - [`EditSession`]: the single-row `Idle → Editing → Idle` state machine,
//!   publishing its state through a read-only store
//! - [`EditHandler`]: collaborator hooks invoked on transitions

mod error;
mod handler;
mod session;
mod state;
pub mod validation;

pub use error::{EditError, EditResult};
pub use handler::{EditHandler, NoopHandler};
pub use session::{EditSession, SaveOutcome};
pub use state::{ActiveEdit, EditMode, EditState, FieldErrors};
pub use validation::{Severity, ValidationError};
