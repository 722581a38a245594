//! Column schema model for gridkit.
//!
//! Defines the declarative description of a grid's columns that every other
//! subsystem consumes:
//! - [`ColumnDef`]: one column: field key, type, filterability, editability,
//!   validator chain, options and display formatter
//! - [`ColumnSet`]: the ordered, field-unique set of columns of one grid
//! - [`Editable`]: static or row-conditional editability
//! - [`Validator`] / [`Verdict`]: injected per-column validation functions
//! - [`resolve_options`]: canonical `(key, label)` options for list columns
//! - [`TranslationChain`]: ordered lookup sources for user-facing strings
//!
//! Configuration mistakes (duplicate fields, unknown fields) surface as
//! [`ConfigError`] at the point of misuse.

mod column;
mod column_set;
mod error;
mod i18n;
mod options;
mod validator;

pub use column::{ColumnDef, ColumnSpec, Editable, FilterTypeSpec, Formatter};
pub use column_set::ColumnSet;
pub use error::{ConfigError, ConfigResult};
pub use i18n::{Translate, TranslationChain, TranslationTable};
pub use options::{option_label, resolve_options, OptionDescriptor, ResolvedOption};
pub use validator::{Validator, Verdict};
