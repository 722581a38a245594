//! gridkit: the query and edit engine behind an interactive data grid.
//!
//! Given rows, a column schema and filter/sort/page state, [`Grid`]
//! produces the exact visible row window, and drives the single-row edit
//! session with per-column validation. State that observers care about
//! (selection, the edit session) lives in observable stores.
//!
//! Rendering is not part of this crate. A rendering layer reads
//! [`Grid::visible`], subscribes to the stores, and forwards user actions
//! to the grid's mutators.
//!
//! ```no_run
//! use gridkit::{ColumnDef, ColumnSet, FilterDescriptor, Grid, RowId};
//! use serde_json::json;
//!
//! let columns = ColumnSet::new(vec![ColumnDef::number("id"), ColumnDef::text("name")])?;
//! let mut grid = Grid::new(columns, |row| RowId::from_field(row, "id"));
//! grid.set_rows(vec![
//!     serde_json::from_value(json!({"id": 1, "name": "Bolts"}))?,
//!     serde_json::from_value(json!({"id": 2, "name": "Nuts"}))?,
//! ])?;
//! grid.set_filter("name", Some(FilterDescriptor::contains("nu")))?;
//! assert_eq!(grid.visible().ids, vec![&RowId::Int(2)]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod grid;
mod handler;

pub use config::{GridConfig, DEFAULT_PAGE_SIZE_OPTIONS};
pub use error::{GridError, GridResult};
pub use grid::{Grid, VisiblePage};
pub use handler::GridHandler;

pub use gridkit_edit::{
    validation, EditError, EditHandler, EditMode, EditSession, EditState, NoopHandler, SaveOutcome,
    Severity, ValidationError,
};
pub use gridkit_model::{
    option_label, resolve_options, ColumnDef, ColumnSet, ColumnSpec, ConfigError, ConfigResult,
    Editable, FilterTypeSpec, OptionDescriptor, ResolvedOption, Translate, TranslationChain,
    TranslationTable, Validator, Verdict,
};
pub use gridkit_query::{
    Condition, FilterDescriptor, FilterState, Operator, PageInfo, PageState, QueryState, SortEntry,
    SortOrder, SortState,
};
pub use gridkit_store::{MultiSelectionStore, Observable, SelectionStore, StoreReader, Subscription};
pub use gridkit_types::{FieldType, Row, RowId};
