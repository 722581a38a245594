//! Shared test helpers for edit session tests.

#![allow(dead_code)]

use gridkit_edit::{EditHandler, EditMode, ValidationError};
use gridkit_model::{ColumnDef, ColumnSet, Validator};
use gridkit_types::{Row, RowId};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn row(value: Value) -> Row {
    serde_json::from_value(value).unwrap()
}

/// Columns of a small order table:
/// `name` required, `qty` in 1..=100 and only editable while `status` is Pending.
pub fn order_columns() -> Arc<ColumnSet> {
    Arc::new(
        ColumnSet::new(vec![
            ColumnDef::number("id"),
            ColumnDef::text("name")
                .with_editable(true)
                .with_validator(Validator::required("Name is required"))
                .with_validator(Validator::max_length(10, "Name is too long")),
            ColumnDef::number("qty")
                .editable_when(|row| row.get("status") == Some(&json!("Pending")))
                .with_validator(Validator::required("Quantity is required"))
                .with_validator(Validator::min(1.0, "Quantity must be positive"))
                .with_validator(Validator::max(100.0, "Quantity is too large")),
            ColumnDef::list("status", &["Pending".into(), "Shipped".into()]).with_editable(true),
        ])
        .unwrap(),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Start(RowId, Row),
    Cancel(RowId),
    Commit(RowId, EditMode, Row),
    Fail(RowId, Vec<ValidationError>),
}

/// Handler recording every hook invocation in order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: RefCell<Vec<Event>>,
}

impl Recorder {
    pub fn take(&self) -> Vec<Event> {
        self.events.take()
    }

    pub fn commits(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Commit(..)))
            .count()
    }
}

impl EditHandler for Recorder {
    fn on_edit_start(&self, row_id: &RowId, row: &Row) {
        self.events.borrow_mut().push(Event::Start(row_id.clone(), row.clone()));
    }

    fn on_edit_cancel(&self, row_id: &RowId) {
        self.events.borrow_mut().push(Event::Cancel(row_id.clone()));
    }

    fn on_edit_commit(&self, row_id: &RowId, mode: EditMode, values: &Row) {
        self.events
            .borrow_mut()
            .push(Event::Commit(row_id.clone(), mode, values.clone()));
    }

    fn on_validation_fail(&self, row_id: &RowId, errors: &[ValidationError]) {
        self.events
            .borrow_mut()
            .push(Event::Fail(row_id.clone(), errors.to_vec()));
    }
}
