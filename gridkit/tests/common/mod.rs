//! Shared test helpers for grid tests.

#![allow(dead_code)]

use gridkit::{
    ColumnDef, ColumnSet, EditHandler, EditMode, FilterDescriptor, Grid, GridHandler, Row, RowId,
    SortState, ValidationError, Validator,
};
use serde_json::json;
use std::cell::RefCell;
use std::num::NonZeroUsize;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `count` tasks with ids 1..=count. Every third task is Done, the rest
/// are Pending; `hours` cycles 1..=8.
pub fn tasks(count: i64) -> Vec<Row> {
    (1..=count)
        .map(|id| {
            let status = if id % 3 == 0 { "Done" } else { "Pending" };
            serde_json::from_value(json!({
                "id": id,
                "title": format!("Task {id}"),
                "hours": (id - 1) % 8 + 1,
                "status": status,
            }))
            .unwrap()
        })
        .collect()
}

pub fn task_columns() -> ColumnSet {
    ColumnSet::new(vec![
        ColumnDef::number("id"),
        ColumnDef::text("title")
            .with_editable(true)
            .with_validator(Validator::required("Title is required")),
        ColumnDef::number("hours")
            .editable_when(|row| row.get("status") == Some(&json!("Pending")))
            .with_validator(Validator::max(40.0, "At most 40 hours")),
        ColumnDef::list("status", &["Pending".into(), "Done".into()]).with_editable(true),
        ColumnDef::text("notes").with_filter_type(None).with_sortable(false),
    ])
    .unwrap()
}

pub fn task_grid(count: i64) -> (Grid, Rc<Recorder>) {
    init_tracing();
    let recorder = Rc::new(Recorder::default());
    let mut grid = Grid::new(task_columns(), |row| RowId::from_field(row, "id"))
        .with_handler(recorder.clone());
    grid.set_rows(tasks(count)).unwrap();
    recorder.take();
    (grid, recorder)
}

/// Handler recording every hook as a short string.
#[derive(Debug, Default)]
pub struct Recorder {
    events: RefCell<Vec<String>>,
}

impl Recorder {
    pub fn take(&self) -> Vec<String> {
        self.events.take()
    }

    fn push(&self, event: String) {
        self.events.borrow_mut().push(event);
    }
}

impl EditHandler for Recorder {
    fn on_edit_start(&self, row_id: &RowId, _: &Row) {
        self.push(format!("edit-start {row_id}"));
    }

    fn on_edit_cancel(&self, row_id: &RowId) {
        self.push(format!("edit-cancel {row_id}"));
    }

    fn on_edit_commit(&self, row_id: &RowId, mode: EditMode, _: &Row) {
        self.push(format!("edit-commit {row_id} {mode:?}"));
    }

    fn on_validation_fail(&self, row_id: &RowId, errors: &[ValidationError]) {
        self.push(format!("validation-fail {row_id} {}", errors.len()));
    }
}

impl GridHandler for Recorder {
    fn on_filter_change(&self, field: &str, descriptor: Option<&FilterDescriptor>) {
        self.push(format!("filter {field} {}", descriptor.is_some()));
    }

    fn on_sort_change(&self, sort: &SortState) {
        self.push(format!("sort {}", sort.entries().len()));
    }

    fn on_page_change(&self, page: usize) {
        self.push(format!("page {page}"));
    }

    fn on_page_size_change(&self, page_size: NonZeroUsize) {
        self.push(format!("page-size {page_size}"));
    }

    fn on_row_select(&self, row_id: Option<&RowId>) {
        match row_id {
            Some(id) => self.push(format!("select {id}")),
            None => self.push("select none".to_string()),
        }
    }
}
