//! Filter → sort → paginate.

use crate::filter::{filter_indices, FilterState};
use crate::page::{paginate, PageInfo, PageState};
use crate::sort::{sort_indices, SortState};
use gridkit_model::{ColumnSet, ConfigResult};
use gridkit_types::Row;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything that determines the visible rows besides the rows themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryState {
    pub filters: FilterState,
    pub sort: SortState,
    pub page: PageState,
}

/// The visible page produced by [`QueryState::run`].
#[derive(Debug, Clone)]
pub struct QueryOutput<'r> {
    pub rows: Vec<&'r Row>,
    /// Positions of `rows` in the source collection.
    pub indices: Vec<usize>,
    pub info: PageInfo,
}

impl QueryState {
    /// Checks filters and sort keys against the columns.
    pub fn validate(&self, columns: &ColumnSet) -> ConfigResult<()> {
        self.filters.validate(columns)?;
        self.sort.validate(columns)
    }

    /// Source indices of the filtered rows, in sorted order.
    ///
    /// Filtering always runs before sorting.
    pub fn order(&self, rows: &[Row], columns: &ColumnSet) -> ConfigResult<Vec<usize>> {
        let mut indices = filter_indices(rows, &self.filters, columns)?;
        sort_indices(rows, &mut indices, &self.sort, columns);
        debug!(
            "Query kept {} of {} rows ({} filters, {} sort keys)",
            indices.len(),
            rows.len(),
            self.filters.len(),
            self.sort.entries().len()
        );
        Ok(indices)
    }

    /// Runs the whole pipeline and slices out the current page.
    ///
    /// The stored page is not modified; an out-of-range page is clamped in
    /// the output only.
    pub fn run<'r>(&self, rows: &'r [Row], columns: &ColumnSet) -> ConfigResult<QueryOutput<'r>> {
        let order = self.order(rows, columns)?;
        let window = paginate(&order, self.page.page, self.page.page_size);
        Ok(QueryOutput {
            rows: window.rows.iter().map(|&i| &rows[i]).collect(),
            indices: window.rows.to_vec(),
            info: window.info,
        })
    }
}
