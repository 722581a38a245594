use gridkit_edit::EditHandler;
use gridkit_query::{FilterDescriptor, SortState};
use gridkit_types::RowId;
use std::num::NonZeroUsize;

/// Collaborator hooks for a [`Grid`](crate::Grid).
///
/// Includes the edit session hooks of [`EditHandler`]. Every method
/// defaults to doing nothing. Hooks fire only when the state actually
/// changed, after the grid has been updated.
pub trait GridHandler: EditHandler {
    /// `descriptor` is `None` when the field's filter was cleared.
    fn on_filter_change(&self, field: &str, descriptor: Option<&FilterDescriptor>) {
        let _ = (field, descriptor);
    }

    fn on_sort_change(&self, sort: &SortState) {
        let _ = sort;
    }

    /// Also fires when the page is re-clamped after the row count shrank.
    fn on_page_change(&self, page: usize) {
        let _ = page;
    }

    fn on_page_size_change(&self, page_size: NonZeroUsize) {
        let _ = page_size;
    }

    fn on_row_select(&self, row_id: Option<&RowId>) {
        let _ = row_id;
    }
}

impl GridHandler for gridkit_edit::NoopHandler {}
