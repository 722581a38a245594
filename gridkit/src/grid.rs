//! One grid instance.

use crate::config::GridConfig;
use crate::error::GridResult;
use crate::handler::GridHandler;
use gridkit_edit::{EditSession, EditState, SaveOutcome, ValidationError};
use gridkit_model::{ColumnSet, ConfigError, ConfigResult, Translate, TranslationChain};
use gridkit_query::{paginate, FilterDescriptor, FilterState, PageInfo, QueryState, SortState};
use gridkit_store::{MultiSelectionStore, SelectionStore, StoreReader};
use gridkit_types::{Row, RowId};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info};

type RowIdFn = Box<dyn Fn(&Row) -> gridkit_types::Result<RowId>>;

/// The rows of the current page, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct VisiblePage<'a> {
    pub rows: Vec<&'a Row>,
    pub ids: Vec<&'a RowId>,
    pub info: PageInfo,
}

/// Rows, columns, query state, selection and the edit session of one grid.
///
/// The filtered and sorted order is recomputed whenever rows, filters or
/// sort change, and the page is re-clamped against it. Page and page size
/// changes only re-slice.
pub struct Grid {
    columns: Arc<ColumnSet>,
    rows: Vec<Row>,
    ids: Vec<RowId>,
    positions: HashMap<RowId, usize>,
    row_id: RowIdFn,
    query: QueryState,
    order: Vec<usize>,
    selection: SelectionStore,
    checked: MultiSelectionStore,
    edit: EditSession,
    handler: Rc<dyn GridHandler>,
    translations: TranslationChain,
}

impl Grid {
    /// An empty grid. `row_id` must return an id unique within the rows.
    pub fn new<F>(columns: ColumnSet, row_id: F) -> Self
    where
        F: Fn(&Row) -> gridkit_types::Result<RowId> + 'static,
    {
        let columns = Arc::new(columns);
        let handler: Rc<dyn GridHandler> = Rc::new(gridkit_edit::NoopHandler);
        Self {
            edit: EditSession::with_handler(Arc::clone(&columns), handler.clone()),
            columns,
            rows: Vec::new(),
            ids: Vec::new(),
            positions: HashMap::new(),
            row_id: Box::new(row_id),
            query: QueryState::default(),
            order: Vec::new(),
            selection: SelectionStore::new(),
            checked: MultiSelectionStore::new(),
            handler,
            translations: TranslationChain::with_defaults(),
        }
    }

    /// A grid with the configured columns, filters, sort and page size.
    pub fn from_config<F>(config: &GridConfig, row_id: F) -> ConfigResult<Self>
    where
        F: Fn(&Row) -> gridkit_types::Result<RowId> + 'static,
    {
        config.validate()?;
        Self::new(config.column_set()?, row_id).with_query(config.query_state()?)
    }

    /// Replaces the query state after checking it against the columns.
    pub fn with_query(mut self, query: QueryState) -> ConfigResult<Self> {
        query.validate(&self.columns)?;
        self.query = query;
        self.refresh()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_handler(mut self, handler: Rc<dyn GridHandler>) -> Self {
        self.edit.set_handler(handler.clone());
        self.handler = handler;
        self
    }

    #[must_use]
    pub fn with_translations(mut self, translations: TranslationChain) -> Self {
        self.translations = translations;
        self
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    // ── Rows ─────────────────────────────────────────────────────

    /// Replaces the row collection.
    ///
    /// Every row must yield a unique id; otherwise nothing changes. Checked
    /// rows that no longer exist are unchecked, and a vanished selected row
    /// is deselected.
    pub fn set_rows(&mut self, rows: Vec<Row>) -> ConfigResult<()> {
        let mut ids = Vec::with_capacity(rows.len());
        let mut positions = HashMap::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let id = (self.row_id)(row).map_err(|e| ConfigError::MissingRowId {
                index,
                reason: e.to_string(),
            })?;
            if positions.insert(id.clone(), index).is_some() {
                return Err(ConfigError::DuplicateRowId(id));
            }
            ids.push(id);
        }

        info!("Loaded {} rows", rows.len());
        self.rows = rows;
        self.ids = ids;
        self.positions = positions;

        self.checked.retain(|id| self.positions.contains_key(id));
        if let Some(selected) = self.selection.selected() {
            if !self.positions.contains_key(&selected) {
                self.selection.clear();
            }
        }
        self.refresh()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.positions.get(id).map(|&i| &self.rows[i])
    }

    pub fn row_ids(&self) -> &[RowId] {
        &self.ids
    }

    fn require_row(&self, id: &RowId) -> ConfigResult<&Row> {
        self.row(id)
            .ok_or_else(|| ConfigError::UnknownRowId(id.clone()))
    }

    // ── Query ────────────────────────────────────────────────────

    pub fn filters(&self) -> &FilterState {
        &self.query.filters
    }

    /// Sets or clears the filter of one column. Returns true if it changed.
    pub fn set_filter(&mut self, field: &str, descriptor: Option<FilterDescriptor>) -> ConfigResult<bool> {
        let column = self.columns.require(field)?;
        if descriptor.as_ref().is_some_and(FilterDescriptor::is_active) && !column.is_filterable() {
            return Err(ConfigError::FilterDisabled(field.to_string()));
        }
        if !self.query.filters.set(field, descriptor) {
            return Ok(false);
        }
        debug!("Filter on {} changed", field);
        self.reorder()?;
        self.handler
            .on_filter_change(field, self.query.filters.get(field));
        self.reclamp();
        Ok(true)
    }

    /// Clears every filter. Returns true if any was set.
    pub fn clear_filters(&mut self) -> ConfigResult<bool> {
        let fields: Vec<String> = self.query.filters.iter().map(|(f, _)| f.to_string()).collect();
        if !self.query.filters.clear() {
            return Ok(false);
        }
        self.reorder()?;
        for field in &fields {
            self.handler.on_filter_change(field, None);
        }
        self.reclamp();
        Ok(true)
    }

    pub fn sort(&self) -> &SortState {
        &self.query.sort
    }

    pub fn set_sort(&mut self, sort: SortState) -> ConfigResult<bool> {
        sort.validate(&self.columns)?;
        if sort == self.query.sort {
            return Ok(false);
        }
        self.query.sort = sort;
        self.sort_changed()?;
        Ok(true)
    }

    /// Header click: cycles `field` through asc, desc and unsorted.
    pub fn toggle_sort(&mut self, field: &str, multi: bool) -> ConfigResult<()> {
        if !self.columns.require(field)?.sortable {
            return Err(ConfigError::NotSortable(field.to_string()));
        }
        self.query.sort.toggle(field, multi);
        self.sort_changed()
    }

    fn sort_changed(&mut self) -> ConfigResult<()> {
        debug!("Sort changed to {:?}", self.query.sort.entries());
        self.reorder()?;
        self.handler.on_sort_change(&self.query.sort);
        Ok(())
    }

    pub fn page(&self) -> usize {
        self.query.page.page
    }

    /// Moves to `page`, clamped to the last page. Returns the page shown.
    pub fn set_page(&mut self, page: usize) -> usize {
        let previous = self.query.page.page;
        self.query.page.page = page;
        self.query.page.clamp(self.order.len());
        if self.query.page.page != previous {
            self.handler.on_page_change(self.query.page.page);
        }
        self.query.page.page
    }

    pub fn page_size(&self) -> usize {
        self.query.page.page_size.get()
    }

    /// Changes the page size and re-clamps the page. Any positive size is
    /// accepted.
    pub fn set_page_size(&mut self, page_size: usize) -> ConfigResult<()> {
        let page_size =
            std::num::NonZeroUsize::new(page_size).ok_or(ConfigError::InvalidPageSize(page_size))?;
        if page_size == self.query.page.page_size {
            return Ok(());
        }
        self.query.page.page_size = page_size;
        self.handler.on_page_size_change(page_size);
        self.reclamp();
        Ok(())
    }

    /// Rows passing the filters.
    pub fn filtered_len(&self) -> usize {
        self.order.len()
    }

    /// The current page.
    pub fn visible(&self) -> VisiblePage<'_> {
        let window = paginate(&self.order, self.query.page.page, self.query.page.page_size);
        VisiblePage {
            rows: window.rows.iter().map(|&i| &self.rows[i]).collect(),
            ids: window.rows.iter().map(|&i| &self.ids[i]).collect(),
            info: window.info,
        }
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::compute(self.query.page.page, self.query.page.page_size, self.order.len())
    }

    /// "X–Y of N" through the grid's translations.
    pub fn range_label(&self) -> String {
        self.page_info().range_label(&self.translations)
    }

    pub fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.translations.translate(key, params)
    }

    /// Display text of one cell.
    pub fn cell_text(&self, id: &RowId, field: &str) -> ConfigResult<String> {
        let row = self.require_row(id)?;
        Ok(self.columns.require(field)?.display_value(row))
    }

    fn reorder(&mut self) -> ConfigResult<()> {
        self.order = self.query.order(&self.rows, &self.columns)?;
        Ok(())
    }

    fn refresh(&mut self) -> ConfigResult<()> {
        self.reorder()?;
        self.reclamp();
        Ok(())
    }

    fn reclamp(&mut self) {
        if self.query.page.clamp(self.order.len()) {
            debug!("Page re-clamped to {}", self.query.page.page);
            self.handler.on_page_change(self.query.page.page);
        }
    }

    // ── Selection ────────────────────────────────────────────────

    /// The click-selection store.
    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// The checkbox-selection store.
    pub fn checked(&self) -> &MultiSelectionStore {
        &self.checked
    }

    /// Selects a row (or clears with `None`) and notifies the handler.
    pub fn select_row(&self, id: Option<RowId>) -> ConfigResult<bool> {
        if let Some(id) = &id {
            self.require_row(id)?;
        }
        if !self.selection.select(id) {
            return Ok(false);
        }
        self.handler.on_row_select(self.selection.selected().as_ref());
        Ok(true)
    }

    /// Flips one row's checkbox. Returns whether it is now checked.
    pub fn toggle_checked(&self, id: &RowId) -> ConfigResult<bool> {
        self.require_row(id)?;
        Ok(self.checked.toggle(id.clone()))
    }

    /// Checks every row of the current page.
    pub fn check_page(&self) -> bool {
        let ids: Vec<RowId> = self.visible().ids.into_iter().cloned().collect();
        self.checked.select_all(ids)
    }

    /// Unchecks every row of the current page.
    pub fn uncheck_page(&self) -> bool {
        self.checked.deselect_all(self.visible().ids)
    }

    /// Whether every row of a non-empty current page is checked.
    pub fn is_page_checked(&self) -> bool {
        self.checked.contains_all(self.visible().ids)
    }

    // ── Editing ──────────────────────────────────────────────────

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    /// Read and subscribe access to the edit state.
    pub fn edit_store(&self) -> StoreReader<EditState> {
        self.edit.store()
    }

    pub fn start_edit(&self, id: &RowId) -> GridResult<()> {
        let row = self.require_row(id)?;
        self.edit.start_edit(id.clone(), row)?;
        Ok(())
    }

    /// Opens a create session under a fresh temporary id.
    pub fn start_new_row(&self) -> GridResult<RowId> {
        let id = RowId::temporary();
        self.edit.start_new_row_edit(id.clone())?;
        Ok(id)
    }

    pub fn set_draft_value(&self, field: &str, value: Value) -> GridResult<()> {
        Ok(self.edit.set_draft_value(field, value)?)
    }

    pub fn validate_field(&self, field: &str) -> GridResult<Vec<ValidationError>> {
        Ok(self.edit.validate_field(field)?)
    }

    pub fn save_edit(&self) -> GridResult<SaveOutcome> {
        Ok(self.edit.save()?)
    }

    pub fn cancel_edit(&self) -> Option<RowId> {
        self.edit.cancel()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("filtered", &self.order.len())
            .field("query", &self.query)
            .field("edit", &self.edit)
            .finish_non_exhaustive()
    }
}
