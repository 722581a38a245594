use crate::observable::{Observable, StoreReader, Subscription};
use gridkit_types::RowId;
use std::collections::BTreeSet;
use std::rc::Rc;
use tracing::debug;

/// The last clicked row, used for contextual actions.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    cell: Observable<Option<RowId>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_snapshot(&self) -> Rc<Option<RowId>> {
        self.cell.get_snapshot()
    }

    pub fn selected(&self) -> Option<RowId> {
        (*self.cell.get_snapshot()).clone()
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        matches!(&*self.cell.get_snapshot(), Some(selected) if selected == id)
    }

    /// Selects `id`, or clears the selection with `None`.
    /// Returns false, without notifying, if nothing changed.
    pub fn select(&self, id: Option<RowId>) -> bool {
        let changed = self.cell.set(id);
        if changed {
            debug!("Row selection changed to {:?}", self.cell.get_snapshot());
        }
        changed
    }

    pub fn clear(&self) -> bool {
        self.select(None)
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Option<RowId>) + 'static,
    {
        self.cell.subscribe(listener)
    }

    pub fn reader(&self) -> StoreReader<Option<RowId>> {
        self.cell.reader()
    }
}

/// Checkbox selection for bulk operations.
#[derive(Debug, Clone, Default)]
pub struct MultiSelectionStore {
    cell: Observable<BTreeSet<RowId>>,
}

impl MultiSelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_snapshot(&self) -> Rc<BTreeSet<RowId>> {
        self.cell.get_snapshot()
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.cell.get_snapshot().contains(id)
    }

    pub fn len(&self) -> usize {
        self.cell.get_snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell.get_snapshot().is_empty()
    }

    /// Replaces the whole selection.
    pub fn set(&self, ids: BTreeSet<RowId>) -> bool {
        self.cell.set(ids)
    }

    /// Checks or unchecks one row.
    pub fn set_selected(&self, id: RowId, selected: bool) -> bool {
        self.cell.modify(|ids| {
            if selected {
                ids.insert(id);
            } else {
                ids.remove(&id);
            }
        })
    }

    /// Flips one row. Returns whether the row is now selected.
    pub fn toggle(&self, id: RowId) -> bool {
        let selected = !self.is_selected(&id);
        self.set_selected(id, selected);
        selected
    }

    /// Adds every id, e.g. the rows of the current page.
    pub fn select_all<I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = RowId>,
    {
        self.cell.modify(|set| set.extend(ids))
    }

    /// Removes every id.
    pub fn deselect_all<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a RowId>,
    {
        self.cell.modify(|set| {
            for id in ids {
                set.remove(id);
            }
        })
    }

    /// Whether every id is selected. False for no ids.
    pub fn contains_all<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a RowId>,
    {
        let snapshot = self.cell.get_snapshot();
        let mut any = false;
        for id in ids {
            if !snapshot.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn clear(&self) -> bool {
        self.cell.set(BTreeSet::new())
    }

    /// Drops ids for which `keep` is false, e.g. rows that no longer exist.
    pub fn retain<F>(&self, keep: F) -> bool
    where
        F: Fn(&RowId) -> bool,
    {
        let changed = self.cell.modify(|set| set.retain(|id| keep(id)));
        if changed {
            debug!("Pruned checkbox selection to {} rows", self.len());
        }
        changed
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&BTreeSet<RowId>) + 'static,
    {
        self.cell.subscribe(listener)
    }

    pub fn reader(&self) -> StoreReader<BTreeSet<RowId>> {
        self.cell.reader()
    }
}
