//! Multi-key row ordering.
//!
//! Entries of a [`SortState`] are compared in priority order; the first
//! non-equal comparison decides. Rows that tie on every key keep their
//! original relative order because sorting is stable. Null and uncoercible
//! cells always sort last, whatever the direction.

use gridkit_model::{option_label, ColumnDef, ColumnSet, ConfigError, ConfigResult};
use gridkit_types::value::cell;
use gridkit_types::{FieldType, Row, TypedValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Applies the direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortEntry {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortEntry {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// Ordered sort keys; the first entry is the primary key.
/// A field appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SortEntry>", into = "Vec<SortEntry>")]
pub struct SortState(Vec<SortEntry>);

impl SortState {
    /// Builds a sort state, rejecting repeated fields.
    pub fn new(entries: Vec<SortEntry>) -> ConfigResult<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.field.as_str()) {
                return Err(ConfigError::DuplicateSortField(entry.field.clone()));
            }
        }
        Ok(Self(entries))
    }

    /// Sort by a single field.
    pub fn single(entry: SortEntry) -> Self {
        Self(vec![entry])
    }

    pub fn entries(&self) -> &[SortEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn order_of(&self, field: &str) -> Option<SortOrder> {
        self.0.iter().find(|e| e.field == field).map(|e| e.order)
    }

    /// Zero-based priority of `field`, if sorted.
    pub fn priority_of(&self, field: &str) -> Option<usize> {
        self.0.iter().position(|e| e.field == field)
    }

    /// Removes `field`. Returns true if it was sorted.
    pub fn remove(&mut self, field: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|e| e.field != field);
        self.0.len() != before
    }

    /// Cycles `field` through ascending, descending and unsorted.
    ///
    /// Without `multi`, the field becomes the only sort key. With `multi`,
    /// other keys are kept and a newly sorted field is appended at the
    /// lowest priority.
    pub fn toggle(&mut self, field: &str, multi: bool) {
        let next = match self.order_of(field) {
            None => Some(SortOrder::Asc),
            Some(SortOrder::Asc) => Some(SortOrder::Desc),
            Some(SortOrder::Desc) => None,
        };

        if !multi {
            self.0.retain(|e| e.field == field);
        }
        match next {
            Some(order) => match self.0.iter_mut().find(|e| e.field == field) {
                Some(entry) => entry.order = order,
                None => self.0.push(SortEntry {
                    field: field.to_string(),
                    order,
                }),
            },
            None => {
                self.remove(field);
            }
        }
    }

    /// Checks every key against the column set.
    pub fn validate(&self, columns: &ColumnSet) -> ConfigResult<()> {
        for entry in &self.0 {
            if !columns.require(&entry.field)?.sortable {
                return Err(ConfigError::NotSortable(entry.field.clone()));
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<SortEntry>> for SortState {
    type Error = ConfigError;

    fn try_from(entries: Vec<SortEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<SortState> for Vec<SortEntry> {
    fn from(state: SortState) -> Self {
        state.0
    }
}

/// Value a cell is ordered by. List cells order by option label when the
/// column declares options.
fn sort_value<'a>(column: Option<&'a ColumnDef>, value: &'a Value) -> Option<TypedValue<'a>> {
    let field_type = column.map_or(FieldType::Text, |c| c.field_type);
    if let Some(column) = column.filter(|c| c.field_type == FieldType::List) {
        if let Some(label) = option_label(&column.options, value) {
            return Some(TypedValue::Text(Cow::Borrowed(label)));
        }
    }
    TypedValue::coerce(value, field_type)
}

/// Compares two cells of one column. Nulls sort last in both directions.
fn compare_cells(column: Option<&ColumnDef>, a: &Value, b: &Value, order: SortOrder) -> Ordering {
    match (sort_value(column, a), sort_value(column, b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => order.apply(a.compare(&b).unwrap_or(Ordering::Equal)),
    }
}

/// Total order over rows for a sort state.
///
/// Fields without a column compare as text.
pub fn compare_rows(a: &Row, b: &Row, sort: &SortState, columns: &ColumnSet) -> Ordering {
    for entry in sort.entries() {
        let column = columns.get(&entry.field);
        let ordering = compare_cells(column, cell(a, &entry.field), cell(b, &entry.field), entry.order);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Stable-sorts row indices in place.
pub fn sort_indices(rows: &[Row], indices: &mut [usize], sort: &SortState, columns: &ColumnSet) {
    if sort.is_empty() {
        return;
    }
    indices.sort_by(|&a, &b| compare_rows(&rows[a], &rows[b], sort, columns));
}
