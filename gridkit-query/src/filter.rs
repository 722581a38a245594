//! Filter predicate evaluation.
//!
//! A row is visible only if it satisfies every active filter (logical AND
//! across fields). A filter whose value is empty, and which has no upper
//! bound, behaves exactly like no filter at all. Null cells never satisfy a
//! condition except [`Operator::Blank`].

use gridkit_model::{ColumnSet, ConfigError, ConfigResult};
use gridkit_types::value::{cell, is_blank, to_key, to_text};
use gridkit_types::{FieldType, Row, TypedValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// Comparison operator of a condition filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    // Text
    Contains,
    NotContains,
    StartsWith,
    EndsWith,

    // Shared by text and ordinal types
    Equals,
    NotEqual,

    // Ordinal (number, date, datetime)
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    InRange,

    // Any type; no value needed
    Blank,
    NotBlank,
}

impl Operator {
    /// Operator used when a condition names none.
    pub fn default_for(field_type: FieldType) -> Self {
        if field_type.is_ordinal() {
            Self::Equals
        } else {
            Self::Contains
        }
    }

    /// Whether the operator is meaningful for a column of `field_type`.
    pub fn applies_to(&self, field_type: FieldType) -> bool {
        match self {
            Self::Equals | Self::NotEqual | Self::Blank | Self::NotBlank => true,
            Self::Contains | Self::NotContains | Self::StartsWith | Self::EndsWith => {
                !field_type.is_ordinal()
            }
            Self::GreaterThan
            | Self::LessThan
            | Self::GreaterOrEqual
            | Self::LessOrEqual
            | Self::InRange => field_type.is_ordinal(),
        }
    }

    /// Blank checks carry no value.
    pub fn needs_value(&self) -> bool {
        !matches!(self, Self::Blank | Self::NotBlank)
    }
}

/// An operator with its operand(s).
///
/// `value_to` is only read by [`Operator::InRange`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value_to: Value,
}

/// The filter applied to one field.
///
/// List columns filter by a bare array of selected keys; every other type
/// uses a [`Condition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterDescriptor {
    Selection(Vec<Value>),
    Condition(Condition),
}

impl FilterDescriptor {
    /// A condition with an explicit operator.
    pub fn condition(operator: Operator, value: impl Into<Value>) -> Self {
        Self::Condition(Condition {
            operator: Some(operator),
            value: value.into(),
            value_to: Value::Null,
        })
    }

    /// Case-insensitive substring match, the default for text.
    pub fn contains(value: impl Into<String>) -> Self {
        Self::condition(Operator::Contains, value.into())
    }

    /// Inclusive range. Either bound may be `Value::Null` for a one-sided range.
    pub fn range(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Self::Condition(Condition {
            operator: Some(Operator::InRange),
            value: from.into(),
            value_to: to.into(),
        })
    }

    pub fn blank() -> Self {
        Self::condition(Operator::Blank, Value::Null)
    }

    pub fn not_blank() -> Self {
        Self::condition(Operator::NotBlank, Value::Null)
    }

    /// Membership in a set of option keys.
    pub fn selection<I, V>(keys: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Selection(keys.into_iter().map(Into::into).collect())
    }

    /// False when the descriptor is equivalent to no filter.
    pub fn is_active(&self) -> bool {
        match self {
            Self::Selection(keys) => keys.iter().any(|k| to_key(k).is_some()),
            Self::Condition(c) => match c.operator {
                Some(op) if !op.needs_value() => true,
                _ => !is_blank(&c.value) || !is_blank(&c.value_to),
            },
        }
    }
}

/// Active filters keyed by field.
///
/// Inactive descriptors are never stored, so "absent" and "empty" are the
/// same state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, FilterDescriptor>",
    into = "BTreeMap<String, FilterDescriptor>"
)]
pub struct FilterState(BTreeMap<String, FilterDescriptor>);

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears the filter of `field`. Returns true if the state changed.
    pub fn set(&mut self, field: impl Into<String>, descriptor: Option<FilterDescriptor>) -> bool {
        let field = field.into();
        match descriptor.filter(FilterDescriptor::is_active) {
            Some(descriptor) => self.0.insert(field, descriptor.clone()).as_ref() != Some(&descriptor),
            None => self.0.remove(&field).is_some(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FilterDescriptor> {
        self.0.get(field)
    }

    /// Clears every filter. Returns true if any was set.
    pub fn clear(&mut self) -> bool {
        let changed = !self.is_empty();
        self.0.clear();
        changed
    }

    /// Active filters in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterDescriptor)> {
        self.0.iter().map(|(f, d)| (f.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks every filter against the column set.
    pub fn validate(&self, columns: &ColumnSet) -> ConfigResult<()> {
        for (field, _) in self.iter() {
            let column = columns.require(field)?;
            if !column.is_filterable() {
                return Err(ConfigError::FilterDisabled(field.to_string()));
            }
        }
        Ok(())
    }
}

impl From<BTreeMap<String, FilterDescriptor>> for FilterState {
    fn from(mut filters: BTreeMap<String, FilterDescriptor>) -> Self {
        filters.retain(|_, d| d.is_active());
        Self(filters)
    }
}

impl From<FilterState> for BTreeMap<String, FilterDescriptor> {
    fn from(state: FilterState) -> Self {
        state.0
    }
}

/// Decides whether `row` satisfies `descriptor` on `field`.
pub fn matches(row: &Row, field: &str, descriptor: &FilterDescriptor, field_type: FieldType) -> bool {
    let value = cell(row, field);
    match descriptor {
        FilterDescriptor::Selection(keys) => {
            let selected: HashSet<String> = keys.iter().filter_map(to_key).collect();
            matches_selection(value, &selected)
        }
        FilterDescriptor::Condition(condition) => matches_condition(value, condition, field_type),
    }
}

fn matches_selection(value: &Value, selected: &HashSet<String>) -> bool {
    if selected.is_empty() {
        return true;
    }
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(to_key)
            .any(|key| selected.contains(&key)),
        other => to_key(other).is_some_and(|key| selected.contains(&key)),
    }
}

fn matches_condition(value: &Value, condition: &Condition, field_type: FieldType) -> bool {
    let operator = condition
        .operator
        .unwrap_or_else(|| Operator::default_for(field_type));
    if !operator.applies_to(field_type) {
        return true;
    }

    match operator {
        Operator::Blank => return TypedValue::coerce(value, field_type).is_none(),
        Operator::NotBlank => return TypedValue::coerce(value, field_type).is_some(),
        _ => {}
    }

    if field_type.is_ordinal() {
        matches_ordinal(value, condition, operator, field_type)
    } else {
        matches_text(value, &condition.value, operator)
    }
}

fn matches_text(value: &Value, needle: &Value, operator: Operator) -> bool {
    if is_blank(needle) {
        return true;
    }
    let Some(needle) = to_text(needle) else {
        return true;
    };
    if is_blank(value) {
        return false;
    }
    let Some(haystack) = to_text(value) else {
        return false;
    };
    let needle = needle.to_lowercase();
    let haystack = haystack.to_lowercase();

    match operator {
        Operator::Contains => haystack.contains(&needle),
        Operator::NotContains => !haystack.contains(&needle),
        Operator::StartsWith => haystack.starts_with(&needle),
        Operator::EndsWith => haystack.ends_with(&needle),
        Operator::Equals => haystack == needle,
        Operator::NotEqual => haystack != needle,
        _ => true,
    }
}

fn matches_ordinal(value: &Value, condition: &Condition, operator: Operator, field_type: FieldType) -> bool {
    let lower = TypedValue::coerce(&condition.value, field_type);
    let upper = match operator {
        Operator::InRange => TypedValue::coerce(&condition.value_to, field_type),
        _ => None,
    };
    if lower.is_none() && upper.is_none() {
        return true;
    }

    let Some(cell) = TypedValue::coerce(value, field_type) else {
        return false;
    };
    let against = |bound: &Option<TypedValue<'_>>| bound.as_ref().and_then(|b| cell.compare(b));

    if operator == Operator::InRange {
        // A missing bound never filters anything out on its side.
        let above_lower = lower.is_none() || against(&lower).is_some_and(Ordering::is_ge);
        let below_upper = upper.is_none() || against(&upper).is_some_and(Ordering::is_le);
        return above_lower && below_upper;
    }

    let Some(ordering) = against(&lower) else {
        return false;
    };
    match operator {
        Operator::Equals => ordering.is_eq(),
        Operator::NotEqual => ordering.is_ne(),
        Operator::GreaterThan => ordering.is_gt(),
        Operator::LessThan => ordering.is_lt(),
        Operator::GreaterOrEqual => ordering.is_ge(),
        Operator::LessOrEqual => ordering.is_le(),
        _ => true,
    }
}

/// A filter resolved against its column, ready to evaluate.
#[derive(Debug, Clone)]
pub struct ActiveFilter<'a> {
    pub field: &'a str,
    pub descriptor: &'a FilterDescriptor,
    pub filter_type: FieldType,
}

/// Resolves the filter state against the columns.
///
/// Unknown fields and filters on columns with filtering disabled are
/// configuration errors. A condition whose operator does not apply to the
/// column's filter type is skipped with a warning.
pub fn compile<'a>(filters: &'a FilterState, columns: &ColumnSet) -> ConfigResult<Vec<ActiveFilter<'a>>> {
    let mut compiled = Vec::new();
    for (field, descriptor) in filters.iter() {
        let column = columns.require(field)?;
        let Some(filter_type) = column.filter_type else {
            return Err(ConfigError::FilterDisabled(field.to_string()));
        };
        if let FilterDescriptor::Condition(Condition { operator: Some(op), .. }) = descriptor {
            if !op.applies_to(filter_type) {
                warn!("Ignoring {:?} filter on {} column {}", op, filter_type, field);
                continue;
            }
        }
        compiled.push(ActiveFilter {
            field,
            descriptor,
            filter_type,
        });
    }
    Ok(compiled)
}

/// Whether `row` satisfies every compiled filter.
pub fn row_matches(row: &Row, filters: &[ActiveFilter<'_>]) -> bool {
    filters
        .iter()
        .all(|f| matches(row, f.field, f.descriptor, f.filter_type))
}

/// Indices of the rows passing every filter, in their original order.
pub fn filter_indices(rows: &[Row], filters: &FilterState, columns: &ColumnSet) -> ConfigResult<Vec<usize>> {
    let compiled = compile(filters, columns)?;
    Ok(rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, &compiled))
        .map(|(i, _)| i)
        .collect())
}
