use crate::column::ColumnDef;
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;

/// The ordered columns of one grid, unique by field.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    columns: Vec<ColumnDef>,
    by_field: HashMap<String, usize>,
}

impl ColumnSet {
    /// Builds a column set, rejecting empty and duplicate fields.
    pub fn new(columns: Vec<ColumnDef>) -> ConfigResult<Self> {
        let mut by_field = HashMap::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            if column.field.is_empty() {
                return Err(ConfigError::EmptyField);
            }
            if by_field.insert(column.field.clone(), index).is_some() {
                return Err(ConfigError::DuplicateField(column.field.clone()));
            }
        }
        Ok(Self { columns, by_field })
    }

    pub fn get(&self, field: &str) -> Option<&ColumnDef> {
        self.by_field.get(field).map(|&i| &self.columns[i])
    }

    /// Like [`ColumnSet::get`], but an unknown field is a configuration error.
    pub fn require(&self, field: &str) -> ConfigResult<&ColumnDef> {
        self.get(field)
            .ok_or_else(|| ConfigError::UnknownField(field.to_string()))
    }

    pub fn contains(&self, field: &str) -> bool {
        self.by_field.contains_key(field)
    }

    /// Columns in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.field.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a ColumnDef;
    type IntoIter = std::slice::Iter<'a, ColumnDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
