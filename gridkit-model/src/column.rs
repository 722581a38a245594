use crate::options::{option_label, resolve_options, OptionDescriptor, ResolvedOption};
use crate::validator::Validator;
use gridkit_types::value::{cell, to_text};
use gridkit_types::{FieldType, Row};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Display hook: renders a cell value (with its row) as text.
pub type Formatter = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

type EditablePredicate = Arc<dyn Fn(&Row) -> bool + Send + Sync>;

/// Whether a column's cells may be edited.
///
/// Conditional editability also gates validation: a column that is not
/// editable for a row is never validated for that row.
#[derive(Clone)]
pub enum Editable {
    Static(bool),
    Conditional(EditablePredicate),
}

impl Editable {
    /// Editable when `predicate` holds for the row.
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&Row) -> bool + Send + Sync + 'static,
    {
        Self::Conditional(Arc::new(predicate))
    }

    /// Resolves editability for one row.
    pub fn resolve(&self, row: &Row) -> bool {
        match self {
            Self::Static(editable) => *editable,
            Self::Conditional(predicate) => predicate(row),
        }
    }
}

impl Default for Editable {
    fn default() -> Self {
        Self::Static(false)
    }
}

impl From<bool> for Editable {
    fn from(editable: bool) -> Self {
        Self::Static(editable)
    }
}

impl fmt::Debug for Editable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(editable) => f.debug_tuple("Static").field(editable).finish(),
            Self::Conditional(_) => f.write_str("Conditional(..)"),
        }
    }
}

/// One column of a grid.
///
/// `field` is the stable key into row records, not the display label.
#[derive(Clone)]
pub struct ColumnDef {
    pub field: String,
    pub label: String,
    pub field_type: FieldType,
    /// Filter type; `None` disables filtering on this column.
    pub filter_type: Option<FieldType>,
    pub sortable: bool,
    pub editable: Editable,
    /// Evaluated in order; the first failure is the column's only error.
    pub validators: Vec<Validator>,
    pub options: Vec<ResolvedOption>,
    formatter: Option<Formatter>,
}

impl ColumnDef {
    /// Creates a sortable, non-editable column filtered by its own type.
    pub fn new(field: impl Into<String>, field_type: FieldType) -> Self {
        let field = field.into();
        Self {
            label: field.clone(),
            field,
            field_type,
            filter_type: Some(field_type),
            sortable: true,
            editable: Editable::default(),
            validators: Vec::new(),
            options: Vec::new(),
            formatter: None,
        }
    }

    /// Shorthand for a text column.
    pub fn text(field: impl Into<String>) -> Self {
        Self::new(field, FieldType::Text)
    }

    /// Shorthand for a number column.
    pub fn number(field: impl Into<String>) -> Self {
        Self::new(field, FieldType::Number)
    }

    /// Shorthand for a date column.
    pub fn date(field: impl Into<String>) -> Self {
        Self::new(field, FieldType::Date)
    }

    /// Shorthand for a datetime column.
    pub fn datetime(field: impl Into<String>) -> Self {
        Self::new(field, FieldType::DateTime)
    }

    /// Shorthand for a list column with fixed options.
    pub fn list(field: impl Into<String>, options: &[OptionDescriptor]) -> Self {
        Self::new(field, FieldType::List).with_options(options)
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Overrides the filter type; `None` disables filtering.
    #[must_use]
    pub fn with_filter_type(mut self, filter_type: Option<FieldType>) -> Self {
        self.filter_type = filter_type;
        self
    }

    #[must_use]
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    #[must_use]
    pub fn with_editable(mut self, editable: impl Into<Editable>) -> Self {
        self.editable = editable.into();
        self
    }

    /// Editable only for rows matching `predicate`.
    #[must_use]
    pub fn editable_when<F>(self, predicate: F) -> Self
    where
        F: Fn(&Row) -> bool + Send + Sync + 'static,
    {
        self.with_editable(Editable::when(predicate))
    }

    /// Appends a validator to the chain.
    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: &[OptionDescriptor]) -> Self {
        self.options = resolve_options(options);
        self
    }

    #[must_use]
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Value, &Row) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// The column's cell in `row`; missing fields read as null.
    pub fn value<'a>(&self, row: &'a Row) -> &'a Value {
        cell(row, &self.field)
    }

    pub fn is_editable(&self, row: &Row) -> bool {
        self.editable.resolve(row)
    }

    pub fn is_filterable(&self) -> bool {
        self.filter_type.is_some()
    }

    /// Text shown for this column's cell: formatter output, else the
    /// option label, else the raw text. Null renders as an empty string.
    pub fn display_value(&self, row: &Row) -> String {
        let value = self.value(row);
        if let Some(formatter) = &self.formatter {
            return formatter(value, row);
        }
        if let Some(label) = option_label(&self.options, value) {
            return label.to_string();
        }
        to_text(value).map(|t| t.into_owned()).unwrap_or_default()
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("field", &self.field)
            .field("label", &self.label)
            .field("field_type", &self.field_type)
            .field("filter_type", &self.filter_type)
            .field("sortable", &self.sortable)
            .field("editable", &self.editable)
            .field("validators", &self.validators)
            .field("options", &self.options)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

/// `filterType` as written in configuration: a type, or `false` to disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterTypeSpec {
    Type(FieldType),
    Enabled(bool),
}

/// The serializable part of a column definition.
///
/// Closures (conditional editability, validators, formatters) cannot be
/// expressed in configuration; attach them to the lifted [`ColumnDef`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<FilterTypeSpec>,
    #[serde(default)]
    pub editable: bool,
    #[serde(default = "default_sortable")]
    pub sortable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDescriptor>,
}

fn default_sortable() -> bool {
    true
}

impl From<ColumnSpec> for ColumnDef {
    fn from(spec: ColumnSpec) -> Self {
        let filter_type = match spec.filter_type {
            None | Some(FilterTypeSpec::Enabled(true)) => Some(spec.field_type),
            Some(FilterTypeSpec::Enabled(false)) => None,
            Some(FilterTypeSpec::Type(t)) => Some(t),
        };
        let mut column = ColumnDef::new(spec.field, spec.field_type)
            .with_filter_type(filter_type)
            .with_sortable(spec.sortable)
            .with_editable(spec.editable)
            .with_options(&spec.options);
        if let Some(label) = spec.label {
            column.label = label;
        }
        column
    }
}
