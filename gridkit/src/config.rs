//! Grid configuration, loadable from JSON.

use gridkit_model::{ColumnDef, ColumnSet, ColumnSpec, ConfigError, ConfigResult};
use gridkit_query::{FilterState, PageState, QueryState, SortState, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Page sizes offered to the user when none are configured.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Declarative grid setup.
///
/// Columns here carry only what JSON can express. Attach validators,
/// conditional editability and formatters to the [`ColumnDef`]s returned
/// by [`GridConfig::column_defs`] before building the [`ColumnSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Sizes offered by the page size picker. Advisory only.
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    #[serde(default)]
    pub initial_sort: SortState,
    #[serde(default)]
    pub initial_filters: FilterState,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE.get()
}

fn default_page_size_options() -> Vec<usize> {
    DEFAULT_PAGE_SIZE_OPTIONS.to_vec()
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            initial_sort: SortState::default(),
            initial_filters: FilterState::default(),
            columns: Vec::new(),
        }
    }
}

impl GridConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        debug!("Loaded grid config with {} columns", config.columns.len());
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Column definitions lifted from the configured specs.
    pub fn column_defs(&self) -> Vec<ColumnDef> {
        self.columns.iter().cloned().map(ColumnDef::from).collect()
    }

    pub fn column_set(&self) -> ConfigResult<ColumnSet> {
        ColumnSet::new(self.column_defs())
    }

    /// Initial query state: configured filters and sort, first page.
    pub fn query_state(&self) -> ConfigResult<QueryState> {
        Ok(QueryState {
            filters: self.initial_filters.clone(),
            sort: self.initial_sort.clone(),
            page: PageState::new(0, self.page_size)?,
        })
    }

    /// Checks page sizes, columns and the initial query against each other.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(&bad) = self.page_size_options.iter().find(|&&size| size == 0) {
            return Err(ConfigError::InvalidPageSize(bad));
        }
        let columns = self.column_set()?;
        self.query_state()?.validate(&columns)
    }
}
