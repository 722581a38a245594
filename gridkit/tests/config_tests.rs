mod common;

use common::{init_tracing, tasks, Recorder};
use std::rc::Rc;
use gridkit::{
    ConfigError, FieldType, FilterDescriptor, Grid, GridConfig, Operator, RowId, SortEntry,
    Validator,
};
use pretty_assertions::assert_eq;

const CONFIG: &str = r#"{
    "pageSize": 5,
    "initialSort": [{"field": "hours", "order": "desc"}],
    "initialFilters": {
        "status": ["Pending"],
        "hours": {"operator": "greaterOrEqual", "value": 4}
    },
    "columns": [
        {"field": "id", "type": "number"},
        {"field": "title", "label": "Title", "editable": true},
        {"field": "hours", "type": "number", "editable": true},
        {"field": "status", "type": "list", "options": ["Pending", {"value": "Done", "label": "Finished"}]},
        {"field": "notes", "filterType": false, "sortable": false}
    ]
}"#;

#[test]
fn defaults() {
    let config = GridConfig::default();
    assert_eq!(config.page_size, 10);
    assert_eq!(config.page_size_options, vec![10, 25, 50, 100]);
    assert_eq!(GridConfig::from_json("{}").unwrap(), config);
    assert!(config.validate().is_ok());
}

#[test]
fn parses_columns_and_initial_query() {
    let config = GridConfig::from_json(CONFIG).unwrap();
    assert!(config.validate().is_ok());

    let columns = config.column_set().unwrap();
    assert_eq!(columns.fields().collect::<Vec<_>>(), vec!["id", "title", "hours", "status", "notes"]);
    assert_eq!(columns.require("title").unwrap().label, "Title");
    assert_eq!(columns.require("status").unwrap().field_type, FieldType::List);
    assert!(!columns.require("notes").unwrap().is_filterable());

    let query = config.query_state().unwrap();
    assert_eq!(query.sort.entries(), &[SortEntry::desc("hours")]);
    assert_eq!(
        query.filters.get("hours"),
        Some(&FilterDescriptor::condition(Operator::GreaterOrEqual, 4))
    );
    assert_eq!(query.page.page_size.get(), 5);
}

#[test]
fn grid_from_config_applies_initial_query() {
    init_tracing();
    let config = GridConfig::from_json(CONFIG).unwrap();
    let mut grid = Grid::from_config(&config, |row| RowId::from_field(row, "id")).unwrap();
    grid.set_rows(tasks(16)).unwrap();

    // Pending with hours >= 4, by hours descending; ties keep id order.
    let visible: Vec<_> = grid.visible().ids.into_iter().cloned().collect();
    assert_eq!(
        visible,
        vec![RowId::Int(8), RowId::Int(16), RowId::Int(7), RowId::Int(14), RowId::Int(5)]
    );
    assert_eq!(grid.range_label(), "1–5 of 7");
    assert_eq!(grid.cell_text(&RowId::Int(3), "status").unwrap(), "Finished");
}

#[test]
fn empty_initial_filters_are_not_active() {
    init_tracing();
    let config = GridConfig::from_json(
        r#"{"columns": [{"field": "id", "type": "number"}, {"field": "title"}],
            "initialFilters": {"title": {"operator": "contains", "value": ""}}}"#,
    )
    .unwrap();
    assert!(config.initial_filters.is_empty());

    let recorder = Rc::new(Recorder::default());
    let mut grid = Grid::from_config(&config, |row| RowId::from_field(row, "id"))
        .unwrap()
        .with_handler(recorder.clone());
    grid.set_rows(tasks(3)).unwrap();
    recorder.take();

    assert!(!grid.set_filter("title", None).unwrap());
    assert!(recorder.take().is_empty());
    assert_eq!(grid.filtered_len(), 3);
}

#[test]
fn columns_can_be_enriched_before_building() {
    let config = GridConfig::from_json(CONFIG).unwrap();
    let defs = config
        .column_defs()
        .into_iter()
        .map(|column| match column.field.as_str() {
            "title" => column.with_validator(Validator::required("Title is required")),
            _ => column,
        })
        .collect();
    let columns = gridkit::ColumnSet::new(defs).unwrap();
    let grid = Grid::new(columns, |row| RowId::from_field(row, "id"))
        .with_query(config.query_state().unwrap())
        .unwrap();
    assert_eq!(grid.columns().require("title").unwrap().validators.len(), 1);
    assert_eq!(grid.page_size(), 5);
}

#[test]
fn invalid_configs_are_rejected() {
    let zero = GridConfig::from_json(r#"{"pageSize": 0}"#).unwrap();
    assert!(matches!(zero.validate(), Err(ConfigError::InvalidPageSize(0))));

    let zero_option = GridConfig::from_json(r#"{"pageSizeOptions": [10, 0]}"#).unwrap();
    assert!(matches!(zero_option.validate(), Err(ConfigError::InvalidPageSize(0))));

    let duplicate = GridConfig::from_json(r#"{"columns": [{"field": "a"}, {"field": "a"}]}"#).unwrap();
    assert!(matches!(duplicate.validate(), Err(ConfigError::DuplicateField(f)) if f == "a"));

    let unknown_sort = GridConfig::from_json(
        r#"{"columns": [{"field": "a"}], "initialSort": [{"field": "b"}]}"#,
    )
    .unwrap();
    assert!(matches!(unknown_sort.validate(), Err(ConfigError::UnknownField(f)) if f == "b"));

    let disabled_filter = GridConfig::from_json(
        r#"{"columns": [{"field": "a", "filterType": false}], "initialFilters": {"a": {"value": "x"}}}"#,
    )
    .unwrap();
    assert!(matches!(disabled_filter.validate(), Err(ConfigError::FilterDisabled(_))));

    assert!(matches!(
        GridConfig::from_json(r#"{"initialSort": [{"field": "a"}, {"field": "a"}]}"#),
        Err(ConfigError::Serialization(_))
    ));
    assert!(matches!(GridConfig::from_json("not json"), Err(ConfigError::Serialization(_))));
}

#[test]
fn config_round_trips_through_json() {
    let config = GridConfig::from_json(CONFIG).unwrap();
    let again = GridConfig::from_json(&config.to_json().unwrap()).unwrap();
    assert_eq!(again, config);
}
