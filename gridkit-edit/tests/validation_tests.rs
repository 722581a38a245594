mod common;

use common::{order_columns, row};
use gridkit_edit::validation::{validate_field, validate_row};
use gridkit_edit::{Severity, ValidationError};
use gridkit_model::{ColumnDef, ColumnSet, ConfigError, Validator, Verdict};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn valid_row_has_no_errors() {
    let draft = row(json!({"id": 1, "name": "Bolts", "qty": 5, "status": "Pending"}));
    assert_eq!(validate_row(&draft, &order_columns(), Some(&draft)), vec![]);
}

#[test]
fn first_failing_validator_wins() {
    let columns = ColumnSet::new(vec![
        ColumnDef::text("code")
            .with_editable(true)
            .with_validator(Validator::new("first", |_, _| false))
            .with_validator(Validator::new("second", |_, _| false)),
    ])
    .unwrap();

    let errors = validate_row(&row(json!({"code": "x"})), &columns, None);
    assert_eq!(errors, vec![ValidationError::new("code", "first")]);
    assert_eq!(errors[0].severity, Severity::Error);
}

#[test]
fn later_validators_are_not_run_after_a_failure() {
    let columns = ColumnSet::new(vec![
        ColumnDef::text("code")
            .with_editable(true)
            .with_validator(Validator::new("first", |_, _| false))
            .with_validator(Validator::new("second", |_, _| -> bool { panic!("must not run") })),
    ])
    .unwrap();
    assert_eq!(validate_row(&row(json!({})), &columns, None).len(), 1);
}

#[test]
fn failure_string_overrides_static_message() {
    let columns = ColumnSet::new(vec![
        ColumnDef::text("code")
            .with_editable(true)
            .with_validator(Validator::new("static", |value, _| {
                if value.as_str().is_some_and(|s| s.starts_with('X')) {
                    Verdict::Pass
                } else {
                    Verdict::FailWith(format!("{value} must start with X"))
                }
            })),
    ])
    .unwrap();

    let errors = validate_row(&row(json!({"code": "abc"})), &columns, None);
    assert_eq!(errors[0].message, "\"abc\" must start with X");
}

#[test]
fn errors_accumulate_in_column_order() {
    let draft = row(json!({"name": "", "qty": 0, "status": "Pending"}));
    let errors = validate_row(&draft, &order_columns(), Some(&draft));
    assert_eq!(
        errors,
        vec![
            ValidationError::new("name", "Name is required"),
            ValidationError::new("qty", "Quantity must be positive"),
        ]
    );
}

// ── Conditional editability ──────────────────────────────────────

#[test]
fn non_editable_columns_are_not_validated() {
    let original = row(json!({"name": "Bolts", "qty": 5, "status": "Shipped"}));
    let draft = row(json!({"name": "Bolts", "qty": -3, "status": "Shipped"}));
    assert_eq!(validate_row(&draft, &order_columns(), Some(&original)), vec![]);

    let original = row(json!({"name": "Bolts", "qty": 5, "status": "Pending"}));
    let draft = row(json!({"name": "Bolts", "qty": -3, "status": "Pending"}));
    assert_eq!(
        validate_row(&draft, &order_columns(), Some(&original)),
        vec![ValidationError::new("qty", "Quantity must be positive")]
    );
}

#[test]
fn editability_follows_the_original_row() {
    // The draft flipped status to Shipped, but the row was Pending when
    // editing began, so qty is still checked.
    let original = row(json!({"name": "Bolts", "qty": 5, "status": "Pending"}));
    let draft = row(json!({"name": "Bolts", "qty": 500, "status": "Shipped"}));
    assert_eq!(
        validate_row(&draft, &order_columns(), Some(&original)),
        vec![ValidationError::new("qty", "Quantity is too large")]
    );
}

#[test]
fn new_rows_gate_on_the_draft() {
    let pending = row(json!({"name": "Nuts", "status": "Pending"}));
    assert_eq!(
        validate_row(&pending, &order_columns(), None),
        vec![ValidationError::new("qty", "Quantity is required")]
    );

    let shipped = row(json!({"name": "Nuts", "status": "Shipped"}));
    assert_eq!(validate_row(&shipped, &order_columns(), None), vec![]);
}

#[test]
fn static_non_editable_column_is_skipped() {
    let columns = ColumnSet::new(vec![
        ColumnDef::text("locked").with_validator(Validator::required("never reported")),
    ])
    .unwrap();
    assert_eq!(validate_row(&row(json!({})), &columns, None), vec![]);
}

// ── Field-scoped ─────────────────────────────────────────────────

#[test]
fn validate_field_checks_one_column() {
    let draft = row(json!({"name": "a very long name", "qty": 0, "status": "Pending"}));
    let columns = order_columns();
    assert_eq!(
        validate_field("name", &draft, &columns, Some(&draft)).unwrap(),
        vec![ValidationError::new("name", "Name is too long")]
    );
    assert_eq!(validate_field("status", &draft, &columns, Some(&draft)).unwrap(), vec![]);
    assert!(matches!(
        validate_field("ghost", &draft, &columns, None),
        Err(ConfigError::UnknownField(f)) if f == "ghost"
    ));
}

#[test]
fn cross_field_rules_see_the_draft() {
    let columns = ColumnSet::new(vec![
        ColumnDef::date("start").with_editable(true),
        ColumnDef::date("end")
            .with_editable(true)
            .with_validator(Validator::new("End must not precede start", |value, row| {
                let start = row.get("start").and_then(|v| v.as_str());
                match (start, value.as_str()) {
                    (Some(start), Some(end)) => end >= start,
                    _ => true,
                }
            })),
    ])
    .unwrap();

    let draft = row(json!({"start": "2024-05-10", "end": "2024-05-01"}));
    assert_eq!(
        validate_row(&draft, &columns, None),
        vec![ValidationError::new("end", "End must not precede start")]
    );
}
