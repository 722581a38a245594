use gridkit_types::{Row, RowId};
use serde_json::json;
use std::collections::HashSet;

// ── RowId conversions ────────────────────────────────────────────

#[test]
fn int_and_str_ids_are_distinct() {
    assert_ne!(RowId::from(1), RowId::from("1"));
}

#[test]
fn from_str_prefers_integers() {
    assert_eq!("42".parse::<RowId>().unwrap(), RowId::Int(42));
    assert_eq!("row-42".parse::<RowId>().unwrap(), RowId::Str("row-42".into()));
}

#[test]
fn display_matches_inner_value() {
    assert_eq!(RowId::Int(7).to_string(), "7");
    assert_eq!(RowId::from("abc").to_string(), "abc");
}

#[test]
fn serde_is_untagged() {
    assert_eq!(serde_json::to_string(&RowId::Int(3)).unwrap(), "3");
    assert_eq!(serde_json::to_string(&RowId::from("x")).unwrap(), r#""x""#);

    let parsed: RowId = serde_json::from_str("12").unwrap();
    assert_eq!(parsed, RowId::Int(12));
    let parsed: RowId = serde_json::from_str(r#""a-1""#).unwrap();
    assert_eq!(parsed, RowId::from("a-1"));
}

#[test]
fn into_json_value() {
    assert_eq!(serde_json::Value::from(RowId::Int(5)), json!(5));
    assert_eq!(serde_json::Value::from(RowId::from("k")), json!("k"));
}

// ── Extraction from rows ─────────────────────────────────────────

#[test]
fn from_value_accepts_strings_and_integers() {
    assert_eq!(RowId::from_value(&json!(9)).unwrap(), RowId::Int(9));
    assert_eq!(RowId::from_value(&json!("r9")).unwrap(), RowId::from("r9"));
}

#[test]
fn from_value_rejects_other_shapes() {
    assert!(RowId::from_value(&json!(null)).is_err());
    assert!(RowId::from_value(&json!("")).is_err());
    assert!(RowId::from_value(&json!(1.5)).is_err());
    assert!(RowId::from_value(&json!({"id": 1})).is_err());
}

#[test]
fn from_field_reports_missing_field() {
    let row: Row = serde_json::from_value(json!({"name": "a"})).unwrap();
    let err = RowId::from_field(&row, "id").unwrap_err();
    assert!(err.to_string().contains("missing field `id`"));
}

// ── Temporary ids ────────────────────────────────────────────────

#[test]
fn temporary_ids_are_unique_and_flagged() {
    let a = RowId::temporary();
    let b = RowId::temporary();
    assert_ne!(a, b);
    assert!(a.is_temporary());
    assert!(!RowId::from("existing").is_temporary());
    assert!(!RowId::Int(1).is_temporary());
}

#[test]
fn hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(RowId::Int(1));
    set.insert(RowId::Int(1));
    set.insert(RowId::from("1"));
    assert_eq!(set.len(), 2);
}
