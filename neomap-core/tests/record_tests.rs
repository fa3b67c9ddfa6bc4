use std::collections::BTreeSet;

use neomap_core::traits::{FromRecord, FromValue};
use neomap_core::{collect_records, ErrorKind, NeomapError, Node, Record, TypeHint, Value, RECORD_WIDE};

// --- Record basics ---

#[test]
fn test_record_keeps_column_order() {
    let record: Record = [("b", Value::Integer(1)), ("a", Value::Integer(2))].into_iter().collect();
    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(record.len(), 2);
}

#[test]
fn test_record_push_replaces() {
    let mut record = Record::single("a", 1_i64);
    record.push("a", 2_i64);
    assert_eq!(record.len(), 1);
    assert_eq!(record.get("a"), Some(&Value::Integer(2)));
    assert!(!record.contains_key("b"));
}

// --- Single-value targets ---

#[test]
fn test_scalar_reads_only_column() {
    let record = Record::single("p.name", Value::Integer(5));
    assert_eq!(i64::from_record(&record, None).unwrap(), 5);
}

#[test]
fn test_scalar_mismatch_names_column() {
    let record = Record::single("p.name", Value::Integer(5));
    let err = String::from_record(&record, None).unwrap_err();
    match &err {
        NeomapError::TypeMismatch { field, expected, got, .. } => {
            assert_eq!(field, "p.name");
            assert_eq!(expected, "String");
            assert_eq!(got, "Integer");
        }
        other => panic!("expected TypeMismatch, got: {other}"),
    }
}

#[test]
fn test_empty_record_is_absence() {
    let record = Record::new();
    let err = i64::from_record(&record, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FieldNotFound);
    assert_eq!(err.field(), Some(RECORD_WIDE));

    assert_eq!(Option::<i64>::from_record(&record, None).unwrap(), None);
    assert!(Vec::<i64>::from_record(&record, None).unwrap().is_empty());
}

#[test]
fn test_wide_record_is_malformed_for_scalar() {
    let record: Record = [("a", 1_i64), ("b", 2_i64)].into_iter().collect();
    let err = i64::from_record(&record, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[test]
fn test_scalar_hint_is_attached() {
    let record = Record::single("n", Value::from("x"));
    let hint = TypeHint::new("Count");
    let err = i64::from_record(&record, Some(&hint)).unwrap_err();
    assert_eq!(err.type_hint().map(TypeHint::name), Some("Count"));
}

#[test]
fn test_list_record() {
    let record = Record::single("xs", Value::List(vec![Value::Integer(1), Value::Integer(2)]));
    assert_eq!(Vec::<i64>::from_record(&record, None).unwrap(), vec![1, 2]);
}

// --- Positional targets ---

#[test]
fn test_unit_ignores_record() {
    let record: Record = [("a", 1_i64), ("b", 2_i64)].into_iter().collect();
    <()>::from_record(&record, None).unwrap();
    <()>::from_record(&Record::new(), None).unwrap();
}

#[test]
fn test_tuple_reads_columns_by_position() {
    let record: Record = [("name", Value::from("Ann")), ("age", Value::Integer(30))].into_iter().collect();
    let (name, age) = <(String, i64)>::from_record(&record, None).unwrap();
    assert_eq!(name, "Ann");
    assert_eq!(age, 30);
}

#[test]
fn test_tuple_failure_names_column() {
    let record: Record = [("name", Value::from("Ann")), ("age", Value::from("old"))].into_iter().collect();
    let err = <(String, i64)>::from_record(&record, None).unwrap_err();
    assert_eq!(err.field(), Some("age"));
}

#[test]
fn test_tuple_missing_column() {
    let record = Record::single("name", Value::from("Ann"));
    let err = <(String, i64)>::from_record(&record, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FieldNotFound);
    assert_eq!(err.field(), Some("column 1"));

    let (name, age) = <(String, Option<i64>)>::from_record(&record, None).unwrap();
    assert_eq!(name, "Ann");
    assert_eq!(age, None);
}

#[test]
fn test_tuple_extra_column_is_malformed() {
    let record: Record = [("a", 1_i64), ("b", 2_i64), ("c", 3_i64)].into_iter().collect();
    let err = <(i64, i64)>::from_record(&record, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

// --- Object columns ---

#[test]
fn test_for_product_unwraps_single_object_column() {
    let node = Node::new(3, vec![], [("name".to_string(), Value::from("Ann"))].into_iter().collect());
    let record = Record::single("u", node);

    let flat = record.for_product(&["name", "id"]);
    assert_eq!(flat.get("name"), Some(&Value::from("Ann")));
    assert_eq!(flat.get("id"), Some(&Value::Integer(3)));

    // A column that is itself one of the fields stays as is.
    let kept = record.for_product(&["u"]);
    assert!(kept.contains_key("u"));
}

#[test]
fn test_for_product_keeps_stored_id() {
    let node = Node::new(3, vec![], [("id".to_string(), Value::from("u-1"))].into_iter().collect());
    let record = Record::single("u", node);
    let flat = record.for_product(&["id"]);
    assert_eq!(flat.get("id"), Some(&Value::from("u-1")));
}

#[test]
fn test_for_product_ignores_scalar_column() {
    let record = Record::single("n", 1_i64);
    let same = record.for_product(&["name"]);
    assert_eq!(&*same, &record);
}

// --- Collecting ---

#[test]
fn test_collect_records_into_set() {
    let rows = vec![
        Record::single("n", 2_i64),
        Record::single("n", 1_i64),
        Record::single("n", 2_i64),
    ];
    let ns: BTreeSet<i64> = collect_records::<i64, _, _>(&rows).unwrap();
    assert_eq!(ns.into_iter().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_collect_records_stops_at_first_failure() {
    let rows = vec![
        Record::single("n", 1_i64),
        Record::single("m", "x"),
        Record::single("k", "y"),
    ];
    let err = collect_records::<i64, Vec<_>, _>(&rows).unwrap_err();
    assert_eq!(err.field(), Some("m"));
}

// --- Error context ---

#[test]
fn test_error_display_with_hint() {
    let err = i64::from_value("age", Some(Value::from("forty")))
        .unwrap_err()
        .with_hint(&TypeHint::new("User"));
    assert_eq!(
        err.to_string(),
        "type mismatch on 'age' (User): expected Integer, got String (\"forty\")"
    );
}

#[test]
fn test_innermost_hint_wins() {
    let err = NeomapError::field_not_found("name")
        .with_hint(&TypeHint::new("Inner"))
        .with_hint(&TypeHint::new("Outer"));
    assert_eq!(err.type_hint().map(TypeHint::name), Some("Inner"));
}

#[test]
fn test_within_prefixes_field() {
    let err = NeomapError::field_not_found("name").within("friends[2]");
    assert_eq!(err.field(), Some("friends[2].name"));

    let err = NeomapError::field_not_found(RECORD_WIDE).within("p");
    assert_eq!(err.field(), Some("p"));

    let err = NeomapError::malformed("a", "bad").within("a");
    assert_eq!(err.field(), Some("a.a"));
}

#[test]
fn test_type_hint_of() {
    let hint = TypeHint::of::<Vec<i64>>();
    assert!(hint.name().contains("Vec"));
    assert_eq!(TypeHint::from("Row".to_string()).to_string(), "Row");
}
