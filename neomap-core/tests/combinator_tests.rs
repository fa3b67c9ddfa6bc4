use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use neomap_core::traits::FromValue;
use neomap_core::{ErrorKind, NeomapError, Node, Relationship, Value};

fn ints(xs: &[i64]) -> Value {
    Value::List(xs.iter().map(|&x| Value::Integer(x)).collect())
}

fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
}

// --- Option ---

#[test]
fn test_option_absent_and_null() {
    assert_eq!(Option::<i64>::from_value("n", None).unwrap(), None);
    assert_eq!(Option::<i64>::from_value("n", Some(Value::Null)).unwrap(), None);
    assert_eq!(Option::<i64>::from_value("n", Some(Value::Integer(42))).unwrap(), Some(42));
}

#[test]
fn test_option_propagates_inner_failure() {
    let err = Option::<i64>::from_value("n", Some(Value::from("x"))).unwrap_err();
    match &err {
        NeomapError::TypeMismatch { field, expected, .. } => {
            assert_eq!(field, "n");
            assert_eq!(expected, "Integer");
        }
        other => panic!("expected TypeMismatch, got: {other}"),
    }
}

#[test]
fn test_nested_option_collapses_null() {
    let res = Option::<Option<String>>::from_value("s", Some(Value::Null)).unwrap();
    assert_eq!(res, None);
}

// --- Lists ---

#[test]
fn test_from_value_list() {
    let res = Vec::<i64>::from_value("xs", Some(ints(&[1, 2, 3]))).unwrap();
    assert_eq!(res, vec![1, 2, 3]);
}

#[test]
fn test_list_absent_or_null_is_empty() {
    assert!(Vec::<i64>::from_value("xs", None).unwrap().is_empty());
    assert!(Vec::<i64>::from_value("xs", Some(Value::Null)).unwrap().is_empty());
    assert!(BTreeSet::<i64>::from_value("xs", None).unwrap().is_empty());
}

#[test]
fn test_list_reports_first_failing_index() {
    let xs = Value::List(vec![
        Value::Integer(1),
        Value::from("two"),
        Value::Integer(3),
        Value::from("four"),
    ]);
    let err = Vec::<i64>::from_value("xs", Some(xs)).unwrap_err();
    match &err {
        NeomapError::TypeMismatch { field, got, .. } => {
            assert_eq!(field, "xs[1]");
            assert_eq!(got, "String");
        }
        other => panic!("expected TypeMismatch, got: {other}"),
    }
}

#[test]
fn test_list_null_element_is_not_absent() {
    let xs = Value::List(vec![Value::Integer(1), Value::Null]);
    let err = Vec::<i64>::from_value("xs", Some(xs.clone())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.field(), Some("xs[1]"));

    let res = Vec::<Option<i64>>::from_value("xs", Some(xs)).unwrap();
    assert_eq!(res, vec![Some(1), None]);
}

#[test]
fn test_list_type_mismatch() {
    let err = Vec::<i64>::from_value("xs", Some(Value::Integer(1))).unwrap_err();
    match &err {
        NeomapError::TypeMismatch { expected, got, .. } => {
            assert_eq!(expected, "List");
            assert_eq!(got, "Integer");
        }
        other => panic!("expected TypeMismatch, got: {other}"),
    }
}

#[test]
fn test_other_sequence_containers() {
    let res = VecDeque::<i64>::from_value("xs", Some(ints(&[3, 1]))).unwrap();
    assert_eq!(res, VecDeque::from(vec![3, 1]));

    let res = HashSet::<i64>::from_value("xs", Some(ints(&[1, 1, 2]))).unwrap();
    assert_eq!(res.len(), 2);

    let res = BTreeSet::<i64>::from_value("xs", Some(ints(&[3, 1, 2]))).unwrap();
    assert_eq!(res.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_nested_lists_report_both_indices() {
    let xs = Value::List(vec![ints(&[1]), Value::List(vec![Value::Integer(2), Value::Boolean(true)])]);
    let err = Vec::<Vec<i64>>::from_value("m", Some(xs)).unwrap_err();
    assert_eq!(err.field(), Some("m[1][1]"));
}

// --- Maps ---

#[test]
fn test_hashmap_from_value() {
    let val = map(&[("a", Value::Integer(1)), ("b", Value::Integer(2))]);
    let res = HashMap::<String, i64>::from_value("m", Some(val)).unwrap();
    assert_eq!(res.get("a"), Some(&1));
    assert_eq!(res.get("b"), Some(&2));
}

#[test]
fn test_map_entry_failure_names_key() {
    let val = map(&[("a", Value::Integer(1)), ("b", Value::Boolean(false))]);
    let err = BTreeMap::<String, i64>::from_value("m", Some(val)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.field(), Some("m.b"));
}

#[test]
fn test_hashmap_type_mismatch() {
    let err = HashMap::<String, i64>::from_value("m", Some(Value::Integer(42))).unwrap_err();
    match &err {
        NeomapError::TypeMismatch { expected, got, .. } => {
            assert_eq!(expected, "Map");
            assert_eq!(got, "Integer");
        }
        other => panic!("expected TypeMismatch, got: {other}"),
    }
}

#[test]
fn test_map_absent_is_empty() {
    assert!(HashMap::<String, i64>::from_value("m", None).unwrap().is_empty());
}

#[test]
fn test_map_reads_entity_properties() {
    let node = Node::new(
        1,
        vec!["Person".into()],
        [("name".to_string(), Value::from("Ann"))].into_iter().collect(),
    );
    let res = BTreeMap::<String, String>::from_value("n", Some(Value::Node(node))).unwrap();
    assert_eq!(res.get("name").map(String::as_str), Some("Ann"));
    assert_eq!(res.len(), 1);

    let rel = Relationship {
        id: 4,
        start_node_id: 1,
        end_node_id: 2,
        rel_type: "KNOWS".into(),
        properties: [("since".to_string(), Value::Integer(2020))].into_iter().collect(),
    };
    let res = HashMap::<String, i64>::from_value("r", Some(Value::Relationship(rel))).unwrap();
    assert_eq!(res.get("since"), Some(&2020));
}

#[test]
fn test_map_of_lists() {
    let val = map(&[("xs", ints(&[1, 2])), ("ys", ints(&[]))]);
    let res = BTreeMap::<String, Vec<i64>>::from_value("m", Some(val)).unwrap();
    assert_eq!(res["xs"], vec![1, 2]);
    assert!(res["ys"].is_empty());
}

// --- Tuples ---

#[test]
fn test_pair_from_list() {
    let val = Value::List(vec![Value::from("a"), Value::Integer(1)]);
    let res = <(String, i64)>::from_value("p", Some(val)).unwrap();
    assert_eq!(res, ("a".to_string(), 1));
}

#[test]
fn test_triple_element_failure() {
    let val = Value::List(vec![Value::Integer(1), Value::Integer(2), Value::from("3")]);
    let err = <(i64, i64, i64)>::from_value("t", Some(val)).unwrap_err();
    assert_eq!(err.field(), Some("t[2]"));
}

#[test]
fn test_tuple_wrong_length() {
    let err = <(i64, i64)>::from_value("p", Some(ints(&[1, 2, 3]))).unwrap_err();
    match &err {
        NeomapError::TypeMismatch { expected, got, .. } => {
            assert_eq!(expected, "List[2]");
            assert_eq!(got, "List");
        }
        other => panic!("expected TypeMismatch, got: {other}"),
    }
}
