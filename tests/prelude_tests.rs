use std::collections::BTreeMap;

use neomap::prelude::*;
use neomap::query;

#[derive(Debug, PartialEq, FromRecord)]
struct User {
    id: i64,
    name: String,
    tags: Vec<String>,
}

fn user_row(id: i64, name: &str) -> Record {
    let props: BTreeMap<String, Value> = [
        ("name".to_string(), Value::from(name)),
        ("tags".to_string(), Value::List(vec![Value::from("a")])),
    ]
    .into_iter()
    .collect();
    Record::single("u", Node::new(id, vec!["User".into()], props))
}

#[test]
fn test_prelude_derive_and_collect() {
    let rows = vec![user_row(1, "Ann"), user_row(2, "Bo")];
    let users: Vec<User> = collect_records::<User, _, _>(&rows).unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1], User { id: 2, name: "Bo".into(), tags: vec!["a".into()] });
}

#[test]
fn test_prelude_error_surface() {
    let record = Record::single("u", Value::Integer(1));
    let err = User::from_record(&record, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FieldNotFound);
    assert_eq!(err.field(), Some("id"));
    assert_eq!(err.type_hint().map(TypeHint::name), Some("User"));
}

#[test]
fn test_query_keeps_text() {
    let q = query::query("MATCH (u:User {id: $id}) RETURN u").param("id", 1_i64);
    assert_eq!(q.text(), "MATCH (u:User {id: $id}) RETURN u");

    let q = NeomapQuery::new(String::from("RETURN 1 AS n"));
    assert_eq!(q.text(), "RETURN 1 AS n");
}
