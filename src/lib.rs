#![doc = r#"
A typed mapping layer between Neo4j's dynamically-typed values and Rust
types.

Queries return records: ordered column names mapped to loosely-typed
values. `neomap` converts those records into primitives, collections,
options, nested structs, nodes, relationships and paths, or fails with an
error that names the column, the struct being built, and what went wrong.
Built on [`neo4rs`] 0.8.

# Quick start

## Map records into structs

```rust
use neomap::prelude::*;

#[derive(Debug, FromRecord)]
struct User {
    id: i64,
    name: String,
    email: Option<String>,
}

// MATCH (u:User) RETURN u
let node = Node::new(
    7,
    vec!["User".into()],
    [("name".to_string(), Value::from("Alice"))].into_iter().collect(),
);
let record = Record::single("u", node);

let user = User::from_record(&record, None).unwrap();
assert_eq!(user.id, 7);
assert_eq!(user.name, "Alice");
assert_eq!(user.email, None);
```

A single column holding a node (or a map, or a relationship) is read
through its properties. Graph entities also expose their identity as `id`
unless a property already uses that name.

## Nest and flatten

Derived structs implement `FromValue` too, so they can be field types,
collection elements, or path members:

```rust
use neomap::prelude::*;

#[derive(FromRecord)]
struct Person {
    name: String,
}

#[derive(FromRecord)]
struct Paging {
    total: i64,
}

#[derive(FromRecord)]
struct FriendsRow {
    person: Person,
    friends: Vec<Person>,
    #[neomap(flatten)]
    paging: Paging,
}
```

## Single values and tuples

Non-struct targets read the record's only column; tuples read columns by
position. Rows fetched from the driver carry no column order, so their
columns are sorted by name before tuples see them:

```rust
use neomap::prelude::*;

let record: Record = [("p.name", Value::Integer(5))].into_iter().collect();
assert_eq!(i64::from_record(&record, None).unwrap(), 5);

let err = String::from_record(&record, None).unwrap_err();
assert_eq!(err.kind(), ErrorKind::TypeMismatch);
assert_eq!(err.field(), Some("p.name"));

let pair: Record = [("a", Value::from(1_i64)), ("b", Value::from("x"))].into_iter().collect();
let (a, b): (i64, String) = FromRecord::from_record(&pair, None).unwrap();
assert_eq!((a, b.as_str()), (1, "x"));
```

## Execute queries

```rust,no_run
use neomap::prelude::*;
use neomap::query;

# #[derive(FromRecord)]
# struct User { id: i64, name: String }
# async fn example(graph: &neo4rs::Graph) -> Result<(), NeomapError> {
// Exactly one row (error if empty):
let user: User = query::query("MATCH (u:User) RETURN u LIMIT 1")
    .fetch_one(graph)
    .await?;

// Zero or one row:
let maybe_user: Option<User> = query::query("MATCH (u:User {id: $id}) RETURN u")
    .param("id", 1_i64)
    .fetch_optional(graph)
    .await?;

// All rows at once:
let users: Vec<User> = query::query("MATCH (u:User) RETURN u")
    .fetch_all(graph)
    .await?;

// Streaming, one row at a time:
let mut stream = query::query("MATCH (u:User) RETURN u")
    .fetch_stream::<User>(graph)
    .await?;
while let Some(result) = stream.next().await {
    let user = result?;
}
# Ok(())
# }
```

# Supported value types

`FromValue` conversions are provided for:

| Neo4j type | Rust type |
|------------|-----------|
| Integer | `i64`, `i32`, `i16`, `i8`, `u64`, `u32`, `u16`, `u8` (range checked) |
| Float | `f64`, `f32` |
| String | `String`, `uuid::Uuid` |
| Boolean | `bool` |
| Bytes | [`ByteArray`], `bytes::Bytes`, `uuid::Uuid` |
| List | `Vec<T>`, `VecDeque<T>`, `HashSet<T>`, `BTreeSet<T>`, `(A, B)`, `(A, B, C)` |
| Map | `HashMap<String, V>`, `BTreeMap<String, V>`, any `#[derive(FromRecord)]` struct |
| Null / missing | `Option<T>`; empty collections |
| Node | [`Node`], any derived struct |
| Relationship | [`Relationship`], any derived struct |
| Path | [`Path`], [`TypedPath<N, R>`] |
| Point2D / Point3D | [`Point2D`] / [`Point3D`] |
| Date | `chrono::NaiveDate` |
| LocalTime | `chrono::NaiveTime` |
| Time | [`OffsetTime`] |
| LocalDateTime | `chrono::NaiveDateTime` |
| DateTime / DateTimeZoneId | `chrono::DateTime<FixedOffset>`, `chrono::DateTime<Utc>`, [`ZonedDateTime`] |
| Duration | `chrono::Duration`, `std::time::Duration`, [`Period`], [`IsoDuration`] |
| anything | [`Value`] (passthrough) |

# Error handling

All conversions return [`NeomapError`]. Errors carry the failing field
(with element indices and nested paths such as `friends[2].name`) and the
type hint of the struct being built:

```text
type mismatch on 'age' (User): expected Integer, got String ("forty")
```

[`neo4rs`]: https://docs.rs/neo4rs
[`ByteArray`]: neomap_core::ByteArray
[`Node`]: neomap_core::Node
[`Relationship`]: neomap_core::Relationship
[`Path`]: neomap_core::Path
[`TypedPath<N, R>`]: neomap_core::TypedPath
[`Point2D`]: neomap_core::Point2D
[`Point3D`]: neomap_core::Point3D
[`OffsetTime`]: neomap_core::OffsetTime
[`ZonedDateTime`]: neomap_core::ZonedDateTime
[`Period`]: neomap_core::Period
[`IsoDuration`]: neomap_core::IsoDuration
[`Value`]: neomap_core::Value
"#]

pub mod prelude;
pub mod query;
pub mod stream;

pub use neomap_core as core;
pub use neomap_macros::FromRecord;

pub use neomap_core::traits::{FromRecord, FromValue};
pub use neomap_core::{NeomapError, Record, TypeHint, Value};
