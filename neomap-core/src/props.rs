//! Reading object-shaped values as records.
//!
//! Maps, nodes and relationships all carry a property map. When such a
//! value feeds a struct, its properties become the struct's record. Nodes
//! and relationships additionally expose their identity as `id` unless a
//! property already uses that name.

use crate::record::Record;
use crate::value::Value;

/// Name under which an entity's identity is exposed.
pub const ID_KEY: &str = "id";

/// Build a record from the entries of an object-shaped value.
///
/// Returns `None` for any value that is not a map, node or relationship.
pub fn object_record(value: &Value) -> Option<Record> {
    let id = match value {
        Value::Node(n) => Some(n.id),
        Value::Relationship(r) => Some(r.id),
        Value::UnboundRelationship(r) => Some(r.id),
        _ => None,
    };
    let props = value.properties()?;

    let mut record: Record = props.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    if let Some(id) = id {
        if !props.contains_key(ID_KEY) {
            record.push(ID_KEY, Value::Integer(id));
        }
    }
    Some(record)
}
