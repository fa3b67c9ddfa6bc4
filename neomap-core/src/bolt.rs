//! Adapter from `neo4rs` 0.8 bolt types into the neomap value model.
//!
//! This is the only module that reads `neo4rs` value and row types, so
//! conversions elsewhere never depend on the driver's API.

use std::collections::{BTreeMap, HashMap};

use neo4rs::{BoltType, Row};

use crate::error::{NeomapError, RECORD_WIDE};
use crate::graph::{Node, Path, Relationship, UnboundRelationship};
use crate::record::Record;
use crate::value::{IsoDuration, Point2D, Point3D, Value};

fn bolt_map(field: &str, map: neo4rs::BoltMap) -> Result<BTreeMap<String, Value>, NeomapError> {
    map.value
        .into_iter()
        .map(|(k, v)| {
            let entry_field = format!("{field}.{}", k.value);
            Value::from_bolt(&entry_field, v).map(|v| (k.value, v))
        })
        .collect()
}

fn bolt_node(field: &str, node: neo4rs::BoltNode) -> Result<Node, NeomapError> {
    let labels = node
        .labels
        .value
        .into_iter()
        .filter_map(|l| match l {
            BoltType::String(s) => Some(s.value),
            _ => None,
        })
        .collect();
    Ok(Node {
        id: node.id.value,
        labels,
        properties: bolt_map(field, node.properties)?,
    })
}

fn bolt_unbound(field: &str, rel: neo4rs::BoltUnboundedRelation) -> Result<UnboundRelationship, NeomapError> {
    Ok(UnboundRelationship {
        id: rel.id.value,
        rel_type: rel.typ.value,
        properties: bolt_map(field, rel.properties)?,
    })
}

impl Value {
    /// Convert a driver value, decoding temporal types through chrono.
    ///
    /// Fails with [`Malformed`](NeomapError::Malformed) on `field` when the
    /// driver holds a temporal value chrono cannot represent.
    pub fn from_bolt(field: &str, value: BoltType) -> Result<Value, NeomapError> {
        let temporal = |what: &str, e: neo4rs::Error| NeomapError::malformed(field, format!("{what}: {e}"));

        Ok(match value {
            BoltType::Null(_) => Value::Null,
            BoltType::Boolean(b) => Value::Boolean(b.value),
            BoltType::Integer(i) => Value::Integer(i.value),
            BoltType::Float(f) => Value::Float(f.value),
            BoltType::String(s) => Value::String(s.value),
            BoltType::Bytes(b) => Value::Bytes(b.value),
            BoltType::List(xs) => Value::List(
                xs.value
                    .into_iter()
                    .enumerate()
                    .map(|(i, x)| Value::from_bolt(&format!("{field}[{i}]"), x))
                    .collect::<Result<_, _>>()?,
            ),
            BoltType::Map(m) => Value::Map(bolt_map(field, m)?),
            BoltType::Node(n) => Value::Node(bolt_node(field, n)?),
            BoltType::Relation(r) => Value::Relationship(Relationship {
                id: r.id.value,
                start_node_id: r.start_node_id.value,
                end_node_id: r.end_node_id.value,
                rel_type: r.typ.value,
                properties: bolt_map(field, r.properties)?,
            }),
            BoltType::UnboundedRelation(r) => Value::UnboundRelationship(bolt_unbound(field, r)?),
            BoltType::Path(p) => {
                let nodes = p
                    .nodes()
                    .into_iter()
                    .map(|n| bolt_node(field, n))
                    .collect::<Result<_, _>>()?;
                let relationships = p
                    .rels()
                    .into_iter()
                    .map(|r| bolt_unbound(field, r))
                    .collect::<Result<_, _>>()?;
                let indices = p.indices().into_iter().map(|i| i.value).collect();
                Value::Path(Path { nodes, relationships, indices })
            }
            BoltType::Point2D(p) => Value::Point2D(Point2D {
                sr_id: p.sr_id.value,
                x: p.x.value,
                y: p.y.value,
            }),
            BoltType::Point3D(p) => Value::Point3D(Point3D {
                sr_id: p.sr_id.value,
                x: p.x.value,
                y: p.y.value,
                z: p.z.value,
            }),
            BoltType::Duration(d) => {
                // neo4rs only exposes the duration folded into seconds, cast
                // through u64. Casting back restores negative totals.
                let elapsed: std::time::Duration = d.into();
                let seconds = elapsed.as_secs() as i64;
                Value::Duration(IsoDuration::new(0, 0, seconds, i64::from(elapsed.subsec_nanos())))
            }
            BoltType::Date(d) => {
                let date: chrono::NaiveDate = d
                    .try_into()
                    .map_err(|e: neo4rs::Error| temporal("BoltDate -> NaiveDate", e))?;
                Value::Date(date)
            }
            BoltType::Time(t) => {
                let (time, offset): (chrono::NaiveTime, chrono::FixedOffset) = t.into();
                Value::Time(time, offset)
            }
            BoltType::LocalTime(t) => Value::LocalTime(t.into()),
            BoltType::LocalDateTime(dt) => {
                let ndt: chrono::NaiveDateTime = dt
                    .try_into()
                    .map_err(|e: neo4rs::Error| temporal("BoltLocalDateTime -> NaiveDateTime", e))?;
                Value::LocalDateTime(ndt)
            }
            BoltType::DateTime(dt) => {
                let cdt: chrono::DateTime<chrono::FixedOffset> = dt
                    .try_into()
                    .map_err(|e: neo4rs::Error| temporal("BoltDateTime -> DateTime<FixedOffset>", e))?;
                Value::DateTime(cdt)
            }
            BoltType::DateTimeZoneId(dt) => {
                let cdt: chrono::DateTime<chrono::FixedOffset> = (&dt)
                    .try_into()
                    .map_err(|e: neo4rs::Error| temporal("BoltDateTimeZoneId -> DateTime<FixedOffset>", e))?;
                Value::DateTimeZoneId(cdt, dt.tz_id().to_owned())
            }
        })
    }
}

impl TryFrom<BoltType> for Value {
    type Error = NeomapError;

    fn try_from(value: BoltType) -> Result<Self, Self::Error> {
        Value::from_bolt("", value)
    }
}

impl Record {
    /// Build a record from a [`Row`](neo4rs::Row).
    ///
    /// A driver row keeps its columns in a hash map, so the query's column
    /// order is lost. Columns are sorted by name to keep the result
    /// deterministic; positional targets such as tuples therefore see
    /// columns in name order, not `RETURN` order.
    pub fn from_row(row: &Row) -> Result<Record, NeomapError> {
        let columns: HashMap<String, BoltType> = row
            .to_strict()
            .map_err(|e| NeomapError::malformed(RECORD_WIDE, format!("unreadable row: {e}")))?;
        let mut columns: Vec<(String, BoltType)> = columns.into_iter().collect();
        columns.sort_by(|a, b| a.0.cmp(&b.0));

        let mut record = Record::new();
        for (name, raw) in columns {
            let value = Value::from_bolt(&name, raw)?;
            record.push(name, value);
        }
        Ok(record)
    }
}
