//! The raw value model received from the database.
//!
//! [`Value`] is a closed enum with one case per protocol tag. Converters
//! only ever read it; see [`FromValue`](crate::FromValue) for the typed side.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::graph::{Node, Path, Relationship, UnboundRelationship};

/// Maximum number of characters of a value rendered into an error message.
const SUMMARY_LEN: usize = 48;

/// A dynamically-typed value as decoded from the Bolt protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Bytes(bytes::Bytes),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Node(Node),
    Relationship(Relationship),
    /// A relationship without endpoints, as carried inside a path.
    UnboundRelationship(UnboundRelationship),
    Path(Path),
    Point2D(Point2D),
    Point3D(Point3D),
    Date(NaiveDate),
    /// A time of day with a fixed UTC offset.
    Time(NaiveTime, FixedOffset),
    LocalTime(NaiveTime),
    LocalDateTime(NaiveDateTime),
    DateTime(DateTime<FixedOffset>),
    /// A date-time resolved to its offset, plus the zone id it was stored with.
    DateTimeZoneId(DateTime<FixedOffset>, String),
    Duration(IsoDuration),
}

impl Value {
    /// Returns a human-readable name for the variant.
    ///
    /// Used in error messages to describe the actual type received when a
    /// conversion fails.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Node(_) => "Node",
            Value::Relationship(_) => "Relationship",
            Value::UnboundRelationship(_) => "UnboundRelationship",
            Value::Path(_) => "Path",
            Value::Point2D(_) => "Point2D",
            Value::Point3D(_) => "Point3D",
            Value::Date(_) => "Date",
            Value::Time(..) => "Time",
            Value::LocalTime(_) => "LocalTime",
            Value::LocalDateTime(_) => "LocalDateTime",
            Value::DateTime(_) => "DateTime",
            Value::DateTimeZoneId(..) => "DateTimeZoneId",
            Value::Duration(_) => "Duration",
        }
    }

    /// `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `true` for values whose entries can be read as a record: maps, nodes
    /// and relationships.
    pub fn is_object(&self) -> bool {
        matches!(
            self,
            Value::Map(_) | Value::Node(_) | Value::Relationship(_) | Value::UnboundRelationship(_)
        )
    }

    /// The property map of an object-shaped value.
    pub fn properties(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            Value::Node(n) => Some(&n.properties),
            Value::Relationship(r) => Some(&r.properties),
            Value::UnboundRelationship(r) => Some(&r.properties),
            _ => None,
        }
    }

    /// A short rendering of the value for diagnostics.
    pub fn summary(&self) -> String {
        let full = self.to_string();
        if full.chars().count() <= SUMMARY_LEN {
            return full;
        }
        let mut cut: String = full.chars().take(SUMMARY_LEN - 3).collect();
        cut.push_str("...");
        cut
    }
}

fn write_entries(f: &mut fmt::Formatter<'_>, map: &BTreeMap<String, Value>) -> fmt::Result {
    f.write_str("{")?;
    for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{k}: {v}")?;
    }
    f.write_str("}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Bytes(b) => write!(f, "bytes[{}]", b.len()),
            Value::List(xs) => {
                f.write_str("[")?;
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x}")?;
                }
                f.write_str("]")
            }
            Value::Map(m) => write_entries(f, m),
            Value::Node(n) => {
                write!(f, "({}", n.id)?;
                for label in &n.labels {
                    write!(f, ":{label}")?;
                }
                f.write_str(" ")?;
                write_entries(f, &n.properties)?;
                f.write_str(")")
            }
            Value::Relationship(r) => write!(
                f,
                "({})-[{}:{}]->({})",
                r.start_node_id, r.id, r.rel_type, r.end_node_id
            ),
            Value::UnboundRelationship(r) => write!(f, "[{}:{}]", r.id, r.rel_type),
            Value::Path(p) => write!(
                f,
                "path({} nodes, {} relationships)",
                p.nodes.len(),
                p.relationships.len()
            ),
            Value::Point2D(p) => write!(f, "point({}; {}, {})", p.sr_id, p.x, p.y),
            Value::Point3D(p) => write!(f, "point({}; {}, {}, {})", p.sr_id, p.x, p.y, p.z),
            Value::Date(d) => write!(f, "{d}"),
            Value::Time(t, offset) => write!(f, "{t}{offset}"),
            Value::LocalTime(t) => write!(f, "{t}"),
            Value::LocalDateTime(dt) => write!(f, "{dt}"),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::DateTimeZoneId(dt, zone) => write!(f, "{}[{zone}]", dt.to_rfc3339()),
            Value::Duration(d) => write!(f, "{d}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Spatial values
// ---------------------------------------------------------------------------

/// A 2-dimensional point from Neo4j's spatial system.
///
/// The `sr_id` is the Spatial Reference Identifier (e.g. `4326` for WGS 84
/// geographic, `7203` for cartesian).
#[derive(Debug, Clone, PartialEq)]
pub struct Point2D {
    /// Spatial Reference System Identifier.
    pub sr_id: i64,
    /// X coordinate (or longitude for geographic CRS).
    pub x: f64,
    /// Y coordinate (or latitude for geographic CRS).
    pub y: f64,
}

/// A 3-dimensional point; [`Point2D`] plus a `z` (altitude/height) component.
#[derive(Debug, Clone, PartialEq)]
pub struct Point3D {
    /// Spatial Reference System Identifier (e.g. 4979 for WGS 84-3D, 9157 for cartesian-3D).
    pub sr_id: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

/// The protocol's ISO-8601 duration: independent month, day, second and
/// nanosecond components.
///
/// Components are kept separate because a month has no fixed length.
/// [`chrono::Duration`] and [`Period`](crate::Period) targets each read the
/// components that make sense for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IsoDuration {
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
    pub nanoseconds: i64,
}

impl IsoDuration {
    pub fn new(months: i64, days: i64, seconds: i64, nanoseconds: i64) -> Self {
        Self { months, days, seconds, nanoseconds }
    }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{}M{}DT{}.{:09}S",
            self.months, self.days, self.seconds, self.nanoseconds
        )
    }
}

// ---------------------------------------------------------------------------
// Construction helpers
// ---------------------------------------------------------------------------

macro_rules! impl_value_from {
    ($t:ty, $variant:ident) => {
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::$variant(v.into())
            }
        }
    };
}

impl_value_from!(bool, Boolean);
impl_value_from!(i64, Integer);
impl_value_from!(i32, Integer);
impl_value_from!(f64, Float);
impl_value_from!(String, String);
impl_value_from!(&str, String);
impl_value_from!(bytes::Bytes, Bytes);
impl_value_from!(Vec<Value>, List);
impl_value_from!(BTreeMap<String, Value>, Map);
impl_value_from!(Node, Node);
impl_value_from!(Relationship, Relationship);
impl_value_from!(UnboundRelationship, UnboundRelationship);
impl_value_from!(Path, Path);
impl_value_from!(Point2D, Point2D);
impl_value_from!(Point3D, Point3D);
impl_value_from!(NaiveDate, Date);
impl_value_from!(NaiveTime, LocalTime);
impl_value_from!(NaiveDateTime, LocalDateTime);
impl_value_from!(DateTime<FixedOffset>, DateTime);
impl_value_from!(IsoDuration, Duration);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
