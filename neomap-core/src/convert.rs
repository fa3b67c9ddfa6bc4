//! Value conversion from [`Value`] into Rust types.
//!
//! This module contains the leaf [`FromValue`] implementations and the
//! option, collection, map and tuple combinators built on top of them.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

use crate::error::NeomapError;
use crate::graph::{Node, Path, Relationship, UnboundRelationship};
use crate::traits::{required, FromValue};
use crate::value::{IsoDuration, Point2D, Point3D, Value};

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

impl FromValue for String {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::String(s) => Ok(s),
            other => Err(NeomapError::type_mismatch(field, "String", &other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::Boolean(b) => Ok(b),
            other => Err(NeomapError::type_mismatch(field, "Boolean", &other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric types (Integer → signed/unsigned with range check, Float → f64/f32)
// ---------------------------------------------------------------------------

macro_rules! impl_from_val_int {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
                    match required(field, value)? {
                        Value::Integer(i) => <$t>::try_from(i).map_err(|_| {
                            NeomapError::malformed(
                                field,
                                format!("integer {i} is out of range for {}", stringify!($t)),
                            )
                        }),
                        other => Err(NeomapError::type_mismatch(field, "Integer", &other)),
                    }
                }
            }
        )*
    };
}

impl_from_val_int!(i64, i32, i16, i8, u64, u32, u16, u8);

impl FromValue for f64 {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::Float(x) => Ok(x),
            other => Err(NeomapError::type_mismatch(field, "Float", &other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            // Infinities and NaN carry over; finite values must fit.
            Value::Float(x) if x.is_finite() && x.abs() > f64::from(f32::MAX) => Err(NeomapError::malformed(
                field,
                format!("float {x} is out of range for f32"),
            )),
            Value::Float(x) => Ok(x as f32),
            other => Err(NeomapError::type_mismatch(field, "Float", &other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Bytes
// ---------------------------------------------------------------------------

/// Newtype wrapper for raw bytes from Neo4j's `Bytes` type.
///
/// A dedicated type is used instead of `Vec<u8>` because a `FromValue` impl
/// already exists for `Vec<T: FromValue>`, and Rust does not support
/// specialization. [`bytes::Bytes`] converts directly as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteArray(pub Vec<u8>);

impl FromValue for ByteArray {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::Bytes(b) => Ok(ByteArray(b.to_vec())),
            other => Err(NeomapError::type_mismatch(field, "Bytes", &other)),
        }
    }
}

impl FromValue for bytes::Bytes {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::Bytes(b) => Ok(b),
            other => Err(NeomapError::type_mismatch(field, "Bytes", &other)),
        }
    }
}

// ---------------------------------------------------------------------------
// UUID (stored as a string, or as 16 raw bytes)
// ---------------------------------------------------------------------------

impl FromValue for uuid::Uuid {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::String(s) => uuid::Uuid::parse_str(&s)
                .map_err(|e| NeomapError::malformed(field, format!("invalid UUID {s:?}: {e}"))),
            Value::Bytes(b) => uuid::Uuid::from_slice(&b)
                .map_err(|e| NeomapError::malformed(field, format!("invalid UUID bytes: {e}"))),
            other => Err(NeomapError::type_mismatch(field, "String", &other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw passthrough and graph-native values
// ---------------------------------------------------------------------------

/// Identity conversion: hands back the protocol value untouched.
impl FromValue for Value {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        required(field, value)
    }
}

macro_rules! impl_from_val_variant {
    ($t:ty, $variant:ident) => {
        impl FromValue for $t {
            fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
                match required(field, value)? {
                    Value::$variant(v) => Ok(v),
                    other => Err(NeomapError::type_mismatch(field, stringify!($variant), &other)),
                }
            }
        }
    };
}

impl_from_val_variant!(Node, Node);
impl_from_val_variant!(Relationship, Relationship);
impl_from_val_variant!(UnboundRelationship, UnboundRelationship);
impl_from_val_variant!(Path, Path);
impl_from_val_variant!(Point2D, Point2D);
impl_from_val_variant!(Point3D, Point3D);
impl_from_val_variant!(IsoDuration, Duration);

// ---------------------------------------------------------------------------
// Option
// ---------------------------------------------------------------------------

/// `Option<T>` is the only place absence is tolerated.
/// - Missing field maps to `None`.
/// - Present but `null` maps to `None`.
/// - Otherwise delegates to `T`; its failure is returned unchanged.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(v) => T::from_value(field, Some(v)).map(Some),
        }
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Convert each element of a list, reporting element `k` as `field[k]`.
///
/// Absent or `null` input yields an empty container. The first element
/// failure aborts the whole conversion.
pub fn list_elements<T, C>(field: &str, value: Option<Value>) -> Result<C, NeomapError>
where
    T: FromValue,
    C: FromIterator<T>,
{
    match value {
        None | Some(Value::Null) => Ok(C::from_iter(std::iter::empty())),
        Some(Value::List(xs)) => xs
            .into_iter()
            .enumerate()
            .map(|(i, x)| T::from_value(&format!("{field}[{i}]"), Some(x)))
            .collect(),
        Some(other) => Err(NeomapError::type_mismatch(field, "List", &other)),
    }
}

/// Convert each entry of a map (or of a node's or relationship's
/// properties), reporting entry `key` as `field.key`.
///
/// Absent or `null` input yields an empty container. The first entry
/// failure aborts the whole conversion.
pub fn map_entries<V, C>(field: &str, value: Option<Value>) -> Result<C, NeomapError>
where
    V: FromValue,
    C: FromIterator<(String, V)>,
{
    let entries = match value {
        None | Some(Value::Null) => return Ok(C::from_iter(std::iter::empty())),
        Some(Value::Map(m)) => m,
        Some(other) => match other.properties() {
            Some(p) => p.clone(),
            None => return Err(NeomapError::type_mismatch(field, "Map", &other)),
        },
    };
    entries
        .into_iter()
        .map(|(k, v)| {
            let entry_field = format!("{field}.{k}");
            V::from_value(&entry_field, Some(v)).map(|converted| (k, converted))
        })
        .collect()
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        list_elements(field, value)
    }
}

impl<T: FromValue> FromValue for VecDeque<T> {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        list_elements(field, value)
    }
}

impl<T: FromValue + Eq + Hash> FromValue for HashSet<T> {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        list_elements(field, value)
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        list_elements(field, value)
    }
}

impl<V: FromValue> FromValue for HashMap<String, V> {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        map_entries(field, value)
    }
}

impl<V: FromValue> FromValue for BTreeMap<String, V> {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        map_entries(field, value)
    }
}

// ---------------------------------------------------------------------------
// Tuples (fixed-size lists)
// ---------------------------------------------------------------------------

impl<A: FromValue, B: FromValue> FromValue for (A, B) {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::List(xs) if xs.len() == 2 => {
                let mut xs = xs.into_iter();
                Ok((
                    A::from_value(&format!("{field}[0]"), xs.next())?,
                    B::from_value(&format!("{field}[1]"), xs.next())?,
                ))
            }
            other => Err(NeomapError::type_mismatch(field, "List[2]", &other)),
        }
    }
}

impl<A: FromValue, B: FromValue, C: FromValue> FromValue for (A, B, C) {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::List(xs) if xs.len() == 3 => {
                let mut xs = xs.into_iter();
                Ok((
                    A::from_value(&format!("{field}[0]"), xs.next())?,
                    B::from_value(&format!("{field}[1]"), xs.next())?,
                    C::from_value(&format!("{field}[2]"), xs.next())?,
                ))
            }
            other => Err(NeomapError::type_mismatch(field, "List[3]", &other)),
        }
    }
}
