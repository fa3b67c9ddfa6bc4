//! Records: one result row as ordered name/value pairs, and the
//! [`FromRecord`] impls for non-struct targets.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

use crate::error::{NeomapError, RECORD_WIDE};
use crate::graph::{Node, Path, Relationship, UnboundRelationship};
use crate::hint::TypeHint;
use crate::path::TypedPath;
use crate::props;
use crate::temporal::{OffsetTime, Period, ZonedDateTime};
use crate::traits::{required, FromRecord, FromValue};
use crate::value::{IsoDuration, Point2D, Point3D, Value};
use crate::ByteArray;

/// One result row: field names mapped to values, in query order.
///
/// Names are unique within a record; pushing an existing name replaces its
/// value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record holding exactly one column.
    pub fn single(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { entries: vec![(name.into(), value.into())] }
    }

    /// Append a column, or overwrite it if the name is already present.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Read a column by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Read an owned copy of a column, ready to hand to a [`FromValue`] impl.
    pub fn value(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    /// Check whether a column exists in the record.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The record a struct with the given field names should read from.
    ///
    /// A query like `RETURN u` yields a single column holding a node, while
    /// the target struct wants the node's properties. When the record has
    /// exactly one column, that column holds an object, and its name is not
    /// one of `fields`, the object's entries are used instead. Otherwise the
    /// record is used as is.
    pub fn for_product(&self, fields: &[&str]) -> Cow<'_, Record> {
        if let [(name, value)] = self.entries.as_slice() {
            if !fields.contains(&name.as_str()) {
                if let Some(inner) = props::object_record(value) {
                    return Cow::Owned(inner);
                }
            }
        }
        Cow::Borrowed(self)
    }

    /// The name and value of the column at `index`, for positional targets.
    fn column(&self, index: usize) -> (Cow<'_, str>, Option<Value>) {
        match self.entries.get(index) {
            Some((k, v)) => (Cow::Borrowed(k.as_str()), Some(v.clone())),
            None => (Cow::Owned(format!("column {index}")), None),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.push(k, v);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Convert every record with `T`'s [`FromRecord`] impl and gather the results
/// into any container.
///
/// Stops at the first record that fails; no partial container is returned.
///
/// ```rust
/// # use neomap_core::{Record, collect_records};
/// let rows = vec![Record::single("n", 1_i64), Record::single("n", 2_i64)];
/// let ns: Vec<i64> = collect_records::<i64, _, _>(&rows).unwrap();
/// assert_eq!(ns, vec![1, 2]);
/// ```
pub fn collect_records<'a, T, C, I>(records: I) -> Result<C, NeomapError>
where
    T: FromRecord,
    C: FromIterator<T>,
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().map(|r| T::from_record(r, None)).collect()
}

fn hinted<T>(result: Result<T, NeomapError>, hint: Option<&TypeHint>) -> Result<T, NeomapError> {
    match hint {
        Some(h) => result.map_err(|e| e.with_hint(h)),
        None => result,
    }
}

/// Feed the record's only column to a [`FromValue`] impl.
///
/// An empty record feeds absence under [`RECORD_WIDE`]; more than one
/// column is malformed for a single-value target.
pub fn single_column<T: FromValue>(record: &Record, hint: Option<&TypeHint>) -> Result<T, NeomapError> {
    let result = match record.entries.as_slice() {
        [] => T::from_value(RECORD_WIDE, None),
        [(name, value)] => T::from_value(name, Some(value.clone())),
        many => Err(NeomapError::malformed(
            RECORD_WIDE,
            format!("expected a single column, got {}", many.len()),
        )),
    };
    hinted(result, hint)
}

/// The nested product combinator used by `#[derive(FromRecord)]` to
/// implement [`FromValue`] for a struct.
///
/// An object-shaped value (map, node, relationship) is read as a record of
/// its entries, and failures inside it are reported below `field`. Any other
/// value becomes the one-column record `[(field, value)]`. Absence is a
/// [`FieldNotFound`](NeomapError::FieldNotFound) on `field`.
pub fn product_from_value<T: FromRecord>(field: &str, value: Option<Value>) -> Result<T, NeomapError> {
    let value = required(field, value)?;
    if value.is_null() {
        return Err(NeomapError::type_mismatch(field, "Map", &value));
    }
    match props::object_record(&value) {
        Some(record) => T::from_record(&record, None).map_err(|e| e.within(field)),
        None => T::from_record(&Record::single(field, value), None),
    }
}

// ---------------------------------------------------------------------------
// Single-value targets
// ---------------------------------------------------------------------------

macro_rules! impl_record_via_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromRecord for $t {
                fn from_record(record: &Record, hint: Option<&TypeHint>) -> Result<Self, NeomapError> {
                    single_column(record, hint)
                }
            }
        )*
    };
}

impl_record_via_value!(
    bool, i64, i32, i16, i8, u64, u32, u16, u8, f64, f32, String,
    ByteArray, bytes::Bytes, uuid::Uuid, Value,
    Node, Relationship, UnboundRelationship, Path, Point2D, Point3D, IsoDuration,
    chrono::NaiveDate, chrono::NaiveTime, chrono::NaiveDateTime,
    chrono::DateTime<chrono::FixedOffset>, chrono::DateTime<chrono::Utc>,
    chrono::Duration, std::time::Duration,
    OffsetTime, ZonedDateTime, Period,
);

impl<T: FromValue> FromRecord for Option<T> {
    fn from_record(record: &Record, hint: Option<&TypeHint>) -> Result<Self, NeomapError> {
        single_column(record, hint)
    }
}

impl<T: FromValue> FromRecord for Vec<T> {
    fn from_record(record: &Record, hint: Option<&TypeHint>) -> Result<Self, NeomapError> {
        single_column(record, hint)
    }
}

impl<T: FromValue> FromRecord for VecDeque<T> {
    fn from_record(record: &Record, hint: Option<&TypeHint>) -> Result<Self, NeomapError> {
        single_column(record, hint)
    }
}

impl<T: FromValue + Eq + Hash> FromRecord for HashSet<T> {
    fn from_record(record: &Record, hint: Option<&TypeHint>) -> Result<Self, NeomapError> {
        single_column(record, hint)
    }
}

impl<T: FromValue + Ord> FromRecord for BTreeSet<T> {
    fn from_record(record: &Record, hint: Option<&TypeHint>) -> Result<Self, NeomapError> {
        single_column(record, hint)
    }
}

impl<V: FromValue> FromRecord for HashMap<String, V> {
    fn from_record(record: &Record, hint: Option<&TypeHint>) -> Result<Self, NeomapError> {
        single_column(record, hint)
    }
}

impl<V: FromValue> FromRecord for BTreeMap<String, V> {
    fn from_record(record: &Record, hint: Option<&TypeHint>) -> Result<Self, NeomapError> {
        single_column(record, hint)
    }
}

impl<N: FromRecord, R: FromRecord> FromRecord for TypedPath<N, R> {
    fn from_record(record: &Record, hint: Option<&TypeHint>) -> Result<Self, NeomapError> {
        single_column(record, hint)
    }
}

// ---------------------------------------------------------------------------
// Positional targets
// ---------------------------------------------------------------------------

/// The empty product: always succeeds and never looks at the record.
impl FromRecord for () {
    fn from_record(_record: &Record, _hint: Option<&TypeHint>) -> Result<Self, NeomapError> {
        Ok(())
    }
}

fn check_width(record: &Record, arity: usize) -> Result<(), NeomapError> {
    if record.len() > arity {
        return Err(NeomapError::malformed(
            RECORD_WIDE,
            format!("expected at most {arity} columns, got {}", record.len()),
        ));
    }
    Ok(())
}

// Tuples read columns by position. Records built by hand keep their
// insertion order; records built from a driver row are in column-name order
// (see `Record::from_row`), so alias columns accordingly.
macro_rules! impl_record_tuple {
    ($arity:expr; $($name:ident => $idx:tt),+) => {
        impl<$($name: FromValue),+> FromRecord for ($($name,)+) {
            fn from_record(record: &Record, hint: Option<&TypeHint>) -> Result<Self, NeomapError> {
                let build = || -> Result<Self, NeomapError> {
                    check_width(record, $arity)?;
                    Ok(($(
                        {
                            let (field, value) = record.column($idx);
                            $name::from_value(&field, value)?
                        },
                    )+))
                };
                hinted(build(), hint)
            }
        }
    };
}

impl_record_tuple!(1; A => 0);
impl_record_tuple!(2; A => 0, B => 1);
impl_record_tuple!(3; A => 0, B => 1, C => 2);
impl_record_tuple!(4; A => 0, B => 1, C => 2, D => 3);
