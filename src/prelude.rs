//! Convenience re-exports for common neomap usage.
//!
//! ```rust
//! use neomap::prelude::*;
//! ```
//!
//! This imports the `FromRecord` derive macro together with the traits
//! (`FromRecord`, `FromValue`), the error and hint types, the record and
//! value model, the typed path and temporal wrapper types, and the query
//! and stream types.

pub use crate::{FromRecord, FromValue};
pub use neomap_core::{ErrorKind, NeomapError, TypeHint};
pub use neomap_core::{collect_records, Record, Value};
pub use neomap_core::{Direction, Node, Path, Relationship, UnboundRelationship};
pub use neomap_core::{ByteArray, IsoDuration, Point2D, Point3D, TypedPath};
pub use neomap_core::{OffsetTime, Period, ZonedDateTime};
pub use crate::query::NeomapQuery;
pub use crate::stream::NeomapStream;
