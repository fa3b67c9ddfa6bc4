//! Core traits, value model, error types, and conversions for neomap.
//!
//! Most code should go through the `neomap` facade, which re-exports
//! everything here. Crates using `#[derive(FromRecord)]` also depend on
//! this crate directly, since the generated code names it.

pub mod traits;
pub mod error;
pub mod hint;

pub mod value;
pub mod graph;
pub mod record;
pub mod props;
pub mod convert;
pub mod temporal;
pub mod path;
pub mod bolt;

pub use error::{ErrorKind, NeomapError, RECORD_WIDE};
pub use hint::TypeHint;
pub use traits::{FromRecord, FromValue};
pub use value::{IsoDuration, Point2D, Point3D, Value};
pub use graph::{Direction, Node, Path, Relationship, UnboundRelationship};
pub use record::{collect_records, Record};
pub use convert::ByteArray;
pub use temporal::{OffsetTime, Period, ZonedDateTime};
pub use path::{Segment, TypedPath};
