//! Core traits for mapping records and values into Rust types.

use crate::error::NeomapError;
use crate::hint::TypeHint;
use crate::record::Record;
use crate::value::Value;

/// Converts a single, possibly absent, [`Value`] into a Rust type.
///
/// This is the core conversion primitive. `field` names where the value came
/// from and is only used in errors. `None` means the field was missing.
///
/// Leaf impls reject absence with [`FieldNotFound`](NeomapError::FieldNotFound);
/// `Option<T>` and the collection impls are the only ones that accept it.
///
/// `#[derive(FromRecord)]` implements this trait too, so derived structs can
/// be nested as field types or collection elements.
pub trait FromValue: Sized {
    /// Convert `value`, read from `field`, into `Self`.
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError>;
}

/// Maps a whole [`Record`] into a Rust type.
///
/// Automatically implemented by `#[derive(FromRecord)]`, where each struct
/// field maps to a column name in the record. Scalar, option and collection
/// targets read the record's single column; tuples read columns
/// positionally.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(FromRecord)]
/// struct UserRow {
///     name: String,
///     age: Option<i64>,
/// }
/// ```
pub trait FromRecord: Sized {
    /// Deserialize a [`Record`] into `Self`. `hint` names the target in
    /// error messages when the caller knows better than the impl.
    fn from_record(record: &Record, hint: Option<&TypeHint>) -> Result<Self, NeomapError>;
}

/// Unwrap a present value or report the field as missing.
///
/// Leaf converters start with this so that absence handling stays uniform.
pub fn required(field: &str, value: Option<Value>) -> Result<Value, NeomapError> {
    value.ok_or_else(|| NeomapError::field_not_found(field))
}
