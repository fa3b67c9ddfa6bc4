//! Error types for neomap conversions.

use thiserror::Error;

use crate::hint::TypeHint;

/// Field name used when a failure concerns the record as a whole rather
/// than one named column.
pub const RECORD_WIDE: &str = "<record>";

/// The category of a [`NeomapError`], independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value's tag does not match what the target type requires.
    TypeMismatch,
    /// A required field was absent.
    FieldNotFound,
    /// The value has a plausible tag but its content is invalid for the target.
    Malformed,
    /// The underlying driver failed before conversion could start.
    Driver,
}

/// Unified error type for all neomap operations.
///
/// Every conversion failure names the field it happened on and, when the
/// target was a derived struct, the struct it was building:
///
/// ```text
/// type mismatch on 'age' (User): expected Integer, got String ("forty")
/// ```
#[derive(Error, Debug)]
pub enum NeomapError {
    /// A [`Value`](crate::Value) variant did not match the expected Rust type.
    #[error("type mismatch on '{field}'{}: expected {expected}, got {got} ({value})", hint_suffix(.type_hint))]
    TypeMismatch {
        field: String,
        type_hint: Option<TypeHint>,
        expected: String,
        got: String,
        value: String,
    },

    /// A required field was not found in a record or value.
    #[error("field '{field}' not found{}", hint_suffix(.type_hint))]
    FieldNotFound {
        field: String,
        type_hint: Option<TypeHint>,
    },

    /// A value of the right shape carried content the target cannot hold.
    #[error("malformed value for '{field}'{}: {message}", hint_suffix(.type_hint))]
    Malformed {
        field: String,
        type_hint: Option<TypeHint>,
        message: String,
    },

    /// A `neo4rs::Error` from the underlying driver.
    #[error("neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),
}

fn hint_suffix(hint: &Option<TypeHint>) -> String {
    match hint {
        Some(h) => format!(" ({h})"),
        None => String::new(),
    }
}

impl NeomapError {
    /// Create a [`TypeMismatch`](NeomapError::TypeMismatch) error for `value`.
    pub fn type_mismatch(field: &str, expected: &str, value: &crate::Value) -> Self {
        NeomapError::TypeMismatch {
            field: field.to_owned(),
            type_hint: None,
            expected: expected.to_owned(),
            got: value.kind().to_owned(),
            value: value.summary(),
        }
    }

    /// Create a [`FieldNotFound`](NeomapError::FieldNotFound) error.
    pub fn field_not_found(field: &str) -> Self {
        NeomapError::FieldNotFound {
            field: field.to_owned(),
            type_hint: None,
        }
    }

    /// Create a [`Malformed`](NeomapError::Malformed) error.
    pub fn malformed(field: &str, message: impl Into<String>) -> Self {
        NeomapError::Malformed {
            field: field.to_owned(),
            type_hint: None,
            message: message.into(),
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NeomapError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            NeomapError::FieldNotFound { .. } => ErrorKind::FieldNotFound,
            NeomapError::Malformed { .. } => ErrorKind::Malformed,
            NeomapError::Neo4j(_) => ErrorKind::Driver,
        }
    }

    /// The field the failure was reported on, if it came from a conversion.
    pub fn field(&self) -> Option<&str> {
        match self {
            NeomapError::TypeMismatch { field, .. }
            | NeomapError::FieldNotFound { field, .. }
            | NeomapError::Malformed { field, .. } => Some(field),
            NeomapError::Neo4j(_) => None,
        }
    }

    /// The type hint attached to the failure, if any.
    pub fn type_hint(&self) -> Option<&TypeHint> {
        match self {
            NeomapError::TypeMismatch { type_hint, .. }
            | NeomapError::FieldNotFound { type_hint, .. }
            | NeomapError::Malformed { type_hint, .. } => type_hint.as_ref(),
            NeomapError::Neo4j(_) => None,
        }
    }

    /// Attach a type hint unless one is already present.
    ///
    /// The innermost hint wins, so a failure deep inside a nested struct
    /// keeps naming the struct that actually failed.
    ///
    /// ```rust
    /// # use neomap_core::{NeomapError, TypeHint};
    /// let err = NeomapError::field_not_found("age").with_hint(&TypeHint::new("User"));
    /// assert_eq!(err.to_string(), "field 'age' not found (User)");
    /// ```
    pub fn with_hint(mut self, hint: &TypeHint) -> Self {
        match &mut self {
            NeomapError::TypeMismatch { type_hint, .. }
            | NeomapError::FieldNotFound { type_hint, .. }
            | NeomapError::Malformed { type_hint, .. } => {
                if type_hint.is_none() {
                    *type_hint = Some(hint.clone());
                }
            }
            NeomapError::Neo4j(_) => {}
        }
        self
    }

    /// Prefix the reported field with `parent`, producing paths like `u.name`
    /// or `friends[2].age`.
    pub fn within(mut self, parent: &str) -> Self {
        match &mut self {
            NeomapError::TypeMismatch { field, .. }
            | NeomapError::FieldNotFound { field, .. }
            | NeomapError::Malformed { field, .. } => {
                if field.is_empty() || field == RECORD_WIDE {
                    *field = parent.to_owned();
                } else {
                    *field = format!("{parent}.{field}");
                }
            }
            NeomapError::Neo4j(_) => {}
        }
        self
    }
}
