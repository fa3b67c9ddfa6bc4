//! Type hints carried alongside conversion requests for diagnostics.

use std::borrow::Cow;
use std::fmt;

/// Names the target type of a conversion.
///
/// Hints never influence which converter runs; they only make error
/// messages point at the struct that was being built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeHint {
    name: Cow<'static, str>,
}

impl TypeHint {
    /// A hint with a fixed name, as emitted by `#[derive(FromRecord)]`.
    pub const fn new(name: &'static str) -> Self {
        Self { name: Cow::Borrowed(name) }
    }

    /// A hint named after `T`'s fully qualified Rust type name.
    pub fn of<T: ?Sized>() -> Self {
        Self { name: Cow::Borrowed(std::any::type_name::<T>()) }
    }

    /// The type name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<String> for TypeHint {
    fn from(name: String) -> Self {
        Self { name: Cow::Owned(name) }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
