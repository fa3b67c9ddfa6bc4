//! Procedural macros for neomap.
//!
//! Use through the `neomap` facade, which re-exports the derive.

extern crate proc_macro;

use proc_macro::TokenStream;

mod from_record;

/// Derive [`FromRecord`](neomap_core::traits::FromRecord) and
/// [`FromValue`](neomap_core::traits::FromValue) for a struct.
///
/// Each field is read from the record column of the same name and
/// converted with the field type's `FromValue` impl. Fields are converted
/// in declaration order and the first failure is returned, tagged with the
/// struct's type hint.
///
/// The generated `FromValue` impl lets the struct appear as a field type,
/// a collection element, or a path node/relationship: maps, nodes and
/// relationships are read through their properties (plus `id` for graph
/// entities), any other value as a one-column record.
///
/// # Attributes
///
/// **Struct-level:**
/// - `#[neomap(name = "...")]`: the type hint used in errors. Defaults to the struct name.
///
/// **Field-level:**
/// - `#[neomap(prop = "...")]`: read a different column / property name (default: field name).
/// - `#[neomap(flatten)]`: instead of reading a single column, delegates to
///   the inner type's `FromRecord::from_record()` with the same record.
///
/// # Field type behaviour
///
/// - **`Option<T>`**: missing column or `null` becomes `None`.
/// - **`Vec<T>`, `HashMap<String, T>`, ...**: missing column becomes an empty collection.
/// - **anything else**: missing column is a `FieldNotFound` error.
///
/// # Example
///
/// ```rust,ignore
/// use neomap::prelude::*;
///
/// #[derive(FromRecord)]
/// #[neomap(name = "Person")]
/// struct Person {
///     id: i64,
///     name: String,
///     #[neomap(prop = "email_address")]
///     email: Option<String>,
/// }
///
/// #[derive(FromRecord)]
/// struct FriendRow {
///     p: Person,
///     friends: Vec<Person>,
/// }
/// ```
#[proc_macro_derive(FromRecord, attributes(neomap))]
pub fn from_record(input: TokenStream) -> TokenStream {
    from_record::expand(input)
}
