//! Procedural macros for object forging.
//!
//! * `#[derive(Forged)]` - declares how a struct is built from resolved attributes

use proc_macro::TokenStream;

/// Forged derive macro implementation.
mod forged;

/// Derives `Forged` for a struct with named fields.
///
/// By default the struct is a record built from named fields, rejecting
/// attributes it has no field for. Container attributes change that:
///
/// * `#[forged(named)]` - record, declared as taking named fields
/// * `#[forged(positional)]` - record, built from values in field order
/// * `#[forged(keywords)]` - built from named arguments without field order
/// * `#[forged(lax)]` - record that silently drops unknown attributes
///
/// Fields accept `#[forged(rename = "attr")]` to read a differently named
/// attribute.
///
/// ```ignore
/// #[derive(Debug, Forged)]
/// #[forged(lax)]
/// struct User {
///     name: String,
///     #[forged(rename = "years")]
///     age: i64,
///     email: Option<String>,
/// }
/// ```
///
/// Missing attributes read as nil, so `Option` fields may be left out.
#[proc_macro_derive(Forged, attributes(forged))]
pub fn derive_forged(input: TokenStream) -> TokenStream {
	forged::derive_forged(input)
}
