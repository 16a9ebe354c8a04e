//! Value-level building blocks shared by every forge crate.
//!
//! * [`Name`] - interned attribute, trait and sequence names
//! * [`Value`] - the dynamic value an attribute computation produces
//! * [`Successor`] - the "has a next value" contract sequences are seeded with
//! * [`FromValue`] - typed extraction out of a [`Value`]
//! * [`Attributes`] - a fully resolved attribute mapping

/// Typed extraction from dynamic values.
pub mod from_value;
/// Interned identifiers.
pub mod name;
#[cfg(feature = "serde")]
mod serde_impls;
/// Successor arithmetic for sequence seeds.
pub mod succ;
/// Dynamic attribute values.
pub mod value;

pub use chrono::NaiveDate;
pub use from_value::{FromValue, ValueError};
pub use name::Name;
pub use succ::Successor;
pub use value::{Opaque, Value};

/// A resolved attribute mapping, keyed by attribute name.
///
/// Iteration follows definition order, but nothing in the engine depends on it.
pub type Attributes = indexmap::IndexMap<Name, Value>;

/// Builds an [`Attributes`] literal.
///
/// ```ignore
/// let attrs = attributes! { "name" => "Jane", "age" => 31 };
/// ```
#[macro_export]
macro_rules! attributes {
	() => {
		$crate::Attributes::new()
	};
	($($name:expr => $value:expr),+ $(,)?) => {{
		let mut attrs = $crate::Attributes::new();
		$(attrs.insert($crate::Name::new($name), $crate::Value::from($value));)+
		attrs
	}};
}
