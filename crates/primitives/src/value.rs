use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::Name;

/// A dynamically typed attribute value.
///
/// Attribute computations produce `Value`s, overrides carry them, and molds
/// convert a map of them into the forged type. Anything that does not fit one
/// of the plain variants travels as an [`Opaque`] handle.
#[derive(Clone, Default)]
pub enum Value {
	/// Absence of a value.
	#[default]
	Nil,
	/// Boolean value.
	Bool(bool),
	/// Signed integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// Owned string.
	Str(String),
	/// Symbol-like identifier, e.g. an enum tag.
	Sym(Name),
	/// Calendar date.
	Date(NaiveDate),
	/// Ordered list of values.
	List(Vec<Value>),
	/// Nested mapping.
	Map(IndexMap<Name, Value>),
	/// Any other shareable Rust value.
	Opaque(Opaque),
}

impl Value {
	/// Creates a symbol value.
	pub fn sym(name: impl Into<Name>) -> Self {
		Self::Sym(name.into())
	}

	/// Wraps an arbitrary value.
	pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
		Self::Opaque(Opaque::new(value))
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Nil => "nil",
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::Str(_) => "string",
			Value::Sym(_) => "symbol",
			Value::Date(_) => "date",
			Value::List(_) => "list",
			Value::Map(_) => "map",
			Value::Opaque(o) => o.type_name(),
		}
	}

	/// Returns true for [`Value::Nil`].
	pub fn is_nil(&self) -> bool {
		matches!(self, Value::Nil)
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value, widening integers.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(*v),
			Value::Int(v) => Some(*v as f64),
			_ => None,
		}
	}

	/// Returns the text of a `Str` or `Sym` value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(v) => Some(v),
			Value::Sym(v) => Some(v.as_str()),
			_ => None,
		}
	}

	/// Returns the symbol if this is a `Sym` variant.
	pub fn as_sym(&self) -> Option<Name> {
		match self {
			Value::Sym(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the date if this is a `Date` variant.
	pub fn as_date(&self) -> Option<NaiveDate> {
		match self {
			Value::Date(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the elements if this is a `List` variant.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the entries if this is a `Map` variant.
	pub fn as_map(&self) -> Option<&IndexMap<Name, Value>> {
		match self {
			Value::Map(v) => Some(v),
			_ => None,
		}
	}

	/// Borrows the wrapped value of an `Opaque` variant as `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		match self {
			Value::Opaque(o) => o.downcast_ref(),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Nil, Value::Nil) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Int(a), Value::Int(b)) => a == b,
			(Value::Float(a), Value::Float(b)) => a == b,
			(Value::Str(a), Value::Str(b)) => a == b,
			(Value::Sym(a), Value::Sym(b)) => a == b,
			(Value::Date(a), Value::Date(b)) => a == b,
			(Value::List(a), Value::List(b)) => a == b,
			(Value::Map(a), Value::Map(b)) => a == b,
			(Value::Opaque(a), Value::Opaque(b)) => a.ptr_eq(b),
			_ => false,
		}
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Nil => f.write_str("nil"),
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v:?}"),
			Value::Str(v) => write!(f, "{v:?}"),
			Value::Sym(v) => write!(f, "{v:?}"),
			Value::Date(v) => write!(f, "{v}"),
			Value::List(v) => f.debug_list().entries(v).finish(),
			Value::Map(v) => f.debug_map().entries(v).finish(),
			Value::Opaque(v) => write!(f, "{v:?}"),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Nil => Ok(()),
			Value::Str(v) => f.write_str(v),
			Value::Sym(v) => f.write_str(v.as_str()),
			other => write!(f, "{other:?}"),
		}
	}
}

/// A type-erased, shareable value carried inside [`Value::Opaque`].
///
/// Equality is identity: two handles are equal only if they point at the same
/// allocation.
#[derive(Clone)]
pub struct Opaque {
	inner: Arc<dyn Any + Send + Sync>,
	type_name: &'static str,
}

impl Opaque {
	/// Wraps `value`.
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self {
			inner: Arc::new(value),
			type_name: std::any::type_name::<T>(),
		}
	}

	/// Returns the Rust type name of the wrapped value.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Borrows the wrapped value as `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.inner.downcast_ref()
	}

	/// Returns a shared handle to the wrapped value as `T`.
	pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		Arc::clone(&self.inner).downcast().ok()
	}

	/// Returns true if both handles share one allocation.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl fmt::Debug for Opaque {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#<{}>", self.type_name)
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(v.into())
	}
}

impl From<u32> for Value {
	fn from(v: u32) -> Self {
		Value::Int(v.into())
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Str(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Str(v)
	}
}

impl From<Name> for Value {
	fn from(v: Name) -> Self {
		Value::Sym(v)
	}
}

impl From<NaiveDate> for Value {
	fn from(v: NaiveDate) -> Self {
		Value::Date(v)
	}
}

impl From<Opaque> for Value {
	fn from(v: Opaque) -> Self {
		Value::Opaque(v)
	}
}

impl From<IndexMap<Name, Value>> for Value {
	fn from(v: IndexMap<Name, Value>) -> Self {
		Value::Map(v)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(v: Vec<T>) -> Self {
		Value::List(v.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map_or(Value::Nil, Into::into)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_opaque_equality_is_identity() {
		let a = Value::opaque(vec![1u8, 2, 3]);
		let b = a.clone();
		let c = Value::opaque(vec![1u8, 2, 3]);
		assert_eq!(a, b);
		assert_ne!(a, c);
		assert_eq!(a.downcast_ref::<Vec<u8>>(), Some(&vec![1, 2, 3]));
	}

	#[test]
	fn test_option_and_vec_conversions() {
		assert_eq!(Value::from(None::<i64>), Value::Nil);
		assert_eq!(Value::from(Some("x")), Value::Str("x".into()));
		assert_eq!(
			Value::from(vec![1, 2]),
			Value::List(vec![Value::Int(1), Value::Int(2)])
		);
	}

	#[test]
	fn test_debug_formatting() {
		let mut map = IndexMap::new();
		map.insert(Name::new("kind"), Value::sym("baz"));
		map.insert(Name::new("label"), Value::from("x"));
		assert_eq!(format!("{:?}", Value::Map(map)), r#"{:kind: :baz, :label: "x"}"#);
	}

	#[test]
	fn test_as_str_covers_symbols() {
		assert_eq!(Value::sym("admin").as_str(), Some("admin"));
		assert_eq!(Value::from("admin").as_sym(), None);
		assert_eq!(Value::Int(3).as_float(), Some(3.0));
	}
}
