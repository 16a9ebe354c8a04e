use chrono::NaiveDate;
use indexmap::IndexMap;
use thiserror::Error;

use crate::{Name, Opaque, Value};

/// Error converting a [`Value`] into a concrete Rust type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
	#[error("expected {expected}, got {got}")]
	TypeMismatch {
		expected: &'static str,
		got: &'static str,
	},
	#[error("value {value} does not fit in {target}")]
	OutOfRange { value: i64, target: &'static str },
}

impl ValueError {
	fn mismatch(expected: &'static str, value: &Value) -> Self {
		Self::TypeMismatch {
			expected,
			got: value.type_name(),
		}
	}
}

/// Conversion from a [`Value`] into a concrete type.
///
/// Molds and the crucible's typed accessor use this to pull attributes out of
/// their dynamic representation.
pub trait FromValue: Sized {
	/// Converts `value`, consuming it.
	fn from_value(value: Value) -> Result<Self, ValueError>;
}

impl FromValue for Value {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		Ok(value)
	}
}

impl FromValue for bool {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		value
			.as_bool()
			.ok_or_else(|| ValueError::mismatch("bool", &value))
	}
}

impl FromValue for i64 {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		value
			.as_int()
			.ok_or_else(|| ValueError::mismatch("int", &value))
	}
}

macro_rules! impl_from_value_narrow {
	($($ty:ty),* $(,)?) => {
		$(
			impl FromValue for $ty {
				fn from_value(value: Value) -> Result<Self, ValueError> {
					let v = i64::from_value(value)?;
					<$ty>::try_from(v).map_err(|_| ValueError::OutOfRange {
						value: v,
						target: stringify!($ty),
					})
				}
			}
		)*
	};
}

impl_from_value_narrow!(i32, u32, u64, usize);

impl FromValue for f64 {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		value
			.as_float()
			.ok_or_else(|| ValueError::mismatch("float", &value))
	}
}

impl FromValue for String {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::Str(s) => Ok(s),
			Value::Sym(s) => Ok(s.as_str().to_string()),
			other => Err(ValueError::mismatch("string", &other)),
		}
	}
}

impl FromValue for Name {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::Sym(s) => Ok(s),
			Value::Str(s) => Ok(Name::new(&s)),
			other => Err(ValueError::mismatch("symbol", &other)),
		}
	}
}

impl FromValue for NaiveDate {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		value
			.as_date()
			.ok_or_else(|| ValueError::mismatch("date", &value))
	}
}

impl FromValue for Opaque {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::Opaque(o) => Ok(o),
			other => Err(ValueError::mismatch("opaque", &other)),
		}
	}
}

impl<T: FromValue> FromValue for Option<T> {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::Nil => Ok(None),
			other => T::from_value(other).map(Some),
		}
	}
}

impl<T: FromValue> FromValue for Vec<T> {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::List(items) => items.into_iter().map(T::from_value).collect(),
			other => Err(ValueError::mismatch("list", &other)),
		}
	}
}

impl FromValue for IndexMap<Name, Value> {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::Map(map) => Ok(map),
			other => Err(ValueError::mismatch("map", &other)),
		}
	}
}
