//! Fixed-field record construction.
//!
//! The helpers in this module are what `#[derive(Forged)]` expands to; they are
//! public so hand-written [`Record`] impls read the same way.

use forge_primitives::{Attributes, FromValue, Value};

use super::{Extra, Mold};
use crate::error::ConstructError;

/// How a record type takes its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgStyle {
	/// By name.
	Named,
	/// In declared field order.
	Positional,
	/// Not declared; see [`NAMED_BY_DEFAULT`].
	Unspecified,
}

/// Whether records with [`ArgStyle::Unspecified`] are built by name.
///
/// Every Rust record can be built from named fields, so this is always true.
pub const NAMED_BY_DEFAULT: bool = true;

/// A record type with named, ordered fields.
pub trait Record: Sized {
	/// Field names in declaration order.
	const FIELDS: &'static [&'static str];
	const STYLE: ArgStyle = ArgStyle::Unspecified;

	fn from_named(fields: Attributes) -> Result<Self, ConstructError>;

	fn from_positional(values: Vec<Value>) -> Result<Self, ConstructError>;
}

/// Builds [`Record`] types.
///
/// In lax mode, attributes that are not fields of the record are dropped
/// before named construction instead of being rejected by the record.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordMold {
	lax: bool,
}

impl RecordMold {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn lax() -> Self {
		Self { lax: true }
	}

	pub fn is_lax(&self) -> bool {
		self.lax
	}
}

impl<T: Record> Mold<T> for RecordMold {
	fn call(&self, mut attributes: Attributes, _extra: &Extra) -> Result<T, ConstructError> {
		let named = match T::STYLE {
			ArgStyle::Named => true,
			ArgStyle::Positional => false,
			ArgStyle::Unspecified => NAMED_BY_DEFAULT,
		};
		if named {
			if self.lax {
				attributes.retain(|name, _| T::FIELDS.contains(&name.as_str()));
			}
			T::from_named(attributes)
		} else {
			let values = T::FIELDS
				.iter()
				.map(|field| attributes.swap_remove(*field).unwrap_or_default())
				.collect();
			T::from_positional(values)
		}
	}
}

/// Removes `field` from `fields` and converts it.
///
/// A missing field reads as nil, so optional fields may be omitted.
pub fn take_field<T: FromValue>(
	fields: &mut Attributes,
	field: &'static str,
) -> Result<T, ConstructError> {
	convert(fields.swap_remove(field), field)
}

/// Fails on the first attribute left over after every field was taken.
pub fn reject_extra(fields: &Attributes) -> Result<(), ConstructError> {
	match fields.keys().next() {
		Some(name) => Err(ConstructError::UnexpectedField { field: *name }),
		None => Ok(()),
	}
}

/// Positional field values, consumed in declaration order.
#[derive(Debug)]
pub struct Positional {
	values: std::vec::IntoIter<Value>,
}

impl Positional {
	/// Accepts at most `expected` values; missing trailing values read as nil.
	pub fn new(values: Vec<Value>, expected: usize) -> Result<Self, ConstructError> {
		if values.len() > expected {
			return Err(ConstructError::Arity {
				given: values.len(),
				expected,
			});
		}
		Ok(Self {
			values: values.into_iter(),
		})
	}

	pub fn next_field<T: FromValue>(&mut self, field: &'static str) -> Result<T, ConstructError> {
		convert(self.values.next(), field)
	}
}

fn convert<T: FromValue>(value: Option<Value>, field: &'static str) -> Result<T, ConstructError> {
	match value {
		Some(value) => T::from_value(value).map_err(|source| ConstructError::InvalidField { field, source }),
		None => T::from_value(Value::Nil).map_err(|_| ConstructError::MissingField { field }),
	}
}
