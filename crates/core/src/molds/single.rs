use forge_primitives::{Attributes, Value};

use super::{Extra, Mold};
use crate::error::ConstructError;

/// Types constructed from the whole attribute mapping as one argument.
pub trait FromAttributes: Sized {
	fn from_attributes(attributes: Attributes) -> Result<Self, ConstructError>;
}

impl FromAttributes for Attributes {
	fn from_attributes(attributes: Attributes) -> Result<Self, ConstructError> {
		Ok(attributes)
	}
}

impl FromAttributes for Value {
	fn from_attributes(attributes: Attributes) -> Result<Self, ConstructError> {
		Ok(Value::Map(attributes))
	}
}

/// Passes the mapping to [`FromAttributes::from_attributes`].
///
/// This is what a forge falls back to for types without a more specific shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleArgumentMold;

impl<T: FromAttributes> Mold<T> for SingleArgumentMold {
	fn call(&self, attributes: Attributes, _extra: &Extra) -> Result<T, ConstructError> {
		T::from_attributes(attributes)
	}
}
