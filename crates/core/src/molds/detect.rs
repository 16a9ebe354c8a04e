use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use forge_primitives::{Attributes, Value};

use super::{
	Extra, FromAttributes, FromKeywords, KeyedContainer, KeyedMold, KeywordsMold, Mold, Record,
	RecordMold, SharedMold, SingleArgumentMold,
};
use crate::error::ConstructError;

/// The construction pattern a type declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
	/// Fixed, ordered fields.
	Record,
	/// Fixed fields without order, taken by name.
	Keywords,
	/// Associative container.
	Keyed,
	/// Anything else: the mapping as one argument.
	Single,
}

/// A declared shape together with the mold that builds it.
pub struct Shape<T> {
	kind: ShapeKind,
	mold: SharedMold<T>,
}

impl<T: 'static> Shape<T> {
	/// A custom mold for a shape.
	pub fn new(kind: ShapeKind, mold: impl Mold<T> + Send + Sync + 'static) -> Self {
		Self {
			kind,
			mold: Arc::new(mold),
		}
	}

	pub fn record() -> Self
	where
		T: Record,
	{
		Self::new(ShapeKind::Record, RecordMold::new())
	}

	/// A record that drops attributes it has no field for.
	pub fn record_lax() -> Self
	where
		T: Record,
	{
		Self::new(ShapeKind::Record, RecordMold::lax())
	}

	pub fn keywords() -> Self
	where
		T: FromKeywords,
	{
		Self::new(ShapeKind::Keywords, KeywordsMold)
	}

	pub fn keyed() -> Self
	where
		T: KeyedContainer,
	{
		Self::new(ShapeKind::Keyed, KeyedMold::new())
	}

	pub fn single() -> Self
	where
		T: FromAttributes,
	{
		Self::new(ShapeKind::Single, SingleArgumentMold)
	}

	pub fn kind(&self) -> ShapeKind {
		self.kind
	}

	pub fn into_mold(self) -> SharedMold<T> {
		self.mold
	}
}

impl<T> fmt::Debug for Shape<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Shape").field(&self.kind).finish()
	}
}

/// Types that declare how they are forged.
///
/// Implemented by `#[derive(Forged)]` for records, and in this crate for the
/// standard mapping types.
pub trait Forged: Sized + 'static {
	fn shape() -> Shape<Self>;
}

impl Forged for Attributes {
	fn shape() -> Shape<Self> {
		Shape::keyed()
	}
}

impl Forged for HashMap<String, Value> {
	fn shape() -> Shape<Self> {
		Shape::keyed()
	}
}

impl Forged for BTreeMap<String, Value> {
	fn shape() -> Shape<Self> {
		Shape::keyed()
	}
}

impl Forged for super::DefaultMap {
	fn shape() -> Shape<Self> {
		Shape::keyed()
	}
}

impl Forged for Value {
	fn shape() -> Shape<Self> {
		Shape::single()
	}
}

/// Picks a mold from the shape a type declares.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoMold;

impl AutoMold {
	/// Returns the mold for `T`.
	pub fn detect<T: Forged>() -> SharedMold<T> {
		let shape = T::shape();
		tracing::trace!(
			target_type = std::any::type_name::<T>(),
			kind = ?shape.kind,
			"detected mold"
		);
		shape.mold
	}
}

impl<T: Forged> Mold<T> for AutoMold {
	fn call(&self, attributes: Attributes, extra: &Extra) -> Result<T, ConstructError> {
		Self::detect::<T>().call(attributes, extra)
	}
}
