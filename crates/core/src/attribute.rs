use std::fmt;
use std::sync::Arc;

use forge_primitives::{Attributes, Name, Value};
use indexmap::IndexMap;

use crate::crucible::Crucible;
use crate::error::ForgeError;

/// A deferred attribute computation.
///
/// Computations read other attributes through the [`Crucible`] they are
/// evaluated in. They are shared between the definition and every build, so
/// they must not rely on being called only once; the crucible guarantees at
/// most one call per build.
pub type Computation = Arc<dyn Fn(&Crucible) -> Result<Value, ForgeError> + Send + Sync>;

/// One entry of an [`AttributeSet`].
#[derive(Clone)]
pub enum Entry {
	/// Computed lazily during resolution.
	Deferred(Computation),
	/// Used as-is.
	Value(Value),
}

impl fmt::Debug for Entry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Entry::Deferred(_) => f.write_str("<deferred>"),
			Entry::Value(v) => write!(f, "{v:?}"),
		}
	}
}

/// Attribute name to computation or literal value.
///
/// Cloning copies the map and shares the computations, so overlaying a clone
/// never touches the original.
#[derive(Clone, Default, Debug)]
pub struct AttributeSet {
	entries: IndexMap<Name, Entry>,
}

impl AttributeSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a literal value, replacing any previous entry.
	pub fn insert_value(&mut self, name: impl Into<Name>, value: impl Into<Value>) {
		self.entries.insert(name.into(), Entry::Value(value.into()));
	}

	/// Inserts a computation, replacing any previous entry.
	pub fn insert_deferred(&mut self, name: impl Into<Name>, computation: Computation) {
		self.entries.insert(name.into(), Entry::Deferred(computation));
	}

	/// Builder form of [`insert_value`](Self::insert_value).
	pub fn with(mut self, name: impl Into<Name>, value: impl Into<Value>) -> Self {
		self.insert_value(name, value);
		self
	}

	/// Builder form of [`insert_deferred`](Self::insert_deferred).
	pub fn with_fn<F>(mut self, name: impl Into<Name>, f: F) -> Self
	where
		F: Fn(&Crucible) -> Result<Value, ForgeError> + Send + Sync + 'static,
	{
		self.insert_deferred(name, Arc::new(f));
		self
	}

	/// Copies every entry of `other` over this set; `other` wins on conflicts.
	pub fn overlay(&mut self, other: &AttributeSet) {
		for (name, entry) in &other.entries {
			self.entries.insert(*name, entry.clone());
		}
	}

	pub fn get(&self, name: &str) -> Option<&Entry> {
		self.entries.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Attribute names in definition order.
	pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
		self.entries.keys().copied()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (Name, &Entry)> {
		self.entries.iter().map(|(k, v)| (*k, v))
	}

	pub(crate) fn into_entries(self) -> IndexMap<Name, Entry> {
		self.entries
	}
}

impl From<Attributes> for AttributeSet {
	fn from(attrs: Attributes) -> Self {
		attrs.into_iter().collect()
	}
}

impl FromIterator<(Name, Value)> for AttributeSet {
	fn from_iter<I: IntoIterator<Item = (Name, Value)>>(iter: I) -> Self {
		Self {
			entries: iter
				.into_iter()
				.map(|(name, value)| (name, Entry::Value(value)))
				.collect(),
		}
	}
}

impl FromIterator<(Name, Entry)> for AttributeSet {
	fn from_iter<I: IntoIterator<Item = (Name, Entry)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}
