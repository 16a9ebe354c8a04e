use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use forge_primitives::{Attributes, Value};

use super::{Extra, Mold};
use crate::error::ConstructError;

/// Computes the value read for a missing key.
pub type DefaultFn = Arc<dyn Fn(&str) -> Value + Send + Sync>;

/// Associative containers built from a mapping.
///
/// Containers that have no notion of a default read keep the provided methods,
/// which fail with [`ConstructError::Unsupported`].
pub trait KeyedContainer: Sized {
	fn from_mapping(attributes: Attributes) -> Result<Self, ConstructError>;

	fn set_default(&mut self, _default: Value) -> Result<(), ConstructError> {
		Err(ConstructError::Unsupported {
			operation: "default value",
			target: std::any::type_name::<Self>(),
		})
	}

	fn set_default_fn(&mut self, _default_fn: DefaultFn) -> Result<(), ConstructError> {
		Err(ConstructError::Unsupported {
			operation: "default function",
			target: std::any::type_name::<Self>(),
		})
	}
}

impl KeyedContainer for Attributes {
	fn from_mapping(attributes: Attributes) -> Result<Self, ConstructError> {
		Ok(attributes)
	}
}

impl KeyedContainer for HashMap<String, Value> {
	fn from_mapping(attributes: Attributes) -> Result<Self, ConstructError> {
		Ok(attributes
			.into_iter()
			.map(|(k, v)| (k.as_str().to_string(), v))
			.collect())
	}
}

impl KeyedContainer for BTreeMap<String, Value> {
	fn from_mapping(attributes: Attributes) -> Result<Self, ConstructError> {
		Ok(attributes
			.into_iter()
			.map(|(k, v)| (k.as_str().to_string(), v))
			.collect())
	}
}

/// A mapping with a fallback for missing keys.
///
/// Setting a default value clears the default function and vice versa.
#[derive(Clone, Default)]
pub struct DefaultMap {
	entries: Attributes,
	default: Option<Value>,
	default_fn: Option<DefaultFn>,
}

impl DefaultMap {
	/// Returns the stored value, or the fallback for missing keys.
	pub fn get(&self, key: &str) -> Option<Value> {
		if let Some(value) = self.entries.get(key) {
			return Some(value.clone());
		}
		match (&self.default_fn, &self.default) {
			(Some(f), _) => Some(f(key)),
			(None, Some(default)) => Some(default.clone()),
			(None, None) => None,
		}
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	pub fn entries(&self) -> &Attributes {
		&self.entries
	}

	pub fn default_value(&self) -> Option<&Value> {
		self.default.as_ref()
	}

	pub fn has_default_fn(&self) -> bool {
		self.default_fn.is_some()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl fmt::Debug for DefaultMap {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DefaultMap")
			.field("entries", &self.entries)
			.field("default", &self.default)
			.field("default_fn", &self.default_fn.is_some())
			.finish()
	}
}

impl KeyedContainer for DefaultMap {
	fn from_mapping(attributes: Attributes) -> Result<Self, ConstructError> {
		Ok(Self {
			entries: attributes,
			..Self::default()
		})
	}

	fn set_default(&mut self, default: Value) -> Result<(), ConstructError> {
		self.default = Some(default);
		self.default_fn = None;
		Ok(())
	}

	fn set_default_fn(&mut self, default_fn: DefaultFn) -> Result<(), ConstructError> {
		self.default_fn = Some(default_fn);
		self.default = None;
		Ok(())
	}
}

/// Builds [`KeyedContainer`] types and attaches the configured defaults.
///
/// When both are configured the default function is attached last and wins.
#[derive(Clone, Default)]
pub struct KeyedMold {
	default: Option<Value>,
	default_fn: Option<DefaultFn>,
}

impl KeyedMold {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.default = Some(default.into());
		self
	}

	pub fn with_default_fn<F>(mut self, default_fn: F) -> Self
	where
		F: Fn(&str) -> Value + Send + Sync + 'static,
	{
		self.default_fn = Some(Arc::new(default_fn));
		self
	}
}

impl fmt::Debug for KeyedMold {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("KeyedMold")
			.field("default", &self.default)
			.field("default_fn", &self.default_fn.is_some())
			.finish()
	}
}

impl<T: KeyedContainer> Mold<T> for KeyedMold {
	fn call(&self, attributes: Attributes, _extra: &Extra) -> Result<T, ConstructError> {
		let mut container = T::from_mapping(attributes)?;
		if let Some(default) = &self.default {
			container.set_default(default.clone())?;
		}
		if let Some(default_fn) = &self.default_fn {
			container.set_default_fn(Arc::clone(default_fn))?;
		}
		Ok(container)
	}
}
