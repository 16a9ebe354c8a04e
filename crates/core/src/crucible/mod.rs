//! Lazy, memoizing attribute resolver.
//!
//! # Role
//!
//! A [`Crucible`] owns the working copy of one build's merged attributes and
//! evaluates every deferred computation at most once. Computations receive
//! `&Crucible` and read other attributes through [`Crucible::get`], which
//! resolves them on demand.
//!
//! # Invariants
//!
//! - Each computation runs at most once per crucible; its result replaces it.
//! - A computation that reads another attribute always sees it fully resolved.
//! - Re-entering an attribute that is still being computed fails with
//!   [`ForgeError::CyclicReference`] instead of recursing.
//! - One crucible serves one build. It is deliberately `!Sync`.

use std::cell::RefCell;
use std::fmt;

use forge_primitives::{Attributes, FromValue, Name, Value};
use indexmap::IndexMap;
use rand::rngs::ThreadRng;

use crate::attribute::{AttributeSet, Computation, Entry};
use crate::error::ForgeError;

enum Slot {
	Pending(Computation),
	InProgress,
	Done(Value),
}

/// Resolution context for one build.
pub struct Crucible {
	slots: RefCell<IndexMap<Name, Slot>>,
}

impl Crucible {
	/// Takes ownership of a merged attribute set.
	pub fn new(attributes: AttributeSet) -> Self {
		let slots = attributes
			.into_entries()
			.into_iter()
			.map(|(name, entry)| {
				let slot = match entry {
					Entry::Deferred(computation) => Slot::Pending(computation),
					Entry::Value(value) => Slot::Done(value),
				};
				(name, slot)
			})
			.collect();
		Self {
			slots: RefCell::new(slots),
		}
	}

	/// Returns the value of attribute `name`, computing it if needed.
	///
	/// Fails with [`ForgeError::UnresolvedReference`] if no attribute has that
	/// name.
	pub fn get(&self, name: &str) -> Result<Value, ForgeError> {
		self.resolve_entry(name).map(|(_, value)| value)
	}

	/// Returns the value of attribute `name` converted to `T`.
	pub fn fetch<T: FromValue>(&self, name: &str) -> Result<T, ForgeError> {
		let (name, value) = self.resolve_entry(name)?;
		T::from_value(value).map_err(|source| ForgeError::TypeMismatch { name, source })
	}

	/// Thread-local random number generator for attribute authors.
	pub fn rng(&self) -> ThreadRng {
		rand::thread_rng()
	}

	/// Resolves every attribute and returns the result.
	///
	/// Calling this again returns the same mapping without recomputing.
	pub fn resolve(&self) -> Result<Attributes, ForgeError> {
		let names: Vec<Name> = self.slots.borrow().keys().copied().collect();
		names
			.into_iter()
			.map(|name| self.resolve_entry(name.as_str()))
			.collect()
	}

	/// Resolves every attribute, consuming the crucible.
	pub fn into_attributes(self) -> Result<Attributes, ForgeError> {
		self.resolve()
	}

	fn resolve_entry(&self, name: &str) -> Result<(Name, Value), ForgeError> {
		let (key, computation) = {
			let mut slots = self.slots.borrow_mut();
			let Some((_, key, slot)) = slots.get_full_mut(name) else {
				return Err(ForgeError::UnresolvedReference {
					name: name.to_string(),
				});
			};
			let key = *key;
			match std::mem::replace(slot, Slot::InProgress) {
				Slot::Done(value) => {
					*slot = Slot::Done(value.clone());
					return Ok((key, value));
				}
				Slot::InProgress => return Err(ForgeError::CyclicReference { name: key }),
				Slot::Pending(computation) => (key, computation),
			}
		};

		tracing::trace!(attribute = %key, "computing attribute");
		let result = computation(self);

		let mut slots = self.slots.borrow_mut();
		if let Some(slot) = slots.get_mut(name) {
			*slot = match &result {
				Ok(value) => Slot::Done(value.clone()),
				Err(_) => Slot::Pending(computation),
			};
		}
		result.map(|value| (key, value))
	}
}

impl fmt::Debug for Crucible {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let slots = self.slots.borrow();
		let mut map = f.debug_map();
		for (name, slot) in slots.iter() {
			match slot {
				Slot::Done(value) => map.entry(name, value),
				Slot::Pending(_) => map.entry(name, &format_args!("<pending>")),
				Slot::InProgress => map.entry(name, &format_args!("<in progress>")),
			};
		}
		map.finish()
	}
}
