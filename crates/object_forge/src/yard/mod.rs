//! Named forge registry.
//!
//! # Role
//!
//! A [`Forgeyard`] maps names to forges of any target type. Readers load an
//! immutable snapshot; writers publish a new map with a CAS loop.
//!
//! # Invariants
//!
//! - The first forge registered under a name wins. Every later registration,
//!   concurrent or not, gets that same forge back.
//! - Lookups never block registrations.

use std::any::Any;
use std::sync::Arc;

use arc_swap::ArcSwap;
use forge_core::{DslError, Forge, ForgeDsl, ForgeError, ForgeRequest, Forged};
use forge_primitives::Name;
use rustc_hash::FxHashMap;
use thiserror::Error;

type Entry = Arc<dyn Any + Send + Sync>;

/// Errors raised by a [`Forgeyard`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum YardError {
	#[error("no forge named {name:?}")]
	NotFound { name: String },
	#[error("forge {name:?} does not build {expected}")]
	TypeMismatch { name: Name, expected: &'static str },
	#[error(transparent)]
	Definition(#[from] DslError),
	#[error(transparent)]
	Forge(#[from] ForgeError),
}

/// A concurrent name to forge store.
pub struct Forgeyard {
	forges: ArcSwap<FxHashMap<Name, Entry>>,
}

impl Forgeyard {
	pub fn new() -> Self {
		Self {
			forges: ArcSwap::from_pointee(FxHashMap::default()),
		}
	}

	/// Registers `forge` under `name` unless the name is taken.
	///
	/// Returns the forge that ends up registered, which is the earlier one on a
	/// collision. Fails with [`YardError::TypeMismatch`] if that earlier forge
	/// builds a different type.
	pub fn register<T: 'static>(
		&self,
		name: impl Into<Name>,
		forge: Forge<T>,
	) -> Result<Arc<Forge<T>>, YardError> {
		let name = name.into();
		let candidate: Entry = Arc::new(forge);

		loop {
			let cur = self.forges.load_full();
			if let Some(existing) = cur.get(&name) {
				tracing::debug!(forge = %name, "forge already registered, keeping the first");
				return downcast(name, Arc::clone(existing));
			}

			let mut next = FxHashMap::clone(&cur);
			next.insert(name, Arc::clone(&candidate));
			let prev = self.forges.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				tracing::debug!(forge = %name, "registered forge");
				return downcast(name, candidate);
			}
		}
	}

	/// Defines a forge, names it and registers it.
	pub fn define<T, F>(&self, name: impl Into<Name>, block: F) -> Result<Arc<Forge<T>>, YardError>
	where
		T: Forged,
		F: FnOnce(&mut ForgeDsl<T>) -> Result<(), DslError>,
	{
		let name = name.into();
		let forge = Forge::define(block)?.named(name);
		self.register(name, forge)
	}

	/// Returns the forge registered under `name`.
	pub fn lookup<T: 'static>(&self, name: &str) -> Result<Arc<Forge<T>>, YardError> {
		let snapshot = self.forges.load();
		let Some((name, entry)) = snapshot.get_key_value(name) else {
			return Err(YardError::NotFound {
				name: name.to_string(),
			});
		};
		downcast(*name, Arc::clone(entry))
	}

	/// Builds an instance with the forge registered under `name`.
	pub fn build<T: 'static>(
		&self,
		name: &str,
		request: impl Into<ForgeRequest>,
	) -> Result<T, YardError> {
		Ok(self.lookup::<T>(name)?.forge(request)?)
	}

	/// Alias of [`Forgeyard::build`].
	pub fn forge<T: 'static>(
		&self,
		name: &str,
		request: impl Into<ForgeRequest>,
	) -> Result<T, YardError> {
		self.build(name, request)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.forges.load().contains_key(name)
	}

	/// Registered names, sorted.
	pub fn names(&self) -> Vec<Name> {
		let mut names: Vec<Name> = self.forges.load().keys().copied().collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.forges.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.forges.load().is_empty()
	}

	/// Removes every forge.
	pub fn clear(&self) {
		self.forges.store(Arc::new(FxHashMap::default()));
	}
}

impl Default for Forgeyard {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Forgeyard {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Forgeyard")
			.field("forges", &self.names())
			.finish()
	}
}

fn downcast<T: 'static>(name: Name, entry: Entry) -> Result<Arc<Forge<T>>, YardError> {
	entry
		.downcast::<Forge<T>>()
		.map_err(|_| YardError::TypeMismatch {
			name,
			expected: std::any::type_name::<T>(),
		})
}
