//! Build orchestration.
//!
//! # Role
//!
//! A [`Forge`] owns one frozen definition and a mold. Every build merges the
//! root attributes with the requested traits and overrides into a private
//! working copy, resolves it in a fresh [`Crucible`] and molds the result.
//!
//! # Invariants
//!
//! - Merge order is root, then traits left to right, then overrides.
//! - Unknown trait names contribute nothing.
//! - Builds never mutate the definition, so one forge may build from many
//!   threads at once.

use std::fmt;

use forge_primitives::{Attributes, Name, Value};
use indexmap::IndexMap;

use crate::attribute::AttributeSet;
use crate::crucible::Crucible;
use crate::dsl::ForgeDsl;
use crate::error::{DslError, ForgeError};
use crate::molds::{AutoMold, Extra, Forged, Mold, SharedMold};
use crate::request::ForgeRequest;
use crate::sequence::Sequence;

/// Builds instances of `T` from a frozen definition.
pub struct Forge<T> {
	name: Option<Name>,
	attributes: AttributeSet,
	sequences: IndexMap<Name, Sequence>,
	traits: IndexMap<Name, AttributeSet>,
	mold: SharedMold<T>,
}

impl<T: 'static> Forge<T> {
	/// Defines a forge for a type that declares its shape.
	///
	/// Without a mold set in the definition, the mold is picked by
	/// [`AutoMold`] from [`Forged::shape`] rather than defaulting to
	/// [`SingleArgumentMold`](crate::molds::SingleArgumentMold). A
	/// [`FromAttributes`](crate::molds::FromAttributes) type that wants the whole
	/// mapping as one argument declares [`Shape::single`](crate::Shape::single).
	pub fn define<F>(block: F) -> Result<Self, DslError>
	where
		T: Forged,
		F: FnOnce(&mut ForgeDsl<T>) -> Result<(), DslError>,
	{
		ForgeDsl::define(block).map(Self::from_dsl)
	}

	/// Creates a forge from a frozen definition.
	///
	/// The default mold follows [`Forged::shape`], as in [`Forge::define`].
	/// Use [`Forge::from_dsl_or`] to fall back to a specific mold instead.
	pub fn from_dsl(dsl: ForgeDsl<T>) -> Self
	where
		T: Forged,
	{
		let (attributes, sequences, traits, mold) = dsl.into_parts();
		Self {
			name: None,
			attributes,
			sequences,
			traits,
			mold: mold.unwrap_or_else(AutoMold::detect::<T>),
		}
	}

	/// Creates a forge that falls back to `fallback` if the definition did not
	/// set a mold.
	pub fn from_dsl_or(dsl: ForgeDsl<T>, fallback: impl Mold<T> + Send + Sync + 'static) -> Self {
		let (attributes, sequences, traits, mold) = dsl.into_parts();
		Self {
			name: None,
			attributes,
			sequences,
			traits,
			mold: mold.unwrap_or_else(|| std::sync::Arc::new(fallback)),
		}
	}

	/// Names the forge. The name is passed to molds as `forge`.
	pub fn named(mut self, name: impl Into<Name>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn name(&self) -> Option<Name> {
		self.name
	}

	pub fn attributes(&self) -> &AttributeSet {
		&self.attributes
	}

	pub fn sequences(&self) -> &IndexMap<Name, Sequence> {
		&self.sequences
	}

	pub fn traits(&self) -> &IndexMap<Name, AttributeSet> {
		&self.traits
	}

	/// Builds an instance.
	///
	/// Construction errors raised by the mold are returned as
	/// [`ForgeError::Construct`] without further wrapping.
	pub fn forge(&self, request: impl Into<ForgeRequest>) -> Result<T, ForgeError> {
		let request = request.into();
		tracing::debug!(
			forge = ?self.name,
			traits = request.traits().len(),
			overrides = request.overrides().len(),
			"forging"
		);
		let attributes = Crucible::new(self.merge(&request)).into_attributes()?;
		let extra = Extra::new()
			.with("forge", self.name.map_or(Value::Nil, Value::Sym))
			.with(
				"traits",
				Value::List(request.traits().iter().copied().map(Value::Sym).collect()),
			);
		Ok(self.mold.call(attributes, &extra)?)
	}

	/// Builds an instance and lets `adjust` modify it before returning it.
	pub fn forge_with<F>(&self, request: impl Into<ForgeRequest>, adjust: F) -> Result<T, ForgeError>
	where
		F: FnOnce(&mut T),
	{
		let mut instance = self.forge(request)?;
		adjust(&mut instance);
		Ok(instance)
	}

	/// Resolves the attributes a build would use, without molding them.
	pub fn attributes_for(&self, request: impl Into<ForgeRequest>) -> Result<Attributes, ForgeError> {
		Crucible::new(self.merge(&request.into())).into_attributes()
	}

	/// Merges root attributes, requested traits and overrides into a new set.
	pub fn merge(&self, request: &ForgeRequest) -> AttributeSet {
		let mut merged = self.attributes.clone();
		for name in request.traits() {
			match self.traits.get(name) {
				Some(set) => merged.overlay(set),
				None => tracing::debug!(forge = ?self.name, trait_name = %name, "unknown trait skipped"),
			}
		}
		merged.overlay(request.overrides());
		merged
	}
}

impl<T> fmt::Debug for Forge<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Forge")
			.field("name", &self.name)
			.field("target", &std::any::type_name::<T>())
			.field("attributes", &self.attributes.names().collect::<Vec<_>>())
			.field("traits", &self.traits.keys().collect::<Vec<_>>())
			.finish()
	}
}
