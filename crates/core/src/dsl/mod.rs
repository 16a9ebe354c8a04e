//! Definition surface for forges.
//!
//! # Role
//!
//! [`ForgeDsl`] records attribute computations, traits, sequences and an
//! optional mold during one definition block, then freezes.
//!
//! # Invariants
//!
//! - Inside a [`ForgeDsl::trait_`] block every definition lands in that trait.
//! - Traits do not nest.
//! - A sequence name maps to one counter for the whole definition. Later
//!   `sequence` calls with the same name reuse it and ignore their seed.
//! - Once frozen, every structural call fails with [`DslError::Frozen`].

use std::fmt;
use std::sync::Arc;

use forge_primitives::{Name, Value};
use indexmap::IndexMap;

use crate::attribute::{AttributeSet, Computation};
use crate::crucible::Crucible;
use crate::error::{DslError, ForgeError};
use crate::molds::{Mold, SharedMold, WrappedMold};
use crate::sequence::{Seed, Sequence};

/// Post-processes a sequence value inside the build's crucible.
pub type Transform = Arc<dyn Fn(Value, &Crucible) -> Result<Value, ForgeError> + Send + Sync>;

/// Names the shorthand refuses because they collide with definition or
/// resolution operations.
const DENY_LIST: &[&str] = &[
	"attr",
	"attribute",
	"class",
	"define",
	"fetch",
	"freeze",
	"get",
	"hash",
	"inspect",
	"mold",
	"mold_type",
	"rand",
	"rng",
	"sequence",
	"sequence_with",
	"to_s",
	"trait",
	"trait_",
	"value",
];

/// Accumulates a forge definition.
pub struct ForgeDsl<T> {
	attributes: AttributeSet,
	sequences: IndexMap<Name, Sequence>,
	traits: IndexMap<Name, AttributeSet>,
	mold: Option<SharedMold<T>>,
	current_trait: Option<Name>,
	frozen: bool,
}

impl<T> ForgeDsl<T> {
	/// Runs `block` against a fresh definition and freezes it.
	///
	/// ```ignore
	/// let dsl = ForgeDsl::<Attributes>::define(|f| {
	///     f.attr("name", |_| Ok("Jane".into()))?;
	///     f.sequence("id", 1)?;
	///     f.trait_("admin", |f| {
	///         f.value("role", Value::sym("admin"))?;
	///         Ok(())
	///     })?;
	///     Ok(())
	/// })?;
	/// ```
	pub fn define<F>(block: F) -> Result<Self, DslError>
	where
		F: FnOnce(&mut Self) -> Result<(), DslError>,
	{
		let mut dsl = Self {
			attributes: AttributeSet::new(),
			sequences: IndexMap::new(),
			traits: IndexMap::new(),
			mold: None,
			current_trait: None,
			frozen: false,
		};
		block(&mut dsl)?;
		dsl.frozen = true;
		Ok(dsl)
	}

	/// Defines an attribute under any valid name.
	///
	/// This is the escape hatch for names [`attr`](Self::attr) refuses.
	pub fn attribute<F>(&mut self, name: &str, f: F) -> Result<&mut Self, DslError>
	where
		F: Fn(&Crucible) -> Result<Value, ForgeError> + Send + Sync + 'static,
	{
		let name = self.open_name("attribute", name)?;
		self.scope().insert_deferred(name, Arc::new(f));
		Ok(self)
	}

	/// Defines an attribute, refusing reserved names.
	///
	/// Reserved are names ending in `?`, `!` or `=`, names starting with a
	/// non-word ASCII character, and the names of definition and resolution
	/// operations such as `sequence`, `get` or `rand`.
	pub fn attr<F>(&mut self, name: &str, f: F) -> Result<&mut Self, DslError>
	where
		F: Fn(&Crucible) -> Result<Value, ForgeError> + Send + Sync + 'static,
	{
		self.ensure_open("define", name)?;
		if is_reserved(name) {
			return Err(DslError::ReservedName {
				name: name.to_string(),
			});
		}
		self.attribute(name, f)
	}

	/// Defines an attribute with a constant value.
	pub fn value(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self, DslError> {
		let name = self.open_name("attribute", name)?;
		self.scope().insert_value(name, value);
		Ok(self)
	}

	/// Defines an attribute backed by a sequence.
	///
	/// The first call for `name` creates the sequence from `seed`, or adopts
	/// `seed` if it already is a [`Sequence`]. Later calls reuse that sequence.
	pub fn sequence(&mut self, name: &str, seed: impl Into<Seed>) -> Result<&mut Self, DslError> {
		let name = self.open_name("sequence", name)?;
		let sequence = self.sequence_for(name, seed.into())?;
		self.scope()
			.insert_deferred(name, sequence_computation(name, sequence, None));
		Ok(self)
	}

	/// Like [`sequence`](Self::sequence), passing each value through `transform`.
	///
	/// The transform runs inside the build's crucible and may read other
	/// attributes.
	pub fn sequence_with<F>(
		&mut self,
		name: &str,
		seed: impl Into<Seed>,
		transform: F,
	) -> Result<&mut Self, DslError>
	where
		F: Fn(Value, &Crucible) -> Result<Value, ForgeError> + Send + Sync + 'static,
	{
		let name = self.open_name("sequence", name)?;
		let sequence = self.sequence_for(name, seed.into())?;
		self.scope().insert_deferred(
			name,
			sequence_computation(name, sequence, Some(Arc::new(transform))),
		);
		Ok(self)
	}

	/// Defines a trait; definitions made inside `block` belong to it.
	///
	/// Redefining a trait replaces it.
	pub fn trait_<F>(&mut self, name: &str, block: F) -> Result<&mut Self, DslError>
	where
		F: FnOnce(&mut Self) -> Result<(), DslError>,
	{
		let name = self.open_name("trait", name)?;
		if let Some(outer) = self.current_trait {
			return Err(DslError::NestedTrait { name, outer });
		}

		self.traits.insert(name, AttributeSet::new());
		self.current_trait = Some(name);
		let result = block(self);
		self.current_trait = None;
		result.map(|()| self)
	}

	/// Sets the mold used to build instances. It can be set once.
	pub fn mold(&mut self, mold: impl Mold<T> + Send + Sync + 'static) -> Result<&mut Self, DslError> {
		self.ensure_open("set", "mold")?;
		if self.mold.is_some() {
			return Err(DslError::MoldAlreadySet);
		}
		self.mold = Some(Arc::new(mold));
		Ok(self)
	}

	/// Sets a mold type that is instantiated afresh for every build.
	pub fn mold_type<M>(&mut self) -> Result<&mut Self, DslError>
	where
		M: Mold<T> + Default + 'static,
		T: 'static,
	{
		self.mold(WrappedMold::<M>::new())
	}

	/// Root attributes.
	pub fn attributes(&self) -> &AttributeSet {
		&self.attributes
	}

	/// Sequences by name.
	pub fn sequences(&self) -> &IndexMap<Name, Sequence> {
		&self.sequences
	}

	/// Traits by name.
	pub fn traits(&self) -> &IndexMap<Name, AttributeSet> {
		&self.traits
	}

	pub fn is_frozen(&self) -> bool {
		self.frozen
	}

	pub(crate) fn into_parts(
		self,
	) -> (
		AttributeSet,
		IndexMap<Name, Sequence>,
		IndexMap<Name, AttributeSet>,
		Option<SharedMold<T>>,
	) {
		(self.attributes, self.sequences, self.traits, self.mold)
	}

	fn ensure_open(&self, operation: &'static str, name: &str) -> Result<(), DslError> {
		if self.frozen {
			return Err(DslError::Frozen {
				operation,
				name: name.to_string(),
			});
		}
		Ok(())
	}

	fn open_name(&self, kind: &'static str, name: &str) -> Result<Name, DslError> {
		self.ensure_open("define", name)?;
		if !is_valid_name(name) {
			return Err(DslError::InvalidName {
				kind,
				name: name.to_string(),
			});
		}
		Ok(Name::new(name))
	}

	fn scope(&mut self) -> &mut AttributeSet {
		match self.current_trait.and_then(|name| self.traits.get_mut(&name)) {
			Some(set) => set,
			None => &mut self.attributes,
		}
	}

	fn sequence_for(&mut self, name: Name, seed: Seed) -> Result<Sequence, DslError> {
		if let Some(existing) = self.sequences.get(&name) {
			return Ok(existing.clone());
		}
		let sequence =
			Sequence::from_seed(seed).map_err(|source| DslError::Sequence { name, source })?;
		self.sequences.insert(name, sequence.clone());
		Ok(sequence)
	}
}

impl<T> fmt::Debug for ForgeDsl<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let traits: IndexMap<Name, Vec<Name>> = self
			.traits
			.iter()
			.map(|(name, set)| (*name, set.names().collect()))
			.collect();
		f.debug_struct("ForgeDsl")
			.field("attributes", &self.attributes.names().collect::<Vec<_>>())
			.field("sequences", &self.sequences.keys().collect::<Vec<_>>())
			.field("traits", &traits)
			.field("frozen", &self.frozen)
			.finish()
	}
}

fn is_valid_name(name: &str) -> bool {
	!name.is_empty() && !name.chars().any(|c| c.is_whitespace() || c.is_control())
}

fn is_reserved(name: &str) -> bool {
	name.ends_with(['?', '!', '='])
		|| name
			.chars()
			.next()
			.is_some_and(|c| c.is_ascii() && !(c.is_ascii_alphanumeric() || c == '_'))
		|| DENY_LIST.contains(&name)
}

fn sequence_computation(name: Name, sequence: Sequence, transform: Option<Transform>) -> Computation {
	Arc::new(move |crucible: &Crucible| -> Result<Value, ForgeError> {
		let value = sequence
			.succ()
			.map_err(|source| ForgeError::Sequence { name, source })?;
		match &transform {
			Some(transform) => transform(value, crucible),
			None => Ok(value),
		}
	})
}
