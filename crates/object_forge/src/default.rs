//! Process-wide default yard.
//!
//! The yard is created on first use and lives until the process exits. Tests
//! that depend on its contents should [`clear`](Forgeyard::clear) it first.

use std::sync::{Arc, LazyLock};

use forge_core::{DslError, Forge, ForgeDsl, ForgeRequest, Forged, Seed, Sequence, SequenceError};
use forge_primitives::Name;

use crate::yard::{Forgeyard, YardError};

static DEFAULT_YARD: LazyLock<Forgeyard> = LazyLock::new(Forgeyard::new);

/// Returns the default yard.
pub fn default_yard() -> &'static Forgeyard {
	&DEFAULT_YARD
}

/// Defines and registers a forge in the default yard.
pub fn define<T, F>(name: impl Into<Name>, block: F) -> Result<Arc<Forge<T>>, YardError>
where
	T: Forged,
	F: FnOnce(&mut ForgeDsl<T>) -> Result<(), DslError>,
{
	DEFAULT_YARD.define(name, block)
}

/// Builds an instance with a forge from the default yard.
pub fn forge<T: 'static>(name: &str, request: impl Into<ForgeRequest>) -> Result<T, YardError> {
	DEFAULT_YARD.build(name, request)
}

/// Alias of [`forge`].
pub fn build<T: 'static>(name: &str, request: impl Into<ForgeRequest>) -> Result<T, YardError> {
	forge(name, request)
}

/// Creates a sequence that can be shared between definitions.
pub fn sequence(seed: impl Into<Seed>) -> Result<Sequence, SequenceError> {
	Sequence::from_seed(seed)
}
