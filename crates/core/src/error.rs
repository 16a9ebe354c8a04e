//! Error taxonomy.
//!
//! Each phase of a forge's life has its own error type:
//!
//! * [`DslError`] - raised while a definition block runs
//! * [`SequenceError`] - seeding or advancing a [`Sequence`](crate::Sequence)
//! * [`ForgeError`] - raised while a build merges and resolves attributes
//! * [`ConstructError`] - raised by a mold or the target type itself

use forge_primitives::{Name, Value, ValueError};
use thiserror::Error;

/// Definition-time failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DslError {
	#[error("invalid {kind} name {name:?}")]
	InvalidName { kind: &'static str, name: String },
	#[error("{name:?} is reserved, use `attribute` to define it")]
	ReservedName { name: String },
	#[error("can not define trait inside of another trait (defining {name:?} in {outer:?})")]
	NestedTrait { name: Name, outer: Name },
	#[error("sequence {name:?}: {source}")]
	Sequence {
		name: Name,
		#[source]
		source: SequenceError,
	},
	#[error("can not {operation} {name:?}: definition is frozen")]
	Frozen { operation: &'static str, name: String },
	#[error("mold is already set")]
	MoldAlreadySet,
}

/// Failures of the sequence generator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequenceError {
	#[error("invalid sequence seed: {type_name} has no successor")]
	InvalidSeed { type_name: &'static str },
	#[error("sequence exhausted after {last:?}")]
	Exhausted { last: Value },
}

/// Failures raised while turning resolved attributes into an instance.
///
/// These come from the target type's own construction logic and are passed
/// through a build unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructError {
	#[error("missing field `{field}`")]
	MissingField { field: &'static str },
	#[error("unexpected field `{field}`")]
	UnexpectedField { field: Name },
	#[error("invalid value for field `{field}`: {source}")]
	InvalidField {
		field: &'static str,
		#[source]
		source: ValueError,
	},
	#[error("wrong number of arguments (given {given}, expected {expected})")]
	Arity { given: usize, expected: usize },
	#[error("{operation} is not supported by {target}")]
	Unsupported {
		operation: &'static str,
		target: &'static str,
	},
	#[error("{0}")]
	Custom(String),
}

impl ConstructError {
	/// Builds a free-form construction error.
	pub fn custom(message: impl std::fmt::Display) -> Self {
		Self::Custom(message.to_string())
	}
}

/// Build-time failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForgeError {
	#[error("unresolved reference to attribute {name:?}")]
	UnresolvedReference { name: String },
	#[error("attribute {name:?} depends on itself")]
	CyclicReference { name: Name },
	#[error("attribute {name:?}: {source}")]
	TypeMismatch {
		name: Name,
		#[source]
		source: ValueError,
	},
	#[error("attribute {name:?}: {source}")]
	Sequence {
		name: Name,
		#[source]
		source: SequenceError,
	},
	#[error("trait names must be strings or symbols, got {got}")]
	InvalidTrait { got: &'static str },
	#[error("attribute {name:?} failed: {message}")]
	Computation { name: Name, message: String },
	#[error(transparent)]
	Construct(#[from] ConstructError),
}

impl ForgeError {
	/// Builds a failure for a computation that rejected its inputs.
	pub fn computation(name: impl Into<Name>, message: impl std::fmt::Display) -> Self {
		Self::Computation {
			name: name.into(),
			message: message.to_string(),
		}
	}
}
