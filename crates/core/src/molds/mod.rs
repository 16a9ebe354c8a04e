//! Construction strategies.
//!
//! A [`Mold`] turns a resolved attribute mapping into an instance of the
//! forged type. The engine ships one mold per common construction pattern:
//!
//! | Mold | Target contract |
//! |---|---|
//! | [`SingleArgumentMold`] | [`FromAttributes`]: the whole mapping as one argument |
//! | [`KeywordsMold`] | [`FromKeywords`]: the mapping as named arguments |
//! | [`RecordMold`] | [`Record`]: fixed, ordered fields, named or positional |
//! | [`KeyedMold`] | [`KeyedContainer`]: associative containers with defaults |
//! | [`WrappedMold`] | a fresh `M::default()` per build |
//! | [`AutoMold`] | whatever the type declares through [`Forged`] |
//!
//! Any `Fn(Attributes, &Extra) -> Result<T, ConstructError>` is a mold too.

use std::sync::Arc;

use forge_primitives::{Attributes, Name, Value};

use crate::error::ConstructError;

mod detect;
mod keyed;
mod keywords;
pub mod record;
mod single;
mod wrapped;

pub use detect::{AutoMold, Forged, Shape, ShapeKind};
pub use keyed::{DefaultFn, DefaultMap, KeyedContainer, KeyedMold};
pub use keywords::{FromKeywords, KeywordsMold};
pub use record::{ArgStyle, Record, RecordMold};
pub use single::{FromAttributes, SingleArgumentMold};
pub use wrapped::WrappedMold;

/// Converts resolved attributes into an instance of `T`.
///
/// Molds may be called many times, possibly from several threads when stored
/// in a [`Forge`](crate::Forge). A mold that keeps per-build state belongs in a
/// [`WrappedMold`].
pub trait Mold<T> {
	/// Builds an instance from `attributes`.
	///
	/// `extra` carries build context. Molds ignore entries they do not know.
	fn call(&self, attributes: Attributes, extra: &Extra) -> Result<T, ConstructError>;
}

impl<T, F> Mold<T> for F
where
	F: Fn(Attributes, &Extra) -> Result<T, ConstructError>,
{
	fn call(&self, attributes: Attributes, extra: &Extra) -> Result<T, ConstructError> {
		self(attributes, extra)
	}
}

/// A mold shared between a forge and its builds.
pub type SharedMold<T> = Arc<dyn Mold<T> + Send + Sync>;

/// Build context passed to molds next to the attributes.
///
/// Forges fill in `forge` (the forge name, or nil) and `traits` (the requested
/// trait names).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extra {
	entries: Attributes,
}

impl Extra {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, name: impl Into<Name>, value: impl Into<Value>) -> Self {
		self.entries.insert(name.into(), value.into());
		self
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.entries.get(name)
	}
}

#[cfg(test)]
mod tests;
