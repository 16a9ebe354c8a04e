use std::fmt;
use std::marker::PhantomData;

use forge_primitives::Attributes;

use super::{Extra, Mold};
use crate::error::ConstructError;

/// Creates a fresh `M` for every build and delegates to it.
///
/// Use this for molds that keep state while building and must not be shared
/// between builds.
pub struct WrappedMold<M> {
	_mold: PhantomData<fn() -> M>,
}

impl<M> WrappedMold<M> {
	pub fn new() -> Self {
		Self { _mold: PhantomData }
	}
}

impl<M> Default for WrappedMold<M> {
	fn default() -> Self {
		Self::new()
	}
}

impl<M> Clone for WrappedMold<M> {
	fn clone(&self) -> Self {
		Self::new()
	}
}

impl<M> fmt::Debug for WrappedMold<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "WrappedMold<{}>", std::any::type_name::<M>())
	}
}

impl<T, M: Mold<T> + Default> Mold<T> for WrappedMold<M> {
	fn call(&self, attributes: Attributes, extra: &Extra) -> Result<T, ConstructError> {
		M::default().call(attributes, extra)
	}
}
