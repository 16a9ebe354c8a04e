use forge_primitives::Attributes;

use super::{Extra, Mold};
use crate::error::ConstructError;

/// Types constructed from named arguments.
///
/// Unlike [`FromAttributes`](super::FromAttributes), every key is a parameter:
/// implementations reject keys they do not accept.
/// `#[derive(Forged)]` with `#[forged(keywords)]` generates this.
pub trait FromKeywords: Sized {
	fn from_keywords(keywords: Attributes) -> Result<Self, ConstructError>;
}

/// Expands the mapping into named arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordsMold;

impl<T: FromKeywords> Mold<T> for KeywordsMold {
	fn call(&self, attributes: Attributes, _extra: &Extra) -> Result<T, ConstructError> {
		T::from_keywords(attributes)
	}
}
