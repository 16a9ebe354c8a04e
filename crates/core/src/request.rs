use forge_primitives::{Attributes, Name, Value};

use crate::attribute::AttributeSet;
use crate::crucible::Crucible;
use crate::error::ForgeError;

/// Traits and overrides for one build.
///
/// Traits are applied in order, overrides last. Most callers build a request
/// with the `From` conversions:
///
/// ```ignore
/// forge.forge(())?;                         // root attributes only
/// forge.forge(["admin", "verified"])?;      // traits
/// forge.forge(ForgeRequest::new().with("name", "Ann"))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ForgeRequest {
	traits: Vec<Name>,
	overrides: AttributeSet,
}

impl ForgeRequest {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a trait.
	pub fn with_trait(mut self, name: impl Into<Name>) -> Self {
		self.traits.push(name.into());
		self
	}

	/// Appends several traits.
	pub fn with_traits<I, N>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = N>,
		N: Into<Name>,
	{
		self.traits.extend(names.into_iter().map(Into::into));
		self
	}

	/// Overrides an attribute with a literal value.
	pub fn with(mut self, name: impl Into<Name>, value: impl Into<Value>) -> Self {
		self.overrides.insert_value(name, value);
		self
	}

	/// Overrides an attribute with a computation.
	pub fn with_fn<F>(mut self, name: impl Into<Name>, f: F) -> Self
	where
		F: Fn(&Crucible) -> Result<Value, ForgeError> + Send + Sync + 'static,
	{
		self.overrides = self.overrides.with_fn(name, f);
		self
	}

	/// Normalizes loosely typed build arguments.
	///
	/// Exactly two positional arguments, a list followed by a map, are read as
	/// `(traits, overrides)`. Any other positional arguments are trait names.
	/// `keywords` always become overrides and win over a positional map.
	///
	/// A string trait name that was never interned can not name a defined
	/// trait, so it is dropped here instead of being interned.
	pub fn from_args(positional: Vec<Value>, keywords: AttributeSet) -> Result<Self, ForgeError> {
		let mut request = Self::new();
		let traits = match <[Value; 2]>::try_from(positional) {
			Ok([Value::List(traits), Value::Map(overrides)]) => {
				request.overrides = overrides.into();
				traits
			}
			Ok(pair) => pair.into(),
			Err(positional) => positional,
		};
		for value in traits {
			let name = match value {
				Value::Str(s) => match Name::lookup(&s) {
					Some(name) => name,
					None => {
						tracing::debug!(trait_name = %s, "unknown trait name dropped");
						continue;
					}
				},
				Value::Sym(s) => s,
				other => {
					return Err(ForgeError::InvalidTrait {
						got: other.type_name(),
					});
				}
			};
			request.traits.push(name);
		}
		request.overrides.overlay(&keywords);
		Ok(request)
	}

	pub fn traits(&self) -> &[Name] {
		&self.traits
	}

	pub fn overrides(&self) -> &AttributeSet {
		&self.overrides
	}
}

impl From<()> for ForgeRequest {
	fn from(_: ()) -> Self {
		Self::new()
	}
}

impl From<&[&str]> for ForgeRequest {
	fn from(traits: &[&str]) -> Self {
		Self::new().with_traits(traits.iter().copied())
	}
}

impl<const N: usize> From<[&str; N]> for ForgeRequest {
	fn from(traits: [&str; N]) -> Self {
		Self::new().with_traits(traits)
	}
}

impl From<Vec<&str>> for ForgeRequest {
	fn from(traits: Vec<&str>) -> Self {
		Self::new().with_traits(traits)
	}
}

impl From<Vec<Name>> for ForgeRequest {
	fn from(traits: Vec<Name>) -> Self {
		Self {
			traits,
			overrides: AttributeSet::new(),
		}
	}
}

impl From<AttributeSet> for ForgeRequest {
	fn from(overrides: AttributeSet) -> Self {
		Self {
			traits: Vec::new(),
			overrides,
		}
	}
}

impl From<Attributes> for ForgeRequest {
	fn from(overrides: Attributes) -> Self {
		AttributeSet::from(overrides).into()
	}
}

impl<const N: usize> From<([&str; N], Attributes)> for ForgeRequest {
	fn from((traits, overrides): ([&str; N], Attributes)) -> Self {
		Self {
			traits: traits.into_iter().map(Name::new).collect(),
			overrides: overrides.into(),
		}
	}
}
