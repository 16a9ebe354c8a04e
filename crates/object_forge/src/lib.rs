//! Declarative object factories.
//!
//! A forge is defined once with attributes, traits and sequences, then builds
//! fully populated instances on demand:
//!
//! ```ignore
//! use object_forge::{Forge, Forged, Name, Value};
//!
//! #[derive(Debug, Forged)]
//! struct User {
//!     id: i64,
//!     name: String,
//!     role: Option<Name>,
//! }
//!
//! let users = Forge::<User>::define(|f| {
//!     f.sequence("id", 1)?;
//!     f.attr("name", |c| Ok(format!("user-{}", c.fetch::<i64>("id")?).into()))?;
//!     f.trait_("admin", |f| {
//!         f.value("role", Value::sym("admin"))?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//!
//! let admin = users.forge(["admin"])?;
//! ```
//!
//! Named forges live in a [`Forgeyard`]; a process-wide one backs the
//! [`define`] and [`forge`] functions.

mod default;
mod yard;

pub use default::{build, default_yard, define, forge, sequence};
pub use forge_core::{
	AttributeSet, Computation, ConstructError, Crucible, DslError, Entry, Extra, Forge, ForgeDsl,
	ForgeError, ForgeRequest, Forged, Mold, Seed, Sequence, SequenceError, Shape, Transform, molds,
};
pub use forge_macros::Forged;
pub use forge_primitives::{
	Attributes, FromValue, NaiveDate, Name, Opaque, Successor, Value, ValueError, attributes,
};
pub use yard::{Forgeyard, YardError};
