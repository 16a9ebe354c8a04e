//! Object forging engine.
//!
//! Forges build fully populated instances from declarative templates:
//!
//! * [`ForgeDsl`] - records attributes, traits, sequences and a mold, then freezes
//! * [`Crucible`] - resolves one build's attributes lazily, each at most once
//! * [`Sequence`] - a thread-safe, never-repeating value generator
//! * [`molds`] - strategies that turn resolved attributes into an instance
//! * [`Forge`] - merges root attributes, traits and overrides and runs a build

/// Attribute computations and attribute sets.
pub mod attribute;
/// Lazy attribute resolution.
pub mod crucible;
/// Definition surface.
pub mod dsl;
/// Error types.
pub mod error;
/// Build orchestration.
pub mod forge;
/// Construction strategies.
pub mod molds;
/// Build requests.
pub mod request;
/// Sequence generator.
pub mod sequence;

pub use attribute::{AttributeSet, Computation, Entry};
pub use crucible::Crucible;
pub use dsl::{ForgeDsl, Transform};
pub use error::{ConstructError, DslError, ForgeError, SequenceError};
pub use forge::Forge;
pub use molds::{Extra, Forged, Mold, Shape};
pub use request::ForgeRequest;
pub use sequence::{Seed, Sequence};
