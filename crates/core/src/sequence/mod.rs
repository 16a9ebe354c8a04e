//! Thread-safe monotonic value generator.
//!
//! # Role
//!
//! A [`Sequence`] hands out a never-repeating progression starting at its
//! initial value. Forges share sequences by name within one definition, and
//! callers may share one sequence across several definitions.
//!
//! # Invariants
//!
//! - `succ` is a single critical section: read, compute successor, store, return
//!   the old value. Two callers never observe the same state.
//! - The last value of a bounded progression is still handed out; only the
//!   call after it fails.
//! - The initial value is checked once, at construction, and never changes.

use std::fmt;
use std::sync::Arc;

use forge_primitives::{Name, NaiveDate, Successor, Value};
use parking_lot::Mutex;

use crate::error::SequenceError;

enum Cell {
	Pending(Value),
	/// Holds the last value handed out.
	Exhausted(Value),
}

struct Inner {
	initial: Value,
	cell: Mutex<Cell>,
}

/// A synchronized single-slot counter.
///
/// Cloning is cheap and yields a handle to the same counter.
#[derive(Clone)]
pub struct Sequence {
	inner: Arc<Inner>,
}

impl Sequence {
	/// Creates a sequence starting at `initial`.
	///
	/// Fails with [`SequenceError::InvalidSeed`] if the value has no successor.
	pub fn new(initial: impl Into<Value>) -> Result<Self, SequenceError> {
		let initial = initial.into();
		if !initial.is_successive() {
			return Err(SequenceError::InvalidSeed {
				type_name: initial.type_name(),
			});
		}
		Ok(Self {
			inner: Arc::new(Inner {
				cell: Mutex::new(Cell::Pending(initial.clone())),
				initial,
			}),
		})
	}

	/// Creates a sequence from a seed, returning existing sequences as-is.
	pub fn from_seed(seed: impl Into<Seed>) -> Result<Self, SequenceError> {
		match seed.into() {
			Seed::Sequence(sequence) => Ok(sequence),
			Seed::Value(value) => Self::new(value),
		}
	}

	/// Returns the value the sequence started from.
	pub fn initial(&self) -> &Value {
		&self.inner.initial
	}

	/// Returns the current value and advances to its successor.
	///
	/// A value without a successor is still returned; the sequence is then
	/// exhausted and every later call fails until [`reset`](Self::reset).
	pub fn succ(&self) -> Result<Value, SequenceError> {
		let mut cell = self.inner.cell.lock();
		let current = match &*cell {
			Cell::Pending(current) => current.clone(),
			Cell::Exhausted(last) => return Err(SequenceError::Exhausted { last: last.clone() }),
		};
		*cell = match current.successor() {
			Some(next) => Cell::Pending(next),
			None => Cell::Exhausted(current.clone()),
		};
		Ok(current)
	}

	/// Alias of [`Sequence::succ`].
	pub fn next(&self) -> Result<Value, SequenceError> {
		self.succ()
	}

	/// Restores the initial value.
	///
	/// Returns the value the next [`succ`](Self::succ) would have produced, or
	/// `None` if the sequence was exhausted.
	pub fn reset(&self) -> Option<Value> {
		let mut cell = self.inner.cell.lock();
		match std::mem::replace(&mut *cell, Cell::Pending(self.inner.initial.clone())) {
			Cell::Pending(pending) => Some(pending),
			Cell::Exhausted(_) => None,
		}
	}

	/// Alias of [`Sequence::reset`].
	pub fn rewind(&self) -> Option<Value> {
		self.reset()
	}

	/// Returns true if both handles share one counter.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl fmt::Debug for Sequence {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let cell = self.inner.cell.lock();
		let mut s = f.debug_struct("Sequence");
		s.field("initial", &self.inner.initial);
		match &*cell {
			Cell::Pending(current) => s.field("current", current),
			Cell::Exhausted(last) => s.field("exhausted_after", last),
		};
		s.finish()
	}
}

/// Anything a sequence can be created from: a seed value or an existing
/// sequence.
#[derive(Debug, Clone)]
pub enum Seed {
	Value(Value),
	Sequence(Sequence),
}

impl Default for Seed {
	fn default() -> Self {
		Seed::Value(Value::Int(1))
	}
}

macro_rules! impl_seed_from_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Seed {
				fn from(value: $ty) -> Self {
					Seed::Value(value.into())
				}
			}
		)*
	};
}

impl_seed_from_value!(i64, i32, u32, &str, String, Name, NaiveDate, Value);

impl From<Sequence> for Seed {
	fn from(sequence: Sequence) -> Self {
		Seed::Sequence(sequence)
	}
}

impl From<&Sequence> for Seed {
	fn from(sequence: &Sequence) -> Self {
		Seed::Sequence(sequence.clone())
	}
}

#[cfg(test)]
mod tests;
