use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

/// Process-wide pool of interned names.
///
/// Names are created at definition time and live for the rest of the process,
/// so the pool only ever grows.
static POOL: LazyLock<Mutex<FxHashSet<&'static str>>> =
	LazyLock::new(|| Mutex::new(FxHashSet::default()));

/// An interned identifier for attributes, traits and sequences.
///
/// Two names with the same text share one allocation, so copying a `Name` is
/// free and equality is usually a pointer comparison. Hashing and ordering
/// follow the text, which lets maps keyed by `Name` be queried with `&str`.
#[derive(Clone, Copy)]
pub struct Name(&'static str);

impl Name {
	/// Interns `text` and returns its name.
	pub fn new(text: &str) -> Self {
		let mut pool = POOL.lock();
		if let Some(existing) = pool.get(text) {
			return Self(*existing);
		}
		let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
		pool.insert(leaked);
		Self(leaked)
	}

	/// Returns the name for `text` only if it was interned before.
	///
	/// Use this where unknown text can only fail to match, such as trait names
	/// in build requests, so that it does not grow the pool.
	pub fn lookup(text: &str) -> Option<Self> {
		POOL.lock().get(text).map(|s| Self(*s))
	}

	/// Returns the text of the name.
	#[inline]
	pub fn as_str(self) -> &'static str {
		self.0
	}
}

impl PartialEq for Name {
	#[inline]
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.0, other.0) || self.0 == other.0
	}
}

impl Eq for Name {}

impl PartialEq<str> for Name {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}

impl PartialEq<&str> for Name {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}

impl Hash for Name {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.hash(state);
	}
}

impl PartialOrd for Name {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Name {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.0.cmp(other.0)
	}
}

impl Borrow<str> for Name {
	fn borrow(&self) -> &str {
		self.0
	}
}

impl AsRef<str> for Name {
	fn as_ref(&self) -> &str {
		self.0
	}
}

impl fmt::Debug for Name {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, ":{}", self.0)
	}
}

impl fmt::Display for Name {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0)
	}
}

impl From<&str> for Name {
	fn from(text: &str) -> Self {
		Self::new(text)
	}
}

impl From<&String> for Name {
	fn from(text: &String) -> Self {
		Self::new(text)
	}
}

impl From<String> for Name {
	fn from(text: String) -> Self {
		Self::new(&text)
	}
}
