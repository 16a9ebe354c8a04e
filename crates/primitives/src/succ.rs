use chrono::NaiveDate;

use crate::{Name, Value};

/// Types with a deterministic "next" value.
///
/// Sequences are seeded with a successor-capable value and advance by calling
/// [`Successor::successor`]. `None` means the value has no next value, either
/// because the type has no successor at all or because the progression is
/// exhausted (integer overflow, last representable date).
pub trait Successor: Sized {
	/// Returns the value following `self`.
	fn successor(&self) -> Option<Self>;
}

impl Successor for i64 {
	fn successor(&self) -> Option<Self> {
		self.checked_add(1)
	}
}

impl Successor for i32 {
	fn successor(&self) -> Option<Self> {
		self.checked_add(1)
	}
}

impl Successor for u32 {
	fn successor(&self) -> Option<Self> {
		self.checked_add(1)
	}
}

impl Successor for u64 {
	fn successor(&self) -> Option<Self> {
		self.checked_add(1)
	}
}

impl Successor for usize {
	fn successor(&self) -> Option<Self> {
		self.checked_add(1)
	}
}

impl Successor for char {
	fn successor(&self) -> Option<Self> {
		// Skips the surrogate gap.
		(*self as u32 + 1..=char::MAX as u32).find_map(char::from_u32)
	}
}

impl Successor for NaiveDate {
	fn successor(&self) -> Option<Self> {
		self.succ_opt()
	}
}

impl Successor for String {
	fn successor(&self) -> Option<Self> {
		succ_str(self)
	}
}

impl Successor for Name {
	fn successor(&self) -> Option<Self> {
		succ_str(self.as_str()).map(|s| Name::new(&s))
	}
}

impl Successor for Value {
	fn successor(&self) -> Option<Self> {
		match self {
			Value::Int(v) => v.successor().map(Value::Int),
			Value::Str(v) => v.successor().map(Value::Str),
			Value::Sym(v) => v.successor().map(Value::Sym),
			Value::Date(v) => v.successor().map(Value::Date),
			_ => None,
		}
	}
}

impl Value {
	/// Returns true if this kind of value can seed a sequence.
	///
	/// This is a property of the variant, not of the current value: an integer
	/// at `i64::MAX` is still successive even though it has no next value.
	pub fn is_successive(&self) -> bool {
		match self {
			Value::Int(_) | Value::Date(_) => true,
			Value::Str(s) => !s.is_empty(),
			Value::Sym(s) => !s.as_str().is_empty(),
			_ => false,
		}
	}
}

/// Alphanumeric carry increment.
///
/// The rightmost ASCII letter or digit is incremented; `z`, `Z` and `9` wrap to
/// `a`, `A` and `0` and carry into the next alphanumeric to the left, skipping
/// punctuation. A carry out of the leftmost alphanumeric prepends a new one
/// (`"zz"` becomes `"aaa"`, `"9"` becomes `"10"`). Strings without
/// alphanumerics increment their last character.
fn succ_str(s: &str) -> Option<String> {
	let mut chars: Vec<char> = s.chars().collect();
	let last = chars.last_mut()?;

	if !s.chars().any(|c| c.is_ascii_alphanumeric()) {
		*last = last.successor()?;
		return Some(chars.into_iter().collect());
	}

	let mut end = chars.len();
	let mut leftmost = end;
	loop {
		let Some(pos) = chars[..end].iter().rposition(char::is_ascii_alphanumeric) else {
			let prefix = match chars[leftmost] {
				'0' => '1',
				c => c,
			};
			chars.insert(leftmost, prefix);
			break;
		};

		let (next, carry) = match chars[pos] {
			'9' => ('0', true),
			'z' => ('a', true),
			'Z' => ('A', true),
			c => (char::from(c as u8 + 1), false),
		};
		chars[pos] = next;
		leftmost = pos;
		if !carry {
			break;
		}
		end = pos;
	}

	Some(chars.into_iter().collect())
}
