use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use forge_primitives::{NaiveDate, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

/// A sequence yields its seed first and then successive values.
#[test]
fn test_succ_progression() {
	let seq = Sequence::new(100_000).unwrap();
	assert_eq!(seq.succ().unwrap(), Value::Int(100_000));
	assert_eq!(seq.succ().unwrap(), Value::Int(100_001));
	assert_eq!(seq.next().unwrap(), Value::Int(100_002));
}

/// `reset` returns the value that would have come next and restarts from the seed.
#[test]
fn test_reset_returns_pending_value() {
	let seq = Sequence::new(100_000).unwrap();
	for _ in 0..3 {
		seq.succ().unwrap();
	}
	assert_eq!(seq.reset(), Some(Value::Int(100_003)));
	assert_eq!(seq.succ().unwrap(), Value::Int(100_000));
	assert_eq!(seq.rewind(), Some(Value::Int(100_001)));
}

/// Seeds without a successor are rejected at construction.
#[rstest]
#[case(Value::Float(1.5), "float")]
#[case(Value::Nil, "nil")]
#[case(Value::Bool(true), "bool")]
#[case(Value::from(""), "string")]
#[case(Value::List(vec![]), "list")]
fn test_invalid_seed(#[case] seed: Value, #[case] type_name: &'static str) {
	assert_eq!(
		Sequence::new(seed).unwrap_err(),
		SequenceError::InvalidSeed { type_name }
	);
}

/// Strings and dates are valid seeds.
#[test]
fn test_string_and_date_seeds() {
	let names = Sequence::new("user-a").unwrap();
	assert_eq!(names.succ().unwrap(), Value::from("user-a"));
	assert_eq!(names.succ().unwrap(), Value::from("user-b"));

	let day = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
	let days = Sequence::new(day).unwrap();
	days.succ().unwrap();
	assert_eq!(
		days.succ().unwrap(),
		Value::Date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
	);
}

/// Building from an existing sequence returns the same counter.
#[test]
fn test_from_seed_is_idempotent() {
	let seq = Sequence::new(5).unwrap();
	let same = Sequence::from_seed(&seq).unwrap();
	assert!(seq.ptr_eq(&same));
	assert_eq!(same.succ().unwrap(), Value::Int(5));
	assert_eq!(seq.succ().unwrap(), Value::Int(6));

	let fresh = Sequence::from_seed(Seed::default()).unwrap();
	assert_eq!(fresh.initial(), &Value::Int(1));
}

/// The last value of a bounded progression is produced before exhaustion.
#[test]
fn test_exhausted_after_last_value() {
	let seq = Sequence::new(i64::MAX - 1).unwrap();
	assert_eq!(seq.succ().unwrap(), Value::Int(i64::MAX - 1));
	assert_eq!(seq.succ().unwrap(), Value::Int(i64::MAX));
	let exhausted = SequenceError::Exhausted {
		last: Value::Int(i64::MAX),
	};
	assert_eq!(seq.succ().unwrap_err(), exhausted);
	assert_eq!(seq.next().unwrap_err(), exhausted);

	assert_eq!(seq.reset(), None);
	assert_eq!(seq.succ().unwrap(), Value::Int(i64::MAX - 1));
}

/// A seed without a successor is still produced once.
#[rstest]
#[case(Value::Int(i64::MAX))]
#[case(Value::Date(NaiveDate::MAX))]
fn test_terminal_seed_is_produced(#[case] seed: Value) {
	let seq = Sequence::new(seed.clone()).unwrap();
	assert_eq!(seq.succ().unwrap(), seed);
	assert_eq!(
		seq.succ().unwrap_err(),
		SequenceError::Exhausted { last: seed.clone() }
	);
	assert_eq!(seq.reset(), None);
	assert_eq!(seq.succ().unwrap(), seed);
}

/// Concurrent callers observe a duplicate-free contiguous progression.
#[test]
fn test_concurrent_succ_is_contiguous() {
	const THREADS: i64 = 8;
	const CALLS: i64 = 250;

	let seq = Arc::new(Sequence::new(1).unwrap());
	let handles: Vec<_> = (0..THREADS)
		.map(|_| {
			let seq = Arc::clone(&seq);
			thread::spawn(move || {
				(0..CALLS)
					.map(|_| seq.succ().unwrap().as_int().unwrap())
					.collect::<Vec<_>>()
			})
		})
		.collect();

	let mut seen = HashSet::new();
	for handle in handles {
		for value in handle.join().unwrap() {
			assert!(seen.insert(value), "duplicate value {value}");
		}
	}
	let expected: HashSet<i64> = (1..=THREADS * CALLS).collect();
	assert_eq!(seen, expected);
}
