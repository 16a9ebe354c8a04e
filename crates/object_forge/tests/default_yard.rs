//! The process-wide yard behind `object_forge::{define, forge, build}`.

use std::sync::Arc;

use object_forge::{Attributes, Value, YardError, attributes, default_yard};
use pretty_assertions::assert_eq;
use serial_test::serial;

fn reset() {
	default_yard().clear();
}

/// Defining and forging through the free functions.
#[test]
#[serial]
fn test_define_then_forge() {
	reset();
	object_forge::define::<Attributes, _>("post", |f| {
		f.sequence("id", 10)?;
		f.value("title", "Hello")?;
		f.trait_("draft", |f| {
			f.value("published", false)?;
			Ok(())
		})?;
		Ok(())
	})
	.unwrap();

	let post: Attributes = object_forge::forge("post", ()).unwrap();
	assert_eq!(post, attributes! { "id" => 10, "title" => "Hello" });

	let draft: Attributes = object_forge::build("post", ["draft"]).unwrap();
	assert_eq!(
		draft,
		attributes! { "id" => 11, "title" => "Hello", "published" => false }
	);
}

/// Redefining a name keeps the first forge.
#[test]
#[serial]
fn test_redefinition_keeps_first() {
	reset();
	let first = object_forge::define::<Attributes, _>("thing", |f| {
		f.value("v", 1)?;
		Ok(())
	})
	.unwrap();
	let second = object_forge::define::<Attributes, _>("thing", |f| {
		f.value("v", 2)?;
		Ok(())
	})
	.unwrap();
	assert!(Arc::ptr_eq(&first, &second));
	let thing: Attributes = object_forge::forge("thing", ()).unwrap();
	assert_eq!(thing["v"], Value::Int(1));
}

/// Clearing the yard forgets every definition.
#[test]
#[serial]
fn test_clear_between_tests() {
	reset();
	object_forge::define::<Attributes, _>("temp", |_| Ok(())).unwrap();
	assert!(default_yard().contains("temp"));

	reset();
	assert_eq!(
		object_forge::forge::<Attributes>("temp", ()).unwrap_err(),
		YardError::NotFound {
			name: "temp".into()
		}
	);
}

/// Free-standing sequences are shared by every definition using them.
#[test]
#[serial]
fn test_shared_sequence() {
	reset();
	let ids = object_forge::sequence(1).unwrap();
	for name in ["left", "right"] {
		let ids = ids.clone();
		object_forge::define::<Attributes, _>(name, move |f| {
			f.sequence("id", ids)?;
			Ok(())
		})
		.unwrap();
	}

	let a: Attributes = object_forge::forge("left", ()).unwrap();
	let b: Attributes = object_forge::forge("right", ()).unwrap();
	let c: Attributes = object_forge::forge("left", ()).unwrap();
	assert_eq!(
		[&a["id"], &b["id"], &c["id"]],
		[&Value::Int(1), &Value::Int(2), &Value::Int(3)]
	);
}
