use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use forge_primitives::{Value, attributes};
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::record::{Positional, reject_extra, take_field};
use super::*;

#[derive(Debug, PartialEq)]
struct Point {
	x: i64,
	y: i64,
	label: Option<String>,
}

impl Record for Point {
	const FIELDS: &'static [&'static str] = &["x", "y", "label"];

	fn from_named(mut fields: Attributes) -> Result<Self, ConstructError> {
		let point = Point {
			x: take_field(&mut fields, "x")?,
			y: take_field(&mut fields, "y")?,
			label: take_field(&mut fields, "label")?,
		};
		reject_extra(&fields)?;
		Ok(point)
	}

	fn from_positional(values: Vec<Value>) -> Result<Self, ConstructError> {
		let mut values = Positional::new(values, Self::FIELDS.len())?;
		Ok(Point {
			x: values.next_field("x")?,
			y: values.next_field("y")?,
			label: values.next_field("label")?,
		})
	}
}

impl Forged for Point {
	fn shape() -> Shape<Self> {
		Shape::record()
	}
}

#[derive(Debug, PartialEq)]
struct Pair(i64, i64);

impl Record for Pair {
	const FIELDS: &'static [&'static str] = &["left", "right"];
	const STYLE: ArgStyle = ArgStyle::Positional;

	fn from_named(_fields: Attributes) -> Result<Self, ConstructError> {
		Err(ConstructError::custom("Pair takes positional arguments"))
	}

	fn from_positional(values: Vec<Value>) -> Result<Self, ConstructError> {
		let mut values = Positional::new(values, 2)?;
		Ok(Pair(values.next_field("left")?, values.next_field("right")?))
	}
}

#[derive(Debug, PartialEq)]
struct Login {
	user: String,
	admin: bool,
}

impl FromKeywords for Login {
	fn from_keywords(mut keywords: Attributes) -> Result<Self, ConstructError> {
		let login = Login {
			user: take_field(&mut keywords, "user")?,
			admin: take_field(&mut keywords, "admin")?,
		};
		reject_extra(&keywords)?;
		Ok(login)
	}
}

impl Forged for Login {
	fn shape() -> Shape<Self> {
		Shape::keywords()
	}
}

/// Named record construction takes every field by name and rejects extras.
#[test]
fn test_record_named_is_strict() {
	let mold = RecordMold::new();
	let point: Point = mold
		.call(attributes! { "y" => 2, "x" => 1 }, &Extra::new())
		.unwrap();
	assert_eq!(point, Point { x: 1, y: 2, label: None });

	let err = Mold::<Point>::call(&mold, attributes! { "x" => 1, "y" => 2, "z" => 3 }, &Extra::new())
		.unwrap_err();
	assert_eq!(err.to_string(), "unexpected field `z`");
}

/// Lax record construction drops attributes that are not fields.
#[test]
fn test_record_lax_drops_extras() {
	let point: Point = RecordMold::lax()
		.call(
			attributes! { "x" => 1, "y" => 2, "label" => "p", "transient" => true },
			&Extra::new(),
		)
		.unwrap();
	assert_eq!(
		point,
		Point {
			x: 1,
			y: 2,
			label: Some("p".into())
		}
	);
}

/// Positional records receive values in declared field order and ignore the rest.
#[test]
fn test_record_positional_uses_field_order() {
	let pair: Pair = RecordMold::new()
		.call(attributes! { "right" => 2, "left" => 1, "unused" => 3 }, &Extra::new())
		.unwrap();
	assert_eq!(pair, Pair(1, 2));
}

/// Missing and mistyped fields are reported by name.
#[rstest]
#[case(attributes! { "y" => 2 }, ConstructError::MissingField { field: "x" })]
#[case(
	attributes! { "x" => "one", "y" => 2 },
	ConstructError::InvalidField {
		field: "x",
		source: forge_primitives::ValueError::TypeMismatch { expected: "int", got: "string" },
	}
)]
fn test_record_field_errors(#[case] attrs: Attributes, #[case] expected: ConstructError) {
	let err = Mold::<Point>::call(&RecordMold::new(), attrs, &Extra::new()).unwrap_err();
	assert_eq!(err, expected);
}

#[test]
fn test_positional_arity() {
	let err = Positional::new(vec![Value::Int(1); 3], 2).unwrap_err();
	assert_eq!(err.to_string(), "wrong number of arguments (given 3, expected 2)");
}

#[test]
fn test_keywords_mold() {
	let login: Login = KeywordsMold
		.call(attributes! { "admin" => true, "user" => "root" }, &Extra::new())
		.unwrap();
	assert_eq!(
		login,
		Login {
			user: "root".into(),
			admin: true
		}
	);
}

#[test]
fn test_single_argument_mold() {
	let attrs = attributes! { "a" => 1 };
	let built: Attributes = SingleArgumentMold.call(attrs.clone(), &Extra::new()).unwrap();
	assert_eq!(built, attrs);
	let built: Value = SingleArgumentMold.call(attrs.clone(), &Extra::new()).unwrap();
	assert_eq!(built, Value::Map(attrs));
}

/// Keyed molds build the container and attach defaults for missing keys.
#[test]
fn test_keyed_mold_defaults() {
	let map: DefaultMap = KeyedMold::new()
		.with_default(0)
		.call(attributes! { "hits" => 3 }, &Extra::new())
		.unwrap();
	assert_eq!(map.get("hits"), Some(Value::Int(3)));
	assert_eq!(map.get("misses"), Some(Value::Int(0)));
	assert!(!map.contains_key("misses"));

	let map: DefaultMap = KeyedMold::new()
		.with_default(0)
		.with_default_fn(|key| Value::from(format!("no {key}")))
		.call(Attributes::new(), &Extra::new())
		.unwrap();
	assert_eq!(map.get("color"), Some(Value::from("no color")));
	assert_eq!(map.default_value(), None);
}

/// Plain maps build fine but refuse defaults they cannot hold.
#[test]
fn test_keyed_mold_plain_maps() {
	let map: HashMap<String, Value> = KeyedMold::new()
		.call(attributes! { "a" => 1 }, &Extra::new())
		.unwrap();
	assert_eq!(map.get("a"), Some(&Value::Int(1)));

	let err = Mold::<BTreeMap<String, Value>>::call(
		&KeyedMold::new().with_default(1),
		Attributes::new(),
		&Extra::new(),
	)
	.unwrap_err();
	assert!(matches!(
		err,
		ConstructError::Unsupported {
			operation: "default value",
			..
		}
	));
}

static STATEFUL_INSTANCES: AtomicUsize = AtomicUsize::new(0);

/// Counts the attributes it has seen; only correct when used once.
struct CountingMold {
	seen: Cell<usize>,
}

impl Default for CountingMold {
	fn default() -> Self {
		STATEFUL_INSTANCES.fetch_add(1, Ordering::SeqCst);
		Self { seen: Cell::new(0) }
	}
}

impl Mold<usize> for CountingMold {
	fn call(&self, attributes: Attributes, _extra: &Extra) -> Result<usize, ConstructError> {
		self.seen.set(self.seen.get() + attributes.len());
		Ok(self.seen.get())
	}
}

/// Wrapped molds get a fresh instance for every call.
#[test]
fn test_wrapped_mold_is_fresh_per_call() {
	let mold = WrappedMold::<CountingMold>::new();
	let before = STATEFUL_INSTANCES.load(Ordering::SeqCst);
	for _ in 0..3 {
		assert_eq!(mold.call(attributes! { "a" => 1, "b" => 2 }, &Extra::new()).unwrap(), 2);
	}
	assert_eq!(STATEFUL_INSTANCES.load(Ordering::SeqCst) - before, 3);
}

/// Auto detection follows the declared shape.
#[rstest]
#[case(Point::shape().kind(), ShapeKind::Record)]
#[case(Login::shape().kind(), ShapeKind::Keywords)]
#[case(<HashMap<String, Value>>::shape().kind(), ShapeKind::Keyed)]
#[case(Attributes::shape().kind(), ShapeKind::Keyed)]
#[case(Value::shape().kind(), ShapeKind::Single)]
fn test_detected_shapes(#[case] kind: ShapeKind, #[case] expected: ShapeKind) {
	assert_eq!(kind, expected);
}

#[test]
fn test_auto_mold_builds_declared_shape() {
	let point: Point = AutoMold
		.call(attributes! { "x" => 3, "y" => 4 }, &Extra::new())
		.unwrap();
	assert_eq!(point, Point { x: 3, y: 4, label: None });

	let login = AutoMold::detect::<Login>()
		.call(attributes! { "user" => "u", "admin" => false }, &Extra::new())
		.unwrap();
	assert_eq!(login.user, "u");
}

/// Closures are molds and can read the build context.
#[test]
fn test_closure_mold_reads_extra() {
	let mold = |attrs: Attributes, extra: &Extra| -> Result<String, ConstructError> {
		let forge = extra.get("forge").and_then(Value::as_str).unwrap_or("?");
		Ok(format!("{forge}:{}", attrs.len()))
	};
	let extra = Extra::new().with("forge", Value::sym("user")).with("future", 1);
	assert_eq!(Mold::call(&mold, attributes! { "a" => 1 }, &extra).unwrap(), "user:1");
}
