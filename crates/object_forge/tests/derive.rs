//! `#[derive(Forged)]` through full builds.

use object_forge::molds::{ArgStyle, Record};
use object_forge::{ConstructError, Forge, ForgeError, Forged, Name, Value};
use pretty_assertions::assert_eq;

#[derive(Debug, PartialEq, Forged)]
struct User {
	id: i64,
	name: String,
	role: Option<Name>,
}

#[derive(Debug, PartialEq, Forged)]
#[forged(lax)]
struct Profile {
	name: String,
	#[forged(rename = "type")]
	kind: Name,
}

#[derive(Debug, PartialEq, Forged)]
#[forged(positional)]
struct Coordinates {
	lat: f64,
	lon: f64,
}

#[derive(Debug, PartialEq, Forged)]
#[forged(keywords)]
struct Session {
	token: String,
	ttl: u32,
}

fn users() -> Forge<User> {
	Forge::define(|f| {
		f.sequence("id", 1)?;
		f.attr("name", |c| Ok(format!("user-{}", c.fetch::<i64>("id")?).into()))?;
		f.value("role", Value::Nil)?;
		f.trait_("admin", |f| {
			f.value("role", Value::sym("admin"))?;
			Ok(())
		})?;
		Ok(())
	})
	.unwrap()
}

/// Derived records take their fields by name.
#[test]
fn test_named_record() {
	let users = users();
	assert_eq!(
		users.forge(()).unwrap(),
		User {
			id: 1,
			name: "user-1".into(),
			role: None,
		}
	);
	assert_eq!(
		users.forge(["admin"]).unwrap(),
		User {
			id: 2,
			name: "user-2".into(),
			role: Some(Name::new("admin")),
		}
	);
}

/// Strict records reject attributes they do not declare.
#[test]
fn test_strict_record_rejects_transient_attributes() {
	let users = users();
	let err = users
		.forge(object_forge::attributes! { "nickname" => "neo" })
		.unwrap_err();
	assert_eq!(
		err,
		ForgeError::Construct(ConstructError::UnexpectedField {
			field: Name::new("nickname"),
		})
	);
}

/// Lax records drop unknown attributes and honor renamed fields.
#[test]
fn test_lax_record_with_rename() {
	let profiles: Forge<Profile> = Forge::define(|f| {
		f.value("name", "Jane")?;
		f.value("type", Value::sym("staff"))?;
		f.value("scratch", 42)?;
		Ok(())
	})
	.unwrap();
	assert_eq!(
		profiles.forge(()).unwrap(),
		Profile {
			name: "Jane".into(),
			kind: Name::new("staff"),
		}
	);
	assert_eq!(<Profile as Record>::FIELDS, ["name", "type"]);
}

/// Positional records receive field values in declaration order.
#[test]
fn test_positional_record() {
	assert_eq!(<Coordinates as Record>::STYLE, ArgStyle::Positional);
	let places: Forge<Coordinates> = Forge::define(|f| {
		f.value("lon", 13.4)?;
		f.value("lat", 52.5)?;
		Ok(())
	})
	.unwrap();
	assert_eq!(
		places.forge(()).unwrap(),
		Coordinates {
			lat: 52.5,
			lon: 13.4
		}
	);
}

/// A missing positional value reaches the record as nil.
#[test]
fn test_positional_missing_field() {
	let places: Forge<Coordinates> = Forge::define(|f| {
		f.value("lat", 52.5)?;
		Ok(())
	})
	.unwrap();
	assert_eq!(
		places.forge(()).unwrap_err(),
		ForgeError::Construct(ConstructError::MissingField { field: "lon" })
	);
}

/// Keyword types are built by name through the keywords mold.
#[test]
fn test_keywords() {
	let sessions: Forge<Session> = Forge::define(|f| {
		f.sequence_with("token", "aa", |v, _| Ok(format!("tok-{}", v.as_str().unwrap_or_default()).into()))?;
		f.value("ttl", 60)?;
		Ok(())
	})
	.unwrap();
	assert_eq!(
		sessions.forge(()).unwrap(),
		Session {
			token: "tok-aa".into(),
			ttl: 60,
		}
	);
	assert_eq!(sessions.forge(()).unwrap().token, "tok-ab");

	let err = sessions
		.forge(object_forge::attributes! { "ttl" => -1 })
		.unwrap_err();
	assert!(matches!(
		err,
		ForgeError::Construct(ConstructError::InvalidField { field: "ttl", .. })
	));
}

/// Derived shapes report how they are built.
#[test]
fn test_derived_shapes() {
	use object_forge::molds::ShapeKind;
	assert_eq!(User::shape().kind(), ShapeKind::Record);
	assert_eq!(Profile::shape().kind(), ShapeKind::Record);
	assert_eq!(Session::shape().kind(), ShapeKind::Keywords);
}
