use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Name, Value};

impl Serialize for Name {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

/// Deserialized names are interned: override keys may introduce attributes the
/// definition does not know.
impl<'de> Deserialize<'de> for Name {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		Ok(Name::new(&s))
	}
}

/// Symbols and dates serialize as strings; they deserialize back as `Str`.
impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Value::Nil => serializer.serialize_unit(),
			Value::Bool(v) => serializer.serialize_bool(*v),
			Value::Int(v) => serializer.serialize_i64(*v),
			Value::Float(v) => serializer.serialize_f64(*v),
			Value::Str(v) => serializer.serialize_str(v),
			Value::Sym(v) => serializer.serialize_str(v.as_str()),
			Value::Date(v) => serializer.collect_str(v),
			Value::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Value::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (k, v) in entries {
					map.serialize_entry(k.as_str(), v)?;
				}
				map.end()
			}
			Value::Opaque(o) => Err(ser::Error::custom(format_args!(
				"cannot serialize opaque value of type {}",
				o.type_name()
			))),
		}
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(ValueVisitor)
	}
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
	type Value = Value;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("an attribute value")
	}

	fn visit_unit<E>(self) -> Result<Value, E> {
		Ok(Value::Nil)
	}

	fn visit_none<E>(self) -> Result<Value, E> {
		Ok(Value::Nil)
	}

	fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
		Value::deserialize(deserializer)
	}

	fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
		Ok(Value::Bool(v))
	}

	fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
		Ok(Value::Int(v))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
		i64::try_from(v)
			.map(Value::Int)
			.map_err(|_| E::custom(format_args!("integer {v} out of range")))
	}

	fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
		Ok(Value::Float(v))
	}

	fn visit_str<E>(self, v: &str) -> Result<Value, E> {
		Ok(Value::Str(v.to_string()))
	}

	fn visit_string<E>(self, v: String) -> Result<Value, E> {
		Ok(Value::Str(v))
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(item) = seq.next_element()? {
			items.push(item);
		}
		Ok(Value::List(items))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
		let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
		while let Some((key, value)) = access.next_entry::<Name, Value>()? {
			map.insert(key, value);
		}
		Ok(Value::Map(map))
	}
}
