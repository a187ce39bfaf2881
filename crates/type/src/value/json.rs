// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde_json::{Map, Number};

use super::{Object, Value, r#type::Type};
use crate::{Result, TypeError, return_error};

impl Value {
	/// Converts a parsed JSON document. Integers that fit 32 bits become
	/// `Integer`, wider ones `Long`; everything else numeric becomes `Double`.
	pub fn from_json(json: serde_json::Value) -> Value {
		match json {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(v) => Value::Boolean(v),
			serde_json::Value::Number(number) => from_number(&number),
			serde_json::Value::String(text) => Value::Text(text),
			serde_json::Value::Array(values) => Value::Array(values.into_iter().map(Value::from_json).collect()),
			serde_json::Value::Object(map) => Value::Object(from_map(map)),
		}
	}

	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Value::Null => serde_json::Value::Null,
			Value::Boolean(v) => serde_json::Value::Bool(*v),
			Value::Byte(v) => serde_json::Value::from(*v),
			Value::Short(v) => serde_json::Value::from(*v),
			Value::Integer(v) => serde_json::Value::from(*v),
			Value::Long(v) => serde_json::Value::from(*v),
			Value::Float(v) => serde_json::Value::from(v.value()),
			Value::Double(v) => serde_json::Value::from(v.value()),
			Value::Text(v) => serde_json::Value::String(v.clone()),
			Value::Array(values) => serde_json::Value::Array(values.iter().map(Value::to_json).collect()),
			Value::Object(object) => {
				let mut map = Map::with_capacity(object.len());
				for (key, value) in object {
					map.insert(key.clone(), value.to_json());
				}
				serde_json::Value::Object(map)
			}
		}
	}
}

fn from_number(number: &Number) -> Value {
	if let Some(v) = number.as_i64() {
		return match i32::try_from(v) {
			Ok(v) => Value::Integer(v),
			Err(_) => Value::Long(v),
		};
	}
	number.as_f64().map(Value::double).unwrap_or(Value::Null)
}

fn from_map(map: Map<String, serde_json::Value>) -> Object {
	map.into_iter().map(|(k, v)| (k, Value::from_json(v))).collect()
}

pub(crate) fn parse_json(target: &Type, text: &str) -> Result<Value> {
	match serde_json::from_str::<serde_json::Value>(text) {
		Ok(json) => Ok(Value::from_json(json)),
		Err(err) => return_error!(TypeError::ParseFailure {
			target: target.clone(),
			input: text.to_string(),
			reason: err.to_string(),
		}),
	}
}

/// Parses a JSON document whose top level must be an object.
pub(crate) fn parse_json_object(target: &Type, text: &str) -> Result<Object> {
	match parse_json(target, text)? {
		Value::Object(object) => Ok(object),
		other => return_error!(TypeError::ParseFailure {
			target: target.clone(),
			input: text.to_string(),
			reason: format!("expected a JSON object, found {}", other.get_type()),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ObjectType;

	fn object_type() -> Type {
		Type::Object(ObjectType::untyped())
	}

	#[test]
	fn test_parse_nested_document() {
		let object =
			parse_json_object(&object_type(), r#"{"a": 1, "b": {"c": [1, 2.5, "x", null]}, "d": 5000000000}"#)
				.unwrap();
		assert_eq!(object["a"], Value::int(1));
		assert_eq!(object["d"], Value::long(5_000_000_000i64));
		assert_eq!(
			object["b"],
			Value::object([(
				"c",
				Value::array([Value::int(1), Value::double(2.5), Value::text("x"), Value::Null])
			)])
		);
	}

	#[test]
	fn test_parse_preserves_document_order() {
		let object = parse_json_object(&object_type(), r#"{"z": 1, "a": 2}"#).unwrap();
		let keys: Vec<&str> = object.keys().map(String::as_str).collect();
		assert_eq!(keys, vec!["z", "a"]);
	}

	#[test]
	fn test_malformed_document_fails() {
		let err = parse_json_object(&object_type(), r#"{"a": "#).unwrap_err();
		assert_eq!(err.code(), "TYPE_001");
	}

	#[test]
	fn test_top_level_must_be_object() {
		let err = parse_json_object(&object_type(), "[1, 2]").unwrap_err();
		assert_eq!(err.code(), "TYPE_001");
	}

	#[test]
	fn test_to_json_round_trips() {
		let value = Value::object([("a", Value::array([Value::int(1), Value::bool(false)])), ("b", Value::Null)]);
		assert_eq!(Value::from_json(value.to_json()), value);
	}
}
