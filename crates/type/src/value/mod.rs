// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
	hash::{Hash, Hasher},
	mem,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

mod canonical;
mod compare;
mod json;
mod ordered_f32;
mod ordered_f64;
pub mod r#type;

pub use ordered_f32::OrderedF32;
pub use ordered_f64::OrderedF64;
use r#type::{ObjectType, Type};

/// Field name to child value mapping of an object value. Iteration follows
/// insertion order, equality does not.
pub type Object = IndexMap<String, Value>;

/// A column value, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
	/// Absent value, valid for every type
	Null,
	/// A boolean: true or false.
	Boolean(bool),
	/// A 1-byte signed integer
	Byte(i8),
	/// A 2-byte signed integer
	Short(i16),
	/// A 4-byte signed integer
	Integer(i32),
	/// An 8-byte signed integer
	Long(i64),
	/// A 4-byte floating point
	Float(OrderedF32),
	/// An 8-byte floating point
	Double(OrderedF64),
	/// A UTF-8 encoded text
	Text(String),
	/// An ordered sequence of values
	Array(Vec<Value>),
	/// A nested document
	Object(Object),
}

impl Value {
	pub fn null() -> Self {
		Value::Null
	}

	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Boolean(v.into())
	}

	pub fn byte(v: impl Into<i8>) -> Self {
		Value::Byte(v.into())
	}

	pub fn short(v: impl Into<i16>) -> Self {
		Value::Short(v.into())
	}

	pub fn int(v: impl Into<i32>) -> Self {
		Value::Integer(v.into())
	}

	pub fn long(v: impl Into<i64>) -> Self {
		Value::Long(v.into())
	}

	/// `NaN` has no representation and becomes `Null`. Callers that must not
	/// lose a `NaN` silently check the input first.
	pub fn float(v: impl Into<f32>) -> Self {
		OrderedF32::try_from(v.into()).map(Value::Float).unwrap_or(Value::Null)
	}

	/// `NaN` becomes `Null`, see [`Value::float`].
	pub fn double(v: impl Into<f64>) -> Self {
		OrderedF64::try_from(v.into()).map(Value::Double).unwrap_or(Value::Null)
	}

	pub fn text(v: impl Into<String>) -> Self {
		Value::Text(v.into())
	}

	pub fn array(values: impl IntoIterator<Item = Value>) -> Self {
		Value::Array(values.into_iter().collect())
	}

	pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
		Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}
}

impl Value {
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Value::Object(object) => Some(object),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Text(text) => Some(text.as_str()),
			_ => None,
		}
	}

	/// Integral value widened to `i64`; `None` for every other variant.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Value::Byte(v) => Some(*v as i64),
			Value::Short(v) => Some(*v as i64),
			Value::Integer(v) => Some(*v as i64),
			Value::Long(v) => Some(*v),
			_ => None,
		}
	}

	/// Any numeric value as `f64`; `None` for every other variant.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(v.value() as f64),
			Value::Double(v) => Some(v.value()),
			other => other.as_i64().map(|v| v as f64),
		}
	}

	pub fn is_numeric(&self) -> bool {
		self.as_f64().is_some()
	}
}

impl Value {
	pub fn get_type(&self) -> Type {
		match self {
			Value::Null => Type::Undefined,
			Value::Boolean(_) => Type::Boolean,
			Value::Byte(_) => Type::Byte,
			Value::Short(_) => Type::Short,
			Value::Integer(_) => Type::Integer,
			Value::Long(_) => Type::Long,
			Value::Float(_) => Type::Float,
			Value::Double(_) => Type::Double,
			Value::Text(_) => Type::Text,
			Value::Array(values) => {
				let inner = values
					.iter()
					.filter(|v| !v.is_null())
					.map(Value::get_type)
					.reduce(|l, r| Type::common_supertype(&l, &r))
					.unwrap_or(Type::Undefined);
				Type::Array(Box::new(inner))
			}
			Value::Object(_) => Type::Object(ObjectType::untyped()),
		}
	}
}

impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		mem::discriminant(self).hash(state);
		match self {
			Value::Null => {}
			Value::Boolean(v) => v.hash(state),
			Value::Byte(v) => v.hash(state),
			Value::Short(v) => v.hash(state),
			Value::Integer(v) => v.hash(state),
			Value::Long(v) => v.hash(state),
			Value::Float(v) => v.hash(state),
			Value::Double(v) => v.hash(state),
			Value::Text(v) => v.hash(state),
			Value::Array(values) => values.hash(state),
			Value::Object(object) => {
				// equality ignores insertion order, so hashing must too
				let mut entries: Vec<_> = object.iter().collect();
				entries.sort_unstable_by(|(l, _), (r, _)| l.cmp(r));
				entries.len().hash(state);
				for (key, value) in entries {
					key.hash(state);
					value.hash(state);
				}
			}
		}
	}
}

impl PartialOrd for Value {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Value {
	fn cmp(&self, other: &Self) -> Ordering {
		compare::compare_values(self, other)
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => f.write_str("NULL"),
			Value::Boolean(true) => f.write_str("true"),
			Value::Boolean(false) => f.write_str("false"),
			Value::Byte(value) => Display::fmt(value, f),
			Value::Short(value) => Display::fmt(value, f),
			Value::Integer(value) => Display::fmt(value, f),
			Value::Long(value) => Display::fmt(value, f),
			Value::Float(value) => Display::fmt(value, f),
			Value::Double(value) => Display::fmt(value, f),
			Value::Text(value) => Display::fmt(value, f),
			Value::Array(_) | Value::Object(_) => Display::fmt(&self.to_json(), f),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Integer(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Long(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Text(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Text(v)
	}
}

impl From<Object> for Value {
	fn from(v: Object) -> Self {
		Value::Object(v)
	}
}
