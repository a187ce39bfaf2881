// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
	Result, TypeError,
	codec::{Streamer, decode_exact, descriptor},
	return_error,
	stream::{BufferReader, BufferWriter},
	value::Value,
};

mod coerce;
mod object;
mod promote;

pub use object::{ObjectType, ObjectTypeBuilder};
pub use promote::Precedence;

/// All value types known to the engine. The set is closed; every operation
/// dispatches on the variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	/// Type not known, the type of `NULL`
	Undefined,
	/// A boolean: true or false.
	Boolean,
	/// A 1-byte signed integer
	Byte,
	/// A 2-byte signed integer
	Short,
	/// A 4-byte signed integer
	Integer,
	/// An 8-byte signed integer
	Long,
	/// A 4-byte floating point
	Float,
	/// An 8-byte floating point
	Double,
	/// A UTF-8 encoded text
	Text,
	/// A homogeneous sequence of the inner type
	Array(Box<Type>),
	/// A nested document, with or without a statically known schema
	Object(ObjectType),
}

impl Type {
	pub const UNDEFINED_ID: u8 = 0;
	pub const BYTE_ID: u8 = 2;
	pub const BOOLEAN_ID: u8 = 3;
	pub const TEXT_ID: u8 = 4;
	pub const DOUBLE_ID: u8 = 6;
	pub const FLOAT_ID: u8 = 7;
	pub const SHORT_ID: u8 = 8;
	pub const INTEGER_ID: u8 = 9;
	pub const LONG_ID: u8 = 10;
	pub const OBJECT_ID: u8 = ObjectType::ID;
	pub const ARRAY_ID: u8 = 100;

	/// Stable discriminant used on the wire.
	pub fn id(&self) -> u8 {
		match self {
			Type::Undefined => Self::UNDEFINED_ID,
			Type::Boolean => Self::BOOLEAN_ID,
			Type::Byte => Self::BYTE_ID,
			Type::Short => Self::SHORT_ID,
			Type::Integer => Self::INTEGER_ID,
			Type::Long => Self::LONG_ID,
			Type::Float => Self::FLOAT_ID,
			Type::Double => Self::DOUBLE_ID,
			Type::Text => Self::TEXT_ID,
			Type::Array(_) => Self::ARRAY_ID,
			Type::Object(_) => Self::OBJECT_ID,
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Type::Undefined => "undefined",
			Type::Boolean => "boolean",
			Type::Byte => "byte",
			Type::Short => "smallint",
			Type::Integer => "integer",
			Type::Long => "bigint",
			Type::Float => "real",
			Type::Double => "double precision",
			Type::Text => "text",
			Type::Array(_) => "array",
			Type::Object(_) => ObjectType::NAME,
		}
	}
}

impl Type {
	pub fn is_integral(&self) -> bool {
		matches!(self, Type::Byte | Type::Short | Type::Integer | Type::Long)
	}

	pub fn is_floating_point(&self) -> bool {
		matches!(self, Type::Float | Type::Double)
	}

	pub fn is_numeric(&self) -> bool {
		self.is_integral() || self.is_floating_point()
	}

	pub fn is_object(&self) -> bool {
		matches!(self, Type::Object(_))
	}

	pub fn is_array(&self) -> bool {
		matches!(self, Type::Array(_))
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, Type::Undefined)
	}
}

impl Type {
	/// Walks nested object fields. Never fails: a path through a non-object,
	/// a schema-less object or a missing field resolves to `Undefined`.
	pub fn resolve_field_path<S: AsRef<str>>(&self, path: &[S]) -> Type {
		let mut current = self;
		for segment in path {
			let Type::Object(object) = current else {
				return Type::Undefined;
			};
			match object.field(segment.as_ref()) {
				Some(inner) => current = inner,
				None => return Type::Undefined,
			}
		}
		current.clone()
	}

	/// Form of `value` suitable for hashing and equality grouping.
	pub fn canonicalize(&self, value: &Value) -> Value {
		value.canonicalize()
	}

	pub fn compare(&self, l: &Value, r: &Value) -> Ordering {
		l.cmp(r)
	}

	pub fn streamer(&self) -> &dyn Streamer {
		match self {
			Type::Object(object) => object as &dyn Streamer,
			other => other as &dyn Streamer,
		}
	}

	pub fn encode(&self, value: &Value) -> Result<Vec<u8>> {
		let mut out = BufferWriter::new();
		self.write_value(&mut out, value)?;
		Ok(out.into_inner())
	}

	pub fn decode(&self, bytes: &[u8]) -> Result<Value> {
		decode_exact(bytes, |input| self.read_value(input))
	}

	/// Serialized form of the type itself, see [`descriptor`].
	pub fn to_descriptor(&self) -> Result<Vec<u8>> {
		let mut out = BufferWriter::new();
		descriptor::write_type(&mut out, self)?;
		Ok(out.into_inner())
	}

	pub fn from_descriptor(bytes: &[u8]) -> Result<Type> {
		let mut input = BufferReader::new(bytes);
		let ty = descriptor::read_type(&mut input)?;
		if !input.is_empty() {
			return_error!(TypeError::TrailingBytes {
				remaining: input.remaining()
			});
		}
		Ok(ty)
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Array(inner) => write!(f, "array({})", inner),
			other => f.write_str(other.name()),
		}
	}
}

impl FromStr for Type {
	type Err = TypeError;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"undefined" => Ok(Type::Undefined),
			"boolean" | "bool" => Ok(Type::Boolean),
			"byte" | "char" => Ok(Type::Byte),
			"smallint" | "short" => Ok(Type::Short),
			"integer" | "int" => Ok(Type::Integer),
			"bigint" | "long" => Ok(Type::Long),
			"real" | "float" => Ok(Type::Float),
			"double precision" | "double" => Ok(Type::Double),
			"text" | "string" => Ok(Type::Text),
			"object" => Ok(Type::Object(ObjectType::untyped())),
			other => Err(TypeError::ParseFailure {
				target: Type::Undefined,
				input: other.to_string(),
				reason: "unknown type name".to_string(),
			}),
		}
	}
}

impl From<ObjectType> for Type {
	fn from(object: ObjectType) -> Self {
		Type::Object(object)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn nested() -> Type {
		Type::Object(
			ObjectType::builder()
				.field("a", Type::Integer)
				.field(
					"b",
					Type::Object(
						ObjectType::builder()
							.field("c", Type::Text)
							.field("d", Type::Object(ObjectType::untyped()))
							.build(),
					),
				)
				.build(),
		)
	}

	#[test]
	fn test_resolve_field_path() {
		let ty = nested();
		assert_eq!(ty.resolve_field_path(&["a"]), Type::Integer);
		assert_eq!(ty.resolve_field_path(&["b", "c"]), Type::Text);
		assert_eq!(ty.resolve_field_path::<&str>(&[]), ty);
	}

	#[test]
	fn test_resolve_field_path_unknown_is_undefined() {
		let ty = nested();
		assert_eq!(ty.resolve_field_path(&["missing"]), Type::Undefined);
		assert_eq!(ty.resolve_field_path(&["a", "x"]), Type::Undefined);
		assert_eq!(ty.resolve_field_path(&["b", "d", "e"]), Type::Undefined);
		assert_eq!(Type::Text.resolve_field_path(&["x"]), Type::Undefined);
	}

	#[test]
	fn test_ids_are_unique() {
		let types = [
			Type::Undefined,
			Type::Boolean,
			Type::Byte,
			Type::Short,
			Type::Integer,
			Type::Long,
			Type::Float,
			Type::Double,
			Type::Text,
			Type::Array(Box::new(Type::Integer)),
			Type::Object(ObjectType::untyped()),
		];
		for (i, l) in types.iter().enumerate() {
			for r in types.iter().skip(i + 1) {
				assert_ne!(l.id(), r.id(), "{} and {} share an id", l, r);
			}
		}
	}

	#[test]
	fn test_from_str() {
		assert_eq!("INT".parse::<Type>().unwrap(), Type::Integer);
		assert_eq!("double precision".parse::<Type>().unwrap(), Type::Double);
		assert!("geo_point".parse::<Type>().is_err());
	}

	#[test]
	fn test_display() {
		assert_eq!(Type::Array(Box::new(Type::Long)).to_string(), "array(bigint)");
		assert_eq!(Type::Object(ObjectType::untyped()).to_string(), "object");
	}
}
