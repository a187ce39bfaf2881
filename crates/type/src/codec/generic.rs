// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Self-describing value encoding: every value is prefixed with the id of its
//! dynamic type, so it can be read back without any schema.

use indexmap::IndexMap;

use super::{
	capacity_hint, decode_exact,
	streamer::{read_f32, read_f64},
};
use crate::{
	Result, TypeError,
	stream::{BufferReader, BufferWriter},
	value::{Object, Value, r#type::Type},
	return_error,
};

/// Nesting limit while reading, guards the stack against hostile input.
pub const MAX_DEPTH: usize = 128;

pub fn write_generic(out: &mut BufferWriter, value: &Value) -> Result<()> {
	match value {
		Value::Null => out.write_u8(Type::UNDEFINED_ID),
		Value::Boolean(v) => {
			out.write_u8(Type::BOOLEAN_ID);
			out.write_bool(*v);
		}
		Value::Byte(v) => {
			out.write_u8(Type::BYTE_ID);
			out.write_i8(*v);
		}
		Value::Short(v) => {
			out.write_u8(Type::SHORT_ID);
			out.write_i16(*v);
		}
		Value::Integer(v) => {
			out.write_u8(Type::INTEGER_ID);
			out.write_i32(*v);
		}
		Value::Long(v) => {
			out.write_u8(Type::LONG_ID);
			out.write_i64(*v);
		}
		Value::Float(v) => {
			out.write_u8(Type::FLOAT_ID);
			out.write_f32(v.value());
		}
		Value::Double(v) => {
			out.write_u8(Type::DOUBLE_ID);
			out.write_f64(v.value());
		}
		Value::Text(v) => {
			out.write_u8(Type::TEXT_ID);
			out.write_str(v)?;
		}
		Value::Array(values) => {
			out.write_u8(Type::ARRAY_ID);
			out.write_len(values.len())?;
			for value in values {
				write_generic(out, value)?;
			}
		}
		Value::Object(object) => {
			out.write_u8(Type::OBJECT_ID);
			out.write_len(object.len())?;
			for (name, value) in object {
				out.write_str(name)?;
				write_generic(out, value)?;
			}
		}
	}
	Ok(())
}

pub fn read_generic(input: &mut BufferReader<'_>) -> Result<Value> {
	read_nested(input, 0)
}

fn read_nested(input: &mut BufferReader<'_>, depth: usize) -> Result<Value> {
	if depth > MAX_DEPTH {
		return_error!(TypeError::Corrupt {
			reason: format!("values nested deeper than {}", MAX_DEPTH)
		});
	}

	let tag = input.read_u8()?;
	let value = match tag {
		Type::UNDEFINED_ID => Value::Null,
		Type::BOOLEAN_ID => Value::Boolean(input.read_bool()?),
		Type::BYTE_ID => Value::Byte(input.read_i8()?),
		Type::SHORT_ID => Value::Short(input.read_i16()?),
		Type::INTEGER_ID => Value::Integer(input.read_i32()?),
		Type::LONG_ID => Value::Long(input.read_i64()?),
		Type::FLOAT_ID => Value::Float(read_f32(input)?),
		Type::DOUBLE_ID => Value::Double(read_f64(input)?),
		Type::TEXT_ID => Value::Text(input.read_string()?),
		Type::ARRAY_ID => {
			let len = input.read_len()?;
			let mut values = Vec::with_capacity(capacity_hint(len, input));
			for _ in 0..len {
				values.push(read_nested(input, depth + 1)?);
			}
			Value::Array(values)
		}
		Type::OBJECT_ID => {
			let count = input.read_len()?;
			let mut object: Object = IndexMap::with_capacity(capacity_hint(count, input));
			for _ in 0..count {
				let name = input.read_string()?;
				let value = read_nested(input, depth + 1)?;
				object.insert(name, value);
			}
			Value::Object(object)
		}
		tag => return_error!(TypeError::UnknownValueTag {
			tag
		}),
	};
	Ok(value)
}

pub fn encode_generic(value: &Value) -> Result<Vec<u8>> {
	let mut out = BufferWriter::new();
	write_generic(&mut out, value)?;
	Ok(out.into_inner())
}

pub fn decode_generic(bytes: &[u8]) -> Result<Value> {
	decode_exact(bytes, read_generic)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_null_is_single_tag() {
		assert_eq!(encode_generic(&Value::Null).unwrap(), vec![0x00]);
	}

	#[test]
	fn test_tags_match_type_ids() {
		assert_eq!(encode_generic(&Value::int(5)).unwrap(), vec![Type::INTEGER_ID, 0, 0, 0, 5]);
		assert_eq!(encode_generic(&Value::text("a")).unwrap(), vec![Type::TEXT_ID, 1, b'a']);
		assert_eq!(encode_generic(&Value::array([Value::Null])).unwrap(), vec![Type::ARRAY_ID, 1, 0]);
	}

	#[test]
	fn test_nested_document() {
		let value = Value::object([
			("id", Value::long(42)),
			("tags", Value::array([Value::text("a"), Value::Null, Value::bool(true)])),
			("nested", Value::object([("f", Value::float(1.5f32)), ("d", Value::double(2.5))])),
		]);
		let decoded = decode_generic(&encode_generic(&value).unwrap()).unwrap();
		assert_eq!(decoded, value);

		let keys: Vec<&str> = decoded.as_object().unwrap().keys().map(String::as_str).collect();
		assert_eq!(keys, vec!["id", "tags", "nested"]);
	}

	#[test]
	fn test_unknown_tag() {
		assert_eq!(decode_generic(&[0x63]).unwrap_err().code(), "CODEC_005");
	}

	#[test]
	fn test_trailing_bytes() {
		assert_eq!(decode_generic(&[0x00, 0x00]).unwrap_err().code(), "CODEC_006");
	}

	#[test]
	fn test_depth_limit() {
		let mut bytes = vec![];
		for _ in 0..=MAX_DEPTH + 1 {
			bytes.extend_from_slice(&[Type::ARRAY_ID, 1]);
		}
		bytes.push(Type::UNDEFINED_ID);
		assert_eq!(decode_generic(&bytes).unwrap_err().code(), "CODEC_003");
	}
}
