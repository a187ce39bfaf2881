// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use tracing::instrument;

use super::{Streamer, capacity_hint, generic};
use crate::{
	Error, Result, TypeError,
	error::CodecDirection,
	stream::{BufferReader, BufferWriter},
	value::{
		Object, OrderedF32, OrderedF64, Value,
		r#type::{ObjectType, Type},
	},
	return_error,
};

impl Streamer for Type {
	fn write_value(&self, out: &mut BufferWriter, value: &Value) -> Result<()> {
		match self {
			Type::Undefined => generic::write_generic(out, value),
			Type::Array(inner) => write_array(self, inner, out, value),
			Type::Object(object) => object.write_value(out, value),
			primitive => write_primitive(primitive, out, value),
		}
	}

	fn read_value(&self, input: &mut BufferReader<'_>) -> Result<Value> {
		match self {
			Type::Undefined => generic::read_generic(input),
			Type::Array(inner) => read_array(inner, input),
			Type::Object(object) => object.read_value(input),
			primitive => read_primitive(primitive, input),
		}
	}
}

fn mismatch(expected: &Type, value: &Value) -> Error {
	crate::error!(TypeError::InvalidValue {
		expected: expected.clone(),
		actual: value.get_type(),
	})
}

fn write_primitive(ty: &Type, out: &mut BufferWriter, value: &Value) -> Result<()> {
	if value.is_null() {
		out.write_bool(false);
		return Ok(());
	}
	match (ty, value) {
		(Type::Boolean, Value::Boolean(v)) => {
			out.write_bool(true);
			out.write_bool(*v);
		}
		(Type::Byte, Value::Byte(v)) => {
			out.write_bool(true);
			out.write_i8(*v);
		}
		(Type::Short, Value::Short(v)) => {
			out.write_bool(true);
			out.write_i16(*v);
		}
		(Type::Integer, Value::Integer(v)) => {
			out.write_bool(true);
			out.write_i32(*v);
		}
		(Type::Long, Value::Long(v)) => {
			out.write_bool(true);
			out.write_i64(*v);
		}
		(Type::Float, Value::Float(v)) => {
			out.write_bool(true);
			out.write_f32(v.value());
		}
		(Type::Double, Value::Double(v)) => {
			out.write_bool(true);
			out.write_f64(v.value());
		}
		(Type::Text, Value::Text(v)) => {
			out.write_bool(true);
			out.write_str(v)?;
		}
		(ty, value) => return Err(mismatch(ty, value)),
	}
	Ok(())
}

fn read_primitive(ty: &Type, input: &mut BufferReader<'_>) -> Result<Value> {
	if !input.read_bool()? {
		return Ok(Value::Null);
	}
	let value = match ty {
		Type::Boolean => Value::Boolean(input.read_bool()?),
		Type::Byte => Value::Byte(input.read_i8()?),
		Type::Short => Value::Short(input.read_i16()?),
		Type::Integer => Value::Integer(input.read_i32()?),
		Type::Long => Value::Long(input.read_i64()?),
		Type::Float => Value::Float(read_f32(input)?),
		Type::Double => Value::Double(read_f64(input)?),
		Type::Text => Value::Text(input.read_string()?),
		Type::Undefined | Type::Array(_) | Type::Object(_) => {
			unreachable!("composite types are dispatched before primitives")
		}
	};
	Ok(value)
}

pub(super) fn read_f32(input: &mut BufferReader<'_>) -> Result<OrderedF32> {
	match OrderedF32::try_from(input.read_f32()?) {
		Ok(v) => Ok(v),
		Err(_) => return_error!(TypeError::Corrupt {
			reason: "NaN float payload".to_string()
		}),
	}
}

pub(super) fn read_f64(input: &mut BufferReader<'_>) -> Result<OrderedF64> {
	match OrderedF64::try_from(input.read_f64()?) {
		Ok(v) => Ok(v),
		Err(_) => return_error!(TypeError::Corrupt {
			reason: "NaN double payload".to_string()
		}),
	}
}

// vint(len + 1); 0 marks a null array
fn write_array(ty: &Type, inner: &Type, out: &mut BufferWriter, value: &Value) -> Result<()> {
	match value {
		Value::Null => {
			out.write_vint(0);
			Ok(())
		}
		Value::Array(values) => {
			out.write_len(values.len() + 1)?;
			for value in values {
				inner.write_value(out, value)?;
			}
			Ok(())
		}
		other => Err(mismatch(ty, other)),
	}
}

fn read_array(inner: &Type, input: &mut BufferReader<'_>) -> Result<Value> {
	let len = match input.read_len()? {
		0 => return Ok(Value::Null),
		n => n - 1,
	};
	let mut values = Vec::with_capacity(capacity_hint(len, input));
	for _ in 0..len {
		values.push(inner.read_value(input)?);
	}
	Ok(Value::Array(values))
}

impl ObjectType {
	fn integrity_fault(&self, field: &str, direction: CodecDirection) -> Error {
		let known_fields: Vec<String> = self.fields().map(|f| f.keys().cloned().collect()).unwrap_or_default();
		tracing::error!(
			field,
			%direction,
			known = ?known_fields,
			"object field outside of schema"
		);
		crate::error!(TypeError::ProtocolIntegrityFault {
			field: field.to_string(),
			direction,
			known_fields,
		})
	}
}

impl Streamer for ObjectType {
	#[instrument(name = "codec::object::write", level = "trace", skip_all)]
	fn write_value(&self, out: &mut BufferWriter, value: &Value) -> Result<()> {
		let Some(fields) = self.fields() else {
			return write_untyped(self, out, value);
		};
		let Value::Object(object) = value else {
			return Err(mismatch(&Type::Object(self.clone()), value));
		};

		out.write_len(object.len())?;
		for (name, child) in object {
			let Some(ty) = fields.get(name) else {
				return Err(self.integrity_fault(name, CodecDirection::Write));
			};
			out.write_str(name)?;
			ty.write_value(out, child)?;
		}
		Ok(())
	}

	#[instrument(name = "codec::object::read", level = "trace", skip_all)]
	fn read_value(&self, input: &mut BufferReader<'_>) -> Result<Value> {
		let Some(fields) = self.fields() else {
			return read_untyped(input);
		};

		let count = input.read_len()?;
		let mut object: Object = IndexMap::with_capacity(capacity_hint(count, input));
		for _ in 0..count {
			let name = input.read_string()?;
			let Some(ty) = fields.get(&name) else {
				return Err(self.integrity_fault(&name, CodecDirection::Read));
			};
			let child = ty.read_value(input)?;
			if object.insert(name, child).is_some() {
				return_error!(TypeError::Corrupt {
					reason: "object field repeated".to_string()
				});
			}
		}
		Ok(Value::Object(object))
	}
}

fn write_untyped(ty: &ObjectType, out: &mut BufferWriter, value: &Value) -> Result<()> {
	match value {
		Value::Null | Value::Object(_) => generic::write_generic(out, value),
		other => Err(mismatch(&Type::Object(ty.clone()), other)),
	}
}

fn read_untyped(input: &mut BufferReader<'_>) -> Result<Value> {
	match generic::read_generic(input)? {
		value @ (Value::Null | Value::Object(_)) => Ok(value),
		other => return_error!(TypeError::Corrupt {
			reason: format!("expected an object, found a {} value", other.get_type())
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn round_trip(ty: &Type, value: &Value) -> Value {
		let bytes = ty.encode(value).unwrap();
		ty.decode(&bytes).unwrap()
	}

	#[test]
	fn test_primitive_presence_flag() {
		assert_eq!(Type::Integer.encode(&Value::Null).unwrap(), vec![0x00]);
		assert_eq!(Type::Integer.encode(&Value::int(1)).unwrap(), vec![0x01, 0x00, 0x00, 0x00, 0x01]);
		assert_eq!(Type::Boolean.encode(&Value::bool(true)).unwrap(), vec![0x01, 0x01]);
	}

	#[test]
	fn test_primitive_round_trip() {
		for (ty, value) in [
			(Type::Boolean, Value::bool(false)),
			(Type::Byte, Value::byte(-7)),
			(Type::Short, Value::short(i16::MIN)),
			(Type::Long, Value::long(i64::MAX)),
			(Type::Float, Value::float(0.25f32)),
			(Type::Double, Value::double(-1.5e300)),
			(Type::Text, Value::text("")),
		] {
			assert_eq!(round_trip(&ty, &value), value);
			assert_eq!(round_trip(&ty, &Value::Null), Value::Null);
		}
	}

	#[test]
	fn test_primitive_rejects_other_variant() {
		let err = Type::Integer.encode(&Value::long(1)).unwrap_err();
		assert_eq!(err.code(), "TYPE_002");
	}

	#[test]
	fn test_array() {
		let ty = Type::Array(Box::new(Type::Short));
		assert_eq!(ty.encode(&Value::Null).unwrap(), vec![0x00]);
		assert_eq!(ty.encode(&Value::array([])).unwrap(), vec![0x01]);

		let value = Value::array([Value::short(1i16), Value::Null]);
		assert_eq!(ty.encode(&value).unwrap(), vec![0x03, 0x01, 0x00, 0x01, 0x00]);
		assert_eq!(round_trip(&ty, &value), value);
	}

	#[test]
	fn test_undefined_uses_generic_codec() {
		let value = Value::array([Value::int(1), Value::text("a")]);
		assert_eq!(round_trip(&Type::Undefined, &value), value);
	}

	#[test]
	fn test_null_object_with_schema_is_rejected() {
		let ty = Type::Object(ObjectType::builder().field("a", Type::Integer).build());
		assert_eq!(ty.encode(&Value::Null).unwrap_err().code(), "TYPE_002");
	}

	#[test]
	fn test_untyped_object_accepts_null() {
		let ty = Type::Object(ObjectType::untyped());
		assert_eq!(round_trip(&ty, &Value::Null), Value::Null);
		assert_eq!(ty.encode(&Value::int(1)).unwrap_err().code(), "TYPE_002");
	}

	#[test]
	fn test_repeated_field_is_corrupt() {
		let ty = Type::Object(ObjectType::builder().field("a", Type::Boolean).build());
		let bytes = [0x02, 0x01, b'a', 0x01, 0x01, 0x01, b'a', 0x00];
		assert_eq!(ty.decode(&bytes).unwrap_err().code(), "CODEC_003");
	}
}
