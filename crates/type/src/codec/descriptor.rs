// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Serialized form of a [`Type`], shipped alongside plans so that readers
//! rebuild the exact schema the writer used.

use indexmap::IndexMap;

use super::{capacity_hint, generic::MAX_DEPTH};
use crate::{
	Result, TypeError,
	stream::{BufferReader, BufferWriter},
	value::r#type::{ObjectType, Type},
	return_error,
};

pub fn write_type(out: &mut BufferWriter, ty: &Type) -> Result<()> {
	out.write_vint(ty.id() as u32);
	match ty {
		Type::Object(object) => match object.fields() {
			None => out.write_bool(false),
			Some(fields) => {
				out.write_bool(true);
				out.write_len(fields.len())?;
				for (name, child) in fields {
					out.write_str(name)?;
					write_type(out, child)?;
				}
			}
		},
		Type::Array(inner) => write_type(out, inner)?,
		_ => {}
	}
	Ok(())
}

pub fn read_type(input: &mut BufferReader<'_>) -> Result<Type> {
	read_nested(input, 0)
}

fn read_nested(input: &mut BufferReader<'_>, depth: usize) -> Result<Type> {
	if depth > MAX_DEPTH {
		return_error!(TypeError::Corrupt {
			reason: format!("types nested deeper than {}", MAX_DEPTH)
		});
	}

	let id = input.read_vint()?;
	let Ok(tag) = u8::try_from(id) else {
		return_error!(TypeError::UnknownTypeId {
			id
		});
	};
	let ty = match tag {
		Type::UNDEFINED_ID => Type::Undefined,
		Type::BOOLEAN_ID => Type::Boolean,
		Type::BYTE_ID => Type::Byte,
		Type::SHORT_ID => Type::Short,
		Type::INTEGER_ID => Type::Integer,
		Type::LONG_ID => Type::Long,
		Type::FLOAT_ID => Type::Float,
		Type::DOUBLE_ID => Type::Double,
		Type::TEXT_ID => Type::Text,
		Type::ARRAY_ID => Type::Array(Box::new(read_nested(input, depth + 1)?)),
		Type::OBJECT_ID => Type::Object(read_object(input, depth)?),
		_ => return_error!(TypeError::UnknownTypeId {
			id
		}),
	};
	Ok(ty)
}

fn read_object(input: &mut BufferReader<'_>, depth: usize) -> Result<ObjectType> {
	if !input.read_bool()? {
		return Ok(ObjectType::untyped());
	}
	let count = input.read_len()?;
	let mut fields = IndexMap::with_capacity(capacity_hint(count, input));
	for _ in 0..count {
		let name = input.read_string()?;
		let ty = read_nested(input, depth + 1)?;
		if fields.insert(name, ty).is_some() {
			return_error!(TypeError::Corrupt {
				reason: "object schema declares a field twice".to_string()
			});
		}
	}
	Ok(ObjectType::from_fields(fields))
}
