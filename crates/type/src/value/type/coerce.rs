// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{ObjectType, Type};
use crate::{
	Result, TypeError,
	value::{
		Object, OrderedF32, OrderedF64, Value,
		json::{parse_json, parse_json_object},
	},
	return_error,
};

impl Type {
	/// Converts a raw value into the representation of this type. `Null` is
	/// valid for every type and always passes through.
	pub fn value(&self, raw: Value) -> Result<Value> {
		if raw.is_null() {
			return Ok(Value::Null);
		}
		match self {
			Type::Undefined => Ok(raw),
			Type::Boolean => to_boolean(raw),
			Type::Byte => to_integral(self, raw).and_then(|v| narrow(self, v, Value::Byte)),
			Type::Short => to_integral(self, raw).and_then(|v| narrow(self, v, Value::Short)),
			Type::Integer => to_integral(self, raw).and_then(|v| narrow(self, v, Value::Integer)),
			Type::Long => to_integral(self, raw).map(Value::Long),
			Type::Float => to_float(raw),
			Type::Double => to_double(raw),
			Type::Text => Ok(to_text(raw)),
			Type::Array(inner) => to_array(self, inner, raw),
			Type::Object(object) => to_object(self, object, raw),
		}
	}
}

fn invalid(expected: &Type, raw: &Value) -> crate::Error {
	crate::error!(TypeError::InvalidValue {
		expected: expected.clone(),
		actual: raw.get_type(),
	})
}

fn out_of_range(target: &Type, value: impl ToString) -> crate::Error {
	crate::error!(TypeError::CastOutOfRange {
		target: target.clone(),
		value: value.to_string(),
	})
}

fn parse_failure(target: &Type, input: &str, reason: impl ToString) -> crate::Error {
	crate::error!(TypeError::ParseFailure {
		target: target.clone(),
		input: input.to_string(),
		reason: reason.to_string(),
	})
}

fn to_boolean(raw: Value) -> Result<Value> {
	match raw {
		Value::Boolean(_) => Ok(raw),
		Value::Text(text) => match text.trim().to_lowercase().as_str() {
			"true" | "t" => Ok(Value::Boolean(true)),
			"false" | "f" => Ok(Value::Boolean(false)),
			_ => Err(parse_failure(&Type::Boolean, &text, "expected true, false, t or f")),
		},
		other => match other.as_i64() {
			Some(v) => Ok(Value::Boolean(v != 0)),
			None => Err(invalid(&Type::Boolean, &other)),
		},
	}
}

/// Widens any integral, float or numeric text to `i64`. Fractions truncate
/// toward zero.
fn to_integral(target: &Type, raw: Value) -> Result<i64> {
	match &raw {
		Value::Boolean(v) => Ok(*v as i64),
		Value::Float(_) | Value::Double(_) => {
			let v = raw.as_f64().unwrap_or_default().trunc();
			if v < i64::MIN as f64 || v >= i64::MAX as f64 {
				return Err(out_of_range(target, &raw));
			}
			Ok(v as i64)
		}
		Value::Text(text) => {
			let trimmed = text.trim();
			if let Ok(v) = trimmed.parse::<i64>() {
				return Ok(v);
			}
			match trimmed.parse::<f64>() {
				Ok(v) if v.is_finite() => to_integral(target, Value::double(v)),
				_ => Err(parse_failure(target, text, "not a number")),
			}
		}
		other => other.as_i64().ok_or_else(|| invalid(target, other)),
	}
}

fn narrow<T: TryFrom<i64>>(target: &Type, v: i64, wrap: fn(T) -> Value) -> Result<Value> {
	T::try_from(v).map(wrap).map_err(|_| out_of_range(target, v))
}

fn to_double(raw: Value) -> Result<Value> {
	let v = match &raw {
		Value::Double(_) => return Ok(raw),
		Value::Text(text) => text
			.trim()
			.parse::<f64>()
			.map_err(|err| parse_failure(&Type::Double, text, err))?,
		other => other.as_f64().ok_or_else(|| invalid(&Type::Double, other))?,
	};
	OrderedF64::try_from(v).map(Value::Double).map_err(|_| parse_failure(&Type::Double, &raw.to_string(), "NaN"))
}

fn to_float(raw: Value) -> Result<Value> {
	let v = match &raw {
		Value::Float(_) => return Ok(raw),
		Value::Text(text) => text
			.trim()
			.parse::<f64>()
			.map_err(|err| parse_failure(&Type::Float, text, err))?,
		other => other.as_f64().ok_or_else(|| invalid(&Type::Float, other))?,
	};
	let narrowed = v as f32;
	if v.is_finite() && !narrowed.is_finite() {
		return_error!(TypeError::CastOutOfRange {
			target: Type::Float,
			value: raw.to_string(),
		});
	}
	OrderedF32::try_from(narrowed).map(Value::Float).map_err(|_| parse_failure(&Type::Float, &raw.to_string(), "NaN"))
}

fn to_text(raw: Value) -> Value {
	match raw {
		Value::Text(_) => raw,
		other => Value::Text(other.to_string()),
	}
}

fn to_array(target: &Type, inner: &Type, raw: Value) -> Result<Value> {
	let values = match raw {
		Value::Array(values) => values,
		Value::Text(text) => match parse_json(target, &text)? {
			Value::Array(values) => values,
			other => return Err(parse_failure(target, &text, format!("expected a JSON array, found {}", other.get_type()))),
		},
		other => return Err(invalid(target, &other)),
	};
	values.into_iter().map(|v| inner.value(v)).collect::<Result<Vec<_>>>().map(Value::Array)
}

fn to_object(target: &Type, object: &ObjectType, raw: Value) -> Result<Value> {
	match raw {
		Value::Text(text) => {
			let parsed = parse_json_object(target, &text)?;
			apply_schema(object, parsed).map(Value::Object)
		}
		other => Ok(other),
	}
}

/// Coerces the children of a freshly parsed document to their declared types,
/// down through nested objects and arrays. Keys outside the schema are kept;
/// the codec decides what to do with them.
fn apply_schema(object: &ObjectType, parsed: Object) -> Result<Object> {
	let Some(fields) = object.fields() else {
		return Ok(parsed);
	};
	parsed.into_iter()
		.map(|(key, value)| match fields.get(&key) {
			Some(ty) => conform(ty, value).map(|v| (key, v)),
			None => Ok((key, value)),
		})
		.collect()
}

fn conform(ty: &Type, parsed: Value) -> Result<Value> {
	match (ty, parsed) {
		(Type::Object(object), Value::Object(map)) => apply_schema(object, map).map(Value::Object),
		(Type::Array(inner), Value::Array(values)) => {
			values.into_iter().map(|v| conform(inner, v)).collect::<Result<Vec<_>>>().map(Value::Array)
		}
		(ty, parsed) => ty.value(parsed),
	}
}
