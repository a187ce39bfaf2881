// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{Object, Value};

impl Value {
	/// Deep copy with every nested object sorted by key. Two values that
	/// describe the same document produce identical canonical forms, so the
	/// result is safe to use as a grouping or hashing key.
	pub fn canonicalize(&self) -> Value {
		match self {
			Value::Object(object) => Value::Object(canonical_object(object)),
			Value::Array(values) => Value::Array(values.iter().map(Value::canonicalize).collect()),
			scalar => scalar.clone(),
		}
	}

	pub fn is_canonical(&self) -> bool {
		match self {
			Value::Object(object) => {
				object.keys().zip(object.keys().skip(1)).all(|(l, r)| l < r)
					&& object.values().all(Value::is_canonical)
			}
			Value::Array(values) => values.iter().all(Value::is_canonical),
			_ => true,
		}
	}
}

fn canonical_object(object: &Object) -> Object {
	let mut result: Object = object.iter().map(|(k, v)| (k.clone(), v.canonicalize())).collect();
	result.sort_unstable_keys();
	result
}
