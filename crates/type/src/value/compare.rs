// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use super::{Object, Value};

/// Total order over values. `Null` sorts first; numbers compare numerically
/// across widths with ties broken by type precedence; objects compare by
/// their sorted keys so insertion order never matters.
pub(crate) fn compare_values(l: &Value, r: &Value) -> Ordering {
	match (l, r) {
		(Value::Null, Value::Null) => Ordering::Equal,
		(Value::Null, _) => Ordering::Less,
		(_, Value::Null) => Ordering::Greater,
		(Value::Boolean(l), Value::Boolean(r)) => l.cmp(r),
		(Value::Byte(l), Value::Byte(r)) => l.cmp(r),
		(Value::Short(l), Value::Short(r)) => l.cmp(r),
		(Value::Integer(l), Value::Integer(r)) => l.cmp(r),
		(Value::Long(l), Value::Long(r)) => l.cmp(r),
		(Value::Float(l), Value::Float(r)) => l.cmp(r),
		(Value::Double(l), Value::Double(r)) => l.cmp(r),
		(Value::Text(l), Value::Text(r)) => l.cmp(r),
		(Value::Array(l), Value::Array(r)) => compare_sequences(l, r),
		(Value::Object(l), Value::Object(r)) => compare_objects(l, r),
		(l, r) => compare_mixed(l, r),
	}
}

fn compare_sequences(l: &[Value], r: &[Value]) -> Ordering {
	for (l, r) in l.iter().zip(r.iter()) {
		match compare_values(l, r) {
			Ordering::Equal => continue,
			ordering => return ordering,
		}
	}
	l.len().cmp(&r.len())
}

pub(crate) fn compare_objects(l: &Object, r: &Object) -> Ordering {
	let mut l_keys: Vec<&String> = l.keys().collect();
	let mut r_keys: Vec<&String> = r.keys().collect();
	l_keys.sort_unstable();
	r_keys.sort_unstable();

	for (l_key, r_key) in l_keys.iter().zip(r_keys.iter()) {
		match l_key.cmp(r_key) {
			Ordering::Equal => {}
			ordering => return ordering,
		}
		match compare_values(&l[*l_key], &r[*r_key]) {
			Ordering::Equal => {}
			ordering => return ordering,
		}
	}
	l_keys.len().cmp(&r_keys.len())
}

fn compare_mixed(l: &Value, r: &Value) -> Ordering {
	let numeric = match (l.as_i64(), r.as_i64()) {
		(Some(l), Some(r)) => l.cmp(&r),
		_ => match (l.as_f64(), r.as_f64()) {
			(Some(l), Some(r)) => l.total_cmp(&r),
			_ => Ordering::Equal,
		},
	};
	numeric.then_with(|| l.get_type().precedence().cmp(&r.get_type().precedence()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_objects_compare_independent_of_insertion_order() {
		let l = Value::object([("b", Value::int(2)), ("a", Value::int(1))]);
		let r = Value::object([("a", Value::int(1)), ("b", Value::int(2))]);
		assert_eq!(compare_values(&l, &r), Ordering::Equal);
	}

	#[test]
	fn test_objects_compare_by_sorted_keys_then_values() {
		let l = Value::object([("a", Value::int(1)), ("b", Value::int(2))]);
		let r = Value::object([("a", Value::int(1)), ("b", Value::int(3))]);
		assert_eq!(compare_values(&l, &r), Ordering::Less);

		let l = Value::object([("a", Value::int(9))]);
		let r = Value::object([("b", Value::int(0))]);
		assert_eq!(compare_values(&l, &r), Ordering::Less);

		let shorter = Value::object([("a", Value::int(1))]);
		let longer = Value::object([("a", Value::int(1)), ("b", Value::int(0))]);
		assert_eq!(compare_values(&shorter, &longer), Ordering::Less);
	}

	#[test]
	fn test_null_sorts_first() {
		assert_eq!(compare_values(&Value::Null, &Value::int(i32::MIN)), Ordering::Less);
		assert_eq!(compare_values(&Value::text(""), &Value::Null), Ordering::Greater);
	}

	#[test]
	fn test_mixed_numbers_compare_numerically() {
		assert_eq!(compare_values(&Value::int(5), &Value::long(3)), Ordering::Greater);
		assert_eq!(compare_values(&Value::byte(1), &Value::double(1.5)), Ordering::Less);
	}

	#[test]
	fn test_mixed_equal_numbers_tie_break_on_precedence() {
		assert_eq!(compare_values(&Value::int(1), &Value::long(1)), Ordering::Less);
		assert_eq!(compare_values(&Value::long(1), &Value::int(1)), Ordering::Greater);
	}

	#[test]
	fn test_unrelated_variants_use_precedence() {
		assert_eq!(compare_values(&Value::bool(true), &Value::text("a")), Ordering::Less);
		assert_eq!(
			compare_values(&Value::object([("a", Value::Null)]), &Value::array([Value::int(1)])),
			Ordering::Greater
		);
	}
}
