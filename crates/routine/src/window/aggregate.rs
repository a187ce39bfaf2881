// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{cmp::Ordering, sync::Arc};

use tessera_type::{Result, Type, Value};

use super::{WindowFrameState, WindowFunction, window_implementation};
use crate::{
	BaseResolver, CollectExpression, FuncParams, FunctionInfo, FunctionsBuilder, Param, error::RoutineError,
};

/// Non-null argument values of every row in the frame.
fn frame_values(frame: &WindowFrameState<'_>, expressions: &[Arc<dyn CollectExpression>]) -> Result<Vec<Value>> {
	let Some(expression) = expressions.first() else {
		return Ok(vec![]);
	};
	let mut values = Vec::with_capacity(frame.frame_len());
	for row in frame.frame_rows() {
		let value = expression.collect(*row)?;
		if !value.is_null() {
			values.push(value);
		}
	}
	Ok(values)
}

/// Floating point result of an aggregate. Mixing infinities yields `NaN`,
/// which is reported instead of collapsing into `Null`.
fn floating_result(name: &str, result: f64) -> Result<Value> {
	if result.is_nan() {
		return Err(RoutineError::InvalidArgumentShape {
			name: name.to_string(),
			reason: "infinities of opposite sign".to_string(),
		}
		.into());
	}
	Ok(Value::double(result))
}

fn unsupported(name: &str, value: &Value) -> tessera_type::Error {
	RoutineError::InvalidArgumentShape {
		name: name.to_string(),
		reason: format!("a value of type {}", value.get_type()),
	}
	.into()
}

pub struct Count {
	info: FunctionInfo,
}

window_implementation!(Count);

impl WindowFunction for Count {
	fn execute(
		&self,
		_row_idx: usize,
		frame: &WindowFrameState<'_>,
		expressions: &[Arc<dyn CollectExpression>],
		_args: &[Value],
	) -> Result<Value> {
		let count = frame_values(frame, expressions)?.len();
		Ok(Value::Long(count as i64))
	}
}

/// Sum over the frame. Integral arguments accumulate into a checked `bigint`,
/// everything else into a `double precision`.
pub struct Sum {
	info: FunctionInfo,
}

window_implementation!(Sum);

impl Sum {
	fn integral(&self, values: &[Value]) -> Result<Value> {
		let mut sum: i64 = 0;
		for value in values {
			let Some(v) = value.as_i64() else {
				return Err(unsupported(self.info.name(), value));
			};
			sum = match sum.checked_add(v) {
				Some(sum) => sum,
				None => {
					return Err(RoutineError::NumericOverflow {
						name: self.info.name().to_string(),
						result: Type::Long,
					}
					.into());
				}
			};
		}
		Ok(Value::Long(sum))
	}

	fn floating(&self, values: &[Value]) -> Result<Value> {
		let mut sum = 0.0;
		for value in values {
			match value.as_f64() {
				Some(v) => sum += v,
				None => return Err(unsupported(self.info.name(), value)),
			}
		}
		floating_result(self.info.name(), sum)
	}
}

impl WindowFunction for Sum {
	fn execute(
		&self,
		_row_idx: usize,
		frame: &WindowFrameState<'_>,
		expressions: &[Arc<dyn CollectExpression>],
		_args: &[Value],
	) -> Result<Value> {
		let values = frame_values(frame, expressions)?;
		if values.is_empty() {
			return Ok(Value::Null);
		}
		match self.info.return_type {
			Type::Long => self.integral(&values),
			_ => self.floating(&values),
		}
	}
}

pub struct Avg {
	info: FunctionInfo,
}

window_implementation!(Avg);

impl WindowFunction for Avg {
	fn execute(
		&self,
		_row_idx: usize,
		frame: &WindowFrameState<'_>,
		expressions: &[Arc<dyn CollectExpression>],
		_args: &[Value],
	) -> Result<Value> {
		let values = frame_values(frame, expressions)?;
		if values.is_empty() {
			return Ok(Value::Null);
		}
		let mut sum = 0.0;
		for value in &values {
			match value.as_f64() {
				Some(v) => sum += v,
				None => return Err(unsupported(self.info.name(), value)),
			}
		}
		floating_result(self.info.name(), sum / values.len() as f64)
	}
}

/// `min` and `max` over the frame, ordered by the argument type's comparator.
pub struct Extreme {
	info: FunctionInfo,
	keep: Ordering,
}

window_implementation!(Extreme);

impl WindowFunction for Extreme {
	fn execute(
		&self,
		_row_idx: usize,
		frame: &WindowFrameState<'_>,
		expressions: &[Arc<dyn CollectExpression>],
		_args: &[Value],
	) -> Result<Value> {
		let ty = &self.info.return_type;
		let extreme = frame_values(frame, expressions)?
			.into_iter()
			.reduce(|best, value| if ty.compare(&value, &best) == self.keep { value } else { best });
		Ok(extreme.unwrap_or(Value::Null))
	}
}

pub(super) fn register(builder: &mut FunctionsBuilder) -> Result<()> {
	builder.register(
		"count",
		BaseResolver::new(FuncParams::none().required(Param::Any), |name, arg_types| {
			Ok(Arc::new(Count {
				info: FunctionInfo::window(name, arg_types, Type::Long),
			}))
		}),
	)?;
	builder.register(
		"sum",
		BaseResolver::new(FuncParams::none().required(Param::Numeric), |name, arg_types| {
			let return_type = if arg_types[0].is_integral() {
				Type::Long
			} else {
				Type::Double
			};
			Ok(Arc::new(Sum {
				info: FunctionInfo::window(name, arg_types, return_type),
			}))
		}),
	)?;
	builder.register(
		"avg",
		BaseResolver::new(FuncParams::none().required(Param::Numeric), |name, arg_types| {
			Ok(Arc::new(Avg {
				info: FunctionInfo::window(name, arg_types, Type::Double),
			}))
		}),
	)?;
	builder.register(
		"min",
		BaseResolver::new(FuncParams::none().required(Param::Any), |name, arg_types| {
			Ok(Arc::new(Extreme {
				info: FunctionInfo::window(name, arg_types, arg_types[0].clone()),
				keep: Ordering::Less,
			}))
		}),
	)?;
	builder.register(
		"max",
		BaseResolver::new(FuncParams::none().required(Param::Any), |name, arg_types| {
			Ok(Arc::new(Extreme {
				info: FunctionInfo::window(name, arg_types, arg_types[0].clone()),
				keep: Ordering::Greater,
			}))
		}),
	)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::window::testing::{column, resolve, rows, run};

	// RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW without peers
	fn running(i: usize) -> (usize, usize) {
		(0, i + 1)
	}

	#[test]
	fn test_count_skips_nulls() {
		let count = resolve("count", &[Type::Integer]);
		let partition = rows(&[Value::int(1), Value::Null, Value::int(3)]);
		let result = run(&count, &partition, &column(Type::Integer), &[], running).unwrap();
		assert_eq!(result, vec![Value::long(1), Value::long(1), Value::long(2)]);
	}

	#[test]
	fn test_sum_integral_is_bigint() {
		let sum = resolve("sum", &[Type::Integer]);
		assert_eq!(sum.info().return_type, Type::Long);

		let partition = rows(&[Value::Null, Value::int(i32::MAX), Value::int(i32::MAX)]);
		let result = run(&sum, &partition, &column(Type::Integer), &[], running).unwrap();
		assert_eq!(result, vec![Value::Null, Value::long(i32::MAX as i64), Value::long(2 * i32::MAX as i64)]);
	}

	#[test]
	fn test_sum_overflow() {
		let sum = resolve("sum", &[Type::Long]);
		let partition = rows(&[Value::long(i64::MAX), Value::long(1)]);
		let err = run(&sum, &partition, &column(Type::Long), &[], running).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_006");
	}

	#[test]
	fn test_sum_floating() {
		let sum = resolve("sum", &[Type::Float]);
		assert_eq!(sum.info().return_type, Type::Double);
		let partition = rows(&[Value::float(0.5f32), Value::float(0.25f32)]);
		let result = run(&sum, &partition, &column(Type::Float), &[], running).unwrap();
		assert_eq!(result, vec![Value::double(0.5), Value::double(0.75)]);
	}

	#[test]
	fn test_sum_rejects_text_at_runtime() {
		let sum = resolve("sum", &[Type::Undefined]);
		let partition = rows(&[Value::text("x")]);
		let err = run(&sum, &partition, &column(Type::Undefined), &[], running).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_005");
	}

	#[test]
	fn test_sum_requires_numeric_type() {
		let err = crate::builtin().resolve("sum", &[Type::Text]).err().unwrap();
		assert_eq!(err.code(), "FUNCTION_004");
	}

	#[test]
	fn test_opposite_infinities_are_reported() {
		let partition = rows(&[Value::double(f64::INFINITY), Value::double(f64::NEG_INFINITY)]);
		for name in ["sum", "avg"] {
			let function = resolve(name, &[Type::Double]);
			let err = run(&function, &partition, &column(Type::Double), &[], running).unwrap_err();
			assert_eq!(err.code(), "FUNCTION_005");
		}

		let sum = resolve("sum", &[Type::Double]);
		let result = run(&sum, &partition[..1], &column(Type::Double), &[], running).unwrap();
		assert_eq!(result, vec![Value::double(f64::INFINITY)]);
	}

	#[test]
	fn test_avg() {
		let avg = resolve("avg", &[Type::Short]);
		let partition = rows(&[Value::short(1i16), Value::short(2i16), Value::Null]);
		let result = run(&avg, &partition, &column(Type::Short), &[], running).unwrap();
		assert_eq!(result, vec![Value::double(1.0), Value::double(1.5), Value::double(1.5)]);
	}

	#[test]
	fn test_empty_frame_aggregates() {
		let partition = rows(&[Value::int(1)]);
		let empty = |_: usize| (0, 0);
		for name in ["sum", "avg", "min", "max"] {
			let function = resolve(name, &[Type::Integer]);
			assert_eq!(run(&function, &partition, &column(Type::Integer), &[], empty).unwrap(), vec![Value::Null]);
		}
		let count = resolve("count", &[Type::Integer]);
		assert_eq!(run(&count, &partition, &column(Type::Integer), &[], empty).unwrap(), vec![Value::long(0)]);
	}

	#[test]
	fn test_min_max() {
		let partition = rows(&[Value::text("m"), Value::Null, Value::text("a"), Value::text("z")]);
		let whole = |_: usize| (0, 4);
		let min = resolve("min", &[Type::Text]);
		let max = resolve("max", &[Type::Text]);
		assert_eq!(run(&min, &partition, &column(Type::Text), &[], whole).unwrap(), vec![Value::text("a"); 4]);
		assert_eq!(run(&max, &partition, &column(Type::Text), &[], whole).unwrap(), vec![Value::text("z"); 4]);
	}

	#[test]
	fn test_min_over_objects_ignores_key_order() {
		let l = Value::object([("b", Value::int(1)), ("a", Value::int(2))]);
		let r = Value::object([("a", Value::int(1)), ("b", Value::int(9))]);
		let partition = rows(&[l, r.clone()]);
		let min = resolve("min", &[Type::Object(tessera_type::ObjectType::untyped())]);
		let result = run(&min, &partition, &column(Type::Object(tessera_type::ObjectType::untyped())), &[], |_| (0, 2))
			.unwrap();
		assert_eq!(result, vec![r.clone(), r]);
	}
}
