// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tessera_type::{Result, Value};

use super::{WindowFrameState, WindowFunction, argument_at, integral_arg, window_implementation};
use crate::{BaseResolver, CollectExpression, FuncParams, FunctionInfo, FunctionsBuilder, Param, error::RoutineError};

/// Value of the argument at the first row of the frame.
pub struct FirstValue {
	info: FunctionInfo,
}

window_implementation!(FirstValue);

impl WindowFunction for FirstValue {
	fn execute(
		&self,
		_row_idx: usize,
		frame: &WindowFrameState<'_>,
		expressions: &[Arc<dyn CollectExpression>],
		_args: &[Value],
	) -> Result<Value> {
		if frame.is_frame_empty() {
			return Ok(Value::Null);
		}
		argument_at(self.info.name(), frame, expressions, frame.lower_bound())
	}
}

/// Value of the argument at the last row of the frame.
pub struct LastValue {
	info: FunctionInfo,
}

window_implementation!(LastValue);

impl WindowFunction for LastValue {
	fn execute(
		&self,
		_row_idx: usize,
		frame: &WindowFrameState<'_>,
		expressions: &[Arc<dyn CollectExpression>],
		_args: &[Value],
	) -> Result<Value> {
		if frame.is_frame_empty() {
			return Ok(Value::Null);
		}
		argument_at(self.info.name(), frame, expressions, frame.upper_bound_exclusive() - 1)
	}
}

/// Value of the argument at the n-th (1-based) row of the frame, `Null` when
/// the frame is shorter.
pub struct NthValue {
	info: FunctionInfo,
}

window_implementation!(NthValue);

impl WindowFunction for NthValue {
	fn execute(
		&self,
		_row_idx: usize,
		frame: &WindowFrameState<'_>,
		expressions: &[Arc<dyn CollectExpression>],
		args: &[Value],
	) -> Result<Value> {
		let name = self.info.name();
		let n = match integral_arg(name, args, 1)? {
			Some(Some(n)) => n,
			_ => return Ok(Value::Null),
		};
		if n < 1 {
			return Err(RoutineError::InvalidArgumentShape {
				name: name.to_string(),
				reason: format!("a row position of {}, positions start at 1", n),
			}
			.into());
		}

		let offset = usize::try_from(n - 1).unwrap_or(usize::MAX);
		match frame.lower_bound().checked_add(offset) {
			Some(index) if index < frame.upper_bound_exclusive() => argument_at(name, frame, expressions, index),
			_ => Ok(Value::Null),
		}
	}
}

pub(super) fn register(builder: &mut FunctionsBuilder) -> Result<()> {
	builder.register(
		"first_value",
		BaseResolver::new(FuncParams::none().required(Param::Any), |name, arg_types| {
			Ok(Arc::new(FirstValue {
				info: FunctionInfo::window(name, arg_types, arg_types[0].clone()),
			}))
		}),
	)?;
	builder.register(
		"last_value",
		BaseResolver::new(FuncParams::none().required(Param::Any), |name, arg_types| {
			Ok(Arc::new(LastValue {
				info: FunctionInfo::window(name, arg_types, arg_types[0].clone()),
			}))
		}),
	)?;
	builder.register(
		"nth_value",
		BaseResolver::new(FuncParams::none().required(Param::Any).required(Param::Integral), |name, arg_types| {
			Ok(Arc::new(NthValue {
				info: FunctionInfo::window(name, arg_types, arg_types[0].clone()),
			}))
		}),
	)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use tessera_type::Type;

	use super::*;
	use crate::window::testing::{column, resolve, rows, run};

	fn partition() -> Vec<Vec<Value>> {
		rows(&[Value::text("a"), Value::text("b"), Value::text("c"), Value::text("d")])
	}

	// ROWS BETWEEN 1 PRECEDING AND 1 FOLLOWING
	fn sliding(i: usize) -> (usize, usize) {
		(i.saturating_sub(1), i + 2)
	}

	#[test]
	fn test_first_and_last_value() {
		let first = resolve("first_value", &[Type::Text]);
		let last = resolve("last_value", &[Type::Text]);
		assert_eq!(first.info().return_type, Type::Text);

		let expressions = column(Type::Text);
		assert_eq!(
			run(&first, &partition(), &expressions, &[], sliding).unwrap(),
			vec![Value::text("a"), Value::text("a"), Value::text("b"), Value::text("c")]
		);
		assert_eq!(
			run(&last, &partition(), &expressions, &[], sliding).unwrap(),
			vec![Value::text("b"), Value::text("c"), Value::text("d"), Value::text("d")]
		);
	}

	#[test]
	fn test_empty_frame_is_null() {
		let first = resolve("first_value", &[Type::Text]);
		let result = run(&first, &partition(), &column(Type::Text), &[], |i| (i + 1, i + 1)).unwrap();
		assert_eq!(result, vec![Value::Null; 4]);
	}

	#[test]
	fn test_nth_value() {
		let nth = resolve("nth_value", &[Type::Text, Type::Integer]);
		let result = run(&nth, &partition(), &column(Type::Text), &[Value::int(2)], |i| (0, i + 1)).unwrap();
		assert_eq!(result, vec![Value::Null, Value::text("b"), Value::text("b"), Value::text("b")]);
	}

	#[test]
	fn test_nth_value_rejects_non_positive() {
		let nth = resolve("nth_value", &[Type::Text, Type::Integer]);
		let err = run(&nth, &partition(), &column(Type::Text), &[Value::int(0)], |i| (0, i + 1)).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_005");
	}

	#[test]
	fn test_nth_value_requires_integral_position() {
		let err = crate::builtin().resolve("nth_value", &[Type::Text, Type::Double]).err().unwrap();
		assert_eq!(err.code(), "FUNCTION_004");
	}
}
