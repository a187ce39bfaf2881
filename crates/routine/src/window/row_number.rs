// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tessera_type::{Result, Type, Value};

use super::{WindowFrameState, WindowFunction, window_implementation};
use crate::{BaseResolver, CollectExpression, FuncParams, FunctionInfo, FunctionsBuilder, error::RoutineError};

/// 1-based ordinal of the row within its partition. The frame is ignored.
pub struct RowNumber {
	info: FunctionInfo,
}

window_implementation!(RowNumber);

impl WindowFunction for RowNumber {
	fn execute(
		&self,
		row_idx: usize,
		_frame: &WindowFrameState<'_>,
		_expressions: &[Arc<dyn CollectExpression>],
		_args: &[Value],
	) -> Result<Value> {
		match i32::try_from(row_idx + 1) {
			Ok(number) => Ok(Value::Integer(number)),
			Err(_) => Err(RoutineError::NumericOverflow {
				name: self.info.name().to_string(),
				result: self.info.return_type.clone(),
			}
			.into()),
		}
	}
}

pub(super) fn register(builder: &mut FunctionsBuilder) -> Result<()> {
	builder.register(
		"row_number",
		BaseResolver::new(FuncParams::none(), |name, arg_types| {
			Ok(Arc::new(RowNumber {
				info: FunctionInfo::window(name, arg_types, Type::Integer),
			}))
		}),
	)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::window::testing::{resolve, rows, run};

	#[test]
	fn test_numbers_rows_in_order() {
		let function = resolve("row_number", &[]);
		assert_eq!(function.info().return_type, Type::Integer);

		let partition = rows(&[Value::text("a"), Value::text("b"), Value::text("c")]);
		let result = run(&function, &partition, &[], &[], |i| (i, i + 1)).unwrap();
		assert_eq!(result, vec![Value::int(1), Value::int(2), Value::int(3)]);
	}

	#[test]
	fn test_ignores_frame() {
		let function = resolve("row_number", &[]);
		let partition = rows(&[Value::Null, Value::Null, Value::Null, Value::Null]);

		let empty_frames = run(&function, &partition, &[], &[], |_| (3, 0)).unwrap();
		let whole_partition = run(&function, &partition, &[], &[], |_| (0, 4)).unwrap();
		let expected: Vec<Value> = (1..=4).map(Value::int).collect();
		assert_eq!(empty_frames, expected);
		assert_eq!(whole_partition, expected);
	}

	#[test]
	fn test_rejects_arguments() {
		let err = crate::builtin().resolve("row_number", &[Type::Integer]).err().unwrap();
		assert_eq!(err.code(), "FUNCTION_002");
	}
}
