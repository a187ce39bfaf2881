// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tessera_type::{Result, Value};

use super::{WindowFrameState, WindowFunction, argument_at, integral_arg, window_implementation};
use crate::{BaseResolver, CollectExpression, FuncParams, FunctionInfo, FunctionsBuilder, Param};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
	Backward,
	Forward,
}

/// `lag` and `lead`: the argument evaluated `offset` rows before or after the
/// current row within the partition, or the default when that row does not
/// exist. The frame is ignored.
pub struct Offset {
	info: FunctionInfo,
	direction: Direction,
}

window_implementation!(Offset);

impl WindowFunction for Offset {
	fn execute(
		&self,
		row_idx: usize,
		frame: &WindowFrameState<'_>,
		expressions: &[Arc<dyn CollectExpression>],
		args: &[Value],
	) -> Result<Value> {
		let name = self.info.name();
		let offset = match integral_arg(name, args, 1)? {
			None => 1,
			Some(Some(offset)) => offset,
			Some(None) => return Ok(Value::Null),
		};
		let default = args.get(2).cloned().unwrap_or(Value::Null);

		let shift = match self.direction {
			Direction::Backward => offset.checked_neg(),
			Direction::Forward => Some(offset),
		};
		let target = shift.and_then(|shift| (row_idx as i64).checked_add(shift));
		match target.and_then(|t| usize::try_from(t).ok()) {
			Some(index) if index < frame.partition_len() => argument_at(name, frame, expressions, index),
			_ => Ok(default),
		}
	}
}

fn params() -> FuncParams {
	FuncParams::none().required(Param::Any).optional(Param::Integral).optional(Param::Any)
}

pub(super) fn register(builder: &mut FunctionsBuilder) -> Result<()> {
	builder.register(
		"lag",
		BaseResolver::new(params(), |name, arg_types| {
			Ok(Arc::new(Offset {
				info: FunctionInfo::window(name, arg_types, arg_types[0].clone()),
				direction: Direction::Backward,
			}))
		}),
	)?;
	builder.register(
		"lead",
		BaseResolver::new(params(), |name, arg_types| {
			Ok(Arc::new(Offset {
				info: FunctionInfo::window(name, arg_types, arg_types[0].clone()),
				direction: Direction::Forward,
			}))
		}),
	)?;
	Ok(())
}
