// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Window function contract and the built-in window functions.

use std::sync::Arc;

use tessera_type::{Result, Value};

use crate::{CollectExpression, FunctionImplementation, FunctionsBuilder, Row, error::RoutineError};

mod aggregate;
mod offset;
mod row_number;
mod value;

/// View of the partition handed to a window function for one row: all rows
/// of the partition, the current row ordinal and the frame
/// `[lower_bound, upper_bound_exclusive)`.
#[derive(Clone, Copy)]
pub struct WindowFrameState<'a> {
	rows: &'a [&'a dyn Row],
	lower_bound: usize,
	upper_bound_exclusive: usize,
	current: usize,
}

impl<'a> WindowFrameState<'a> {
	pub fn new(rows: &'a [&'a dyn Row]) -> Self {
		Self {
			rows,
			lower_bound: 0,
			upper_bound_exclusive: 0,
			current: 0,
		}
	}

	/// Moves to `current` with the given frame. Bounds past the partition are
	/// clamped; an inverted frame collapses to an empty one.
	pub fn update(&mut self, current: usize, lower_bound: usize, upper_bound_exclusive: usize) {
		let upper = upper_bound_exclusive.min(self.rows.len());
		self.current = current;
		self.upper_bound_exclusive = upper;
		self.lower_bound = lower_bound.min(upper);
	}

	pub fn lower_bound(&self) -> usize {
		self.lower_bound
	}

	pub fn upper_bound_exclusive(&self) -> usize {
		self.upper_bound_exclusive
	}

	pub fn current_row(&self) -> usize {
		self.current
	}

	pub fn partition_len(&self) -> usize {
		self.rows.len()
	}

	pub fn frame_len(&self) -> usize {
		self.upper_bound_exclusive - self.lower_bound
	}

	pub fn is_frame_empty(&self) -> bool {
		self.frame_len() == 0
	}

	pub fn partition_row(&self, index: usize) -> Option<&'a dyn Row> {
		self.rows.get(index).copied()
	}

	pub fn frame_rows(&self) -> &'a [&'a dyn Row] {
		&self.rows[self.lower_bound..self.upper_bound_exclusive]
	}
}

/// A function evaluated once per row of an ordered partition.
///
/// `expressions` are the argument expressions, so a function can evaluate
/// them against any row of the partition; `args` holds the same expressions
/// already evaluated against the current row.
pub trait WindowFunction: FunctionImplementation {
	fn execute(
		&self,
		row_idx: usize,
		frame: &WindowFrameState<'_>,
		expressions: &[Arc<dyn CollectExpression>],
		args: &[Value],
	) -> Result<Value>;
}

/// Registers every built-in window function.
pub fn register(builder: &mut FunctionsBuilder) -> Result<()> {
	row_number::register(builder)?;
	value::register(builder)?;
	offset::register(builder)?;
	aggregate::register(builder)?;
	Ok(())
}

macro_rules! window_implementation {
	($name:ty) => {
		impl $crate::FunctionImplementation for $name {
			fn info(&self) -> &$crate::FunctionInfo {
				&self.info
			}

			fn as_window(&self) -> Option<&dyn $crate::window::WindowFunction> {
				Some(self)
			}
		}
	};
}

pub(crate) use window_implementation;

/// Evaluates the first argument expression against the row at `index` of the
/// partition. Rows outside the partition read as `Null`.
pub(crate) fn argument_at(
	name: &str,
	frame: &WindowFrameState<'_>,
	expressions: &[Arc<dyn CollectExpression>],
	index: usize,
) -> Result<Value> {
	let Some(expression) = expressions.first() else {
		return Err(RoutineError::InvalidArgumentShape {
			name: name.to_string(),
			reason: "a call without its argument expression".to_string(),
		}
		.into());
	};
	match frame.partition_row(index) {
		Some(row) => expression.collect(row),
		None => Ok(Value::Null),
	}
}

/// Reads an optional integral argument. `None` when absent, `Some(None)` for
/// an explicit `Null`.
pub(crate) fn integral_arg(name: &str, args: &[Value], index: usize) -> Result<Option<Option<i64>>> {
	match args.get(index) {
		None => Ok(None),
		Some(Value::Null) => Ok(Some(None)),
		Some(value) => match value.as_i64() {
			Some(v) => Ok(Some(Some(v))),
			None => Err(RoutineError::InvalidArgumentShape {
				name: name.to_string(),
				reason: format!("a non integral argument {} of type {}", value, value.get_type()),
			}
			.into()),
		},
	}
}
