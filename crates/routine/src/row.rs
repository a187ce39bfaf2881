// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Debug;

use tessera_type::{Result, Type, Value};

use crate::error::RoutineError;

/// Positional access to the values of one input row.
pub trait Row {
	fn len(&self) -> usize;

	fn get(&self, index: usize) -> Option<&Value>;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Row for [Value] {
	fn len(&self) -> usize {
		<[Value]>::len(self)
	}

	fn get(&self, index: usize) -> Option<&Value> {
		<[Value]>::get(self, index)
	}
}

impl Row for Vec<Value> {
	fn len(&self) -> usize {
		Vec::len(self)
	}

	fn get(&self, index: usize) -> Option<&Value> {
		self.as_slice().get(index)
	}
}

impl<T: Row + ?Sized> Row for &T {
	fn len(&self) -> usize {
		(**self).len()
	}

	fn get(&self, index: usize) -> Option<&Value> {
		(**self).get(index)
	}
}

/// Pre-wired expression evaluated against a single row.
pub trait CollectExpression: Send + Sync + Debug {
	fn value_type(&self) -> Type;

	fn collect(&self, row: &dyn Row) -> Result<Value>;
}

/// Reads the value at a fixed column of the row.
#[derive(Debug, Clone, PartialEq)]
pub struct InputColumn {
	pub index: usize,
	pub value_type: Type,
}

impl InputColumn {
	pub fn new(index: usize, value_type: Type) -> Self {
		Self {
			index,
			value_type,
		}
	}
}

impl CollectExpression for InputColumn {
	fn value_type(&self) -> Type {
		self.value_type.clone()
	}

	fn collect(&self, row: &dyn Row) -> Result<Value> {
		match row.get(self.index) {
			Some(value) => Ok(value.clone()),
			None => Err(RoutineError::ColumnOutOfRange {
				index: self.index,
				len: row.len(),
			}
			.into()),
		}
	}
}

/// Yields the same value for every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal(pub Value);

impl CollectExpression for Literal {
	fn value_type(&self) -> Type {
		self.0.get_type()
	}

	fn collect(&self, _row: &dyn Row) -> Result<Value> {
		Ok(self.0.clone())
	}
}
