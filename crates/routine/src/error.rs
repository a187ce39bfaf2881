// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{Diagnostic, Error, IntoDiagnostic, Type};

fn fmt_types(types: &[Type]) -> String {
	types.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutineError {
	#[error("unknown function: {name}")]
	UnknownFunction {
		name: String,
	},

	#[error("function {name} cannot be called with ({}), expected {expected}", fmt_types(.arguments))]
	UnresolvableSignature {
		name: String,
		arguments: Vec<Type>,
		expected: String,
	},

	#[error("function {name} argument {} has invalid type: expected {expected}, got {actual}", .index + 1)]
	InvalidArgumentType {
		name: String,
		index: usize,
		expected: String,
		actual: Type,
	},

	#[error("function {name} cannot handle {reason}")]
	InvalidArgumentShape {
		name: String,
		reason: String,
	},

	#[error("function {name} overflowed its result type {result}")]
	NumericOverflow {
		name: String,
		result: Type,
	},

	#[error("function {name} is already registered")]
	DuplicateFunction {
		name: String,
	},

	#[error("function {name} is not a window function")]
	NotAWindowFunction {
		name: String,
	},

	#[error("column {index} is out of range for a row of {len} columns")]
	ColumnOutOfRange {
		index: usize,
		len: usize,
	},
}

impl IntoDiagnostic for RoutineError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		let (code, label, help) = match &self {
			RoutineError::UnknownFunction {
				..
			} => (
				"FUNCTION_001",
				"unknown function",
				Some("Check the function name and available functions".to_string()),
			),
			RoutineError::UnresolvableSignature {
				name,
				expected,
				..
			} => (
				"FUNCTION_002",
				"wrong number of arguments",
				Some(format!("Call {} with arguments {}", name, expected)),
			),
			RoutineError::InvalidArgumentType {
				expected,
				..
			} => (
				"FUNCTION_004",
				"invalid argument type",
				Some(format!("Provide an argument of type: {}", expected)),
			),
			RoutineError::InvalidArgumentShape {
				..
			} => ("FUNCTION_005", "unsupported argument value", None),
			RoutineError::NumericOverflow {
				..
			} => ("FUNCTION_006", "numeric overflow", None),
			RoutineError::DuplicateFunction {
				..
			} => (
				"FUNCTION_010",
				"duplicate function",
				Some("Register every function name exactly once".to_string()),
			),
			RoutineError::NotAWindowFunction {
				..
			} => ("FUNCTION_011", "not a window function", None),
			RoutineError::ColumnOutOfRange {
				..
			} => (
				"FUNCTION_012",
				"column out of range",
				Some("This is an internal error - please report this issue".to_string()),
			),
		};

		Diagnostic {
			code: code.to_string(),
			message,
			label: Some(label.to_string()),
			help,
			notes: vec![],
			cause: None,
		}
	}
}

impl From<RoutineError> for Error {
	fn from(err: RoutineError) -> Self {
		Error(Box::new(err.into_diagnostic()))
	}
}
