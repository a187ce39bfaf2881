// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{Diagnostic, Error, IntoDiagnostic};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
	#[error("invalid window frame {frame}: {reason}")]
	InvalidFrame {
		frame: String,
		reason: String,
	},

	#[error("window function {name} was resolved for {expected} arguments but got {actual} argument expressions")]
	ArgumentCountMismatch {
		name: String,
		expected: usize,
		actual: usize,
	},

	#[error("failed to build the window thread pool: {reason}")]
	ThreadPool {
		reason: String,
	},
}

impl IntoDiagnostic for EngineError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		let (code, label, help) = match &self {
			EngineError::InvalidFrame {
				..
			} => (
				"WINDOW_001",
				"invalid frame",
				Some("RANGE frames only accept UNBOUNDED and CURRENT ROW bounds, and the start must not follow the end"
					.to_string()),
			),
			EngineError::ArgumentCountMismatch {
				..
			} => (
				"WINDOW_002",
				"argument count mismatch",
				Some("Resolve the function with one type per argument expression".to_string()),
			),
			EngineError::ThreadPool {
				..
			} => ("WINDOW_003", "thread pool unavailable", None),
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

impl From<EngineError> for Error {
	fn from(err: EngineError) -> Self {
		Error(Box::new(err.into_diagnostic()))
	}
}
