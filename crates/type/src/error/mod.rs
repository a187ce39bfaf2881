// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
};

use serde::{Deserialize, Serialize};

use crate::value::r#type::Type;

mod diagnostic;

/// User facing description of a failure. Every error that leaves a crate of
/// this workspace carries exactly one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
	pub fn with_cause(mut self, cause: Diagnostic) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.code, self.message)
	}
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
	fn into_diagnostic(self) -> Diagnostic {
		self
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Box<Diagnostic>);

impl Error {
	pub fn diagnostic(self) -> Diagnostic {
		*self.0
	}

	pub fn code(&self) -> &str {
		&self.0.code
	}
}

impl Deref for Error {
	type Target = Diagnostic;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		render(&self.0, f, 0)
	}
}

fn render(diagnostic: &Diagnostic, f: &mut Formatter<'_>, depth: usize) -> std::fmt::Result {
	let indent = "  ".repeat(depth);
	write!(f, "{indent}{diagnostic}")?;
	if let Some(label) = &diagnostic.label {
		write!(f, "\n{indent}  = {label}")?;
	}
	if let Some(help) = &diagnostic.help {
		write!(f, "\n{indent}  help: {help}")?;
	}
	for note in &diagnostic.notes {
		write!(f, "\n{indent}  note: {note}")?;
	}
	if let Some(cause) = &diagnostic.cause {
		writeln!(f)?;
		render(cause, f, depth + 1)?;
	}
	Ok(())
}

impl std::error::Error for Error {}

impl From<TypeError> for Error {
	fn from(err: TypeError) -> Self {
		Error(Box::new(err.into_diagnostic()))
	}
}

/// Wraps anything convertible into a [`Diagnostic`] into an [`Error`].
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::error::Error(Box::new($crate::error::IntoDiagnostic::into_diagnostic($diagnostic)))
	};
}

#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error!($diagnostic))
	};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecDirection {
	Read,
	Write,
}

impl Display for CodecDirection {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			CodecDirection::Read => f.write_str("decoding"),
			CodecDirection::Write => f.write_str("encoding"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
	#[error("cannot parse {input:?} as {target}: {reason}")]
	ParseFailure {
		target: Type,
		input: String,
		reason: String,
	},

	#[error("expected a value of type {expected}, got {actual}")]
	InvalidValue {
		expected: Type,
		actual: Type,
	},

	#[error("value {value} is out of range for {target}")]
	CastOutOfRange {
		target: Type,
		value: String,
	},

	#[error("field '{field}' is not part of the object schema while {direction}")]
	ProtocolIntegrityFault {
		field: String,
		direction: CodecDirection,
		known_fields: Vec<String>,
	},

	#[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
	UnexpectedEof {
		needed: usize,
		remaining: usize,
	},

	#[error("corrupt input: {reason}")]
	Corrupt {
		reason: String,
	},

	#[error("unknown type id {id}")]
	UnknownTypeId {
		id: u32,
	},

	#[error("unknown value tag {tag}")]
	UnknownValueTag {
		tag: u8,
	},

	#[error("{remaining} trailing bytes after value")]
	TrailingBytes {
		remaining: usize,
	},

	#[error("length {length} exceeds the encodable maximum")]
	LengthOverflow {
		length: usize,
	},
}
