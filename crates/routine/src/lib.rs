// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

use once_cell::sync::Lazy;

pub mod error;
mod ident;
mod params;
mod registry;
mod resolver;
mod row;
pub mod window;

pub use error::RoutineError;
pub use ident::{FunctionIdent, FunctionInfo, FunctionKind};
pub use params::{FuncParams, Param};
pub use registry::{Functions, FunctionsBuilder};
pub use resolver::{BaseResolver, FunctionImplementation, FunctionResolver};
pub use row::{CollectExpression, InputColumn, Literal, Row};
pub use window::{WindowFrameState, WindowFunction};

static BUILTIN: Lazy<Functions> = Lazy::new(|| build_builtin(window::register));

/// Panics when registration fails instead of returning a partial registry.
fn build_builtin(register: impl FnOnce(&mut FunctionsBuilder) -> tessera_type::Result<()>) -> Functions {
	let mut builder = Functions::builder();
	if let Err(err) = register(&mut builder) {
		tracing::error!("failed to register built-in window functions: {}", err);
		panic!("failed to register built-in window functions: {}", err);
	}
	builder.build()
}

/// Process-wide registry holding the built-in functions.
pub fn builtin() -> &'static Functions {
	&BUILTIN
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builtin_registers_window_functions() {
		let names = builtin().names();
		for name in [
			"avg",
			"count",
			"first_value",
			"lag",
			"last_value",
			"lead",
			"max",
			"min",
			"nth_value",
			"row_number",
			"sum",
		] {
			assert!(names.contains(&name), "{} missing", name);
		}
	}

	#[test]
	#[should_panic(expected = "FUNCTION_010")]
	fn test_builtin_registration_failure_panics() {
		build_builtin(|builder| {
			window::register(builder)?;
			window::register(builder)
		});
	}

	#[test]
	fn test_register_twice_fails() {
		let mut builder = Functions::builder();
		window::register(&mut builder).unwrap();
		let err = window::register(&mut builder).err().unwrap();
		assert_eq!(err.code(), "FUNCTION_010");
	}
}
