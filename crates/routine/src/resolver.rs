// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tessera_type::{Result, Type};

use crate::{FuncParams, FunctionInfo, window::WindowFunction};

/// A function specialized for one argument type list. Implementations are
/// immutable and shared between every caller that resolved the same ident.
pub trait FunctionImplementation: Send + Sync {
	fn info(&self) -> &FunctionInfo;

	fn as_window(&self) -> Option<&dyn WindowFunction> {
		None
	}
}

/// Turns argument types into an implementation for a single function name.
pub trait FunctionResolver: Send + Sync {
	fn params(&self) -> &FuncParams;

	fn resolve(&self, name: &str, arg_types: &[Type]) -> Result<Arc<dyn FunctionImplementation>>;
}

type Factory = dyn Fn(&str, &[Type]) -> Result<Arc<dyn FunctionImplementation>> + Send + Sync;

/// Checks the argument types against its params, then hands them to a
/// factory that builds the implementation.
pub struct BaseResolver {
	params: FuncParams,
	factory: Box<Factory>,
}

impl BaseResolver {
	pub fn new<F>(params: FuncParams, factory: F) -> Self
	where
		F: Fn(&str, &[Type]) -> Result<Arc<dyn FunctionImplementation>> + Send + Sync + 'static,
	{
		Self {
			params,
			factory: Box::new(factory),
		}
	}
}

impl FunctionResolver for BaseResolver {
	fn params(&self) -> &FuncParams {
		&self.params
	}

	fn resolve(&self, name: &str, arg_types: &[Type]) -> Result<Arc<dyn FunctionImplementation>> {
		self.params.match_types(name, arg_types)?;
		(self.factory)(name, arg_types)
	}
}
