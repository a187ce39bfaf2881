// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use dashmap::DashMap;
use tessera_type::{Result, Type, return_error};
use tracing::{debug, instrument, trace};

use crate::{FunctionIdent, FunctionImplementation, FunctionResolver, error::RoutineError};

/// Read-only function registry. Resolution results are cached per
/// [`FunctionIdent`], so every caller asking for the same signature shares
/// one implementation.
pub struct Functions {
	resolvers: HashMap<String, Arc<dyn FunctionResolver>>,
	cache: DashMap<FunctionIdent, Arc<dyn FunctionImplementation>>,
}

impl Functions {
	pub fn builder() -> FunctionsBuilder {
		FunctionsBuilder::default()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.resolvers.contains_key(&name.to_lowercase())
	}

	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	#[instrument(name = "routine::functions::resolve", level = "debug", skip(self))]
	pub fn resolve(&self, name: &str, arg_types: &[Type]) -> Result<Arc<dyn FunctionImplementation>> {
		let name = name.to_lowercase();
		let ident = FunctionIdent::new(name.as_str(), arg_types.to_vec());

		if let Some(cached) = self.cache.get(&ident) {
			trace!(%ident, "resolved from cache");
			return Ok(cached.value().clone());
		}

		let Some(resolver) = self.resolvers.get(&name) else {
			return_error!(RoutineError::UnknownFunction {
				name
			});
		};
		let resolved = resolver.resolve(&name, arg_types)?;

		// a concurrent caller may have won the race, keep whatever got in first
		let entry = self.cache.entry(ident).or_insert(resolved);
		Ok(entry.value().clone())
	}

	/// Like [`resolve`](Self::resolve), but the implementation must be usable
	/// as a window function.
	pub fn resolve_window(&self, name: &str, arg_types: &[Type]) -> Result<Arc<dyn FunctionImplementation>> {
		let resolved = self.resolve(name, arg_types)?;
		if resolved.as_window().is_none() {
			return_error!(RoutineError::NotAWindowFunction {
				name: resolved.info().name().to_string()
			});
		}
		Ok(resolved)
	}
}

#[derive(Default)]
pub struct FunctionsBuilder {
	resolvers: HashMap<String, Arc<dyn FunctionResolver>>,
}

impl FunctionsBuilder {
	pub fn register<R>(&mut self, name: &str, resolver: R) -> Result<&mut Self>
	where
		R: FunctionResolver + 'static,
	{
		let name = name.to_lowercase();
		if self.resolvers.contains_key(&name) {
			return_error!(RoutineError::DuplicateFunction {
				name
			});
		}
		self.resolvers.insert(name, Arc::new(resolver));
		Ok(self)
	}

	#[instrument(name = "routine::functions::build", level = "debug", skip(self))]
	pub fn build(self) -> Functions {
		debug!(functions = self.resolvers.len(), "function registry built");
		Functions {
			resolvers: self.resolvers,
			cache: DashMap::new(),
		}
	}
}
