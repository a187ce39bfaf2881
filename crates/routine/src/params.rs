// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use tessera_type::{Result, Type, return_error};

use crate::error::RoutineError;

/// Shape a single argument must have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
	Any,
	Numeric,
	Integral,
	Exact(Type),
}

impl Param {
	/// `Undefined` arguments (untyped `NULL`s) satisfy every shape.
	pub fn accepts(&self, ty: &Type) -> bool {
		if ty.is_undefined() {
			return true;
		}
		match self {
			Param::Any => true,
			Param::Numeric => ty.is_numeric(),
			Param::Integral => ty.is_integral(),
			Param::Exact(expected) => expected == ty,
		}
	}
}

impl Display for Param {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Param::Any => f.write_str("any"),
			Param::Numeric => f.write_str("numeric"),
			Param::Integral => f.write_str("integral"),
			Param::Exact(ty) => write!(f, "{}", ty),
		}
	}
}

/// Parameter list of a function: required parameters, then optional
/// trailing ones, then an optional variadic tail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncParams {
	required: Vec<Param>,
	optional: Vec<Param>,
	variadic: Option<Param>,
}

impl FuncParams {
	/// Accepts exactly zero arguments.
	pub fn none() -> Self {
		Self::default()
	}

	pub fn required(mut self, param: Param) -> Self {
		self.required.push(param);
		self
	}

	pub fn optional(mut self, param: Param) -> Self {
		self.optional.push(param);
		self
	}

	pub fn variadic(mut self, param: Param) -> Self {
		self.variadic = Some(param);
		self
	}

	pub fn min_args(&self) -> usize {
		self.required.len()
	}

	/// `None` when a variadic tail accepts any number of trailing arguments.
	pub fn max_args(&self) -> Option<usize> {
		match self.variadic {
			Some(_) => None,
			None => Some(self.required.len() + self.optional.len()),
		}
	}

	fn param_at(&self, index: usize) -> Option<&Param> {
		if index < self.required.len() {
			return self.required.get(index);
		}
		self.optional.get(index - self.required.len()).or(self.variadic.as_ref())
	}

	pub fn match_types(&self, name: &str, arg_types: &[Type]) -> Result<()> {
		let arity_ok = arg_types.len() >= self.min_args()
			&& self.max_args().is_none_or(|max| arg_types.len() <= max);
		if !arity_ok {
			return_error!(RoutineError::UnresolvableSignature {
				name: name.to_string(),
				arguments: arg_types.to_vec(),
				expected: self.to_string(),
			});
		}

		for (index, ty) in arg_types.iter().enumerate() {
			let Some(param) = self.param_at(index) else {
				continue;
			};
			if !param.accepts(ty) {
				return_error!(RoutineError::InvalidArgumentType {
					name: name.to_string(),
					index,
					expected: param.to_string(),
					actual: ty.clone(),
				});
			}
		}
		Ok(())
	}
}

impl Display for FuncParams {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("(")?;
		let mut first = true;
		for param in &self.required {
			if !first {
				f.write_str(", ")?;
			}
			write!(f, "{}", param)?;
			first = false;
		}
		for param in &self.optional {
			if first {
				write!(f, "[{}", param)?;
			} else {
				write!(f, "[, {}", param)?;
			}
			first = false;
		}
		for _ in &self.optional {
			f.write_str("]")?;
		}
		if let Some(param) = &self.variadic {
			if !first {
				f.write_str(", ")?;
			}
			write!(f, "{}...", param)?;
		}
		f.write_str(")")
	}
}
