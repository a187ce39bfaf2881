// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use tessera_type::Type;

/// A function signature: name plus the exact argument types it was resolved
/// for. Arity is part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionIdent {
	pub name: String,
	pub arg_types: Vec<Type>,
}

impl FunctionIdent {
	pub fn new(name: impl Into<String>, arg_types: Vec<Type>) -> Self {
		Self {
			name: name.into(),
			arg_types,
		}
	}
}

impl Display for FunctionIdent {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}(", self.name)?;
		for (i, ty) in self.arg_types.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}", ty)?;
		}
		f.write_str(")")
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
	Scalar,
	Aggregate,
	Window,
	Table,
}

/// Signature bound to its return type, as produced by resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionInfo {
	pub ident: FunctionIdent,
	pub return_type: Type,
	pub kind: FunctionKind,
}

impl FunctionInfo {
	pub fn new(ident: FunctionIdent, return_type: Type, kind: FunctionKind) -> Self {
		Self {
			ident,
			return_type,
			kind,
		}
	}

	pub fn window(name: &str, arg_types: &[Type], return_type: Type) -> Self {
		Self::new(FunctionIdent::new(name, arg_types.to_vec()), return_type, FunctionKind::Window)
	}

	pub fn name(&self) -> &str {
		&self.ident.name
	}

	pub fn arg_types(&self) -> &[Type] {
		&self.ident.arg_types
	}
}
