// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{ObjectType, Type};

/// Rank of a type when two types have to be merged. Higher wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
	Undefined,
	Boolean,
	Byte,
	Short,
	Integer,
	Long,
	Float,
	Double,
	Text,
	Array,
	Object,
}

impl Type {
	pub fn precedence(&self) -> Precedence {
		match self {
			Type::Undefined => Precedence::Undefined,
			Type::Boolean => Precedence::Boolean,
			Type::Byte => Precedence::Byte,
			Type::Short => Precedence::Short,
			Type::Integer => Precedence::Integer,
			Type::Long => Precedence::Long,
			Type::Float => Precedence::Float,
			Type::Double => Precedence::Double,
			Type::Text => Precedence::Text,
			Type::Array(_) => Precedence::Array,
			Type::Object(_) => Precedence::Object,
		}
	}

	/// Smallest type both `l` and `r` can be represented as. `Undefined`
	/// yields to anything; differing object schemas widen to schema-less.
	pub fn common_supertype(l: &Type, r: &Type) -> Type {
		if l == r {
			return l.clone();
		}
		match (l, r) {
			(Type::Undefined, other) | (other, Type::Undefined) => other.clone(),
			(Type::Array(l), Type::Array(r)) => Type::Array(Box::new(Type::common_supertype(l, r))),
			(Type::Object(_), Type::Object(_)) => Type::Object(ObjectType::untyped()),
			// a real cannot hold every bigint
			(Type::Long, Type::Float) | (Type::Float, Type::Long) => Type::Double,
			(l, r) => {
				if l.precedence() >= r.precedence() {
					l.clone()
				} else {
					r.clone()
				}
			}
		}
	}
}
