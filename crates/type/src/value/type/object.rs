// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	hash::{Hash, Hasher},
	sync::Arc,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Type;

/// Type of an object value. Either schema-less, in which case values are
/// streamed self-describing, or carrying an ordered field to type mapping.
///
/// The field map is shared: cloning an `ObjectType` never copies the schema.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectType {
	fields: Option<Arc<IndexMap<String, Type>>>,
}

impl ObjectType {
	pub const ID: u8 = 12;
	pub const NAME: &'static str = "object";

	/// An object type without a schema.
	pub fn untyped() -> Self {
		Self {
			fields: None,
		}
	}

	pub fn builder() -> ObjectTypeBuilder {
		ObjectTypeBuilder::default()
	}

	pub fn fields(&self) -> Option<&IndexMap<String, Type>> {
		self.fields.as_deref()
	}

	pub fn field(&self, name: &str) -> Option<&Type> {
		self.fields.as_ref().and_then(|fields| fields.get(name))
	}

	pub fn has_schema(&self) -> bool {
		self.fields.is_some()
	}

	pub(crate) fn from_fields(fields: IndexMap<String, Type>) -> Self {
		Self {
			fields: Some(Arc::new(fields)),
		}
	}
}

// Field order is part of the wire contract, so it is part of equality too.
impl PartialEq for ObjectType {
	fn eq(&self, other: &Self) -> bool {
		match (&self.fields, &other.fields) {
			(None, None) => true,
			(Some(l), Some(r)) => Arc::ptr_eq(l, r) || (l.len() == r.len() && l.iter().eq(r.iter())),
			_ => false,
		}
	}
}

impl Eq for ObjectType {}

impl Hash for ObjectType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		match &self.fields {
			None => 0u8.hash(state),
			Some(fields) => {
				1u8.hash(state);
				fields.len().hash(state);
				for (name, ty) in fields.iter() {
					name.hash(state);
					ty.hash(state);
				}
			}
		}
	}
}

#[derive(Debug, Default)]
pub struct ObjectTypeBuilder {
	fields: IndexMap<String, Type>,
}

impl ObjectTypeBuilder {
	/// Declares a field. Redeclaring a name replaces its type and keeps its
	/// original position.
	pub fn field(mut self, name: impl Into<String>, ty: impl Into<Type>) -> Self {
		self.fields.insert(name.into(), ty.into());
		self
	}

	pub fn build(self) -> ObjectType {
		ObjectType::from_fields(self.fields)
	}
}

#[cfg(test)]
mod tests {
	use std::{
		collections::hash_map::DefaultHasher,
		hash::{Hash, Hasher},
	};

	use super::*;

	fn hash_of(ty: &ObjectType) -> u64 {
		let mut hasher = DefaultHasher::new();
		ty.hash(&mut hasher);
		hasher.finish()
	}

	#[test]
	fn test_equality_respects_field_order() {
		let l = ObjectType::builder().field("x", Type::Integer).field("y", Type::Text).build();
		let r = ObjectType::builder().field("y", Type::Text).field("x", Type::Integer).build();
		assert_ne!(l, r);
		assert_eq!(l, l.clone());
		assert_eq!(hash_of(&l), hash_of(&l.clone()));
	}

	#[test]
	fn test_untyped_differs_from_empty_schema() {
		let empty = ObjectType::builder().build();
		assert_ne!(ObjectType::untyped(), empty);
		assert!(empty.has_schema());
		assert!(!ObjectType::untyped().has_schema());
	}

	#[test]
	fn test_redeclared_field_keeps_position() {
		let ty = ObjectType::builder().field("a", Type::Integer).field("b", Type::Text).field("a", Type::Long).build();
		let fields: Vec<(&str, &Type)> = ty.fields().unwrap().iter().map(|(k, v)| (k.as_str(), v)).collect();
		assert_eq!(fields, vec![("a", &Type::Long), ("b", &Type::Text)]);
	}

	#[test]
	fn test_clone_shares_schema() {
		let ty = ObjectType::builder().field("a", Type::Integer).build();
		let clone = ty.clone();
		assert!(std::ptr::eq(ty.fields().unwrap(), clone.fields().unwrap()));
	}
}
