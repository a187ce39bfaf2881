// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod codec;
pub mod error;
pub mod stream;
pub mod value;

pub use codec::Streamer;
pub use error::{Diagnostic, Error, IntoDiagnostic, TypeError};
pub use value::{
	Object, OrderedF32, OrderedF64, Value,
	r#type::{ObjectType, ObjectTypeBuilder, Precedence, Type},
};

pub type Result<T> = std::result::Result<T, Error>;
