// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Binary value codec.
//!
//! Values are streamed against their [`Type`](crate::Type): primitives carry a
//! presence flag, arrays a length, and objects with a schema stream only
//! field names and payloads. Anything without a static type goes through the
//! self-describing [`generic`] codec.

use crate::{
	Result, TypeError,
	stream::{BufferReader, BufferWriter},
	value::Value,
	return_error,
};

pub mod descriptor;
pub mod generic;
mod streamer;

/// Writes and reads values of one type.
pub trait Streamer: Send + Sync {
	fn write_value(&self, out: &mut BufferWriter, value: &Value) -> Result<()>;

	fn read_value(&self, input: &mut BufferReader<'_>) -> Result<Value>;
}

/// Runs `read` over `bytes` and fails if anything is left over.
pub(crate) fn decode_exact<F>(bytes: &[u8], read: F) -> Result<Value>
where
	F: FnOnce(&mut BufferReader<'_>) -> Result<Value>,
{
	let mut input = BufferReader::new(bytes);
	let value = read(&mut input)?;
	if !input.is_empty() {
		return_error!(TypeError::TrailingBytes {
			remaining: input.remaining()
		});
	}
	Ok(value)
}

/// Preallocation bound for a collection whose length came off the wire.
pub(crate) fn capacity_hint(len: usize, input: &BufferReader<'_>) -> usize {
	len.min(input.remaining())
}
