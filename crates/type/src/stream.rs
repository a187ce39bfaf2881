// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Byte streams the value codec writes to and reads from.
//!
//! Layout of the primitives:
//! - `bool`: one byte, `0` or `1`
//! - `vint`: unsigned 32 bit integer in 7 bit groups, least significant
//!   group first, high bit set on every byte but the last (at most 5 bytes)
//! - fixed width integers: big-endian two's complement
//! - floats: IEEE 754 bits, big-endian
//! - strings: `vint` byte length followed by UTF-8 bytes

use crate::{Result, TypeError, return_error};

const MAX_VINT_BYTES: usize = 5;

#[derive(Debug, Default, Clone)]
pub struct BufferWriter {
	buf: Vec<u8>,
}

impl BufferWriter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			buf: Vec::with_capacity(capacity),
		}
	}

	pub fn write_bool(&mut self, value: bool) {
		self.buf.push(value as u8);
	}

	pub fn write_u8(&mut self, value: u8) {
		self.buf.push(value);
	}

	pub fn write_vint(&mut self, mut value: u32) {
		while value >= 0x80 {
			self.buf.push((value as u8 & 0x7f) | 0x80);
			value >>= 7;
		}
		self.buf.push(value as u8);
	}

	/// Writes a collection length as a `vint`.
	pub fn write_len(&mut self, len: usize) -> Result<()> {
		match u32::try_from(len) {
			Ok(len) => {
				self.write_vint(len);
				Ok(())
			}
			Err(_) => return_error!(TypeError::LengthOverflow {
				length: len
			}),
		}
	}

	pub fn write_i8(&mut self, value: i8) {
		self.buf.extend_from_slice(&value.to_be_bytes());
	}

	pub fn write_i16(&mut self, value: i16) {
		self.buf.extend_from_slice(&value.to_be_bytes());
	}

	pub fn write_i32(&mut self, value: i32) {
		self.buf.extend_from_slice(&value.to_be_bytes());
	}

	pub fn write_i64(&mut self, value: i64) {
		self.buf.extend_from_slice(&value.to_be_bytes());
	}

	pub fn write_f32(&mut self, value: f32) {
		self.buf.extend_from_slice(&value.to_bits().to_be_bytes());
	}

	pub fn write_f64(&mut self, value: f64) {
		self.buf.extend_from_slice(&value.to_bits().to_be_bytes());
	}

	pub fn write_str(&mut self, value: &str) -> Result<()> {
		self.write_len(value.len())?;
		self.buf.extend_from_slice(value.as_bytes());
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.buf.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	pub fn as_slice(&self) -> &[u8] {
		&self.buf
	}

	pub fn into_inner(self) -> Vec<u8> {
		self.buf
	}
}

/// Cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct BufferReader<'a> {
	buf: &'a [u8],
	pos: usize,
}

impl<'a> BufferReader<'a> {
	pub fn new(buf: &'a [u8]) -> Self {
		Self {
			buf,
			pos: 0,
		}
	}

	pub fn position(&self) -> usize {
		self.pos
	}

	pub fn remaining(&self) -> usize {
		self.buf.len() - self.pos
	}

	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
		let remaining = self.remaining();
		if needed > remaining {
			return_error!(TypeError::UnexpectedEof {
				needed,
				remaining
			});
		}
		let slice = &self.buf[self.pos..self.pos + needed];
		self.pos += needed;
		Ok(slice)
	}

	fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut out = [0u8; N];
		out.copy_from_slice(self.take(N)?);
		Ok(out)
	}

	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.take(1)?[0])
	}

	pub fn read_bool(&mut self) -> Result<bool> {
		match self.read_u8()? {
			0 => Ok(false),
			1 => Ok(true),
			other => return_error!(TypeError::Corrupt {
				reason: format!("invalid boolean byte {:#04x}", other)
			}),
		}
	}

	pub fn read_vint(&mut self) -> Result<u32> {
		let mut result: u32 = 0;
		for i in 0..MAX_VINT_BYTES {
			let byte = self.read_u8()?;
			let group = (byte & 0x7f) as u32;
			if i == MAX_VINT_BYTES - 1 && group > 0x0f {
				return_error!(TypeError::Corrupt {
					reason: "vint overflows 32 bits".to_string()
				});
			}
			result |= group << (7 * i);
			if byte & 0x80 == 0 {
				return Ok(result);
			}
		}
		return_error!(TypeError::Corrupt {
			reason: format!("vint longer than {} bytes", MAX_VINT_BYTES)
		})
	}

	pub fn read_len(&mut self) -> Result<usize> {
		Ok(self.read_vint()? as usize)
	}

	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_be_bytes(self.take_array()?))
	}

	pub fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_be_bytes(self.take_array()?))
	}

	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.take_array()?))
	}

	pub fn read_i64(&mut self) -> Result<i64> {
		Ok(i64::from_be_bytes(self.take_array()?))
	}

	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_bits(u32::from_be_bytes(self.take_array()?)))
	}

	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_bits(u64::from_be_bytes(self.take_array()?)))
	}

	pub fn read_string(&mut self) -> Result<String> {
		let len = self.read_len()?;
		let bytes = self.take(len)?;
		match std::str::from_utf8(bytes) {
			Ok(s) => Ok(s.to_string()),
			Err(err) => return_error!(TypeError::Corrupt {
				reason: format!("invalid UTF-8 in string: {}", err)
			}),
		}
	}
}
