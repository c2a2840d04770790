// cursor over a received buffer
//	decoders take a &mut Reader and advance it, nothing is ever copied
//	until a value is built, and the offset is kept so errors can say where

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Reader<'a> {
	buf: &'a [u8],
	pos: usize,
}

impl<'a> Reader<'a> {
	pub fn new(buf: &'a [u8]) -> Self {
		Self { buf, pos: 0 }
	}

	pub fn pos(&self) -> usize {
		self.pos
	}

	pub fn remaining(&self) -> usize {
		self.buf.len() - self.pos
	}

	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// The unread part of the buffer.
	pub fn rest(&self) -> &'a [u8] {
		&self.buf[self.pos..]
	}

	/// Fails without moving the cursor if fewer than `n` bytes are left.
	pub fn ensure(&self, n: usize) -> Result<()> {
		if self.remaining() < n {
			return Err(Error::BufferTooShort {
				offset: self.pos,
				needed: n,
				available: self.remaining(),
			});
		}
		Ok(())
	}

	pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
		self.ensure(n)?;
		let b = &self.buf[self.pos..self.pos + n];
		self.pos += n;
		Ok(b)
	}

	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_bytes(1)?[0])
	}

	pub fn read_u16(&mut self) -> Result<u16> {
		let b = self.read_bytes(2)?;
		Ok(u16::from_be_bytes([b[0], b[1]]))
	}

	pub fn read_u32(&mut self) -> Result<u32> {
		let b = self.read_bytes(4)?;
		Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
	}
}
