use std::fmt;

use bytes::BufMut;

use crate::{
	error::Result,
	types::{MessageType, OpCode, ResponseCode},
	wire::Reader,
};

pub const HEADER_LEN: usize = 12;

// second word of the header, MSB -> LSB:
//	QR(1) OPCODE(4) AA(1) TC(1) RD(1) RA(1) Z(3) RCODE(4)
const QR: u16 = 0x8000;
const OPCODE_SHIFT: u16 = 11;
const AA: u16 = 0x0400;
const TC: u16 = 0x0200;
const RD: u16 = 0x0100;
const RA: u16 = 0x0080;
const Z_SHIFT: u16 = 4;
const Z_MASK: u8 = 0b111;
const NIBBLE: u8 = 0x0f;

/// The fixed 12 byte message header, RFC 1035 4.1.1.
///
/// The counts are carried as they are found on the wire,
/// they are not checked against what the rest of the message holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	pub id: u16,
	pub message_type: MessageType,
	pub op_code: OpCode,
	pub authoritative: bool,
	pub truncated: bool,
	pub recursion_desired: bool,
	pub recursion_available: bool,
	// reserved, always within Z_MASK
	z: u8,
	pub response_code: ResponseCode,
	pub query_count: u16,
	pub answer_count: u16,
	pub authority_count: u16,
	pub additional_count: u16,
}

impl Default for Header {
	fn default() -> Self {
		Self::query(0)
	}
}

impl Header {
	/// A standard query header with no flags and no counts.
	pub fn query(id: u16) -> Self {
		Self {
			id,
			message_type: MessageType::Query,
			op_code: OpCode::Query,
			authoritative: false,
			truncated: false,
			recursion_desired: false,
			recursion_available: false,
			z: 0,
			response_code: ResponseCode::NoError,
			query_count: 0,
			answer_count: 0,
			authority_count: 0,
			additional_count: 0,
		}
	}

	/// Starts a response to `req`: id, opcode and RD are copied, QR is set.
	pub fn response_from_request(req: &Header) -> Self {
		Self {
			id: req.id,
			message_type: MessageType::Response,
			op_code: req.op_code,
			recursion_desired: req.recursion_desired,
			..Self::query(req.id)
		}
	}

	/// The 3 reserved bits, must be zero on the wire but any value is kept.
	pub fn z(&self) -> u8 {
		self.z
	}

	/// Sets the reserved bits, only the low 3 bits of `z` are kept.
	pub fn set_z(&mut self, z: u8) {
		self.z = z & Z_MASK;
	}

	pub fn flags(&self) -> u16 {
		let mut f = (u8::from(self.op_code) as u16) << OPCODE_SHIFT
			| (self.z as u16) << Z_SHIFT
			| u8::from(self.response_code) as u16;
		if bool::from(self.message_type) {
			f |= QR;
		}
		if self.authoritative {
			f |= AA;
		}
		if self.truncated {
			f |= TC;
		}
		if self.recursion_desired {
			f |= RD;
		}
		if self.recursion_available {
			f |= RA;
		}
		f
	}

	fn set_flags(&mut self, f: u16) {
		self.message_type = MessageType::from(f & QR != 0);
		self.op_code = OpCode::from((f >> OPCODE_SHIFT) as u8 & NIBBLE);
		self.authoritative = f & AA != 0;
		self.truncated = f & TC != 0;
		self.recursion_desired = f & RD != 0;
		self.recursion_available = f & RA != 0;
		self.z = (f >> Z_SHIFT) as u8 & Z_MASK;
		self.response_code = ResponseCode::from(f as u8 & NIBBLE);
	}

	pub fn read(r: &mut Reader) -> Result<Self> {
		// check once so a short header never leaves the cursor half way
		r.ensure(HEADER_LEN)?;
		let mut h = Self::query(r.read_u16()?);
		h.set_flags(r.read_u16()?);
		h.query_count = r.read_u16()?;
		h.answer_count = r.read_u16()?;
		h.authority_count = r.read_u16()?;
		h.additional_count = r.read_u16()?;
		Ok(h)
	}

	pub fn write_to(&self, buf: &mut impl BufMut) {
		buf.put_u16(self.id);
		buf.put_u16(self.flags());
		buf.put_u16(self.query_count);
		buf.put_u16(self.answer_count);
		buf.put_u16(self.authority_count);
		buf.put_u16(self.additional_count);
	}
}

/// Decodes the first 12 bytes of `buf`, returns the header and what follows it.
pub fn decode_header(buf: &[u8]) -> Result<(Header, &[u8])> {
	let mut r = Reader::new(buf);
	let h = Header::read(&mut r)?;
	Ok((h, r.rest()))
}

pub fn encode_header(h: &Header) -> Vec<u8> {
	let mut buf = Vec::with_capacity(HEADER_LEN);
	h.write_to(&mut buf);
	buf
}

impl fmt::Display for Header {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(
			f,
			"id: {}, {}, opcode: {}, rcode: {}",
			self.id, self.message_type, self.op_code, self.response_code
		)?;
		write!(f, "flags:")?;
		for (set, name) in [
			(self.authoritative, "aa"),
			(self.truncated, "tc"),
			(self.recursion_desired, "rd"),
			(self.recursion_available, "ra"),
		] {
			if set {
				write!(f, " {}", name)?;
			}
		}
		if self.z != 0 {
			write!(f, " z={}", self.z)?;
		}
		write!(
			f,
			"; qd: {}, an: {}, ns: {}, ar: {}",
			self.query_count, self.answer_count, self.authority_count, self.additional_count
		)
	}
}
