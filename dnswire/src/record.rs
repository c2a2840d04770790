// resource records
//	inside a Message the single answer always belongs to the single question,
//	so it borrows the question's name and only the 14 byte tail goes on the wire:
//		TYPE(16) CLASS(16) TTL(32) RDLENGTH(16) RDATA(32)
//	the *_named functions are the plain RFC 1035 layout with the owner name in front,
//	for records that stand on their own

use std::{fmt, net::Ipv4Addr};

use bytes::BufMut;

use crate::{
	error::Result,
	name::Name,
	types::{DnsClass, RecordType},
	wire::Reader,
};

pub const RECORD_TAIL_LEN: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
	pub name: Name,
	pub record_type: RecordType,
	pub dns_class: DnsClass,
	pub ttl: u32,
	/// as found on the wire, not checked against the 4 byte rdata
	pub rdlength: u16,
	pub rdata: u32,
}

impl ResourceRecord {
	/// An IN A record.
	pub fn a(name: Name, ttl: u32, addr: Ipv4Addr) -> Self {
		Self {
			name,
			record_type: RecordType::A,
			dns_class: DnsClass::IN,
			ttl,
			rdlength: 4,
			rdata: addr.into(),
		}
	}

	/// rdata read as an IPv4 address, which is what it is for A records.
	pub fn address(&self) -> Ipv4Addr {
		Ipv4Addr::from(self.rdata)
	}

	/// Reads the fixed tail, the owner name comes from the caller.
	pub fn read(r: &mut Reader, name: Name) -> Result<Self> {
		r.ensure(RECORD_TAIL_LEN)?;
		Ok(Self {
			name,
			record_type: RecordType::from(r.read_u16()?),
			dns_class: DnsClass::from(r.read_u16()?),
			ttl: r.read_u32()?,
			rdlength: r.read_u16()?,
			rdata: r.read_u32()?,
		})
	}

	pub fn read_named(r: &mut Reader) -> Result<Self> {
		let name = Name::read(r)?;
		Self::read(r, name)
	}

	pub fn write_to(&self, buf: &mut impl BufMut) {
		buf.put_u16(self.record_type.into());
		buf.put_u16(self.dns_class.into());
		buf.put_u32(self.ttl);
		buf.put_u16(self.rdlength);
		buf.put_u32(self.rdata);
	}

	pub fn write_named_to(&self, buf: &mut impl BufMut) {
		self.name.write_to(buf);
		self.write_to(buf);
	}
}

pub fn decode_resource_record(buf: &[u8], name: Name) -> Result<(ResourceRecord, &[u8])> {
	let mut r = Reader::new(buf);
	let rr = ResourceRecord::read(&mut r, name)?;
	Ok((rr, r.rest()))
}

pub fn encode_resource_record(rr: &ResourceRecord) -> Vec<u8> {
	let mut buf = Vec::with_capacity(RECORD_TAIL_LEN);
	rr.write_to(&mut buf);
	buf
}

pub fn decode_named_resource_record(buf: &[u8]) -> Result<(ResourceRecord, &[u8])> {
	let mut r = Reader::new(buf);
	let rr = ResourceRecord::read_named(&mut r)?;
	Ok((rr, r.rest()))
}

pub fn encode_named_resource_record(rr: &ResourceRecord) -> Vec<u8> {
	let mut buf = Vec::with_capacity(rr.name.wire_len() + RECORD_TAIL_LEN);
	rr.write_named_to(&mut buf);
	buf
}

impl fmt::Display for ResourceRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} {} {} {} ",
			self.name, self.ttl, self.dns_class, self.record_type
		)?;
		if (self.dns_class, self.record_type) == (DnsClass::IN, RecordType::A) {
			write!(f, "{}", self.address())?;
		} else {
			write!(f, "0x{:08x}", self.rdata)?;
		}
		if self.rdlength != 4 {
			write!(f, " (rdlength {})", self.rdlength)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;

	const TAIL: [u8; RECORD_TAIL_LEN] = [
		0x00, 0x01, // A
		0x00, 0x01, // IN
		0x00, 0x00, 0x0e, 0x10, // 3600
		0x00, 0x04, // rdlength
		0x5d, 0xb8, 0xd8, 0x22, // 93.184.216.34
	];

	fn name() -> Name {
		"example.com".parse().unwrap()
	}

	#[test]
	fn decode_tail() {
		let mut buf = TAIL.to_vec();
		buf.push(0x99);
		let (rr, rest) = decode_resource_record(&buf, name()).unwrap();
		assert_eq!(rr, ResourceRecord::a(name(), 3600, Ipv4Addr::new(93, 184, 216, 34)));
		assert_eq!(rest, &[0x99]);
		assert_eq!(rr.to_string(), "example.com 3600 IN A 93.184.216.34");
	}

	#[test]
	fn tail_is_symmetric() {
		let (rr, _) = decode_resource_record(&TAIL, name()).unwrap();
		assert_eq!(encode_resource_record(&rr), TAIL.to_vec());
	}

	#[test]
	fn named_is_symmetric() {
		let rr = ResourceRecord {
			record_type: RecordType::TXT,
			dns_class: DnsClass::HS,
			ttl: u32::MAX,
			rdlength: 0xffff,
			rdata: 0xdeadbeef,
			..ResourceRecord::a(name(), 0, Ipv4Addr::UNSPECIFIED)
		};
		let buf = encode_named_resource_record(&rr);
		assert_eq!(&buf[..13], b"\x07example\x03com\x00");
		assert_eq!(buf.len(), 13 + RECORD_TAIL_LEN);
		let (d, rest) = decode_named_resource_record(&buf).unwrap();
		assert_eq!(d, rr);
		assert!(rest.is_empty());
		assert_eq!(
			d.to_string(),
			"example.com 4294967295 HS TXT 0xdeadbeef (rdlength 65535)"
		);
	}

	#[test]
	fn short_tail() {
		assert_eq!(
			decode_resource_record(&TAIL[..13], name()),
			Err(Error::BufferTooShort {
				offset: 0,
				needed: RECORD_TAIL_LEN,
				available: 13,
			})
		);
	}
}
