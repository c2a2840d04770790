use std::fmt;

use bytes::BufMut;

use crate::{
	error::Result,
	name::Name,
	types::{DnsClass, RecordType},
	wire::Reader,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
	pub name: Name,
	pub query_type: RecordType,
	pub query_class: DnsClass,
}

impl Question {
	pub fn new(name: Name, query_type: RecordType, query_class: DnsClass) -> Self {
		Self {
			name,
			query_type,
			query_class,
		}
	}

	pub fn wire_len(&self) -> usize {
		self.name.wire_len() + 4
	}

	pub fn read(r: &mut Reader) -> Result<Self> {
		let name = Name::read(r)?;
		r.ensure(4)?;
		let query_type = RecordType::from(r.read_u16()?);
		let query_class = DnsClass::from(r.read_u16()?);
		Ok(Self {
			name,
			query_type,
			query_class,
		})
	}

	pub fn write_to(&self, buf: &mut impl BufMut) {
		self.name.write_to(buf);
		buf.put_u16(self.query_type.into());
		buf.put_u16(self.query_class.into());
	}
}

pub fn decode_question(buf: &[u8]) -> Result<(Question, &[u8])> {
	let mut r = Reader::new(buf);
	let q = Question::read(&mut r)?;
	Ok((q, r.rest()))
}

// Name can't hold anything unencodable, the Result is kept for symmetry with encode_name
pub fn encode_question(q: &Question) -> Result<Vec<u8>> {
	let mut buf = Vec::with_capacity(q.wire_len());
	q.write_to(&mut buf);
	Ok(buf)
}

impl fmt::Display for Question {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {} {}", self.name, self.query_class, self.query_type)
	}
}
