use std::fmt;

use log::*;

use crate::{
	error::Result,
	header::{Header, HEADER_LEN},
	question::Question,
	record::{ResourceRecord, RECORD_TAIL_LEN},
	wire::Reader,
};

/// Smallest message that can decode: header, a name with a single 1 byte label
/// (length, label, terminator), the question fields and the record tail.
pub const MIN_MESSAGE_LEN: usize = HEADER_LEN + 3 + 4 + RECORD_TAIL_LEN;

/// One header, one question and one answer for that question.
///
/// The answer's name is always the question's, see [`crate::record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
	pub header: Header,
	pub question: Question,
	pub answer: ResourceRecord,
}

impl Message {
	pub fn new(header: Header, question: Question, answer: ResourceRecord) -> Self {
		let answer = ResourceRecord {
			name: question.name.clone(),
			..answer
		};
		Self {
			header,
			question,
			answer,
		}
	}

	pub fn wire_len(&self) -> usize {
		HEADER_LEN + self.question.wire_len() + RECORD_TAIL_LEN
	}

	pub fn read(r: &mut Reader) -> Result<Self> {
		let header = Header::read(r)?;
		let question = Question::read(r)?;
		let answer = ResourceRecord::read(r, question.name.clone())?;
		Ok(Self {
			header,
			question,
			answer,
		})
	}

	pub fn to_vec(&self) -> Vec<u8> {
		let mut buf = Vec::with_capacity(self.wire_len());
		self.header.write_to(&mut buf);
		self.question.write_to(&mut buf);
		self.answer.write_to(&mut buf);
		buf
	}
}

pub fn decode_message(buf: &[u8]) -> Result<Message> {
	let mut r = Reader::new(buf);
	let m = Message::read(&mut r)?;
	if !r.is_empty() {
		trace!("{} trailing bytes ignored after offset {}", r.remaining(), r.pos());
	}
	Ok(m)
}

pub fn encode_message(m: &Message) -> Result<Vec<u8>> {
	Ok(m.to_vec())
}

impl fmt::Display for Message {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{}", self.header)?;
		writeln!(f, ";; QUESTION")?;
		writeln!(f, "{}", self.question)?;
		writeln!(f, ";; ANSWER")?;
		write!(f, "{}", self.answer)
	}
}
