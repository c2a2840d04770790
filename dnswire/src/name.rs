use std::{
	fmt::{self, Write},
	str::FromStr,
};

use bytes::BufMut;

use crate::{
	error::{Error, Result},
	wire::Reader,
};

/// Longest label, the top two bits of a length byte belong to compression.
pub const MAX_LABEL_LEN: usize = 63;

/// A domain name as the raw label bytes found on the wire.
///
/// Always holds at least one label and every label is 1..=63 bytes,
/// so it can be written back to the wire as is.
/// The text form uses the RFC 1035 5.1 escapes: `\.` and `\\` inside a label,
/// `\DDD` for bytes outside printable ASCII. It has no trailing dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
	labels: Vec<Vec<u8>>,
	text: String,
}

fn escape(label: &[u8], out: &mut String) {
	for &b in label {
		match b {
			b'.' | b'\\' => {
				out.push('\\');
				out.push(b as char);
			}
			0x21..=0x7e => out.push(b as char),
			_ => {
				let _ = write!(out, "\\{:03}", b);
			}
		}
	}
}

impl Name {
	// labels are already checked
	fn from_labels(labels: Vec<Vec<u8>>) -> Self {
		let mut text = String::new();
		for (i, l) in labels.iter().enumerate() {
			if i > 0 {
				text.push('.');
			}
			escape(l, &mut text);
		}
		Self { labels, text }
	}

	/// Parses a dotted name, one trailing dot is allowed.
	pub fn new(name: impl AsRef<str>) -> Result<Self> {
		let name = name.as_ref();
		let invalid = || Error::InvalidEscape {
			name: name.to_string(),
		};
		let b = name.as_bytes();
		let mut labels = vec![Vec::new()];
		let mut i = 0;
		while i < b.len() {
			let c = b[i];
			i += 1;
			let byte = match c {
				b'.' => {
					labels.push(Vec::new());
					continue;
				}
				b'\\' => match b.get(i..i + 3) {
					Some(d) if d.iter().all(u8::is_ascii_digit) => {
						let v = d.iter().fold(0u16, |v, d| v * 10 + (d - b'0') as u16);
						i += 3;
						u8::try_from(v).map_err(|_| invalid())?
					}
					_ => {
						let e = *b.get(i).ok_or_else(invalid)?;
						if e.is_ascii_digit() {
							return Err(invalid());
						}
						i += 1;
						e
					}
				},
				c => c,
			};
			if let Some(l) = labels.last_mut() {
				l.push(byte);
			}
		}
		if labels.len() > 1 && labels.last().is_some_and(Vec::is_empty) {
			labels.pop();
		}
		if labels.len() == 1 && labels[0].is_empty() {
			return Err(Error::EmptyName { offset: 0 });
		}
		for l in labels.iter() {
			if l.is_empty() {
				return Err(Error::EmptyLabel {
					name: name.to_string(),
				});
			}
			if l.len() > MAX_LABEL_LEN {
				let mut label = String::new();
				escape(l, &mut label);
				return Err(Error::LabelTooLong { label, len: l.len() });
			}
		}
		Ok(Self::from_labels(labels))
	}

	/// The escaped text form.
	pub fn as_str(&self) -> &str {
		&self.text
	}

	pub fn labels(&self) -> impl Iterator<Item = &[u8]> {
		self.labels.iter().map(Vec::as_slice)
	}

	/// Bytes taken on the wire, terminator included.
	pub fn wire_len(&self) -> usize {
		self.labels().map(|l| l.len() + 1).sum::<usize>() + 1
	}

	pub fn read(r: &mut Reader) -> Result<Self> {
		let start = r.pos();
		let mut labels = Vec::new();
		loop {
			let offset = r.pos();
			let len = r.read_u8()?;
			if len == 0 {
				break;
			}
			// 0b11 prefix would be a pointer, 0b01/0b10 are reserved, none are supported
			if len as usize > MAX_LABEL_LEN {
				return Err(Error::InvalidLabelLength { offset, len });
			}
			labels.push(r.read_bytes(len as usize)?.to_vec());
		}
		if labels.is_empty() {
			return Err(Error::EmptyName { offset: start });
		}
		Ok(Self::from_labels(labels))
	}

	pub fn write_to(&self, buf: &mut impl BufMut) {
		for l in self.labels() {
			buf.put_u8(l.len() as u8);
			buf.put_slice(l);
		}
		buf.put_u8(0);
	}
}

impl FromStr for Name {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::new(s)
	}
}

impl AsRef<str> for Name {
	fn as_ref(&self) -> &str {
		&self.text
	}
}

impl fmt::Display for Name {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}

/// Decodes a label sequence at the start of `buf`, returns the name and what follows it.
pub fn decode_name(buf: &[u8]) -> Result<(Name, &[u8])> {
	let mut r = Reader::new(buf);
	let n = Name::read(&mut r)?;
	Ok((n, r.rest()))
}

pub fn encode_name(name: &str) -> Result<Vec<u8>> {
	let n = Name::new(name)?;
	let mut buf = Vec::with_capacity(n.wire_len());
	n.write_to(&mut buf);
	Ok(buf)
}
