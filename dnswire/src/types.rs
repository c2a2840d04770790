// numeric codes that appear in headers, questions and records
//	every enum keeps the raw value of codes it doesn't name,
//	so decode -> encode never loses anything
//	the raw value sits in a Raw that only the From conversions can build,
//	so a named code can't hide behind an unnamed variant

use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown mnemonic: {0}")]
pub struct UnknownMnemonic(pub String);

/// A code point without a name, always outside the named set of its enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Raw<T>(T);

impl<T: Copy> Raw<T> {
	pub fn value(self) -> T {
		self.0
	}
}

/// The QR bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
	Query,
	Response,
}

impl From<bool> for MessageType {
	fn from(qr: bool) -> Self {
		if qr {
			Self::Response
		} else {
			Self::Query
		}
	}
}

impl From<MessageType> for bool {
	fn from(t: MessageType) -> Self {
		t == MessageType::Response
	}
}

impl fmt::Display for MessageType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Query => f.write_str("QUERY"),
			Self::Response => f.write_str("RESPONSE"),
		}
	}
}

/// 4-bit OPCODE, RFC 1035 4.1.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
	Query,
	IQuery,
	Status,
	/// 3-15
	Unassigned(Raw<u8>),
}

impl From<u8> for OpCode {
	fn from(v: u8) -> Self {
		match v & 0x0f {
			0 => Self::Query,
			1 => Self::IQuery,
			2 => Self::Status,
			v => Self::Unassigned(Raw(v)),
		}
	}
}

impl From<OpCode> for u8 {
	fn from(op: OpCode) -> Self {
		match op {
			OpCode::Query => 0,
			OpCode::IQuery => 1,
			OpCode::Status => 2,
			OpCode::Unassigned(v) => v.0,
		}
	}
}

impl fmt::Display for OpCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Query => f.write_str("QUERY"),
			Self::IQuery => f.write_str("IQUERY"),
			Self::Status => f.write_str("STATUS"),
			Self::Unassigned(v) => write!(f, "OPCODE{}", v.0),
		}
	}
}

/// 4-bit RCODE, RFC 1035 4.1.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
	NoError,
	FormErr,
	ServFail,
	NXDomain,
	NotImp,
	Refused,
	/// 6-15
	Unassigned(Raw<u8>),
}

impl From<u8> for ResponseCode {
	fn from(v: u8) -> Self {
		match v & 0x0f {
			0 => Self::NoError,
			1 => Self::FormErr,
			2 => Self::ServFail,
			3 => Self::NXDomain,
			4 => Self::NotImp,
			5 => Self::Refused,
			v => Self::Unassigned(Raw(v)),
		}
	}
}

impl From<ResponseCode> for u8 {
	fn from(rc: ResponseCode) -> Self {
		match rc {
			ResponseCode::NoError => 0,
			ResponseCode::FormErr => 1,
			ResponseCode::ServFail => 2,
			ResponseCode::NXDomain => 3,
			ResponseCode::NotImp => 4,
			ResponseCode::Refused => 5,
			ResponseCode::Unassigned(v) => v.0,
		}
	}
}

impl fmt::Display for ResponseCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NoError => f.write_str("NOERROR"),
			Self::FormErr => f.write_str("FORMERR"),
			Self::ServFail => f.write_str("SERVFAIL"),
			Self::NXDomain => f.write_str("NXDOMAIN"),
			Self::NotImp => f.write_str("NOTIMP"),
			Self::Refused => f.write_str("REFUSED"),
			Self::Unassigned(v) => write!(f, "RCODE{}", v.0),
		}
	}
}

/// TYPE and QTYPE values, RFC 1035 3.2.2 and 3.2.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
	A,
	NS,
	MD,
	MF,
	CNAME,
	SOA,
	MB,
	MG,
	MR,
	NULL,
	WKS,
	PTR,
	HINFO,
	MINFO,
	MX,
	TXT,
	AXFR,
	MAILB,
	MAILA,
	/// `*`
	ANY,
	Unknown(Raw<u16>),
}

const RECORD_TYPES: [(RecordType, u16, &str); 20] = [
	(RecordType::A, 1, "A"),
	(RecordType::NS, 2, "NS"),
	(RecordType::MD, 3, "MD"),
	(RecordType::MF, 4, "MF"),
	(RecordType::CNAME, 5, "CNAME"),
	(RecordType::SOA, 6, "SOA"),
	(RecordType::MB, 7, "MB"),
	(RecordType::MG, 8, "MG"),
	(RecordType::MR, 9, "MR"),
	(RecordType::NULL, 10, "NULL"),
	(RecordType::WKS, 11, "WKS"),
	(RecordType::PTR, 12, "PTR"),
	(RecordType::HINFO, 13, "HINFO"),
	(RecordType::MINFO, 14, "MINFO"),
	(RecordType::MX, 15, "MX"),
	(RecordType::TXT, 16, "TXT"),
	(RecordType::AXFR, 252, "AXFR"),
	(RecordType::MAILB, 253, "MAILB"),
	(RecordType::MAILA, 254, "MAILA"),
	(RecordType::ANY, 255, "ANY"),
];

impl From<u16> for RecordType {
	fn from(v: u16) -> Self {
		RECORD_TYPES
			.iter()
			.find(|(_, n, _)| *n == v)
			.map_or(Self::Unknown(Raw(v)), |(t, _, _)| *t)
	}
}

impl From<RecordType> for u16 {
	fn from(t: RecordType) -> Self {
		match t {
			RecordType::Unknown(v) => v.0,
			t => RECORD_TYPES
				.iter()
				.find(|(e, _, _)| *e == t)
				.map_or(0, |(_, n, _)| *n),
		}
	}
}

impl fmt::Display for RecordType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Unknown(v) => write!(f, "TYPE{}", v.0),
			t => {
				let (_, _, s) = RECORD_TYPES.iter().find(|(e, _, _)| e == t).ok_or(fmt::Error)?;
				f.write_str(s)
			}
		}
	}
}

impl FromStr for RecordType {
	type Err = UnknownMnemonic;

	// accepts mnemonics in any case, "*", "TYPE<n>" (RFC 3597) and bare numbers
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let u = s.to_ascii_uppercase();
		if u == "*" {
			return Ok(Self::ANY);
		}
		if let Some((t, _, _)) = RECORD_TYPES.iter().find(|(_, _, m)| *m == u) {
			return Ok(*t);
		}
		u.strip_prefix("TYPE")
			.unwrap_or(u.as_str())
			.parse::<u16>()
			.map(Self::from)
			.map_err(|_| UnknownMnemonic(s.to_string()))
	}
}

/// CLASS and QCLASS values, RFC 1035 3.2.4 and 3.2.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnsClass {
	IN,
	CS,
	CH,
	HS,
	ANY,
	Unknown(Raw<u16>),
}

impl From<u16> for DnsClass {
	fn from(v: u16) -> Self {
		match v {
			1 => Self::IN,
			2 => Self::CS,
			3 => Self::CH,
			4 => Self::HS,
			255 => Self::ANY,
			v => Self::Unknown(Raw(v)),
		}
	}
}

impl From<DnsClass> for u16 {
	fn from(c: DnsClass) -> Self {
		match c {
			DnsClass::IN => 1,
			DnsClass::CS => 2,
			DnsClass::CH => 3,
			DnsClass::HS => 4,
			DnsClass::ANY => 255,
			DnsClass::Unknown(v) => v.0,
		}
	}
}

impl fmt::Display for DnsClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::IN => f.write_str("IN"),
			Self::CS => f.write_str("CS"),
			Self::CH => f.write_str("CH"),
			Self::HS => f.write_str("HS"),
			Self::ANY => f.write_str("ANY"),
			Self::Unknown(v) => write!(f, "CLASS{}", v.0),
		}
	}
}

impl FromStr for DnsClass {
	type Err = UnknownMnemonic;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let u = s.to_ascii_uppercase();
		match u.as_str() {
			"IN" => Ok(Self::IN),
			"CS" => Ok(Self::CS),
			"CH" | "CHAOS" => Ok(Self::CH),
			"HS" => Ok(Self::HS),
			"ANY" | "*" => Ok(Self::ANY),
			_ => u
				.strip_prefix("CLASS")
				.unwrap_or(u.as_str())
				.parse::<u16>()
				.map(Self::from)
				.map_err(|_| UnknownMnemonic(s.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rcode_keeps_unassigned() {
		for v in 0..16u8 {
			assert_eq!(u8::from(ResponseCode::from(v)), v);
		}
		assert_eq!(ResponseCode::from(3), ResponseCode::NXDomain);
		assert!(matches!(ResponseCode::from(9), ResponseCode::Unassigned(v) if v.value() == 9));
	}

	#[test]
	fn opcode_keeps_unassigned() {
		for v in 0..16u8 {
			assert_eq!(u8::from(OpCode::from(v)), v);
		}
		assert_eq!(OpCode::from(2), OpCode::Status);
		assert_eq!(OpCode::from(15).to_string(), "OPCODE15");
	}

	#[test]
	fn record_type_values() {
		let tests = [
			(RecordType::A, 1),
			(RecordType::TXT, 16),
			(RecordType::AXFR, 252),
			(RecordType::ANY, 255),
			(RecordType::from(28), 28),
		];
		for (t, v) in tests {
			assert_eq!(u16::from(t), v);
			assert_eq!(RecordType::from(v), t);
		}
	}

	#[test]
	fn record_type_from_str() {
		assert_eq!("a".parse::<RecordType>().unwrap(), RecordType::A);
		assert_eq!("MX".parse::<RecordType>().unwrap(), RecordType::MX);
		assert_eq!("*".parse::<RecordType>().unwrap(), RecordType::ANY);
		assert_eq!("TYPE65".parse::<RecordType>().unwrap(), RecordType::from(65));
		assert_eq!("12".parse::<RecordType>().unwrap(), RecordType::PTR);
		assert!("AAAAA".parse::<RecordType>().is_err());
		assert_eq!(RecordType::from(65).to_string(), "TYPE65");
		// a number with a name still parses to the named variant
		assert_eq!("TYPE1".parse::<RecordType>().unwrap(), RecordType::A);
	}

	#[test]
	fn class_from_str() {
		assert_eq!("in".parse::<DnsClass>().unwrap(), DnsClass::IN);
		assert_eq!("CLASS7".parse::<DnsClass>().unwrap(), DnsClass::from(7));
		assert_eq!("CLASS1".parse::<DnsClass>().unwrap(), DnsClass::IN);
		assert_eq!(u16::from(DnsClass::ANY), 255);
		assert!("internet".parse::<DnsClass>().is_err());
	}

	#[test]
	fn every_u16_round_trips() {
		for v in 0..=u16::MAX {
			let t = RecordType::from(v);
			assert_eq!(u16::from(t), v);
			if let RecordType::Unknown(r) = t {
				assert_eq!(r.value(), v);
				assert!(RECORD_TYPES.iter().all(|(_, n, _)| *n != v));
			}
			let c = DnsClass::from(v);
			assert_eq!(u16::from(c), v);
			assert_eq!(DnsClass::from(u16::from(c)), c);
		}
	}

	#[test]
	fn unnamed_codes_stay_unnamed() {
		for v in 0..16u8 {
			match OpCode::from(v) {
				OpCode::Unassigned(r) => assert!(r.value() >= 3 && r.value() == v),
				o => assert_eq!(u8::from(o), v),
			}
			match ResponseCode::from(v) {
				ResponseCode::Unassigned(r) => assert!(r.value() >= 6 && r.value() == v),
				c => assert_eq!(u8::from(c), v),
			}
		}
	}
}
