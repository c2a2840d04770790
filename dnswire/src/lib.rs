//! RFC 1035 wire codec for single question, single answer DNS messages,
//! plus a small UDP relay built on top of it.

pub mod conf;
pub mod error;
pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod record;
pub mod relay;
pub mod types;
pub mod utils;
pub mod wire;

pub use error::{Error, Result};
pub use header::{decode_header, encode_header, Header};
pub use message::{decode_message, encode_message, Message};
pub use name::{decode_name, encode_name, Name};
pub use question::{decode_question, encode_question, Question};
pub use record::{
	decode_named_resource_record, decode_resource_record, encode_named_resource_record,
	encode_resource_record, ResourceRecord,
};
pub use types::{DnsClass, MessageType, OpCode, Raw, RecordType, ResponseCode};
