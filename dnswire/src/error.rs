use thiserror::Error;

/// Everything that can go wrong while reading or writing wire data.
///
/// Offsets are absolute positions in the buffer the decode started on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
	#[error("buffer too short at offset {offset}: need {needed} bytes, {available} available")]
	BufferTooShort {
		offset: usize,
		needed: usize,
		available: usize,
	},

	#[error("invalid label length 0x{len:02x} at offset {offset}")]
	InvalidLabelLength { offset: usize, len: u8 },

	#[error("empty name at offset {offset}")]
	EmptyName { offset: usize },

	#[error("label too long ({len} bytes): {label}")]
	LabelTooLong { label: String, len: usize },

	#[error("empty label in name: {name:?}")]
	EmptyLabel { name: String },

	#[error("invalid escape in name: {name:?}")]
	InvalidEscape { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
