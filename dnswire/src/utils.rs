use std::{
	fmt::Write,
	fs::File,
	io::{self, BufRead, BufReader},
	path::Path,
};

pub fn read_lines(f: impl AsRef<Path>) -> io::Result<impl Iterator<Item = String>> {
	let f = File::open(f)?;
	Ok(BufReader::new(f).lines().map_while(Result::ok))
}

// 00000000  07 65 78 61 6d 70 6c 65  03 63 6f 6d 00 00 01 00  |.example.com....|
pub fn hex_dump(buf: &[u8]) -> String {
	let mut s = String::with_capacity(buf.len() / 16 * 80 + 80);
	for (i, chunk) in buf.chunks(16).enumerate() {
		let _ = write!(s, "{:08x} ", i * 16);
		for j in 0..16 {
			if j % 8 == 0 {
				s.push(' ');
			}
			match chunk.get(j) {
				Some(b) => {
					let _ = write!(s, "{:02x} ", b);
				}
				None => s.push_str("   "),
			}
		}
		s.push_str(" |");
		s.extend(chunk.iter().map(|&b| {
			if b.is_ascii_graphic() || b == b' ' {
				b as char
			} else {
				'.'
			}
		}));
		s.push_str("|\n");
	}
	s
}

/// Parses hex digits, whitespace and `:` between bytes are ignored.
pub fn parse_hex(s: &str) -> Option<Vec<u8>> {
	let digits: Vec<u8> = s
		.bytes()
		.filter(|b| !b.is_ascii_whitespace() && *b != b':')
		.collect();
	if digits.len() % 2 != 0 {
		return None;
	}
	digits
		.chunks(2)
		.map(|p| {
			let hi = (p[0] as char).to_digit(16)?;
			let lo = (p[1] as char).to_digit(16)?;
			Some((hi << 4 | lo) as u8)
		})
		.collect()
}
