// small INI style conf parser
//	warns on unknown keys, rejects values it can't parse
//
//	[global]
//	listen = 0.0.0.0:2053
//	upstream = 8.8.8.8:53
//	timeout = 5

use std::{io, path::Path};

use log::warn;
use thiserror::Error;

use crate::utils::read_lines;

#[derive(Error, Debug)]
pub enum ConfError {
	#[error("failed to read conf: {0}")]
	Io(#[from] io::Error),

	#[error("invalid line: {0}")]
	InvalidLine(String),

	#[error("invalid value for {key}: {value}")]
	InvalidValue { key: String, value: String },
}

// this is the part that's generic

pub trait Section {
	fn set(&mut self, k: &str, v: &str) -> Result<(), ConfError>;
}

pub trait Conf: Sized {
	fn new() -> Self;
	fn sec_mut(&mut self, name: &str) -> Option<&mut dyn Section>;

	fn from_lines(conf: impl IntoIterator<Item = impl AsRef<str>>) -> Result<Self, ConfError> {
		let mut ret = Self::new();
		// None before the first section header and inside unknown sections
		let mut sec: Option<String> = None;
		for l in conf {
			let l = l.as_ref();
			// strip trailing comments
			let l = l.split_once('#').map_or(l, |(l, _)| l).trim_ascii();
			if l.is_empty() {
				continue;
			}
			if l.starts_with('[') && l.ends_with(']') {
				let name = l[1..l.len() - 1].trim_ascii().to_string();
				if ret.sec_mut(&name).is_none() {
					warn!("unknown section: {}", name);
				}
				sec = Some(name);
				continue;
			}
			let Some(name) = sec.as_deref() else {
				warn!("invalid line, not in a section: {}", l);
				continue;
			};
			let Some(s) = ret.sec_mut(name) else {
				continue;
			};
			match l.split_once('=') {
				None => return Err(ConfError::InvalidLine(l.to_string())),
				Some((k, v)) => s.set(k.trim_ascii_end(), v.trim_ascii_start())?,
			}
		}
		Ok(ret)
	}

	fn from_file(conf: impl AsRef<Path>) -> Result<Self, ConfError> {
		Self::from_lines(read_lines(conf)?)
	}
}

// the following is specific to the relay

use std::{net::SocketAddr, str::FromStr, time::Duration};

#[cfg_attr(debug_assertions, derive(Debug))]
pub struct RelayConf {
	pub global: GlobalSec,
}

impl Conf for RelayConf {
	fn new() -> Self {
		Self {
			global: GlobalSec::new(),
		}
	}

	fn sec_mut(&mut self, name: &str) -> Option<&mut dyn Section> {
		match name.to_ascii_lowercase().as_str() {
			"global" => Some(&mut self.global),
			_ => None,
		}
	}
}

impl Default for RelayConf {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg_attr(debug_assertions, derive(Debug))]
pub struct GlobalSec {
	pub listen: SocketAddr,
	pub upstream: SocketAddr,
	pub timeout: Duration,
}

impl GlobalSec {
	fn new() -> Self {
		Self {
			listen: SocketAddr::from(([0, 0, 0, 0], 2053)),
			upstream: SocketAddr::from(([8, 8, 8, 8], 53)),
			timeout: Duration::from_secs(5),
		}
	}
}

fn parse<T: FromStr>(k: &str, v: &str) -> Result<T, ConfError> {
	v.parse().map_err(|_| ConfError::InvalidValue {
		key: k.to_string(),
		value: v.to_string(),
	})
}

impl Section for GlobalSec {
	fn set(&mut self, k: &str, v: &str) -> Result<(), ConfError> {
		match k.to_ascii_lowercase().as_str() {
			"listen" => self.listen = parse(k, v)?,
			"upstream" => self.upstream = parse(k, v)?,
			"timeout" => {
				self.timeout = Duration::try_from_secs_f32(parse(k, v)?).map_err(|_| {
					ConfError::InvalidValue {
						key: k.to_string(),
						value: v.to_string(),
					}
				})?
			}
			_ => warn!("unknown key: \"{}\"", k),
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test() {
		let _ = env_logger::builder()
			.is_test(true)
			.filter_level(log::LevelFilter::Trace)
			.try_init();
		let c = RelayConf::from_lines([
			"# relay",
			"",
			"[Global]",
			"listen = 127.0.0.1:1053  # local only",
			"upstream=1.1.1.1:53",
			"timeout = 2.5",
			"color = blue",
			"[other]",
			"whatever = 1",
		])
		.unwrap();
		println!("{:?}", c);
		assert_eq!(c.global.listen, "127.0.0.1:1053".parse().unwrap());
		assert_eq!(c.global.upstream, "1.1.1.1:53".parse().unwrap());
		assert_eq!(c.global.timeout, Duration::from_millis(2500));
	}

	#[test]
	fn shipped_conf() {
		let c = RelayConf::from_file("../dnswire.conf").unwrap();
		assert_eq!(c.global.listen, "0.0.0.0:2053".parse().unwrap());
		assert_eq!(c.global.upstream, "8.8.8.8:53".parse().unwrap());
	}

	#[test]
	fn defaults() {
		let c = RelayConf::default();
		assert_eq!(c.global.listen.port(), 2053);
		assert_eq!(c.global.upstream, "8.8.8.8:53".parse().unwrap());
		assert_eq!(c.global.timeout, Duration::from_secs(5));
	}

	#[test]
	fn invalid() {
		assert!(matches!(
			RelayConf::from_lines(["[global]", "listen = localhost"]),
			Err(ConfError::InvalidValue { .. })
		));
		assert!(matches!(
			RelayConf::from_lines(["[global]", "listen"]),
			Err(ConfError::InvalidLine(_))
		));
		assert!(matches!(
			RelayConf::from_file("/nonexistent/relay.conf"),
			Err(ConfError::Io(_))
		));
	}
}
