use std::{
	net::{Ipv4Addr, SocketAddr},
	path::PathBuf,
};

use clap::{Args, Parser, Subcommand};
use dnswire::{DnsClass, Name, RecordType};

#[derive(Parser)]
#[command(version, about = "RFC 1035 message codec and UDP relay")]
pub struct CliArgs {
	#[command(subcommand)]
	pub cmd: Cmd,
}

#[derive(Args)]
pub struct RelayArgs {
	/// conf file, flags below take precedence
	#[arg(short, long)]
	pub conf: Option<PathBuf>,

	#[arg(short, long)]
	pub listen: Option<SocketAddr>,

	#[arg(short, long)]
	pub upstream: Option<SocketAddr>,

	/// seconds to wait for the upstream reply
	#[arg(short, long)]
	pub timeout: Option<f32>,
}

#[derive(Args)]
pub struct EncodeArgs {
	pub name: Name,

	#[arg(default_value = "A")]
	pub qtype: RecordType,

	#[arg(default_value = "IN")]
	pub qclass: DnsClass,

	#[arg(long, default_value_t = 0)]
	pub id: u16,

	#[arg(long, default_value_t = 0)]
	pub ttl: u32,

	/// rdata of the answer
	#[arg(long, default_value_t = Ipv4Addr::UNSPECIFIED)]
	pub address: Ipv4Addr,

	/// set RD
	#[arg(long)]
	pub rd: bool,

	/// set QR
	#[arg(long)]
	pub response: bool,
}

#[derive(Subcommand)]
pub enum Cmd {
	Relay(RelayArgs),
	/// decode a hex encoded message, whitespace is ignored
	Decode { hex: Vec<String> },
	/// print the hex encoding of a single question, single answer message
	Encode(EncodeArgs),
}
