use std::{process::ExitCode, time::Duration};

use clap::Parser;
use log::*;
use tokio::task;

use dnswire::{
	conf::{Conf, RelayConf},
	relay::relay,
	utils::{hex_dump, parse_hex},
	Header, Message, MessageType, Question, ResourceRecord,
};

mod args;
use args::*;

fn main() -> ExitCode {
	let args = CliArgs::parse();

	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let ok = match args.cmd {
		Cmd::Relay(args) => run_relay(args),
		Cmd::Decode { hex } => decode(&hex.join("")),
		Cmd::Encode(args) => encode(args),
	};
	if ok.is_some() {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	}
}

fn relay_conf(args: RelayArgs) -> Option<RelayConf> {
	let mut conf = match &args.conf {
		Some(f) => {
			info!("read config from {}", f.display());
			RelayConf::from_file(f)
				.map_err(|e| error!("{}: {}", f.display(), e))
				.ok()?
		}
		None => RelayConf::new(),
	};
	if let Some(listen) = args.listen {
		conf.global.listen = listen;
	}
	if let Some(upstream) = args.upstream {
		conf.global.upstream = upstream;
	}
	if let Some(t) = args.timeout {
		conf.global.timeout = Duration::try_from_secs_f32(t)
			.map_err(|e| error!("invalid timeout {}: {}", t, e))
			.ok()?;
	}
	Some(conf)
}

fn run_relay(args: RelayArgs) -> Option<()> {
	let conf = relay_conf(args)?;

	let rt = tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()
		.map_err(|e| error!("failed to start runtime: {}", e))
		.ok()?;
	let local = task::LocalSet::new();
	local
		.block_on(&rt, relay(&conf))
		.map_err(|e| error!("relay error: {}", e))
		.ok()
}

fn decode(hex: &str) -> Option<()> {
	let Some(buf) = parse_hex(hex) else {
		error!("invalid hex input");
		return None;
	};
	debug!("{} bytes\n{}", buf.len(), hex_dump(&buf));
	let msg = dnswire::decode_message(&buf)
		.map_err(|e| error!("decode failed: {}", e))
		.ok()?;
	println!("{}", msg);
	Some(())
}

fn build_message(args: EncodeArgs) -> Message {
	let mut header = Header::query(args.id);
	header.message_type = MessageType::from(args.response);
	header.recursion_desired = args.rd;
	header.query_count = 1;
	header.answer_count = 1;
	let question = Question::new(args.name, args.qtype, args.qclass);
	let answer = ResourceRecord {
		record_type: args.qtype,
		dns_class: args.qclass,
		..ResourceRecord::a(question.name.clone(), args.ttl, args.address)
	};
	Message::new(header, question, answer)
}

fn encode(args: EncodeArgs) -> Option<()> {
	let msg = build_message(args);
	debug!("\n{}", msg);
	let buf = dnswire::encode_message(&msg)
		.map_err(|e| error!("encode failed: {}", e))
		.ok()?;
	trace!("\n{}", hex_dump(&buf));
	println!(
		"{}",
		buf.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" ")
	);
	Some(())
}
