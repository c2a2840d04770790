// UDP relay
//	every datagram is decoded, logged, encoded again and sent upstream,
//	the upstream reply goes back to the client untouched
//	datagrams with more than one question/answer are forwarded as received,
//	re-encoding would cut them after the answer

use std::{
	io,
	net::{Ipv4Addr, Ipv6Addr, SocketAddr},
	rc::Rc,
	time::Duration,
};

use log::*;
use tokio::{net::UdpSocket, select, signal::ctrl_c, task, time::timeout};

use crate::{
	conf::RelayConf,
	message::{decode_message, encode_message, Message},
	utils::hex_dump,
	wire::Reader,
};

// RFC 1035 4.2.1 caps UDP messages at 512, leave room for EDNS answers anyway
const BUF_LEN: usize = 0x600;

/// Sends `query` to `upstream` from an ephemeral socket and waits for one reply.
pub async fn exchange(query: &[u8], upstream: SocketAddr, t: Duration) -> io::Result<Vec<u8>> {
	let bind = if upstream.is_ipv4() {
		SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
	} else {
		SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
	};
	let s = UdpSocket::bind(bind).await?;
	s.connect(upstream).await?;
	s.send(query).await?;

	let mut buf = vec![0u8; BUF_LEN];
	let len = timeout(t, s.recv(&mut buf))
		.await
		.map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "upstream timed out"))??;
	buf.truncate(len);
	Ok(buf)
}

// decode, re-encode and forward one datagram, None if it is dropped
async fn forward(q: Vec<u8>, upstream: SocketAddr, t: Duration) -> Option<Vec<u8>> {
	trace!("query:\n{}", hex_dump(&q));
	let mut r = Reader::new(&q);
	let msg = Message::read(&mut r)
		.map_err(|e| warn!("invalid dns message: {}", e))
		.ok()?;
	debug!("=== query ===\n{}", msg);
	info!("{}", msg.question);

	let out = if r.is_empty() {
		encode_message(&msg)
			.map_err(|e| error!("failed to encode message: {}", e))
			.ok()?
	} else {
		debug!("{} bytes after the answer, forwarding as received", r.remaining());
		q
	};
	let resp = exchange(&out, upstream, t)
		.await
		.map_err(|e| warn!("upstream {} error: {}", upstream, e))
		.ok()?;
	trace!("reply:\n{}", hex_dump(&resp));
	match decode_message(&resp) {
		Ok(r) => debug!("=== reply ===\n{}", r),
		Err(e) => debug!("reply not decodable: {}", e),
	}
	Some(resp)
}

/// Binds the listen socket from `conf` and serves until ctrl-c.
///
/// Must run inside a [`task::LocalSet`].
pub async fn relay(conf: &RelayConf) -> io::Result<()> {
	let s = UdpSocket::bind(conf.global.listen).await?;
	serve(s, conf).await
}

/// Serves on an already bound socket, `conf.global.listen` is not used.
pub async fn serve(s: UdpSocket, conf: &RelayConf) -> io::Result<()> {
	let g = &conf.global;
	let s = Rc::new(s);
	info!("listening on UDP {}", s.local_addr()?);
	info!("upstream {}", g.upstream);

	let mut buf = vec![0u8; BUF_LEN];
	loop {
		select! {
			r = s.recv_from(&mut buf) => {
				match r {
					Ok((len, addr)) => {
						trace!("udp recv {} bytes from {}", len, addr);
						let w = s.clone();
						let q = buf[0..len].to_vec();
						let (upstream, t) = (g.upstream, g.timeout);
						task::spawn_local(async move {
							if let Some(a) = forward(q, upstream, t).await {
								if let Err(e) = w.send_to(&a, addr).await {
									error!("udp send error: {}", e);
								}
							}
						});
					}
					Err(e) => {
						error!("udp recv error: {}", e);
						return Err(e);
					}
				}
			}
			_ = ctrl_c() => {
				info!("ctrl-c received, exiting");
				break;
			}
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		conf::{Conf, GlobalSec},
		types::MessageType,
	};

	fn query_wire() -> Vec<u8> {
		let mut buf = vec![
			0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
		];
		buf.extend_from_slice(b"\x07example\x03com\x00\x00\x01\x00\x01");
		buf.extend_from_slice(&[0, 1, 0, 1, 0, 0, 0, 60, 0, 4, 10, 0, 0, 1]);
		buf
	}

	// echoes every datagram with QR set
	async fn fake_upstream() -> SocketAddr {
		let s = UdpSocket::bind("127.0.0.1:0").await.unwrap();
		let addr = s.local_addr().unwrap();
		task::spawn_local(async move {
			let mut buf = vec![0u8; BUF_LEN];
			while let Ok((len, from)) = s.recv_from(&mut buf).await {
				let mut reply = buf[..len].to_vec();
				reply[2] |= 0x80;
				let _ = s.send_to(&reply, from).await;
			}
		});
		addr
	}

	fn conf(listen: SocketAddr, upstream: SocketAddr) -> RelayConf {
		let mut c = RelayConf::new();
		c.global = GlobalSec {
			listen,
			upstream,
			timeout: Duration::from_secs(2),
		};
		c
	}

	#[tokio::test(flavor = "current_thread")]
	async fn exchange_round_trip() {
		let local = task::LocalSet::new();
		local
			.run_until(async {
				let upstream = fake_upstream().await;
				let resp = exchange(&query_wire(), upstream, Duration::from_secs(2))
					.await
					.unwrap();
				let m: Message = decode_message(&resp).unwrap();
				assert_eq!(m.header.id, 0x1234);
				assert_eq!(m.header.message_type, MessageType::Response);
			})
			.await;
	}

	#[tokio::test(flavor = "current_thread")]
	async fn exchange_times_out() {
		// bound but never answers
		let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
		let e = exchange(
			&query_wire(),
			silent.local_addr().unwrap(),
			Duration::from_millis(50),
		)
		.await
		.unwrap_err();
		assert_eq!(e.kind(), io::ErrorKind::TimedOut);
	}

	#[tokio::test(flavor = "current_thread")]
	async fn relays_to_upstream() {
		let _ = env_logger::builder()
			.is_test(true)
			.filter_level(log::LevelFilter::Trace)
			.try_init();
		let local = task::LocalSet::new();
		local
			.run_until(async {
				let upstream = fake_upstream().await;
				let s = UdpSocket::bind("127.0.0.1:0").await.unwrap();
				let listen = s.local_addr().unwrap();
				task::spawn_local(async move {
					let c = conf(listen, upstream);
					let _ = serve(s, &c).await;
				});

				let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
				client.connect(listen).await.unwrap();
				client.send(&query_wire()).await.unwrap();
				let mut buf = vec![0u8; BUF_LEN];
				let len = timeout(Duration::from_secs(2), client.recv(&mut buf))
					.await
					.unwrap()
					.unwrap();
				let m = decode_message(&buf[..len]).unwrap();
				assert_eq!(m.header.id, 0x1234);
				assert_eq!(m.header.message_type, MessageType::Response);
				assert_eq!(m.question.name.as_str(), "example.com");
			})
			.await;
	}

	#[tokio::test(flavor = "current_thread")]
	async fn extra_records_are_forwarded() {
		let local = task::LocalSet::new();
		local
			.run_until(async {
				let upstream = fake_upstream().await;
				let t = Duration::from_secs(2);

				// an OPT record after the answer, arcount 1
				let mut q = query_wire();
				q[11] = 1;
				q.extend_from_slice(&[0, 0, 41, 0x10, 0, 0, 0, 0, 0, 0, 0]);
				let r = forward(q.clone(), upstream, t).await.unwrap();
				assert_eq!(r.len(), q.len());
				assert_eq!(r[2], q[2] | 0x80);
				assert_eq!(r[3..], q[3..]);

				let q = query_wire();
				let r = forward(q.clone(), upstream, t).await.unwrap();
				assert_eq!(r[3..], q[3..]);

				assert_eq!(forward(q[..20].to_vec(), upstream, t).await, None);
			})
			.await;
	}
}
