use std::{
	io::{Read, Write},
	net::{Shutdown, SocketAddr, TcpStream},
	time::Duration,
};
use anyhow::{Context, Result};
use socket2::{Domain, Protocol, Socket, Type};

use crate::Backend;

/// A TCP backend for [`Printer`](crate::Printer).
pub struct TcpBackend {
	stream: TcpStream,
	peer: SocketAddr,
}

impl TcpBackend {
	/// Open a keep-alive connection to `addr`, giving up after `timeout`.
	pub fn connect(addr: SocketAddr, timeout: Duration) -> Result<Self> {
		let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
			.context("cannot create socket")?;
		socket
			.set_keepalive(true)
			.context("cannot enable keep-alive")?;

		log::debug!("connecting to {addr} (timeout {timeout:?})");
		socket
			.connect_timeout(&addr.into(), timeout)
			.with_context(|| format!("cannot connect to {addr}"))?;

		let stream: TcpStream = socket.into();
		stream.set_read_timeout(nonzero(timeout))?;
		stream.set_write_timeout(nonzero(timeout))?;

		Ok(Self {
			stream,
			peer: addr,
		})
	}
}

// std rejects a zero timeout, treat it as "block forever"
fn nonzero(timeout: Duration) -> Option<Duration> {
	(!timeout.is_zero()).then_some(timeout)
}

impl Backend for TcpBackend {
	fn send(&mut self, buf: &[u8], timeout: Duration) -> Result<()> {
		self.stream.set_write_timeout(nonzero(timeout))?;
		self.stream.write_all(buf)?;
		self.stream.flush()?;
		Ok(())
	}

	fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
		self.stream.set_read_timeout(nonzero(timeout))?;
		let n = self.stream.read(buf)?;
		Ok(n)
	}
}

impl Drop for TcpBackend {
	fn drop(&mut self) {
		log::trace!("closing connection to {}", self.peer);
		let _ = self.stream.shutdown(Shutdown::Both);
	}
}
