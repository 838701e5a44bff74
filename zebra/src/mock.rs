//! In-process mock printer, answering `getvar` requests over TCP.
//!
//! Only meant for tests.

use std::{
	collections::HashMap,
	io::{self, BufRead, BufReader, Write},
	net::{SocketAddr, TcpListener, TcpStream},
	thread::JoinHandle,
};

/// A printer that accepts one connection and answers `getvar` requests
/// from a table of canned responses.
pub struct MockPrinter {
	addr: SocketAddr,
	handle: JoinHandle<io::Result<Vec<String>>>,
}

impl MockPrinter {
	/// Start the mock on an ephemeral localhost port.
	///
	/// `responses` maps SGD variables to the raw bytes sent back,
	/// unknown variables and commands are answered with `"?"`.
	pub fn spawn(responses: HashMap<String, Vec<u8>>) -> io::Result<Self> {
		let listener = TcpListener::bind("127.0.0.1:0")?;
		let addr = listener.local_addr()?;
		let handle = std::thread::spawn(move || {
			let (stream, peer) = listener.accept()?;
			log::debug!("mock printer: connection from {peer}");
			serve(stream, &responses)
		});

		Ok(Self {
			addr,
			handle,
		})
	}

	/// Like [`MockPrinter::spawn()`], but every value is wrapped in quotes, the way a printer answers.
	pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> io::Result<Self> {
		let responses = values
			.into_iter()
			.map(|(var, value)| (var.to_owned(), format!("\"{value}\"").into_bytes()))
			.collect();
		Self::spawn(responses)
	}

	pub fn addr(&self) -> SocketAddr {
		self.addr
	}

	pub fn port(&self) -> u16 {
		self.addr.port()
	}

	/// Wait for the client to hang up and return the requested variables, in request order.
	pub fn finish(self) -> io::Result<Vec<String>> {
		self.handle
			.join()
			.map_err(|_| io::Error::other("mock printer thread panicked"))?
	}
}

const UNKNOWN: &[u8] = b"\"?\"";

fn serve(stream: TcpStream, responses: &HashMap<String, Vec<u8>>) -> io::Result<Vec<String>> {
	let mut writer = stream.try_clone()?;
	let mut reader = BufReader::new(stream);
	let mut requested = Vec::new();
	let mut line = String::new();

	loop {
		line.clear();
		if reader.read_line(&mut line)? == 0 {
			break;
		}

		let response = match parse_getvar(&line) {
			Some(var) => {
				requested.push(var.to_owned());
				responses.get(var).map_or(UNKNOWN, Vec::as_slice)
			},
			None => {
				log::warn!("mock printer: unknown command {line:?}");
				UNKNOWN
			},
		};

		writer.write_all(response)?;
		writer.flush()?;
	}

	Ok(requested)
}

fn parse_getvar(line: &str) -> Option<&str> {
	line.trim_end()
		.strip_prefix("! U1 getvar \"")?
		.strip_suffix('"')
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_getvar_line() {
		assert_eq!(parse_getvar("! U1 getvar \"ip.addr\"\r\n"), Some("ip.addr"));
		assert_eq!(parse_getvar("! U1 setvar \"ip.addr\" \"1\"\r\n"), None);
	}
}
