use std::time::Duration;

use anyhow::{Context, Result};

macro_rules! backends {
	[$($(# [$($m:tt)*])? $mod:ident :: $name:ident),* $(,)?] => {
		$(
			$(# [$($m)*])*
			mod $mod;
			$(# [$($m)*])*
			pub use crate::$mod::$name;
		)*
	};
}

backends! [
	#[cfg(feature = "tcp")]
	tcp::TcpBackend,
];

mod error;
pub mod fields;
#[cfg(feature = "mock")]
pub mod mock;
pub mod query;

pub use crate::{
	error::{BatchError, SpecError},
	query::{decode_response, Query, QueryResult, QuerySpec},
};

/// Raw-socket printing port, which also answers SGD `getvar` commands.
pub const DEFAULT_PORT: u16 = 9100;

/// Connect, read and write timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Size of the single read performed per exchange.
pub const RESPONSE_BUFFER: usize = 256;

/// Pause between two exchanges.
///
/// Responses are not framed, so a printer that is still flushing the
/// previous answer would otherwise have it read as the reply to the next request.
pub const DEFAULT_PACING: Duration = Duration::from_millis(100);

/// Transport to the printer.
pub trait Backend {
	/// Send data to the printer.
	fn send(&mut self, buf: &[u8], timeout: Duration) -> Result<()>;

	/// Receive at most `buf.len()` bytes of data from the printer, in a single read.
	///
	/// # Return value
	/// This functions the number of bytes received from the printer.
	fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;
}

/// A Zebra printer speaking the SGD line protocol.
pub struct Printer {
	backend: Box<dyn Backend>,
	timeout: Duration,
	pacing: Duration,
}

impl Printer {
	/// Construct a new printer using `backend` as it's [`Backend`].
	pub fn new(backend: impl Backend + 'static) -> Self {
		Self {
			backend: Box::new(backend),
			timeout: DEFAULT_TIMEOUT,
			pacing: DEFAULT_PACING,
		}
	}

	/// Connect to a printer over TCP.
	#[cfg(feature = "tcp")]
	pub fn connect(addr: std::net::SocketAddr, timeout: Duration) -> Result<Self> {
		let backend = TcpBackend::connect(addr, timeout)?;
		Ok(Self::new(backend).with_timeout(timeout))
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Set the pause between exchanges of a batch, see [`DEFAULT_PACING`].
	pub fn with_pacing(mut self, pacing: Duration) -> Self {
		self.pacing = pacing;
		self
	}

	fn send(&mut self, buf: &[u8]) -> Result<()> {
		log::trace!("send({}{buf:x?}, {:?});", buf.len(), self.timeout);
		self.backend.send(buf, self.timeout)
	}
	fn recv(&mut self, buf: &mut [u8]) -> Result<usize> {
		let n = self.backend.recv(buf, self.timeout)?;
		log::trace!("recv({}, {:?}): {n}{:x?}", buf.len(), self.timeout, &buf[0..n]);
		Ok(n)
	}

	/// Perform one exchange: send `cmd`, then read whatever the printer answers in one read.
	pub fn query(&mut self, cmd: &[u8]) -> Result<Vec<u8>> {
		self.send(cmd).context("failed to send request")?;
		let mut buf = vec![0u8; RESPONSE_BUFFER];
		let n = self.recv(&mut buf).context("failed to receive response")?;
		buf.truncate(n);
		Ok(buf)
	}

	/// Read a single SGD variable, eg. `device.unique_id`.
	pub fn getvar(&mut self, variable: &str) -> Result<String> {
		self.exchange(&Query::getvar(variable, variable))
	}

	/// Run every query of `spec`, in order.
	///
	/// The first failing exchange aborts the batch; the values collected
	/// up to that point are handed back inside the error.
	pub fn run_batch(&mut self, spec: &QuerySpec) -> Result<QueryResult, BatchError> {
		let mut result = QueryResult::default();

		for (i, query) in spec.iter().enumerate() {
			if i > 0 && !self.pacing.is_zero() {
				std::thread::sleep(self.pacing);
			}

			match self.exchange(query) {
				Ok(value) => {
					log::debug!("{}: {value:?}", query.name());
					result.insert(query.name(), value);
				},
				Err(source) => {
					log::debug!("exchange {} of {} ({}) failed: {source:#}", i + 1, spec.len(), query.name());
					return Err(BatchError::Exchange {
						name: query.name().to_owned(),
						partial: result,
						source,
					});
				},
			}
		}

		Ok(result)
	}

	fn exchange(&mut self, query: &Query) -> Result<String> {
		let buf = self.query(query.request())?;
		let value = decode_response(&buf)
			.with_context(|| format!("response to {} is not valid UTF-8", query.name()))?;
		Ok(value)
	}
}

/// Open one connection to `addr`, run `spec` over it and close it again.
///
/// The connection is released on every path, including a failed exchange.
#[cfg(feature = "tcp")]
pub fn execute_batch(
	addr: std::net::SocketAddr,
	spec: &QuerySpec,
	timeout: Duration,
) -> Result<QueryResult, BatchError> {
	let mut printer = Printer::connect(addr, timeout)
		.map_err(|source| BatchError::Connect { addr, source })?;
	log::info!("connected to {addr}");
	printer.run_batch(spec)
}
