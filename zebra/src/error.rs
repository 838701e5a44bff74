use std::{io, net::SocketAddr};

use thiserror::Error;

use crate::QueryResult;

#[derive(Debug, Error)]
pub enum SpecError {
	#[error("query name {0:?} is used more than once")]
	DuplicateName(String),
}

/// Terminal outcome of a batch that did not run to completion.
#[derive(Debug, Error)]
pub enum BatchError {
	#[error("cannot connect to {addr}")]
	Connect {
		addr: SocketAddr,
		#[source]
		source: anyhow::Error,
	},

	#[error("exchange for {name:?} failed")]
	Exchange {
		name: String,
		/// Values read before the failing exchange.
		partial: QueryResult,
		#[source]
		source: anyhow::Error,
	},
}

impl BatchError {
	/// Values collected before the batch was aborted.
	pub fn partial(&self) -> Option<&QueryResult> {
		match self {
			Self::Connect { .. } => None,
			Self::Exchange { partial, .. } => Some(partial),
		}
	}

	pub fn into_partial(self) -> QueryResult {
		match self {
			Self::Connect { .. } => QueryResult::default(),
			Self::Exchange { partial, .. } => partial,
		}
	}

	/// Short name of the underlying failure, eg. `ConnectionRefused` or `TimedOut`.
	pub fn kind(&self) -> String {
		let source = match self {
			Self::Connect { source, .. } | Self::Exchange { source, .. } => source,
		};

		source
			.chain()
			.find_map(|e| {
				if let Some(e) = e.downcast_ref::<io::Error>() {
					Some(format!("{:?}", e.kind()))
				} else if e.is::<std::str::Utf8Error>() {
					Some("Utf8Error".to_owned())
				} else {
					None
				}
			})
			.unwrap_or_else(|| "Error".to_owned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kind_names_io_error() {
		let err = BatchError::Connect {
			addr: "127.0.0.1:9100".parse().unwrap(),
			source: anyhow::Error::new(io::Error::from(io::ErrorKind::ConnectionRefused))
				.context("cannot connect to 127.0.0.1:9100"),
		};
		assert_eq!(err.kind(), "ConnectionRefused");
		assert!(err.partial().is_none());
	}

	#[test]
	fn kind_falls_back_for_foreign_errors() {
		let err = BatchError::Exchange {
			name: "Status".into(),
			partial: QueryResult::default(),
			source: anyhow::anyhow!("printer went away"),
		};
		assert_eq!(err.kind(), "Error");
		assert!(err.into_partial().is_empty());
	}
}
