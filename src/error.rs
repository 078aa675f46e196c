use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the remote search client.
///
/// None of these are fatal to the search surface; they are rendered as an
/// inline message and the session keeps its text, filters and history.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
	/// The request never produced a response (connection refused, timeout, ...).
	#[error("search request failed: {0}")]
	Transport(String),

	/// The API answered with a non-success status code.
	#[error("search API returned status {status}")]
	Status { status: u16 },

	/// The response body could not be decoded as a result list.
	#[error("could not decode search response: {0}")]
	Decode(String),

	/// The configured base URL cannot be joined with the search path.
	#[error("invalid search API base URL '{0}'")]
	InvalidBaseUrl(String),
}

impl SearchError {
	/// Short human readable reason used by the inline error line.
	#[must_use]
	pub fn reason(&self) -> String {
		match self {
			Self::Transport(_) => "the search service is unreachable".to_string(),
			Self::Status { status } => format!("the search service answered {status}"),
			Self::Decode(_) => "the search service sent an unreadable reply".to_string(),
			Self::InvalidBaseUrl(url) => format!("'{url}' is not a usable API address"),
		}
	}
}

/// Failures raised by a [`SlotStore`](crate::storage::SlotStore).
#[derive(Debug, Error)]
pub enum StorageError {
	#[error("failed to read slot {path}")]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to write slot {path}")]
	Write {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to remove slot {path}")]
	Remove {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("slot name '{0}' is not a plain file name")]
	InvalidSlot(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_reason_mentions_code() {
		let err = SearchError::Status { status: 503 };
		assert!(err.reason().contains("503"));
		assert_eq!(err.to_string(), "search API returned status 503");
	}

	#[test]
	fn storage_error_keeps_source() {
		let err = StorageError::Read {
			path: PathBuf::from("/tmp/slot.json"),
			source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
		};
		assert!(std::error::Error::source(&err).is_some());
	}
}
