//! Event replay error types.

use event_replay_dom::DomError;
use thiserror::Error;

use crate::context::PassPhase;

/// Result type for event replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Errors that abort an event replay render pass.
///
/// None of these are recovered locally: partial replay metadata would be
/// silently wrong, so every failure propagates as a failure of the whole
/// render pass.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReplayError {
	/// A string-led cleanup entry ran past the end of the table.
	#[error("cleanup table truncated at offset {offset}: listener entry needs four fields")]
	TruncatedCleanup {
		/// Offset of the entry's first field.
		offset: usize,
	},

	/// A listener entry carried a field of the wrong kind.
	#[error("malformed cleanup entry at offset {offset}: {reason}")]
	MalformedCleanup {
		/// Offset of the entry's first field.
		offset: usize,
		/// What was wrong with the entry.
		reason: &'static str,
	},

	/// A slot referenced by the template does not hold a rendered node.
	#[error("slot {slot} does not hold a rendered node")]
	UnresolvedSlot {
		/// The slot index.
		slot: usize,
	},

	/// The render pass was driven out of order.
	#[error("invalid render pass transition from {from} to {to}")]
	InvalidPhase {
		/// Phase the pass was in.
		from: PassPhase,
		/// Phase that was requested.
		to: PassPhase,
	},

	/// The application host element is not in the document body.
	#[error("host element <{0}> not found in document body")]
	HostNotFound(String),

	/// A view builder instruction was issued out of order.
	#[error("invalid template instruction: {0}")]
	Template(&'static str),

	/// The document rejected a mutation or lookup.
	#[error(transparent)]
	Dom(#[from] DomError),

	/// The replay data island could not be serialized.
	#[error("failed to serialize replay data: {0}")]
	Serialization(#[from] serde_json::Error),

	/// Hydration options could not be parsed.
	#[error("invalid hydration configuration: {0}")]
	Config(#[from] toml::de::Error),
}
