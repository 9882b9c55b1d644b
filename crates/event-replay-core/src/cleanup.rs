//! Decoding of the flat cleanup record table into typed records.
//!
//! The rendering engine stores every teardown action of a view in one flat
//! table. Entries that start with a name are four fields wide:
//!
//! ```text
//! (name, element slot, teardown index, disposal marker)
//! ```
//!
//! Everything else is a two-field entry. [`decode_cleanup`] walks the table
//! once and classifies each entry, so the classification rule lives in a
//! single place.

use crate::error::{ReplayError, ReplayResult};
use crate::view::CleanupValue;

/// Width of a listener or output entry.
const LISTENER_STRIDE: usize = 4;
/// Width of any other entry.
const OTHER_STRIDE: usize = 2;

/// How a listener entry will be torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisposalMarker {
	/// Native listener added directly, with its capture flag.
	Capture(bool),
	/// Native listener added through the renderer; index into the teardown list.
	ListenerIndex(usize),
	/// Output subscription; index into the teardown list.
	SubscriptionIndex(usize),
}

impl DisposalMarker {
	fn decode(value: &CleanupValue) -> Option<Self> {
		match *value {
			CleanupValue::Flag(capture) => Some(DisposalMarker::Capture(capture)),
			CleanupValue::Index(index) => Some(DisposalMarker::ListenerIndex(index)),
			CleanupValue::Marker(marker) if marker >= 0 => {
				Some(DisposalMarker::ListenerIndex(marker as usize))
			}
			// Subscriptions are stored as -(index + 1).
			CleanupValue::Marker(marker) => Some(DisposalMarker::SubscriptionIndex(
				(-(marker + 1)) as usize,
			)),
			CleanupValue::Name(_) | CleanupValue::Callback(_) => None,
		}
	}
}

/// One decoded cleanup entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupRecord<'a> {
	/// A listener bound directly to a browser event; replay-eligible.
	NativeListener {
		/// Event name.
		event: &'a str,
		/// Slot of the element the listener is bound to.
		element_slot: usize,
		/// How the listener is disposed.
		marker: DisposalMarker,
	},
	/// A subscription to a component output; never replayed.
	OutputSubscription {
		/// Output name.
		output: &'a str,
		/// Slot of the element hosting the component.
		element_slot: usize,
		/// Index into the teardown list.
		subscription: usize,
	},
	/// Any other teardown action.
	Other {
		/// Offset of the entry in the raw table.
		offset: usize,
	},
}

/// Decodes a raw cleanup table into typed records, in table order.
///
/// # Errors
///
/// Returns [`ReplayError::TruncatedCleanup`] when a name-led entry has fewer
/// than four fields left, and [`ReplayError::MalformedCleanup`] when its slot
/// field is not an index or its marker is neither a flag nor an integer.
pub fn decode_cleanup(table: &[CleanupValue]) -> ReplayResult<Vec<CleanupRecord<'_>>> {
	let mut records = Vec::new();
	let mut offset = 0;

	while offset < table.len() {
		let CleanupValue::Name(name) = &table[offset] else {
			records.push(CleanupRecord::Other { offset });
			offset += OTHER_STRIDE;
			continue;
		};

		let entry = table
			.get(offset..offset + LISTENER_STRIDE)
			.ok_or(ReplayError::TruncatedCleanup { offset })?;
		let CleanupValue::Index(element_slot) = entry[1] else {
			return Err(ReplayError::MalformedCleanup {
				offset,
				reason: "element slot is not an index",
			});
		};
		let marker = DisposalMarker::decode(&entry[3]).ok_or(ReplayError::MalformedCleanup {
			offset,
			reason: "disposal marker is neither a flag nor an integer",
		})?;

		records.push(match marker {
			DisposalMarker::SubscriptionIndex(subscription) => CleanupRecord::OutputSubscription {
				output: name,
				element_slot,
				subscription,
			},
			marker => CleanupRecord::NativeListener {
				event: name,
				element_slot,
				marker,
			},
		});
		offset += LISTENER_STRIDE;
	}

	Ok(records)
}
