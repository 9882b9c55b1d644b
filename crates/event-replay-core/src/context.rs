//! Per-render-pass hydration state.

use std::fmt;

use indexmap::IndexSet;

use crate::error::{ReplayError, ReplayResult};

/// Where a render pass currently is.
///
/// `Idle -> Extracting -> Annotating -> (Extracting | Annotating)* -> Finalizing -> Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassPhase {
	/// Nothing has been walked yet.
	#[default]
	Idle,
	/// Reading a view's cleanup records.
	Extracting,
	/// Writing `jsaction` attributes for a view's nodes.
	Annotating,
	/// Emitting the replay data island.
	Finalizing,
	/// The pass is complete.
	Done,
}

impl PassPhase {
	fn can_enter(self, next: PassPhase) -> bool {
		use PassPhase::*;
		matches!(
			(self, next),
			(Idle | Extracting | Annotating, Extracting)
				| (Extracting | Annotating, Annotating)
				| (Idle | Extracting | Annotating, Finalizing)
				| (Finalizing, Done)
		)
	}
}

impl fmt::Display for PassPhase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			PassPhase::Idle => "idle",
			PassPhase::Extracting => "extracting",
			PassPhase::Annotating => "annotating",
			PassPhase::Finalizing => "finalizing",
			PassPhase::Done => "done",
		};
		f.write_str(name)
	}
}

/// Accumulator threaded through one server render pass.
///
/// Owns the global set of event names that need replay support. A context
/// is created per pass and dropped after the document is serialized; it is
/// never shared between concurrent renders.
#[derive(Debug, Default)]
pub struct HydrationContext {
	/// Distinct event names seen on any annotated element, in discovery order.
	events_to_replay: IndexSet<String>,
	annotated_elements: usize,
	phase: PassPhase,
}

impl HydrationContext {
	/// Creates an empty context in the `Idle` phase.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the event names collected so far.
	pub fn events_to_replay(&self) -> &IndexSet<String> {
		&self.events_to_replay
	}

	/// Adds an event name to the replay set. Returns `true` if it was new.
	pub fn record_event(&mut self, name: &str) -> bool {
		if self.events_to_replay.contains(name) {
			return false;
		}
		self.events_to_replay.insert(name.to_string())
	}

	/// Counts an element that received a `jsaction` attribute.
	pub fn note_annotated(&mut self) {
		self.annotated_elements += 1;
	}

	/// Returns how many `jsaction` attributes were written.
	///
	/// Re-annotating the same element counts twice.
	pub fn annotated_elements(&self) -> usize {
		self.annotated_elements
	}

	/// Returns the current phase.
	pub fn phase(&self) -> PassPhase {
		self.phase
	}

	/// Moves the pass to `next`, rejecting out-of-order transitions.
	pub fn enter(&mut self, next: PassPhase) -> ReplayResult<()> {
		if self.phase == next && next != PassPhase::Finalizing && next != PassPhase::Done {
			return Ok(());
		}
		if !self.phase.can_enter(next) {
			return Err(ReplayError::InvalidPhase {
				from: self.phase,
				to: next,
			});
		}
		self.phase = next;
		Ok(())
	}
}
