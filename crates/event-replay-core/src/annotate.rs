//! The `jsaction` attribute annotator.

use event_replay_dom::{Document, DomError};

use crate::context::HydrationContext;
use crate::error::{ReplayError, ReplayResult};
use crate::extract::ElementEvents;
use crate::view::{SlotValue, TemplateNode};

/// Attribute that lists the replayable events of an element.
pub const JSACTION_ATTR: &str = "jsaction";

/// Action token appended to every event name; `e` means "replay generically".
pub const REPLAY_ACTION: &str = "e";

/// Builds a `jsaction` value: `"<name>:e;"` per event, in order.
///
/// An empty input yields an empty string.
pub fn jsaction_value<'a>(events: impl IntoIterator<Item = &'a str>) -> String {
	let mut value = String::new();
	for event in events {
		value.push_str(event);
		value.push(':');
		value.push_str(REPLAY_ACTION);
		value.push(';');
	}
	value
}

/// Writes the `jsaction` attribute for one template node.
///
/// Non-element nodes are ignored. An element without native listeners is
/// left untouched: the attribute's absence, not an empty value, signals
/// "nothing to replay". Every event name found is added to the context's
/// replay set. Running this twice for the same element writes the same value
/// and leaves the set unchanged.
pub fn annotate_element(
	tnode: &TemplateNode,
	rnode: &SlotValue,
	events: &ElementEvents,
	context: &mut HydrationContext,
	document: &mut Document,
) -> ReplayResult<()> {
	if !tnode.node_type().is_element() {
		return Ok(());
	}
	let element = rnode.native_node().ok_or(ReplayError::UnresolvedSlot {
		slot: tnode.index(),
	})?;
	if !document.is_element(element) {
		return Err(DomError::NotAnElement(element).into());
	}

	let names = events.get(element);
	for name in names {
		context.record_event(name);
	}
	let value = jsaction_value(names.iter().map(String::as_str));
	if value.is_empty() {
		return Ok(());
	}

	tracing::trace!(element = %element, jsaction = %value, "annotating element");
	document.set_attribute(element, JSACTION_ATTR, value)?;
	context.note_annotated();
	Ok(())
}
