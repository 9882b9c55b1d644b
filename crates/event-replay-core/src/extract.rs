//! Listener extraction: which native events are bound to which element.

use event_replay_dom::NodeId;
use indexmap::IndexMap;

use crate::cleanup::{CleanupRecord, decode_cleanup};
use crate::error::ReplayResult;
use crate::view::{TemplateView, ViewState};

/// Native event names per element for one view.
///
/// Keys are element handles (identity, not structural equality). Names are
/// kept in registration order and are not deduplicated: two listeners for
/// the same event on one element yield two entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementEvents {
	events: IndexMap<NodeId, Vec<String>>,
}

impl ElementEvents {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends an event name to an element's list.
	pub fn push(&mut self, element: NodeId, event: impl Into<String>) {
		self.events.entry(element).or_default().push(event.into());
	}

	/// Returns the events registered on an element; empty when it has none.
	pub fn get(&self, element: NodeId) -> &[String] {
		self.events.get(&element).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Returns true if the element has at least one native listener.
	pub fn contains(&self, element: NodeId) -> bool {
		self.events.contains_key(&element)
	}

	/// Returns the number of elements with listeners.
	pub fn len(&self) -> usize {
		self.events.len()
	}

	/// Returns true if no element has listeners.
	pub fn is_empty(&self) -> bool {
		self.events.is_empty()
	}

	/// Returns the total number of recorded listeners.
	pub fn listener_count(&self) -> usize {
		self.events.values().map(Vec::len).sum()
	}

	/// Iterates elements and their events in first-registration order.
	pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[String])> {
		self.events.iter().map(|(id, names)| (*id, names.as_slice()))
	}
}

/// Collects the native DOM listeners registered in one view.
///
/// Only this view is inspected; embedded and component views must be
/// walked by the caller. Output subscriptions and non-listener teardown
/// entries are skipped. A view without a cleanup table, or whose instance
/// has no teardown list, has no listeners.
pub fn collect_listener_events(
	template: &TemplateView,
	state: &ViewState,
) -> ReplayResult<ElementEvents> {
	let mut events = ElementEvents::new();
	let (Some(table), Some(_)) = (template.cleanup(), state.cleanup()) else {
		return Ok(events);
	};

	for record in decode_cleanup(table)? {
		if let CleanupRecord::NativeListener {
			event,
			element_slot,
			..
		} = record
		{
			let element = state.resolve_node(element_slot)?;
			events.push(element, event);
		}
	}

	tracing::debug!(
		elements = events.len(),
		listeners = events.listener_count(),
		"collected native listeners for view"
	);
	Ok(events)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ReplayError;
	use crate::view::{CleanupValue, SlotValue, Teardown};
	use event_replay_dom::Document;
	use rstest::{fixture, rstest};

	struct Fixture {
		template: TemplateView,
		state: ViewState,
		elements: Vec<NodeId>,
	}

	/// Two elements in slots 0 and 1, nothing registered yet.
	#[fixture]
	fn view() -> Fixture {
		let mut doc = Document::new();
		let elements = vec![doc.create_element("div"), doc.create_element("div")];
		let mut state = ViewState::new();
		for &el in &elements {
			state.push_slot(SlotValue::Node(el));
		}
		Fixture {
			template: TemplateView::new(),
			state,
			elements,
		}
	}

	fn listen(f: &mut Fixture, slot: usize, event: &str, marker: CleanupValue) {
		let idx = f.state.push_teardown(Teardown::Listener {
			element: f.elements[slot],
			event: event.to_string(),
		});
		f.template.push_cleanup([
			CleanupValue::Name(event.to_string()),
			CleanupValue::Index(slot),
			CleanupValue::Index(idx),
			marker,
		]);
	}

	#[rstest]
	fn test_no_cleanup_table(view: Fixture) {
		let events = collect_listener_events(&view.template, &view.state).unwrap();
		assert!(events.is_empty());
	}

	#[rstest]
	fn test_missing_instance_cleanup_yields_nothing(mut view: Fixture) {
		view.template.push_cleanup([
			CleanupValue::Name("click".to_string()),
			CleanupValue::Index(0),
			CleanupValue::Index(0),
			CleanupValue::Flag(false),
		]);
		let events = collect_listener_events(&view.template, &view.state).unwrap();
		assert!(events.is_empty());
	}

	#[rstest]
	fn test_events_in_registration_order(mut view: Fixture) {
		listen(&mut view, 0, "click", CleanupValue::Flag(false));
		listen(&mut view, 1, "blur", CleanupValue::Marker(2));
		listen(&mut view, 0, "keydown", CleanupValue::Flag(true));

		let events = collect_listener_events(&view.template, &view.state).unwrap();
		assert_eq!(events.get(view.elements[0]), &["click", "keydown"]);
		assert_eq!(events.get(view.elements[1]), &["blur"]);
		assert_eq!(events.listener_count(), 3);
	}

	#[rstest]
	fn test_duplicates_are_preserved(mut view: Fixture) {
		listen(&mut view, 0, "click", CleanupValue::Marker(1));
		listen(&mut view, 0, "click", CleanupValue::Marker(2));
		let events = collect_listener_events(&view.template, &view.state).unwrap();
		assert_eq!(events.get(view.elements[0]), &["click", "click"]);
	}

	#[rstest]
	fn test_outputs_and_callbacks_are_skipped(mut view: Fixture) {
		view.state.push_teardown(Teardown::Callback("destroy".to_string()));
		view.template
			.push_cleanup([CleanupValue::Callback(0), CleanupValue::Index(0)]);
		listen(&mut view, 1, "valueChange", CleanupValue::Marker(-1));
		listen(&mut view, 1, "input", CleanupValue::Flag(false));

		let events = collect_listener_events(&view.template, &view.state).unwrap();
		assert!(!events.contains(view.elements[0]));
		assert_eq!(events.get(view.elements[1]), &["input"]);
	}

	#[rstest]
	fn test_unresolved_slot_propagates(mut view: Fixture) {
		view.state.push_teardown(Teardown::Callback("x".to_string()));
		view.template.push_cleanup([
			CleanupValue::Name("click".to_string()),
			CleanupValue::Index(7),
			CleanupValue::Index(0),
			CleanupValue::Flag(false),
		]);
		assert!(matches!(
			collect_listener_events(&view.template, &view.state),
			Err(ReplayError::UnresolvedSlot { slot: 7 })
		));
	}
}
