//! View model shared with the rendering engine.
//!
//! A rendered view is split the same way the engine splits it: a
//! [`TemplateView`] holds what is static per template (node descriptors and
//! the cleanup record table), and a [`ViewState`] holds what belongs to one
//! instance (rendered node slots and the teardown list). Several instances
//! of the same template share one `TemplateView` through an [`Arc`].

use std::sync::Arc;

use event_replay_dom::NodeId;

use crate::error::{ReplayError, ReplayResult};

/// Kind of a template node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateNodeType {
	/// A text node.
	Text,
	/// A DOM element (including component hosts).
	Element,
	/// An anchor for embedded views.
	Container,
	/// A grouping node that renders no element of its own.
	ElementContainer,
	/// A content projection slot.
	Projection,
	/// An internationalization expression.
	Icu,
}

impl TemplateNodeType {
	/// Returns true for element nodes, the only kind that can carry `jsaction`.
	pub fn is_element(self) -> bool {
		matches!(self, TemplateNodeType::Element)
	}
}

/// Static descriptor of one node in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNode {
	index: usize,
	node_type: TemplateNodeType,
	tag: Option<String>,
}

impl TemplateNode {
	/// Creates a descriptor for the node stored at `index` in the view state.
	pub fn new(index: usize, node_type: TemplateNodeType) -> Self {
		Self {
			index,
			node_type,
			tag: None,
		}
	}

	/// Creates an element descriptor.
	pub fn element(index: usize, tag: impl Into<String>) -> Self {
		Self {
			index,
			node_type: TemplateNodeType::Element,
			tag: Some(tag.into()),
		}
	}

	/// Returns the slot index of the rendered node.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Returns the node kind.
	pub fn node_type(&self) -> TemplateNodeType {
		self.node_type
	}

	/// Returns the tag name for element nodes.
	pub fn tag(&self) -> Option<&str> {
		self.tag.as_deref()
	}
}

/// One raw field of the cleanup record table.
///
/// The table is a flat sequence whose entries have different widths. A
/// listener or output entry is four fields wide and starts with
/// [`CleanupValue::Name`]; any other entry is two fields wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupValue {
	/// An event or output name.
	Name(String),
	/// A slot or teardown index.
	Index(usize),
	/// A native listener registered directly, with its capture flag.
	Flag(bool),
	/// Non-negative for renderer listeners, negative for output subscriptions.
	Marker(i64),
	/// A teardown callback, referring to its position in the teardown list.
	Callback(usize),
}

/// Static part of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateView {
	nodes: Vec<TemplateNode>,
	cleanup: Option<Vec<CleanupValue>>,
}

impl TemplateView {
	/// Creates a template with no nodes and no cleanup table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the node descriptors in creation order.
	pub fn nodes(&self) -> &[TemplateNode] {
		&self.nodes
	}

	/// Returns the cleanup record table, if any entry was ever recorded.
	pub fn cleanup(&self) -> Option<&[CleanupValue]> {
		self.cleanup.as_deref()
	}

	/// Appends a node descriptor.
	pub fn push_node(&mut self, node: TemplateNode) {
		self.nodes.push(node);
	}

	/// Appends one entry (several fields) to the cleanup table.
	pub fn push_cleanup(&mut self, entry: impl IntoIterator<Item = CleanupValue>) {
		self.cleanup.get_or_insert_with(Vec::new).extend(entry);
	}
}

/// What a view-state slot holds.
#[derive(Debug, Clone)]
pub enum SlotValue {
	/// Nothing rendered (yet).
	Empty,
	/// A rendered DOM node.
	Node(NodeId),
	/// A component host element wrapping the component's own view.
	Component {
		/// The host element.
		host: NodeId,
		/// The component view rendered inside the host.
		view: Box<View>,
	},
	/// An anchor comment followed by embedded views.
	Container {
		/// The anchor comment node.
		anchor: NodeId,
		/// Embedded views in insertion order.
		views: Vec<View>,
	},
}

impl SlotValue {
	/// Unwraps host and container indirection down to the native node.
	pub fn native_node(&self) -> Option<NodeId> {
		match self {
			SlotValue::Empty => None,
			SlotValue::Node(id) => Some(*id),
			SlotValue::Component { host, .. } => Some(*host),
			SlotValue::Container { anchor, .. } => Some(*anchor),
		}
	}

	/// Returns the views nested in this slot.
	pub fn child_views(&self) -> &[View] {
		match self {
			SlotValue::Component { view, .. } => std::slice::from_ref(view.as_ref()),
			SlotValue::Container { views, .. } => views,
			SlotValue::Empty | SlotValue::Node(_) => &[],
		}
	}
}

/// An instance-level teardown action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Teardown {
	/// Remove a DOM listener.
	Listener {
		/// Element the listener is bound to.
		element: NodeId,
		/// Event name.
		event: String,
	},
	/// Unsubscribe from a component output.
	Subscription {
		/// Output name.
		output: String,
	},
	/// Run a destroy hook.
	Callback(String),
}

/// Instance part of a view.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
	slots: Vec<SlotValue>,
	cleanup: Option<Vec<Teardown>>,
}

impl ViewState {
	/// Creates an empty view state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the slot at `index`.
	pub fn slot(&self, index: usize) -> Option<&SlotValue> {
		self.slots.get(index)
	}

	/// Returns all slots.
	pub fn slots(&self) -> &[SlotValue] {
		&self.slots
	}

	/// Resolves the slot at `index` to a concrete DOM node.
	pub fn resolve_node(&self, index: usize) -> ReplayResult<NodeId> {
		self.slot(index)
			.and_then(SlotValue::native_node)
			.ok_or(ReplayError::UnresolvedSlot { slot: index })
	}

	/// Appends a slot and returns its index.
	pub fn push_slot(&mut self, value: SlotValue) -> usize {
		self.slots.push(value);
		self.slots.len() - 1
	}

	/// Replaces the slot at `index`.
	pub fn set_slot(&mut self, index: usize, value: SlotValue) -> ReplayResult<()> {
		let slot = self
			.slots
			.get_mut(index)
			.ok_or(ReplayError::UnresolvedSlot { slot: index })?;
		*slot = value;
		Ok(())
	}

	/// Returns the teardown list, if anything was registered.
	pub fn cleanup(&self) -> Option<&[Teardown]> {
		self.cleanup.as_deref()
	}

	/// Registers a teardown action and returns its index.
	pub fn push_teardown(&mut self, teardown: Teardown) -> usize {
		let list = self.cleanup.get_or_insert_with(Vec::new);
		list.push(teardown);
		list.len() - 1
	}
}

/// A rendered view: shared template plus instance state.
#[derive(Debug, Clone)]
pub struct View {
	template: Arc<TemplateView>,
	state: ViewState,
}

impl View {
	/// Pairs a template with an instance state.
	pub fn new(template: Arc<TemplateView>, state: ViewState) -> Self {
		Self { template, state }
	}

	/// Returns the template.
	pub fn template(&self) -> &TemplateView {
		&self.template
	}

	/// Returns the instance state.
	pub fn state(&self) -> &ViewState {
		&self.state
	}
}
