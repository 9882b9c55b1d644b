//! Server-side view rendering.
//!
//! [`ViewBuilder`] creates DOM nodes in a [`Document`] and records, as it
//! goes, the node descriptors, slots and cleanup table that the hydration
//! walk later reads back. Listener registration writes the cleanup table in
//! the engine's layout:
//!
//! | Registration                     | Entry                                     |
//! |----------------------------------|-------------------------------------------|
//! | [`ViewBuilder::listener`]        | `(name, slot, teardown, teardown + 1)`    |
//! | [`ViewBuilder::native_listener`] | `(name, slot, teardown, capture flag)`    |
//! | [`ViewBuilder::output`]          | `(name, slot, teardown, -(teardown + 1))` |
//! | [`ViewBuilder::on_destroy`]      | `(callback, teardown)`                    |
//!
//! ```
//! use event_replay_core::ViewBuilder;
//! use event_replay_dom::Document;
//!
//! let (mut doc, host) = Document::with_host("app");
//! let mut builder = ViewBuilder::new(&mut doc, host);
//! builder.element_start("button").unwrap();
//! builder.listener("click").unwrap();
//! builder.text("Save").unwrap();
//! builder.element_end().unwrap();
//! let view = builder.finish().unwrap();
//!
//! assert_eq!(view.template().nodes().len(), 2);
//! assert_eq!(doc.inner_html(host).unwrap(), "<button>Save</button>");
//! ```

use std::sync::Arc;

use event_replay_dom::{Document, NodeId};

use crate::error::{ReplayError, ReplayResult};
use crate::view::{
	CleanupValue, SlotValue, Teardown, TemplateNode, TemplateNodeType, TemplateView, View,
	ViewState,
};

/// Text of the comment that anchors a container's embedded views.
pub const CONTAINER_ANCHOR: &str = "container";

/// Renders one view into a document.
#[derive(Debug)]
pub struct ViewBuilder<'d> {
	doc: &'d mut Document,
	root: NodeId,
	anchor: Option<NodeId>,
	open: Vec<NodeId>,
	selected: Option<usize>,
	template: TemplateView,
	state: ViewState,
}

impl<'d> ViewBuilder<'d> {
	/// Creates a builder whose root nodes are appended to `root`.
	pub fn new(doc: &'d mut Document, root: NodeId) -> Self {
		Self {
			doc,
			root,
			anchor: None,
			open: Vec::new(),
			selected: None,
			template: TemplateView::new(),
			state: ViewState::new(),
		}
	}

	/// Root nodes of an embedded view go right before the container anchor.
	fn embedded(doc: &'d mut Document, parent: NodeId, anchor: NodeId) -> Self {
		let mut builder = Self::new(doc, parent);
		builder.anchor = Some(anchor);
		builder
	}

	fn parent(&self) -> NodeId {
		self.open.last().copied().unwrap_or(self.root)
	}

	fn insert(&mut self, node: NodeId) -> ReplayResult<()> {
		match self.open.last() {
			Some(&parent) => self.doc.append_child(parent, node)?,
			None => self.doc.insert_before(self.root, node, self.anchor)?,
		}
		Ok(())
	}

	fn selected(&self) -> ReplayResult<(usize, NodeId)> {
		let slot = self
			.selected
			.ok_or(ReplayError::Template("no element to bind to"))?;
		Ok((slot, self.state.resolve_node(slot)?))
	}

	/// Opens an element; following nodes become its children until
	/// [`element_end`](Self::element_end). Returns the element's slot.
	pub fn element_start(&mut self, tag: &str) -> ReplayResult<usize> {
		let element = self.doc.create_element(tag);
		self.insert(element)?;
		let slot = self.state.push_slot(SlotValue::Node(element));
		self.template.push_node(TemplateNode::element(slot, tag));
		self.open.push(element);
		self.selected = Some(slot);
		Ok(slot)
	}

	/// Closes the innermost open element.
	pub fn element_end(&mut self) -> ReplayResult<()> {
		self.open
			.pop()
			.map(|_| ())
			.ok_or(ReplayError::Template("element_end without an open element"))
	}

	/// Creates an element with no children.
	pub fn element(&mut self, tag: &str) -> ReplayResult<usize> {
		let slot = self.element_start(tag)?;
		self.element_end()?;
		Ok(slot)
	}

	/// Sets an attribute on the most recently created element.
	pub fn attribute(&mut self, name: &str, value: impl Into<String>) -> ReplayResult<()> {
		let (_, element) = self.selected()?;
		self.doc.set_attribute(element, name, value)?;
		Ok(())
	}

	/// Creates a text node. Returns its slot.
	pub fn text(&mut self, content: impl Into<String>) -> ReplayResult<usize> {
		let node = self.doc.create_text_node(content);
		self.insert(node)?;
		let slot = self.state.push_slot(SlotValue::Node(node));
		self.template
			.push_node(TemplateNode::new(slot, TemplateNodeType::Text));
		Ok(slot)
	}

	fn push_listener(
		&mut self,
		event: &str,
		marker: impl FnOnce(usize) -> CleanupValue,
	) -> ReplayResult<()> {
		let (slot, element) = self.selected()?;
		let teardown = self.state.push_teardown(Teardown::Listener {
			element,
			event: event.to_string(),
		});
		self.template.push_cleanup([
			CleanupValue::Name(event.to_string()),
			CleanupValue::Index(slot),
			CleanupValue::Index(teardown),
			marker(teardown),
		]);
		Ok(())
	}

	/// Binds a DOM event listener through the renderer (`(click)="..."`).
	pub fn listener(&mut self, event: &str) -> ReplayResult<()> {
		self.push_listener(event, |teardown| CleanupValue::Marker(teardown as i64 + 1))
	}

	/// Binds a DOM event listener directly on the element.
	pub fn native_listener(&mut self, event: &str, capture: bool) -> ReplayResult<()> {
		self.push_listener(event, |_| CleanupValue::Flag(capture))
	}

	/// Subscribes to an output of the component hosted on the most recent
	/// element. Outputs are not DOM events and are never replayed.
	pub fn output(&mut self, name: &str) -> ReplayResult<()> {
		let (slot, _) = self.selected()?;
		let teardown = self.state.push_teardown(Teardown::Subscription {
			output: name.to_string(),
		});
		self.template.push_cleanup([
			CleanupValue::Name(name.to_string()),
			CleanupValue::Index(slot),
			CleanupValue::Index(teardown),
			CleanupValue::Marker(-(teardown as i64) - 1),
		]);
		Ok(())
	}

	/// Registers a destroy hook.
	pub fn on_destroy(&mut self, label: impl Into<String>) {
		let teardown = self.state.push_teardown(Teardown::Callback(label.into()));
		self.template.push_cleanup([
			CleanupValue::Callback(teardown),
			CleanupValue::Index(teardown),
		]);
	}

	/// Renders a component: a host element holding a separate child view.
	///
	/// The host stays selected afterwards, so listeners and outputs bound
	/// next are registered on it by this (the parent) view.
	pub fn component(
		&mut self,
		tag: &str,
		build: impl FnOnce(&mut ViewBuilder<'_>) -> ReplayResult<()>,
	) -> ReplayResult<usize> {
		let host = self.doc.create_element(tag);
		self.insert(host)?;
		let slot = self.state.push_slot(SlotValue::Node(host));
		self.template.push_node(TemplateNode::element(slot, tag));

		let mut child = ViewBuilder::new(&mut *self.doc, host);
		build(&mut child)?;
		let view = child.finish()?;

		self.state.set_slot(
			slot,
			SlotValue::Component {
				host,
				view: Box::new(view),
			},
		)?;
		self.selected = Some(slot);
		Ok(slot)
	}

	/// Renders a container anchor and its embedded views.
	pub fn container(
		&mut self,
		build: impl FnOnce(&mut ContainerBuilder<'_>) -> ReplayResult<()>,
	) -> ReplayResult<usize> {
		let anchor = self.doc.create_comment(CONTAINER_ANCHOR);
		self.insert(anchor)?;
		let slot = self.state.push_slot(SlotValue::Node(anchor));
		self.template
			.push_node(TemplateNode::new(slot, TemplateNodeType::Container));

		let parent = self.parent();
		let mut container = ContainerBuilder {
			doc: &mut *self.doc,
			parent,
			anchor,
			views: Vec::new(),
		};
		build(&mut container)?;
		let views = container.views;

		self.state
			.set_slot(slot, SlotValue::Container { anchor, views })?;
		self.selected = None;
		Ok(slot)
	}

	/// Completes the view.
	pub fn finish(self) -> ReplayResult<View> {
		if !self.open.is_empty() {
			return Err(ReplayError::Template("unclosed element"));
		}
		Ok(View::new(Arc::new(self.template), self.state))
	}
}

/// Adds embedded views to a container.
#[derive(Debug)]
pub struct ContainerBuilder<'d> {
	doc: &'d mut Document,
	parent: NodeId,
	anchor: NodeId,
	views: Vec<View>,
}

impl ContainerBuilder<'_> {
	/// Renders one embedded view before the anchor.
	pub fn embedded_view(
		&mut self,
		build: impl FnOnce(&mut ViewBuilder<'_>) -> ReplayResult<()>,
	) -> ReplayResult<()> {
		let mut builder = ViewBuilder::embedded(&mut *self.doc, self.parent, self.anchor);
		build(&mut builder)?;
		self.views.push(builder.finish()?);
		Ok(())
	}

	/// Returns the number of embedded views rendered so far.
	pub fn len(&self) -> usize {
		self.views.len()
	}

	/// Returns true if no embedded view was rendered.
	pub fn is_empty(&self) -> bool {
		self.views.is_empty()
	}
}
