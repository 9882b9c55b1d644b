//! The document arena.
//!
//! Nodes live in a flat vector and refer to each other through [`NodeId`]
//! handles. Detached nodes stay in the arena; they simply have no parent and
//! are not reachable from the document element.

use crate::error::{DomError, DomResult};
use crate::node::{ElementData, Node, NodeData, NodeId};
use crate::serialize;

/// A server-side HTML document.
#[derive(Debug, Clone)]
pub struct Document {
	nodes: Vec<Node>,
	document_element: NodeId,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates `<html><head></head><body></body></html>`.
	pub fn new() -> Self {
		let mut doc = Self {
			nodes: vec![Node::new(NodeData::Element(ElementData::new("html")))],
			document_element: NodeId(0),
		};
		let html = doc.document_element;
		let head = doc.create_element("head");
		let body = doc.create_element("body");
		doc.attach_last(html, head);
		doc.attach_last(html, body);
		doc
	}

	/// Creates an empty document whose body holds a single host element.
	///
	/// Returns the document together with the handle of the host element.
	pub fn with_host(tag: &str) -> (Self, NodeId) {
		let mut doc = Self::new();
		let host = doc.create_element(tag);
		let body = doc.body_unchecked();
		doc.attach_last(body, host);
		(doc, host)
	}

	/// Returns the `<html>` element.
	pub fn document_element(&self) -> NodeId {
		self.document_element
	}

	/// Returns the `<head>` element, if present.
	pub fn head(&self) -> Option<NodeId> {
		self.child_element_by_tag(self.document_element, "head")
	}

	/// Returns the `<body>` element.
	pub fn body(&self) -> DomResult<NodeId> {
		self.child_element_by_tag(self.document_element, "body")
			.ok_or(DomError::MissingBody)
	}

	fn body_unchecked(&self) -> NodeId {
		// Only used right after construction, when the body is guaranteed.
		self.nodes[self.document_element.0].children[1]
	}

	fn child_element_by_tag(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
		self.nodes
			.get(parent.0)?
			.children
			.iter()
			.copied()
			.find(|&c| self.tag_name(c) == Some(tag))
	}

	// ------------------------------------------------------------------
	// Node creation
	// ------------------------------------------------------------------

	/// Creates a detached element.
	pub fn create_element(&mut self, tag: &str) -> NodeId {
		self.push(NodeData::Element(ElementData::new(tag)))
	}

	/// Creates a detached text node.
	pub fn create_text_node(&mut self, text: impl Into<String>) -> NodeId {
		self.push(NodeData::Text(text.into()))
	}

	/// Creates a detached comment node.
	pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
		self.push(NodeData::Comment(text.into()))
	}

	fn push(&mut self, data: NodeData) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node::new(data));
		id
	}

	// ------------------------------------------------------------------
	// Lookups
	// ------------------------------------------------------------------

	fn node(&self, id: NodeId) -> DomResult<&Node> {
		self.nodes.get(id.0).ok_or(DomError::UnknownNode(id))
	}

	fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
		self.nodes.get_mut(id.0).ok_or(DomError::UnknownNode(id))
	}

	/// Returns the payload of a node.
	pub fn data(&self, id: NodeId) -> DomResult<&NodeData> {
		Ok(&self.node(id)?.data)
	}

	/// Returns true if the node exists and is an element.
	pub fn is_element(&self, id: NodeId) -> bool {
		matches!(self.data(id), Ok(NodeData::Element(_)))
	}

	/// Returns the tag name of an element node.
	pub fn tag_name(&self, id: NodeId) -> Option<&str> {
		self.data(id).ok()?.as_element().map(ElementData::tag_name)
	}

	/// Returns the parent of a node.
	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.nodes.get(id.0)?.parent
	}

	/// Returns the children of a node.
	pub fn children(&self, id: NodeId) -> &[NodeId] {
		self.nodes
			.get(id.0)
			.map(|n| n.children.as_slice())
			.unwrap_or(&[])
	}

	/// Returns the first child of a node.
	pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
		self.children(id).first().copied()
	}

	/// Finds the first element with the given tag under `root`, in document order.
	///
	/// `root` itself is considered.
	pub fn find_element(&self, root: NodeId, tag: &str) -> Option<NodeId> {
		self.descendants(root)
			.into_iter()
			.find(|&id| self.tag_name(id) == Some(tag))
	}

	/// Returns every element under `root` carrying the attribute, in document order.
	pub fn elements_with_attribute(&self, root: NodeId, name: &str) -> Vec<NodeId> {
		self.descendants(root)
			.into_iter()
			.filter(|&id| self.get_attribute(id, name).is_some())
			.collect()
	}

	/// Returns `root` followed by all of its descendants in document order.
	pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack = vec![root];
		while let Some(id) = stack.pop() {
			if id.0 >= self.nodes.len() {
				continue;
			}
			out.push(id);
			stack.extend(self.children(id).iter().rev().copied());
		}
		out
	}

	// ------------------------------------------------------------------
	// Attributes
	// ------------------------------------------------------------------

	/// Returns the value of an attribute on an element.
	pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
		self.data(id).ok()?.as_element()?.attr(name)
	}

	/// Returns true if the element carries the attribute.
	pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
		self.get_attribute(id, name).is_some()
	}

	/// Sets an attribute on an element, replacing any previous value.
	pub fn set_attribute(
		&mut self,
		id: NodeId,
		name: &str,
		value: impl Into<String>,
	) -> DomResult<()> {
		self.element_mut(id)?.set_attr(name, value.into());
		Ok(())
	}

	/// Removes an attribute, returning its previous value.
	pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
		Ok(self.element_mut(id)?.remove_attr(name))
	}

	fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
		self.node_mut(id)?
			.data
			.as_element_mut()
			.ok_or(DomError::NotAnElement(id))
	}

	// ------------------------------------------------------------------
	// Tree mutation
	// ------------------------------------------------------------------

	/// Appends `child` as the last child of `parent`.
	///
	/// A child that is already attached elsewhere is moved.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
		self.insert_before(parent, child, None)
	}

	/// Inserts `child` into `parent` before `reference`, or last when `reference` is `None`.
	///
	/// A child that is already attached elsewhere is moved.
	pub fn insert_before(
		&mut self,
		parent: NodeId,
		child: NodeId,
		reference: Option<NodeId>,
	) -> DomResult<()> {
		self.check_insertion(parent, child)?;
		if let Some(reference) = reference
			&& !self.node(parent)?.children.contains(&reference)
		{
			return Err(DomError::NotAChild {
				parent,
				child: reference,
			});
		}
		if reference == Some(child) {
			return Ok(());
		}

		self.detach(child);
		let children = &mut self.nodes[parent.0].children;
		let pos = reference
			.and_then(|r| children.iter().position(|&c| c == r))
			.unwrap_or(children.len());
		children.insert(pos, child);
		self.nodes[child.0].parent = Some(parent);
		Ok(())
	}

	fn check_insertion(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
		self.node(child)?;
		if !matches!(self.node(parent)?.data, NodeData::Element(_)) {
			return Err(DomError::HierarchyRequest {
				parent,
				child,
				reason: "parent is not an element",
			});
		}
		// Walk up from the parent; meeting the child means a cycle.
		let mut cursor = Some(parent);
		while let Some(id) = cursor {
			if id == child {
				return Err(DomError::HierarchyRequest {
					parent,
					child,
					reason: "node is an ancestor of the parent",
				});
			}
			cursor = self.nodes[id.0].parent;
		}
		Ok(())
	}

	/// Removes `child` from `parent`.
	pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
		if !self.node(parent)?.children.contains(&child) {
			return Err(DomError::NotAChild { parent, child });
		}
		self.detach(child);
		Ok(())
	}

	/// Detaches every child of `parent`.
	pub fn clear_children(&mut self, parent: NodeId) -> DomResult<()> {
		let children = std::mem::take(&mut self.node_mut(parent)?.children);
		for child in children {
			self.nodes[child.0].parent = None;
		}
		Ok(())
	}

	fn detach(&mut self, child: NodeId) {
		if let Some(old_parent) = self.nodes[child.0].parent.take() {
			self.nodes[old_parent.0].children.retain(|&c| c != child);
		}
	}

	// Used during construction only, where both handles are known-good.
	fn attach_last(&mut self, parent: NodeId, child: NodeId) {
		self.nodes[parent.0].children.push(child);
		self.nodes[child.0].parent = Some(parent);
	}

	// ------------------------------------------------------------------
	// Text content
	// ------------------------------------------------------------------

	/// Replaces the children of an element with a single text node.
	///
	/// For text and comment nodes the node's own data is replaced.
	pub fn set_text_content(&mut self, id: NodeId, text: impl Into<String>) -> DomResult<()> {
		let text = text.into();
		match &mut self.node_mut(id)?.data {
			NodeData::Text(t) | NodeData::Comment(t) => {
				*t = text;
				return Ok(());
			}
			NodeData::Element(_) => {}
		}
		self.clear_children(id)?;
		if !text.is_empty() {
			let text_node = self.create_text_node(text);
			self.attach_last(id, text_node);
		}
		Ok(())
	}

	/// Returns the concatenated text of all descendant text nodes.
	pub fn text_content(&self, id: NodeId) -> String {
		self.descendants(id)
			.into_iter()
			.filter_map(|n| match &self.nodes[n.0].data {
				NodeData::Text(t) => Some(t.as_str()),
				_ => None,
			})
			.collect()
	}

	// ------------------------------------------------------------------
	// Serialization
	// ------------------------------------------------------------------

	/// Serializes a node and its subtree.
	pub fn outer_html(&self, id: NodeId) -> DomResult<String> {
		self.node(id)?;
		let mut out = String::new();
		serialize::write_node(self, id, &mut out);
		Ok(out)
	}

	/// Serializes the children of a node.
	pub fn inner_html(&self, id: NodeId) -> DomResult<String> {
		self.node(id)?;
		let mut out = String::new();
		for &child in self.children(id) {
			serialize::write_node(self, child, &mut out);
		}
		Ok(out)
	}

	/// Serializes the whole document, optionally prefixed with `<!DOCTYPE html>`.
	pub fn to_html(&self, include_doctype: bool) -> String {
		let mut out = String::new();
		if include_doctype {
			out.push_str("<!DOCTYPE html>");
		}
		serialize::write_node(self, self.document_element, &mut out);
		out
	}

	pub(crate) fn raw_node(&self, id: NodeId) -> &Node {
		&self.nodes[id.0]
	}
}
