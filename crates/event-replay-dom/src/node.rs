//! Node handles and node payloads.

use std::fmt;

/// Stable handle to a node inside a [`Document`](crate::Document).
///
/// Handles compare by identity: two elements with the same tag and
/// attributes are still distinct nodes. A handle is only meaningful for the
/// document that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Tags that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// Tags whose text content is serialized without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Element payload: tag name and attributes in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
	tag: String,
	attrs: Vec<(String, String)>,
}

impl ElementData {
	pub(crate) fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into().to_ascii_lowercase(),
			attrs: Vec::new(),
		}
	}

	/// Returns the lowercase tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes in the order they were first set.
	pub fn attrs(&self) -> &[(String, String)] {
		&self.attrs
	}

	/// Returns the value of an attribute.
	pub fn attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}

	/// Sets an attribute, keeping its original position when it already exists.
	pub(crate) fn set_attr(&mut self, name: &str, value: String) {
		match self.attrs.iter_mut().find(|(n, _)| n == name) {
			Some((_, existing)) => *existing = value,
			None => self.attrs.push((name.to_string(), value)),
		}
	}

	pub(crate) fn remove_attr(&mut self, name: &str) -> Option<String> {
		let pos = self.attrs.iter().position(|(n, _)| n == name)?;
		Some(self.attrs.remove(pos).1)
	}

	/// Returns whether this is a void element (no closing tag).
	pub fn is_void(&self) -> bool {
		VOID_ELEMENTS.contains(&self.tag.as_str())
	}

	/// Returns whether text children are written verbatim.
	pub fn is_raw_text(&self) -> bool {
		RAW_TEXT_ELEMENTS.contains(&self.tag.as_str())
	}
}

/// The payload of a document node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
	/// An element node.
	Element(ElementData),
	/// A text node.
	Text(String),
	/// A comment node.
	Comment(String),
}

impl NodeData {
	/// Returns the element payload, if this is an element.
	pub fn as_element(&self) -> Option<&ElementData> {
		match self {
			NodeData::Element(el) => Some(el),
			_ => None,
		}
	}

	pub(crate) fn as_element_mut(&mut self) -> Option<&mut ElementData> {
		match self {
			NodeData::Element(el) => Some(el),
			_ => None,
		}
	}
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
	pub(crate) data: NodeData,
	pub(crate) parent: Option<NodeId>,
	pub(crate) children: Vec<NodeId>,
}

impl Node {
	pub(crate) fn new(data: NodeData) -> Self {
		Self {
			data,
			parent: None,
			children: Vec::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("br", true)]
	#[case("img", true)]
	#[case("div", false)]
	#[case("script", false)]
	fn test_void_elements(#[case] tag: &str, #[case] expected: bool) {
		assert_eq!(ElementData::new(tag).is_void(), expected);
	}

	#[rstest]
	fn test_tag_name_is_lowercased() {
		assert_eq!(ElementData::new("DIV").tag_name(), "div");
	}

	#[rstest]
	fn test_set_attr_keeps_position() {
		let mut el = ElementData::new("div");
		el.set_attr("id", "a".to_string());
		el.set_attr("class", "b".to_string());
		el.set_attr("id", "c".to_string());
		assert_eq!(
			el.attrs(),
			&[
				("id".to_string(), "c".to_string()),
				("class".to_string(), "b".to_string())
			]
		);
	}

	#[rstest]
	fn test_remove_attr() {
		let mut el = ElementData::new("div");
		el.set_attr("jsaction", "click:e;".to_string());
		assert_eq!(el.remove_attr("jsaction"), Some("click:e;".to_string()));
		assert_eq!(el.remove_attr("jsaction"), None);
		assert!(el.attrs().is_empty());
	}
}
