//! HTML serialization of document nodes.

use std::borrow::Cow;

use crate::document::Document;
use crate::node::{NodeData, NodeId};

/// Escapes text for use inside an attribute value.
///
/// Returns a borrowed reference if no escaping is needed.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
	escape(s, |c| match c {
		'&' => Some("&amp;"),
		'"' => Some("&quot;"),
		'<' => Some("&lt;"),
		'>' => Some("&gt;"),
		_ => None,
	})
}

/// Escapes text content.
///
/// Returns a borrowed reference if no escaping is needed.
pub fn escape_text(s: &str) -> Cow<'_, str> {
	escape(s, |c| match c {
		'&' => Some("&amp;"),
		'<' => Some("&lt;"),
		'>' => Some("&gt;"),
		_ => None,
	})
}

fn escape(s: &str, replace: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
	if !s.chars().any(|c| replace(c).is_some()) {
		return Cow::Borrowed(s);
	}
	let mut escaped = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match replace(c) {
			Some(entity) => escaped.push_str(entity),
			None => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}

pub(crate) fn write_node(doc: &Document, id: NodeId, output: &mut String) {
	write_node_in(doc, id, false, output);
}

fn write_node_in(doc: &Document, id: NodeId, raw_text: bool, output: &mut String) {
	let node = doc.raw_node(id);
	match &node.data {
		NodeData::Element(el) => {
			output.push('<');
			output.push_str(el.tag_name());
			for (name, value) in el.attrs() {
				output.push(' ');
				output.push_str(name);
				output.push_str("=\"");
				output.push_str(&escape_attr(value));
				output.push('"');
			}
			output.push('>');

			if el.is_void() {
				return;
			}
			let raw = el.is_raw_text();
			for &child in &node.children {
				write_node_in(doc, child, raw, output);
			}
			output.push_str("</");
			output.push_str(el.tag_name());
			output.push('>');
		}
		NodeData::Text(text) if raw_text => output.push_str(text),
		NodeData::Text(text) => output.push_str(&escape_text(text)),
		NodeData::Comment(text) => {
			output.push_str("<!--");
			output.push_str(text);
			output.push_str("-->");
		}
	}
}
