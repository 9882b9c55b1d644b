//! DOM error types.

use crate::node::NodeId;
use thiserror::Error;

/// Result type for document operations.
pub type DomResult<T> = Result<T, DomError>;

/// Errors raised by [`Document`](crate::Document) mutations and lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DomError {
	/// The node handle does not belong to this document.
	#[error("unknown node: {0}")]
	UnknownNode(NodeId),

	/// An element-only operation was applied to a text or comment node.
	#[error("node {0} is not an element")]
	NotAnElement(NodeId),

	/// The document has no `<body>` element.
	#[error("document has no body element")]
	MissingBody,

	/// Inserting the node would create a cycle or attach a node to itself.
	#[error("cannot insert node {child} into {parent}: {reason}")]
	HierarchyRequest {
		/// The would-be parent.
		parent: NodeId,
		/// The node being inserted.
		child: NodeId,
		/// Why the insertion was refused.
		reason: &'static str,
	},

	/// The reference node is not a child of the given parent.
	#[error("node {child} is not a child of {parent}")]
	NotAChild {
		/// The parent that was searched.
		parent: NodeId,
		/// The node that was expected among its children.
		child: NodeId,
	},
}
