//! Event Replay DOM - server-side document model
//!
//! A small, arena-backed DOM used while rendering on the server. It offers the
//! subset of the browser document API that server rendering needs: element,
//! text and comment creation, attribute get/set, insertion of children at a
//! position, text content, and HTML serialization.
//!
//! ## Example
//!
//! ```
//! use event_replay_dom::Document;
//!
//! let (mut doc, host) = Document::with_host("app");
//! let button = doc.create_element("button");
//! doc.set_attribute(button, "jsaction", "click:e;").unwrap();
//! doc.append_child(host, button).unwrap();
//!
//! assert_eq!(
//!     doc.inner_html(doc.body().unwrap()).unwrap(),
//!     r#"<app><button jsaction="click:e;"></button></app>"#
//! );
//! ```
//!
//! Node handles ([`NodeId`]) compare by identity, so they can key per-render
//! lookup tables without implying ownership of the node.

#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod node;
pub mod serialize;

pub use document::Document;
pub use error::{DomError, DomResult};
pub use node::{ElementData, NodeData, NodeId};
