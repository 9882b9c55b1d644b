//! Server-side DOM document
//!
//! This module provides access to event-replay-dom, the arena-backed
//! document that views are rendered into on the server.
//!
//! ## Example
//!
//! ```rust
//! use event_replay::dom::Document;
//!
//! let (mut doc, host) = Document::with_host("app");
//! let text = doc.create_text_node("hello");
//! doc.append_child(host, text).unwrap();
//! assert_eq!(doc.to_html(false), "<html><head></head><body><app>hello</app></body></html>");
//! ```

// Re-export all event-replay-dom functionality
pub use event_replay_dom::*;
