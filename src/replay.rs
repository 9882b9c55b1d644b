//! Event replay annotations for hydration
//!
//! This module provides access to event-replay-core: listener extraction,
//! `jsaction` annotation and the replay data island, driven by a
//! [`HydrationPipeline`].
//!
//! ## Example
//!
//! ```rust
//! use event_replay::dom::Document;
//! use event_replay::replay::{HydrationOptions, HydrationPipeline, with_event_replay};
//!
//! let pipeline = HydrationPipeline::new(HydrationOptions::default())
//!     .with_feature(with_event_replay());
//! let (doc, _) = Document::with_host("app");
//!
//! let html = pipeline
//!     .render_application(doc, "app", |view| {
//!         view.element("button")?;
//!         view.listener("click")
//!     })
//!     .unwrap();
//! assert!(html.contains(r#"<button jsaction="click:e;">"#));
//! ```

// Re-export all event-replay-core functionality
pub use event_replay_core::*;
