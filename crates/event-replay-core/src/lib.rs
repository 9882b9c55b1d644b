//! Event Replay Core - server-side recording of replayable DOM events
//!
//! Between the moment a server-rendered page becomes visible and the moment
//! client code hydrates it, user input would otherwise be lost. This crate
//! runs during the server render and records, for every element, which
//! native DOM events have listeners, so a small client runtime can capture
//! those events early and replay them once hydration completes.
//!
//! ## Architecture
//!
//! One render pass runs three steps, in order:
//!
//! - [`extract`]: decodes a view's cleanup table ([`cleanup`]) into the
//!   native listener events per element, skipping component outputs.
//! - [`annotate`]: writes `jsaction="<event>:e;..."` on every element that
//!   has listeners and collects the event names into the pass's
//!   [`HydrationContext`].
//! - [`insert`]: once all views are walked, emits
//!   `<script id="jsa" type="application/json">[...]</script>` as the first
//!   child of `<body>`.
//!
//! The steps are bundled as [`EventReplayHooks`] and installed into a
//! [`HydrationPipeline`] with [`with_event_replay`]. The [`view`] and
//! [`render`] modules provide the rendered view tree the pipeline walks.
//!
//! ## Example
//!
//! ```
//! use event_replay_core::{HydrationOptions, HydrationPipeline, with_event_replay};
//! use event_replay_dom::Document;
//!
//! let pipeline = HydrationPipeline::new(HydrationOptions::new().doctype(false))
//!     .with_feature(with_event_replay());
//!
//! let (doc, _) = Document::with_host("app");
//! let html = pipeline
//!     .render_application(doc, "app", |view| {
//!         view.element("button")?;
//!         view.listener("click")
//!     })
//!     .unwrap();
//!
//! assert_eq!(
//!     html,
//!     concat!(
//!         r#"<html><head></head><body>"#,
//!         r#"<script id="jsa" type="application/json">["click"]</script>"#,
//!         r#"<app><button jsaction="click:e;"></button></app>"#,
//!         r#"</body></html>"#,
//!     )
//! );
//! ```

#![warn(missing_docs)]

pub mod annotate;
pub mod cleanup;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod hooks;
pub mod insert;
pub mod pipeline;
pub mod render;
pub mod view;

pub use annotate::{JSACTION_ATTR, REPLAY_ACTION, annotate_element, jsaction_value};
pub use cleanup::{CleanupRecord, DisposalMarker, decode_cleanup};
pub use config::HydrationOptions;
pub use context::{HydrationContext, PassPhase};
pub use error::{ReplayError, ReplayResult};
pub use extract::{ElementEvents, collect_listener_events};
pub use hooks::{
	EventReplayHooks, HydrationFeature, HydrationFeatureKind, JsactionEventReplay,
	with_event_replay,
};
pub use insert::{REPLAY_SCRIPT_ID, REPLAY_SCRIPT_TYPE, insert_event_replay_script};
pub use pipeline::HydrationPipeline;
pub use render::{ContainerBuilder, ViewBuilder};
pub use view::{
	CleanupValue, SlotValue, Teardown, TemplateNode, TemplateNodeType, TemplateView, View,
	ViewState,
};
