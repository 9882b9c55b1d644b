//! # Event Replay
//!
//! Server-side support for replaying user events that happen before a
//! server-rendered page is hydrated.
//!
//! While rendering, every element with native DOM listeners is annotated with
//! a `jsaction` attribute, and the names of all such events are emitted once,
//! as a JSON data island at the top of `<body>`. A client runtime reads the
//! island, captures those events globally, and dispatches them again once
//! hydration has attached the real handlers.
//!
//! ```text
//! <body>
//!   <script id="jsa" type="application/json">["click","blur"]</script>
//!   <app><div jsaction="click:e;"><div jsaction="blur:e;"></div></div></app>
//! </body>
//! ```
//!
//! ## Feature Flags
//!
//! - `dom` - Server-side DOM document and HTML serializer
//! - `replay` - Listener extraction, annotation and the replay data island
//! - `full` (default) - All features enabled
//!
//! ## Quick Example
//!
//! ```rust
//! use event_replay::prelude::*;
//!
//! let pipeline = HydrationPipeline::new(HydrationOptions::new().doctype(false))
//!     .with_feature(with_event_replay());
//! let (doc, _) = Document::with_host("app");
//!
//! let html = pipeline
//!     .render_application(doc, "app", |view| {
//!         view.element_start("div")?;
//!         view.listener("click")?;
//!         view.element("div")?;
//!         view.listener("blur")?;
//!         view.element_end()
//!     })
//!     .unwrap();
//!
//! assert_eq!(
//!     html,
//!     concat!(
//!         r#"<html><head></head><body>"#,
//!         r#"<script id="jsa" type="application/json">["click","blur"]</script>"#,
//!         r#"<app><div jsaction="click:e;"><div jsaction="blur:e;"></div></div></app>"#,
//!         r#"</body></html>"#,
//!     )
//! );
//! ```

#[cfg(feature = "dom")]
pub mod dom;
#[cfg(feature = "replay")]
pub mod replay;

#[cfg(feature = "dom")]
pub use event_replay_dom::{Document, DomError, DomResult, NodeId};

#[cfg(feature = "replay")]
pub use event_replay_core::{
	HydrationFeature, HydrationOptions, HydrationPipeline, ReplayError, ReplayResult,
	with_event_replay,
};

/// Prelude module for convenient imports
pub mod prelude {
	#[cfg(feature = "dom")]
	pub use crate::dom::{Document, NodeId};

	#[cfg(feature = "replay")]
	pub use crate::replay::{
		EventReplayHooks, HydrationContext, HydrationFeature, HydrationOptions,
		HydrationPipeline, JsactionEventReplay, ReplayError, ReplayResult, ViewBuilder,
		with_event_replay,
	};
}
