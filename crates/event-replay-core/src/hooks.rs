//! Event replay hooks and the feature that installs them.
//!
//! The three steps of event replay (collect, annotate, finalize) are
//! grouped behind [`EventReplayHooks`]. A [`HydrationPipeline`] receives the
//! hooks through a [`HydrationFeature`] when it is built, so alternative
//! strategies can be swapped in and tested in isolation.
//!
//! [`HydrationPipeline`]: crate::pipeline::HydrationPipeline

use std::fmt;

use event_replay_dom::Document;

use crate::annotate::annotate_element;
use crate::context::HydrationContext;
use crate::error::ReplayResult;
use crate::extract::{ElementEvents, collect_listener_events};
use crate::insert::insert_event_replay_script;
use crate::view::{SlotValue, TemplateNode, TemplateView, ViewState};

/// Strategy for recording replayable events during a render pass.
pub trait EventReplayHooks: fmt::Debug + Send + Sync {
	/// Collects the native listeners of one view.
	fn collect_events(
		&self,
		template: &TemplateView,
		state: &ViewState,
	) -> ReplayResult<ElementEvents>;

	/// Annotates one rendered node using the events collected for its view.
	fn annotate(
		&self,
		tnode: &TemplateNode,
		rnode: &SlotValue,
		events: &ElementEvents,
		context: &mut HydrationContext,
		document: &mut Document,
	) -> ReplayResult<()>;

	/// Emits whatever the client needs once every view has been walked.
	fn finalize(&self, context: &HydrationContext, document: &mut Document) -> ReplayResult<()>;
}

/// The `jsaction` strategy: per-element `jsaction` attributes plus the
/// `<script id="jsa">` data island.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsactionEventReplay;

impl EventReplayHooks for JsactionEventReplay {
	fn collect_events(
		&self,
		template: &TemplateView,
		state: &ViewState,
	) -> ReplayResult<ElementEvents> {
		collect_listener_events(template, state)
	}

	fn annotate(
		&self,
		tnode: &TemplateNode,
		rnode: &SlotValue,
		events: &ElementEvents,
		context: &mut HydrationContext,
		document: &mut Document,
	) -> ReplayResult<()> {
		annotate_element(tnode, rnode, events, context, document)
	}

	fn finalize(&self, context: &HydrationContext, document: &mut Document) -> ReplayResult<()> {
		insert_event_replay_script(context.events_to_replay(), document)?;
		Ok(())
	}
}

/// Kinds of optional hydration features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HydrationFeatureKind {
	/// Server-side recording of events for replay before hydration.
	EventReplay,
}

/// An optional capability installed into a hydration pipeline.
#[derive(Debug)]
#[non_exhaustive]
pub enum HydrationFeature {
	/// Event replay with the given hooks.
	EventReplay(Box<dyn EventReplayHooks>),
}

impl HydrationFeature {
	/// Event replay with custom hooks.
	pub fn event_replay_with(hooks: impl EventReplayHooks + 'static) -> Self {
		HydrationFeature::EventReplay(Box::new(hooks))
	}

	/// Returns the kind of this feature.
	pub fn kind(&self) -> HydrationFeatureKind {
		match self {
			HydrationFeature::EventReplay(_) => HydrationFeatureKind::EventReplay,
		}
	}
}

/// Enables event replay with the default `jsaction` hooks.
///
/// ```
/// use event_replay_core::{HydrationOptions, HydrationPipeline, with_event_replay};
///
/// let pipeline = HydrationPipeline::new(HydrationOptions::default())
///     .with_feature(with_event_replay());
/// assert!(pipeline.is_event_replay_enabled());
/// ```
pub fn with_event_replay() -> HydrationFeature {
	HydrationFeature::event_replay_with(JsactionEventReplay)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_with_event_replay_kind() {
		assert_eq!(with_event_replay().kind(), HydrationFeatureKind::EventReplay);
	}

	#[rstest]
	fn test_default_finalize_with_empty_context() {
		let mut doc = Document::new();
		JsactionEventReplay
			.finalize(&HydrationContext::new(), &mut doc)
			.unwrap();
		assert!(doc.first_child(doc.body().unwrap()).is_none());
	}
}
