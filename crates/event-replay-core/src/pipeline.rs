//! The hydration pipeline: walks rendered views and drives the event
//! replay hooks.

use event_replay_dom::Document;

use crate::config::HydrationOptions;
use crate::context::{HydrationContext, PassPhase};
use crate::error::{ReplayError, ReplayResult};
use crate::hooks::{EventReplayHooks, HydrationFeature};
use crate::render::ViewBuilder;
use crate::view::View;

/// Annotates server-rendered views for hydration.
///
/// Built once and reused across render passes; every pass gets its own
/// [`HydrationContext`].
#[derive(Debug, Default)]
pub struct HydrationPipeline {
	options: HydrationOptions,
	event_replay: Option<Box<dyn EventReplayHooks>>,
}

impl HydrationPipeline {
	/// Creates a pipeline with no features installed.
	pub fn new(options: HydrationOptions) -> Self {
		Self {
			options,
			event_replay: None,
		}
	}

	/// Installs a feature, replacing any previous feature of the same kind.
	pub fn with_feature(mut self, feature: HydrationFeature) -> Self {
		match feature {
			HydrationFeature::EventReplay(hooks) => self.event_replay = Some(hooks),
		}
		self
	}

	/// Returns the options.
	pub fn options(&self) -> &HydrationOptions {
		&self.options
	}

	/// Returns true when event replay hooks are installed and enabled.
	pub fn is_event_replay_enabled(&self) -> bool {
		self.replay_hooks().is_some()
	}

	fn replay_hooks(&self) -> Option<&dyn EventReplayHooks> {
		if !self.options.event_replay {
			return None;
		}
		self.event_replay.as_deref()
	}

	/// Runs one hydration pass over `views` and everything nested in them.
	///
	/// Each view is extracted once, then its template nodes are annotated in
	/// order; component and embedded views are walked depth-first right
	/// after the node that holds them. The data island is inserted once at
	/// the end. With event replay disabled the document is not touched and
	/// the returned context stays [`PassPhase::Idle`].
	pub fn annotate_for_hydration(
		&self,
		views: &[View],
		document: &mut Document,
	) -> ReplayResult<HydrationContext> {
		let mut context = HydrationContext::new();
		let Some(hooks) = self.replay_hooks() else {
			tracing::debug!("event replay disabled; skipping annotation");
			return Ok(context);
		};

		for view in views {
			annotate_view(hooks, view, &mut context, document)?;
		}

		context.enter(PassPhase::Finalizing)?;
		hooks.finalize(&context, document)?;
		context.enter(PassPhase::Done)?;

		tracing::debug!(
			events = context.events_to_replay().len(),
			annotated = context.annotated_elements(),
			"hydration pass finished"
		);
		Ok(context)
	}

	/// Renders an application into `document` and serializes it.
	///
	/// The first `<host_tag>` element in `<body>` receives the root view;
	/// its previous children are discarded.
	///
	/// # Errors
	///
	/// [`ReplayError::HostNotFound`] when the body has no such element, plus
	/// anything raised by `build` or the hydration pass.
	pub fn render_application(
		&self,
		mut document: Document,
		host_tag: &str,
		build: impl FnOnce(&mut ViewBuilder<'_>) -> ReplayResult<()>,
	) -> ReplayResult<String> {
		let body = document.body()?;
		let host = document
			.find_element(body, host_tag)
			.ok_or_else(|| ReplayError::HostNotFound(host_tag.to_string()))?;
		document.clear_children(host)?;

		let mut builder = ViewBuilder::new(&mut document, host);
		build(&mut builder)?;
		let root = builder.finish()?;

		self.annotate_for_hydration(std::slice::from_ref(&root), &mut document)?;
		Ok(document.to_html(self.options.include_doctype))
	}
}

fn annotate_view(
	hooks: &dyn EventReplayHooks,
	view: &View,
	context: &mut HydrationContext,
	document: &mut Document,
) -> ReplayResult<()> {
	context.enter(PassPhase::Extracting)?;
	let events = hooks.collect_events(view.template(), view.state())?;

	context.enter(PassPhase::Annotating)?;
	for tnode in view.template().nodes() {
		let rnode = view
			.state()
			.slot(tnode.index())
			.ok_or(ReplayError::UnresolvedSlot {
				slot: tnode.index(),
			})?;
		hooks.annotate(tnode, rnode, &events, context, document)?;
		for child in rnode.child_views() {
			annotate_view(hooks, child, context, document)?;
		}
	}
	Ok(())
}
