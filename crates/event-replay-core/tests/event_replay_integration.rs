//! Event replay integration tests
//!
//! Success Criteria:
//! 1. Elements with native listeners carry `jsaction="<event>:e;..."`
//! 2. Exactly one data island, first in `<body>`, iff any event qualifies
//! 3. Component outputs and non-element nodes never contribute
//! 4. Component and embedded views are walked in the same pass
//! 5. Malformed engine data fails the whole pass
//!
//! Test Categories:
//! - Happy Path: 2 tests
//! - Error Path: 3 tests
//! - Edge Cases: 3 tests
//! - State Transitions: 2 tests
//! - Use Cases: 3 tests
//! - Property-based: 1 test

use std::sync::Arc;

use event_replay_core::{
	CleanupValue, ElementEvents, EventReplayHooks, HydrationContext, HydrationFeature,
	HydrationOptions, HydrationPipeline, JsactionEventReplay, PassPhase, ReplayError,
	ReplayResult, SlotValue, Teardown, TemplateNode, TemplateNodeType, TemplateView, View,
	ViewBuilder, ViewState, with_event_replay,
};
use event_replay_dom::Document;
use proptest::prelude::*;
use rstest::*;

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn pipeline() -> HydrationPipeline {
	HydrationPipeline::new(HydrationOptions::new().doctype(false)).with_feature(with_event_replay())
}

fn render(
	pipeline: &HydrationPipeline,
	build: impl FnOnce(&mut ViewBuilder<'_>) -> ReplayResult<()>,
) -> String {
	let (doc, _) = Document::with_host("app");
	pipeline.render_application(doc, "app", build).unwrap()
}

/// A hand-built view with one element in slot 0 and the given raw table.
fn raw_view(doc: &mut Document, table: Vec<CleanupValue>) -> View {
	let div = doc.create_element("div");
	let mut template = TemplateView::new();
	template.push_node(TemplateNode::element(0, "div"));
	template.push_cleanup(table);
	let mut state = ViewState::new();
	state.push_slot(SlotValue::Node(div));
	state.push_teardown(Teardown::Listener {
		element: div,
		event: "click".to_string(),
	});
	View::new(Arc::new(template), state)
}

// ============================================================================
// Happy Path Tests
// ============================================================================

#[rstest]
fn test_nested_listeners_end_to_end(pipeline: HydrationPipeline) {
	let html = render(&pipeline, |v| {
		v.element_start("div")?;
		v.listener("click")?;
		v.element_start("div")?;
		v.listener("blur")?;
		v.element_end()?;
		v.element_end()
	});

	insta::assert_snapshot!(html, @r#"<html><head></head><body><script id="jsa" type="application/json">["click","blur"]</script><app><div jsaction="click:e;"><div jsaction="blur:e;"></div></div></app></body></html>"#);
}

#[rstest]
fn test_several_events_on_one_element(pipeline: HydrationPipeline) {
	let html = render(&pipeline, |v| {
		v.element("input")?;
		v.listener("click")?;
		v.native_listener("blur", false)?;
		v.listener("click")
	});

	assert!(html.contains(r#"<input jsaction="click:e;blur:e;click:e;">"#));
	assert!(html.contains(r#"["click","blur"]"#));
}

// ============================================================================
// Error Path Tests
// ============================================================================

#[rstest]
fn test_truncated_cleanup_fails_pass(pipeline: HydrationPipeline) {
	let mut doc = Document::new();
	let view = raw_view(
		&mut doc,
		vec![CleanupValue::Name("click".to_string()), CleanupValue::Index(0)],
	);
	assert!(matches!(
		pipeline.annotate_for_hydration(&[view], &mut doc),
		Err(ReplayError::TruncatedCleanup { offset: 0 })
	));
}

#[rstest]
fn test_malformed_slot_fails_pass(pipeline: HydrationPipeline) {
	let mut doc = Document::new();
	let view = raw_view(
		&mut doc,
		vec![
			CleanupValue::Name("click".to_string()),
			CleanupValue::Name("oops".to_string()),
			CleanupValue::Index(0),
			CleanupValue::Flag(false),
		],
	);
	assert!(matches!(
		pipeline.annotate_for_hydration(&[view], &mut doc),
		Err(ReplayError::MalformedCleanup { offset: 0, .. })
	));
}

#[rstest]
fn test_listener_on_missing_slot_fails_pass(pipeline: HydrationPipeline) {
	let mut doc = Document::new();
	let view = raw_view(
		&mut doc,
		vec![
			CleanupValue::Name("click".to_string()),
			CleanupValue::Index(4),
			CleanupValue::Index(0),
			CleanupValue::Marker(1),
		],
	);
	assert!(matches!(
		pipeline.annotate_for_hydration(&[view], &mut doc),
		Err(ReplayError::UnresolvedSlot { slot: 4 })
	));
}

// ============================================================================
// Edge Cases Tests
// ============================================================================

#[rstest]
fn test_no_listeners_leaves_no_trace(pipeline: HydrationPipeline) {
	let html = render(&pipeline, |v| {
		v.element_start("div")?;
		v.text("static")?;
		v.element_end()?;
		v.on_destroy("teardown");
		Ok(())
	});

	assert_eq!(
		html,
		"<html><head></head><body><app><div>static</div></app></body></html>"
	);
}

#[rstest]
fn test_outputs_are_not_replayed(pipeline: HydrationPipeline) {
	let html = render(&pipeline, |v| {
		v.component("app-child", |_| Ok(()))?;
		v.output("changed")
	});

	assert!(!html.contains("jsaction"));
	assert!(!html.contains(r#"id="jsa""#));
}

#[rstest]
fn test_listener_resolving_to_text_node_is_ignored(pipeline: HydrationPipeline) {
	let mut doc = Document::new();
	let text = doc.create_text_node("hello");
	let body = doc.body().unwrap();
	doc.append_child(body, text).unwrap();

	let mut template = TemplateView::new();
	template.push_node(TemplateNode::new(0, TemplateNodeType::Text));
	template.push_cleanup([
		CleanupValue::Name("click".to_string()),
		CleanupValue::Index(0),
		CleanupValue::Index(0),
		CleanupValue::Flag(false),
	]);
	let mut state = ViewState::new();
	state.push_slot(SlotValue::Node(text));
	state.push_teardown(Teardown::Listener {
		element: text,
		event: "click".to_string(),
	});
	let view = View::new(Arc::new(template), state);

	let ctx = pipeline.annotate_for_hydration(&[view], &mut doc).unwrap();
	assert!(ctx.events_to_replay().is_empty());
	assert_eq!(doc.inner_html(body).unwrap(), "hello");
}

// ============================================================================
// State Transition Tests
// ============================================================================

#[rstest]
fn test_pass_runs_to_done(pipeline: HydrationPipeline) {
	let (mut doc, _) = Document::with_host("app");
	let ctx = pipeline.annotate_for_hydration(&[], &mut doc).unwrap();
	assert_eq!(ctx.phase(), PassPhase::Done);
	assert!(doc.elements_with_attribute(doc.document_element(), "id").is_empty());
}

#[rstest]
fn test_finalizing_twice_is_rejected() {
	let mut ctx = HydrationContext::new();
	ctx.enter(PassPhase::Extracting).unwrap();
	ctx.enter(PassPhase::Finalizing).unwrap();
	assert!(matches!(
		ctx.enter(PassPhase::Finalizing),
		Err(ReplayError::InvalidPhase {
			from: PassPhase::Finalizing,
			to: PassPhase::Finalizing,
		})
	));
	assert!(matches!(
		ctx.enter(PassPhase::Extracting),
		Err(ReplayError::InvalidPhase { .. })
	));
}

// ============================================================================
// Use Case Tests
// ============================================================================

#[rstest]
fn test_embedded_views_share_one_island(pipeline: HydrationPipeline) {
	let html = render(&pipeline, |v| {
		v.element_start("ul")?;
		v.container(|items| {
			for event in ["click", "click", "mouseover"] {
				items.embedded_view(|item| {
					item.element("li")?;
					item.listener(event)
				})?;
			}
			Ok(())
		})?;
		v.element_end()
	});

	insta::assert_snapshot!(html, @r#"<html><head></head><body><script id="jsa" type="application/json">["click","mouseover"]</script><app><ul><li jsaction="click:e;"></li><li jsaction="click:e;"></li><li jsaction="mouseover:e;"></li><!--container--></ul></app></body></html>"#);
}

#[rstest]
fn test_component_host_and_child_view(pipeline: HydrationPipeline) {
	let html = render(&pipeline, |v| {
		v.component("app-child", |child| {
			child.element("input")?;
			child.listener("input")
		})?;
		v.output("changed")?;
		v.listener("focusin")
	});

	assert!(html.contains(
		r#"<script id="jsa" type="application/json">["focusin","input"]</script>"#
	));
	assert!(html.contains(
		r#"<app-child jsaction="focusin:e;"><input jsaction="input:e;"></app-child>"#
	));
}

#[rstest]
fn test_replay_switched_off_by_config() {
	let options =
		HydrationOptions::from_toml_str("[hydration]\nevent_replay = false\ninclude_doctype = true")
			.unwrap();
	let pipeline = HydrationPipeline::new(options).with_feature(with_event_replay());

	let html = render(&pipeline, |v| {
		v.element("button")?;
		v.listener("click")
	});
	assert_eq!(
		html,
		"<!DOCTYPE html><html><head></head><body><app><button></button></app></body></html>"
	);
}

/// Replays clicks only; everything else is left to hydration.
#[derive(Debug)]
struct ClicksOnly;

impl EventReplayHooks for ClicksOnly {
	fn collect_events(
		&self,
		template: &TemplateView,
		state: &ViewState,
	) -> ReplayResult<ElementEvents> {
		let all = JsactionEventReplay.collect_events(template, state)?;
		let mut clicks = ElementEvents::new();
		for (element, names) in all.iter() {
			for name in names.iter().filter(|name| *name == "click") {
				clicks.push(element, name.as_str());
			}
		}
		Ok(clicks)
	}

	fn annotate(
		&self,
		tnode: &TemplateNode,
		rnode: &SlotValue,
		events: &ElementEvents,
		context: &mut HydrationContext,
		document: &mut Document,
	) -> ReplayResult<()> {
		JsactionEventReplay.annotate(tnode, rnode, events, context, document)
	}

	fn finalize(&self, context: &HydrationContext, document: &mut Document) -> ReplayResult<()> {
		JsactionEventReplay.finalize(context, document)
	}
}

#[rstest]
fn test_custom_hooks_are_used() {
	let pipeline = HydrationPipeline::new(HydrationOptions::new().doctype(false))
		.with_feature(HydrationFeature::event_replay_with(ClicksOnly));

	let html = render(&pipeline, |v| {
		v.element("a")?;
		v.listener("click")?;
		v.listener("keydown")
	});
	assert!(html.contains(r#"<a jsaction="click:e;"></a>"#));
	assert!(html.contains(r#">["click"]</script>"#));
}

// ============================================================================
// Property-based Tests
// ============================================================================

proptest! {
	#[test]
	fn prop_attributes_and_island_match_registrations(
		registrations in prop::collection::vec(
			prop::collection::vec("[a-z]{1,6}", 0..4),
			1..6,
		)
	) {
		let (mut doc, host) = Document::with_host("app");
		let mut builder = ViewBuilder::new(&mut doc, host);
		let mut slots = Vec::new();
		for events in &registrations {
			slots.push(builder.element("span").unwrap());
			for event in events {
				builder.listener(event).unwrap();
			}
		}
		let view = builder.finish().unwrap();

		let pipeline = HydrationPipeline::new(HydrationOptions::default())
			.with_feature(with_event_replay());
		let ctx = pipeline
			.annotate_for_hydration(std::slice::from_ref(&view), &mut doc)
			.unwrap();

		let mut union: Vec<&str> = Vec::new();
		for (slot, events) in slots.iter().zip(&registrations) {
			let element = view.state().resolve_node(*slot).unwrap();
			let expected: String = events.iter().map(|e| format!("{e}:e;")).collect();
			let actual = doc.get_attribute(element, "jsaction");
			if events.is_empty() {
				prop_assert_eq!(actual, None);
			} else {
				prop_assert_eq!(actual, Some(expected.as_str()));
			}
			for event in events {
				if !union.contains(&event.as_str()) {
					union.push(event);
				}
			}
		}

		let recorded: Vec<&str> = ctx.events_to_replay().iter().map(String::as_str).collect();
		prop_assert_eq!(&recorded, &union);

		let body = doc.body().unwrap();
		let first = doc.first_child(body).unwrap();
		if union.is_empty() {
			prop_assert_eq!(first, host);
		} else {
			prop_assert_eq!(doc.get_attribute(first, "id"), Some("jsa"));
			let parsed: Vec<String> = serde_json::from_str(&doc.text_content(first)).unwrap();
			prop_assert_eq!(parsed, union.iter().map(|e| e.to_string()).collect::<Vec<_>>());
		}
	}
}
