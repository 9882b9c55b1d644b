//! The replay data island.
//!
//! The client capture-and-dispatch runtime reads this island at startup to
//! learn which event types to intercept globally before hydration.

use event_replay_dom::{Document, NodeId};
use indexmap::IndexSet;

use crate::error::ReplayResult;

/// `id` of the data island script.
pub const REPLAY_SCRIPT_ID: &str = "jsa";

/// MIME type of the data island script.
pub const REPLAY_SCRIPT_TYPE: &str = "application/json";

/// Escapes JSON for embedding in a `<script>` element.
///
/// Every `<` becomes `\u003c`, which JSON parsers read back unchanged. The
/// HTML tokenizer then never sees a closing tag or a `<!--` that would
/// switch it into escaped script state.
fn escape_json_for_script(json: &str) -> String {
	json.replace('<', "\\u003c")
}

/// Inserts `<script id="jsa" type="application/json">[...]</script>` as the
/// first child of `<body>`.
///
/// Nothing is inserted when `events` is empty. Returns the script node when
/// one was inserted.
pub fn insert_event_replay_script(
	events: &IndexSet<String>,
	document: &mut Document,
) -> ReplayResult<Option<NodeId>> {
	if events.is_empty() {
		tracing::debug!("no replayable events; skipping data island");
		return Ok(None);
	}

	let names: Vec<&str> = events.iter().map(String::as_str).collect();
	let json = serde_json::to_string(&names)?;
	let body = document.body()?;

	let script = document.create_element("script");
	document.set_attribute(script, "id", REPLAY_SCRIPT_ID)?;
	document.set_attribute(script, "type", REPLAY_SCRIPT_TYPE)?;
	document.set_text_content(script, escape_json_for_script(&json))?;
	let first = document.first_child(body);
	document.insert_before(body, script, first)?;

	tracing::debug!(events = names.len(), "inserted event replay data island");
	Ok(Some(script))
}
