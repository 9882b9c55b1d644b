//! Hydration options.

use serde::{Deserialize, Serialize};

use crate::error::ReplayResult;

/// Options for a hydration-annotated server render.
///
/// Can be built in code or loaded from TOML, either as a bare table or
/// under a `[hydration]` section:
///
/// ```toml
/// [hydration]
/// event_replay = true
/// include_doctype = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HydrationOptions {
	/// Whether installed event replay hooks run.
	pub event_replay: bool,
	/// Whether serialized documents start with `<!DOCTYPE html>`.
	pub include_doctype: bool,
}

impl Default for HydrationOptions {
	fn default() -> Self {
		Self {
			event_replay: true,
			include_doctype: true,
		}
	}
}

impl HydrationOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Enables or disables event replay.
	pub fn event_replay(mut self, enable: bool) -> Self {
		self.event_replay = enable;
		self
	}

	/// Disables event replay.
	pub fn no_event_replay(self) -> Self {
		self.event_replay(false)
	}

	/// Controls the `<!DOCTYPE html>` prefix.
	pub fn doctype(mut self, include: bool) -> Self {
		self.include_doctype = include;
		self
	}

	/// Parses options from TOML.
	///
	/// Top-level keys and a `[hydration]` table may be mixed; a key set in
	/// both places takes its value from the table. Unknown keys are rejected
	/// wherever they appear.
	pub fn from_toml_str(source: &str) -> ReplayResult<Self> {
		let mut table: toml::Table = toml::from_str(source)?;
		let section = match table.remove("hydration") {
			Some(toml::Value::Table(mut section)) => {
				for (key, value) in table {
					section.entry(key).or_insert(value);
				}
				section
			}
			Some(other) => {
				// Let serde report the type mismatch.
				table.insert("hydration".to_string(), other);
				table
			}
			None => table,
		};
		Ok(toml::Value::Table(section).try_into()?)
	}
}
