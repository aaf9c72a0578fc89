use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One query's worth of optional filters. An absent field means "no
/// constraint on that attribute"; an entirely empty criteria set matches
/// every combination in the catalog.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryCriteria {
	pub spindle: Option<String>,
	/// Raw length filter in the mini grammar understood by
	/// [`LengthSelector::parse`].
	pub length: Option<String>,
	pub holder_angle: Option<String>,
	pub extension_angle: Option<String>,
	pub tool_type: Option<String>,
	pub thread: Option<String>,
	pub bore_diameter: Option<String>,
	pub edge_radius: Option<String>,
	pub cutting_diameter: Option<String>,
}
impl QueryCriteria {
	pub fn is_empty(&self) -> bool {
		self.spindle.is_none()
			&& self.length.is_none()
			&& self.holder_angle.is_none()
			&& self.extension_angle.is_none()
			&& self.tool_type.is_none()
			&& self.thread.is_none()
			&& self.bore_diameter.is_none()
			&& self.edge_radius.is_none()
			&& self.cutting_diameter.is_none()
	}
}

/// Parsed form of the length filter grammar.
///
/// - `<=120` selects lengths of at most 120.
/// - `50-100` selects the inclusive range 50 to 100.
/// - `>30` selects lengths strictly above 30.
/// - `75` selects exactly 75.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LengthSelector {
	AtMost(f64),
	Between(f64, f64),
	Above(f64),
	Exactly(f64),
}
impl LengthSelector {
	pub fn parse(raw: &str) -> Result<Self> {
		let raw = raw.trim();

		if raw.is_empty() {
			return Err(invalid(raw, "filter must be non-empty"));
		}
		if let Some(rest) = raw.strip_prefix("<=") {
			return Ok(Self::AtMost(parse_number(raw, rest)?));
		}
		// The `<=` case is handled above, so a remaining `-` splits a range.
		if let Some((start, end)) = raw.split_once('-') {
			return Ok(Self::Between(parse_number(raw, start)?, parse_number(raw, end)?));
		}
		if let Some(rest) = raw.strip_prefix('>') {
			return Ok(Self::Above(parse_number(raw, rest)?));
		}

		Ok(Self::Exactly(parse_number(raw, raw)?))
	}
}

fn parse_number(raw: &str, literal: &str) -> Result<f64> {
	let literal = literal.trim();

	literal
		.parse::<f64>()
		.ok()
		.filter(|value| value.is_finite())
		.ok_or_else(|| invalid(raw, &format!("{literal:?} is not a number")))
}

fn invalid(raw: &str, message: &str) -> Error {
	Error::InvalidLengthFilter { raw: raw.to_string(), message: message.to_string() }
}
