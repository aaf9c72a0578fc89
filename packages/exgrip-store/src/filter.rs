use std::collections::HashMap;

use exgrip_domain::criteria::{LengthSelector, QueryCriteria};

use crate::record::AttrValue;

/// Alias for the `length` attribute, which collides with a reserved word in
/// the scan expression language.
pub const LENGTH_ALIAS: &str = "#len";
pub const LENGTH_ATTRIBUTE: &str = "length";

/// Conjunctive predicate set plus its bound values, ready for a
/// server-side-filtered scan. No OR, NOT, or grouping; that is the whole
/// filter language.
#[derive(Clone, Debug)]
pub struct ScanFilter {
	predicates: Vec<String>,
	values: HashMap<String, AttrValue>,
	names: HashMap<String, String>,
}
impl ScanFilter {
	pub fn build(criteria: &QueryCriteria) -> exgrip_domain::Result<Self> {
		let mut filter = Self {
			predicates: Vec::new(),
			values: HashMap::new(),
			// The alias binding is declared unconditionally; whether the
			// backend receives it is the store implementation's call.
			names: HashMap::from([(LENGTH_ALIAS.to_string(), LENGTH_ATTRIBUTE.to_string())]),
		};

		filter.push_eq("spindle", criteria.spindle.as_deref());

		// Blank means "no constraint", same as an absent field.
		if let Some(raw) = criteria.length.as_deref().filter(|raw| !raw.trim().is_empty()) {
			filter.push_length(LengthSelector::parse(raw)?);
		}

		filter.push_eq("holderAngle", criteria.holder_angle.as_deref());
		filter.push_eq("extensionAngle", criteria.extension_angle.as_deref());
		filter.push_eq("toolType", criteria.tool_type.as_deref());
		filter.push_eq("thread", criteria.thread.as_deref());
		filter.push_eq("boreDiameter", criteria.bore_diameter.as_deref());
		filter.push_eq("edgeRadius", criteria.edge_radius.as_deref());
		filter.push_eq("cuttingDiameter", criteria.cutting_diameter.as_deref());

		Ok(filter)
	}

	pub fn predicates(&self) -> &[String] {
		&self.predicates
	}

	/// The AND-joined filter expression, or `None` when the criteria were
	/// empty and the scan should match everything.
	pub fn expression(&self) -> Option<String> {
		if self.predicates.is_empty() { None } else { Some(self.predicates.join(" AND ")) }
	}

	pub fn values(&self) -> &HashMap<String, AttrValue> {
		&self.values
	}

	pub fn names(&self) -> &HashMap<String, String> {
		&self.names
	}

	fn push_eq(&mut self, attribute: &str, value: Option<&str>) {
		let Some(value) = value.filter(|value| !value.trim().is_empty()) else {
			return;
		};

		self.predicates.push(format!("{attribute} = :{attribute}"));
		self.values.insert(format!(":{attribute}"), AttrValue::S(value.to_string()));
	}

	fn push_length(&mut self, selector: LengthSelector) {
		match selector {
			LengthSelector::AtMost(limit) => {
				self.predicates.push(format!("{LENGTH_ALIAS} <= :length"));
				self.values.insert(":length".to_string(), number(limit));
			},
			LengthSelector::Between(start, end) => {
				self.predicates.push(format!("{LENGTH_ALIAS} BETWEEN :lengthStart AND :lengthEnd"));
				self.values.insert(":lengthStart".to_string(), number(start));
				self.values.insert(":lengthEnd".to_string(), number(end));
			},
			LengthSelector::Above(limit) => {
				self.predicates.push(format!("{LENGTH_ALIAS} > :length"));
				self.values.insert(":length".to_string(), number(limit));
			},
			LengthSelector::Exactly(value) => {
				self.predicates.push(format!("{LENGTH_ALIAS} = :length"));
				self.values.insert(":length".to_string(), number(value));
			},
		}
	}
}

fn number(value: f64) -> AttrValue {
	// Whole numbers render without the trailing ".0" so bound values match
	// the catalog's integer-looking numeric attributes.
	if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
		AttrValue::N(format!("{}", value as i64))
	} else {
		AttrValue::N(value.to_string())
	}
}
