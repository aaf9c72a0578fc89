use std::collections::HashMap;

use exgrip_domain::combination::Combination;

use crate::{Error, Result};

/// Store-agnostic tagged attribute value, mirroring the wire shape of a
/// DynamoDB-style record without tying the scanner to one client library.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
	S(String),
	N(String),
	Bool(bool),
	Null,
}
impl AttrValue {
	fn type_name(&self) -> &'static str {
		match self {
			Self::S(_) => "S",
			Self::N(_) => "N",
			Self::Bool(_) => "BOOL",
			Self::Null => "NULL",
		}
	}
}

pub type WireRecord = HashMap<String, AttrValue>;

/// Decodes a wire record into the typed catalog schema. Unlike the loose
/// "first set field wins" flattening this replaces, an attribute carrying
/// an unexpected tag fails the whole decode.
pub fn decode(record: &WireRecord) -> Result<Combination> {
	Ok(Combination {
		id: require_string(record, "id")?,
		spindle: require_string(record, "spindle")?,
		master_holder_sku: require_string(record, "productSKUMasterHolder")?,
		extension_adapter_sku: require_string(record, "productSKUExtensionAdapter")?,
		clamping_extension_sku: require_string(record, "productSKUClampingExtension")?,
		length: require_number(record, "length")?,
		holder_angle: optional_string(record, "holderAngle")?,
		extension_angle: optional_string(record, "extensionAngle")?,
		tool_type: optional_string(record, "toolType")?,
		thread: optional_string(record, "thread")?,
		bore_diameter: optional_string(record, "boreDiameter")?,
		edge_radius: optional_string(record, "edgeRadius")?,
		cutting_diameter: optional_string(record, "cuttingDiameter")?,
	})
}

fn require_string(record: &WireRecord, attribute: &str) -> Result<String> {
	match record.get(attribute) {
		Some(AttrValue::S(value)) => Ok(value.clone()),
		Some(other) => Err(unexpected_tag(attribute, "S", other)),
		None => Err(missing(attribute)),
	}
}

fn optional_string(record: &WireRecord, attribute: &str) -> Result<Option<String>> {
	match record.get(attribute) {
		Some(AttrValue::S(value)) => Ok(Some(value.clone())),
		Some(AttrValue::Null) | None => Ok(None),
		Some(other) => Err(unexpected_tag(attribute, "S", other)),
	}
}

fn require_number(record: &WireRecord, attribute: &str) -> Result<f64> {
	match record.get(attribute) {
		Some(AttrValue::N(value)) => value.parse::<f64>().map_err(|_| Error::Decode {
			attribute: attribute.to_string(),
			message: format!("{value:?} is not a number"),
		}),
		Some(other) => Err(unexpected_tag(attribute, "N", other)),
		None => Err(missing(attribute)),
	}
}

fn unexpected_tag(attribute: &str, expected: &str, actual: &AttrValue) -> Error {
	Error::Decode {
		attribute: attribute.to_string(),
		message: format!("expected type {expected}, found {}", actual.type_name()),
	}
}

fn missing(attribute: &str) -> Error {
	Error::Decode { attribute: attribute.to_string(), message: "attribute is absent".to_string() }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn wire_record() -> WireRecord {
		WireRecord::from([
			("id".to_string(), AttrValue::S("c-1".to_string())),
			("spindle".to_string(), AttrValue::S("BBT40".to_string())),
			("productSKUMasterHolder".to_string(), AttrValue::S("EXGRIP-A1".to_string())),
			("productSKUExtensionAdapter".to_string(), AttrValue::S("NA".to_string())),
			("productSKUClampingExtension".to_string(), AttrValue::S("EXGRIP-C1".to_string())),
			("length".to_string(), AttrValue::N("120".to_string())),
			("toolType".to_string(), AttrValue::S("drill".to_string())),
		])
	}

	#[test]
	fn decodes_a_complete_record() {
		let combination = decode(&wire_record()).expect("decode failed");

		assert_eq!(combination.id, "c-1");
		assert_eq!(combination.length, 120.0);
		assert_eq!(combination.tool_type.as_deref(), Some("drill"));
		assert!(combination.thread.is_none());
	}

	#[test]
	fn rejects_unexpected_attribute_tag() {
		let mut record = wire_record();

		record.insert("length".to_string(), AttrValue::S("120".to_string()));

		let err = decode(&record).expect_err("expected decode failure");

		assert!(err.to_string().contains("length"), "Unexpected error: {err}");
	}

	#[test]
	fn rejects_missing_required_attribute() {
		let mut record = wire_record();

		record.remove("productSKUMasterHolder");

		assert!(decode(&record).is_err());
	}

	#[test]
	fn treats_null_optional_attribute_as_absent() {
		let mut record = wire_record();

		record.insert("thread".to_string(), AttrValue::Null);

		let combination = decode(&record).expect("decode failed");

		assert!(combination.thread.is_none());
	}
}
