use serde::{Deserialize, Serialize};

/// Component identifier sentinel for "not applicable". Master-holder and
/// clamping-extension SKUs are always real identifiers; only the extension
/// adapter may carry this value.
pub const NOT_APPLICABLE: &str = "NA";

/// A denormalized catalog row describing one buildable tool-holder
/// combination. Decoded from the record store's wire format; never written
/// back.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Combination {
	pub id: String,
	pub spindle: String,
	#[serde(rename = "productSKUMasterHolder")]
	pub master_holder_sku: String,
	#[serde(rename = "productSKUExtensionAdapter")]
	pub extension_adapter_sku: String,
	#[serde(rename = "productSKUClampingExtension")]
	pub clamping_extension_sku: String,
	pub length: f64,
	pub holder_angle: Option<String>,
	pub extension_angle: Option<String>,
	pub tool_type: Option<String>,
	pub thread: Option<String>,
	pub bore_diameter: Option<String>,
	pub edge_radius: Option<String>,
	pub cutting_diameter: Option<String>,
}
impl Combination {
	pub fn has_extension_adapter(&self) -> bool {
		self.extension_adapter_sku != NOT_APPLICABLE
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn combination() -> Combination {
		Combination {
			id: "c-1".to_string(),
			spindle: "BBT40".to_string(),
			master_holder_sku: "EXGRIP-A1".to_string(),
			extension_adapter_sku: NOT_APPLICABLE.to_string(),
			clamping_extension_sku: "EXGRIP-C1".to_string(),
			length: 120.0,
			holder_angle: None,
			extension_angle: None,
			tool_type: Some("drill".to_string()),
			thread: None,
			bore_diameter: None,
			edge_radius: None,
			cutting_diameter: None,
		}
	}

	#[test]
	fn na_adapter_is_not_applicable() {
		assert!(!combination().has_extension_adapter());
	}

	#[test]
	fn serializes_sku_fields_with_catalog_names() {
		let json = serde_json::to_value(combination()).expect("serialize failed");

		assert_eq!(json["productSKUMasterHolder"], "EXGRIP-A1");
		assert_eq!(json["productSKUExtensionAdapter"], "NA");
		assert_eq!(json["productSKUClampingExtension"], "EXGRIP-C1");
		assert_eq!(json["holderAngle"], serde_json::Value::Null);
	}
}
