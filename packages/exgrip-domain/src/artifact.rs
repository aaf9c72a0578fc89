use crate::combination::{Combination, NOT_APPLICABLE};

/// Vendor prefix stripped from SKUs when deriving object keys.
pub const SKU_PREFIX: &str = "EXGRIP-";
/// Fixed root under which all derived model files live.
pub const MODEL_ROOT: &str = "3d-files";

/// The two derived file kinds stored per combination.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArtifactKind {
	/// Triangle-mesh export.
	Stl,
	/// CAD-exchange export.
	Step,
}
impl ArtifactKind {
	pub fn extension(self) -> &'static str {
		match self {
			// Historical casing of the upload pipeline; keys are case-sensitive.
			Self::Stl => "STL",
			Self::Step => "step",
		}
	}
}

/// Canonical object keys for one combination's derived models.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModelKeys {
	pub stl: String,
	pub step: String,
}

/// Derives the object keys holding a combination's model files. Pure: the
/// same identifiers always yield the same keys, which is what makes
/// existence checks possible without a stored mapping.
pub fn model_keys(
	spindle: &str,
	master_holder_sku: &str,
	extension_adapter_sku: &str,
	clamping_extension_sku: &str,
) -> ModelKeys {
	let mut base = strip_vendor_prefix(master_holder_sku).to_string();

	if extension_adapter_sku != NOT_APPLICABLE {
		base.push('+');
		base.push_str(strip_vendor_prefix(extension_adapter_sku));
	}

	base.push('+');
	base.push_str(strip_vendor_prefix(clamping_extension_sku));

	ModelKeys {
		stl: format!("{MODEL_ROOT}/{spindle}/{base}.{}", ArtifactKind::Stl.extension()),
		step: format!("{MODEL_ROOT}/{spindle}/{base}.{}", ArtifactKind::Step.extension()),
	}
}

impl ModelKeys {
	pub fn for_combination(combination: &Combination) -> Self {
		model_keys(
			&combination.spindle,
			&combination.master_holder_sku,
			&combination.extension_adapter_sku,
			&combination.clamping_extension_sku,
		)
	}
}

fn strip_vendor_prefix(sku: &str) -> &str {
	sku.strip_prefix(SKU_PREFIX).unwrap_or(sku)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn omits_adapter_segment_for_na() {
		let keys = model_keys("BBT40", "EXGRIP-A1", "NA", "EXGRIP-C1");

		assert_eq!(keys.stl, "3d-files/BBT40/A1+C1.STL");
		assert_eq!(keys.step, "3d-files/BBT40/A1+C1.step");
	}

	#[test]
	fn joins_all_three_segments_when_adapter_present() {
		let keys = model_keys("BBT40", "EXGRIP-A1", "EXGRIP-B2", "EXGRIP-C1");

		assert_eq!(keys.stl, "3d-files/BBT40/A1+B2+C1.STL");
		assert_eq!(keys.step, "3d-files/BBT40/A1+B2+C1.step");
	}

	#[test]
	fn leaves_unprefixed_skus_untouched() {
		let keys = model_keys("HSK63", "A1", "NA", "C9");

		assert_eq!(keys.stl, "3d-files/HSK63/A1+C9.STL");
	}

	#[test]
	fn derivation_is_deterministic() {
		let first = model_keys("BBT40", "EXGRIP-A1", "EXGRIP-B2", "EXGRIP-C1");
		let second = model_keys("BBT40", "EXGRIP-A1", "EXGRIP-B2", "EXGRIP-C1");

		assert_eq!(first, second);
	}
}
