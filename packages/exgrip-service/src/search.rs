use futures::{StreamExt, stream};
use serde::Serialize;

use exgrip_domain::{artifact::ModelKeys, combination::Combination, criteria::QueryCriteria};
use exgrip_store::{filter::ScanFilter, scan::ScanRequest};

use crate::{CatalogService, Result, artifacts};

/// One catalog row enriched with artifact access and, when the product
/// directory is configured, storefront handles for its components.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationMatch {
	#[serde(flatten)]
	pub combination: Combination,
	pub stl_url: artifacts::ArtifactAccess,
	pub step_url: artifacts::ArtifactAccess,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub artifact_error: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub master_holder_handle: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub extension_adapter_handle: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub clamping_extension_handle: Option<String>,
}

/// Distinguishes "nothing matched" from an empty-but-successful payload so
/// the transport layer can surface it as its own status.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome {
	Matches(Vec<CombinationMatch>),
	NoMatches,
}

impl CatalogService {
	/// Runs one query end to end: filter build, full scan, artifact
	/// resolution. Enrichment is bounded by `artifacts.max_concurrency` and
	/// preserves store order.
	pub async fn search(&self, criteria: &QueryCriteria) -> Result<SearchOutcome> {
		let filter = ScanFilter::build(criteria)?;
		let request = ScanRequest { table: self.cfg.catalog.table.clone(), filter };
		let combinations = self.scanner.scan_all(&request).await?;

		tracing::info!(matched = combinations.len(), "Catalog scan finished.");

		// No artifact work for an empty result set.
		if combinations.is_empty() {
			return Ok(SearchOutcome::NoMatches);
		}

		let matches = stream::iter(combinations)
			.map(|combination| self.enrich(combination))
			.buffered(self.cfg.artifacts.max_concurrency)
			.collect()
			.await;

		Ok(SearchOutcome::Matches(matches))
	}

	async fn enrich(&self, combination: Combination) -> CombinationMatch {
		let keys = ModelKeys::for_combination(&combination);
		let resolved = artifacts::resolve(
			self.objects.as_ref(),
			&self.cfg.artifacts.bucket,
			&keys,
			std::time::Duration::from_secs(self.cfg.artifacts.url_expiry_secs),
		)
		.await;

		if let Some(error) = &resolved.error {
			tracing::warn!(id = %combination.id, error, "Artifact resolution degraded.");
		}

		let (master_holder_handle, extension_adapter_handle, clamping_extension_handle) =
			self.product_handles(&combination).await;

		CombinationMatch {
			combination,
			stl_url: resolved.stl,
			step_url: resolved.step,
			artifact_error: resolved.error,
			master_holder_handle,
			extension_adapter_handle,
			clamping_extension_handle,
		}
	}

	/// Storefront handles for the combination's components. Lookup failures
	/// degrade to `None`; handles are decoration, not part of the result
	/// contract.
	async fn product_handles(
		&self,
		combination: &Combination,
	) -> (Option<String>, Option<String>, Option<String>) {
		let Some(directory) = self
			.cfg
			.providers
			.as_ref()
			.and_then(|providers| providers.product_directory.as_ref())
		else {
			return (None, None, None);
		};

		let (master_holder, extension_adapter, clamping_extension) = tokio::join!(
			exgrip_providers::products::product_handle(directory, &combination.master_holder_sku),
			exgrip_providers::products::product_handle(directory, &combination.extension_adapter_sku),
			exgrip_providers::products::product_handle(directory, &combination.clamping_extension_sku),
		);

		(
			degrade(master_holder, &combination.master_holder_sku),
			degrade(extension_adapter, &combination.extension_adapter_sku),
			degrade(clamping_extension, &combination.clamping_extension_sku),
		)
	}
}

fn degrade(outcome: color_eyre::Result<Option<String>>, sku: &str) -> Option<String> {
	match outcome {
		Ok(handle) => handle,
		Err(err) => {
			tracing::warn!(sku, error = %err, "Product directory lookup failed.");

			None
		},
	}
}
