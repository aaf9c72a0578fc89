use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

use exgrip_domain::combination::NOT_APPLICABLE;

/// Looks up the product-directory handle for a component SKU. Returns
/// `None` for the "NA" sentinel and for blank SKUs without touching the
/// network.
pub async fn product_handle(
	cfg: &exgrip_config::ProductDirectoryConfig,
	sku: &str,
) -> Result<Option<String>> {
	let sku = sku.trim();

	if sku.is_empty() || sku == NOT_APPLICABLE {
		return Ok(None);
	}

	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/graphql.json", cfg.api_base);
	let body = serde_json::json!({
		"query": "query($query: String!) { productVariants(first: 1, query: $query) { edges { node { product { handle } } } } }",
		"variables": { "query": format!("sku:{sku}") },
	});
	let res = client
		.post(url)
		.header("X-Shopify-Access-Token", &cfg.access_token)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	if let Some(errors) = json.get("errors") {
		return Err(eyre::eyre!("Product directory query failed, {errors}."));
	}

	Ok(parse_product_handle(&json))
}

fn parse_product_handle(json: &Value) -> Option<String> {
	json.pointer("/data/productVariants/edges/0/node/product/handle")
		.and_then(|handle| handle.as_str())
		.map(ToOwned::to_owned)
}
