use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub aws: Aws,
	pub catalog: Catalog,
	pub artifacts: Artifacts,
	pub providers: Option<Providers>,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Aws {
	pub region: String,
	/// Optional endpoint override for S3-compatible or local stacks.
	pub endpoint_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Catalog {
	pub table: String,
	#[serde(default = "default_request_timeout_ms")]
	pub request_timeout_ms: u64,
	#[serde(default)]
	pub scan_retry: ScanRetry,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScanRetry {
	/// Maximum retries of one page after a throughput-exceeded error.
	pub max_attempts: u32,
	pub base_delay_ms: u64,
}
impl Default for ScanRetry {
	fn default() -> Self {
		Self { max_attempts: 5, base_delay_ms: 100 }
	}
}

#[derive(Debug, Deserialize)]
pub struct Artifacts {
	pub bucket: String,
	#[serde(default = "default_url_expiry_secs")]
	pub url_expiry_secs: u64,
	/// Upper bound on combinations enriched concurrently.
	#[serde(default = "default_max_concurrency")]
	pub max_concurrency: usize,
	#[serde(default = "default_request_timeout_ms")]
	pub request_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub product_directory: Option<ProductDirectoryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ProductDirectoryConfig {
	pub api_base: String,
	pub access_token: String,
	pub timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
	10_000
}

fn default_url_expiry_secs() -> u64 {
	3_600
}

fn default_max_concurrency() -> usize {
	8
}
