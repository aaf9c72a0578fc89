mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Artifacts, Aws, Catalog, Config, ProductDirectoryConfig, Providers, ScanRetry, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.aws.region.trim().is_empty() {
		return Err(Error::Validation { message: "aws.region must be non-empty.".to_string() });
	}
	if cfg.catalog.table.trim().is_empty() {
		return Err(Error::Validation { message: "catalog.table must be non-empty.".to_string() });
	}
	if cfg.catalog.request_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "catalog.request_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.catalog.scan_retry.base_delay_ms == 0 {
		return Err(Error::Validation {
			message: "catalog.scan_retry.base_delay_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.artifacts.bucket.trim().is_empty() {
		return Err(Error::Validation {
			message: "artifacts.bucket must be non-empty.".to_string(),
		});
	}
	if cfg.artifacts.url_expiry_secs == 0 {
		return Err(Error::Validation {
			message: "artifacts.url_expiry_secs must be greater than zero.".to_string(),
		});
	}
	if cfg.artifacts.max_concurrency == 0 {
		return Err(Error::Validation {
			message: "artifacts.max_concurrency must be greater than zero.".to_string(),
		});
	}
	if cfg.artifacts.request_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "artifacts.request_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if let Some(directory) =
		cfg.providers.as_ref().and_then(|providers| providers.product_directory.as_ref())
	{
		if directory.api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: "providers.product_directory.api_base must be non-empty.".to_string(),
			});
		}
		if directory.access_token.trim().is_empty() {
			return Err(Error::Validation {
				message: "providers.product_directory.access_token must be non-empty.".to_string(),
			});
		}
		if directory.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "providers.product_directory.timeout_ms must be greater than zero."
					.to_string(),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.aws.endpoint_url.as_deref().map(|url| url.trim().is_empty()).unwrap_or(false) {
		cfg.aws.endpoint_url = None;
	}
	if cfg
		.providers
		.as_ref()
		.map(|providers| providers.product_directory.is_none())
		.unwrap_or(false)
	{
		cfg.providers = None;
	}
}
