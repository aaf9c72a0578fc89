pub mod artifacts;
pub mod search;

mod error;
pub use error::{Error, Result};

use std::{sync::Arc, time::Duration};

use exgrip_config::Config;
use exgrip_store::{
	s3::ObjectStore,
	scan::{RecordStore, RetryConfig, Scanner, Sleeper},
};

/// Query front of the combinations catalog. Store clients are injected at
/// construction; nothing below this type knows which backend it talks to.
pub struct CatalogService {
	pub cfg: Config,
	scanner: Scanner,
	objects: Arc<dyn ObjectStore>,
}
impl CatalogService {
	pub fn new(cfg: Config, records: Arc<dyn RecordStore>, objects: Arc<dyn ObjectStore>) -> Self {
		let retry = RetryConfig {
			max_attempts: cfg.catalog.scan_retry.max_attempts,
			base_delay: Duration::from_millis(cfg.catalog.scan_retry.base_delay_ms),
		};
		let scanner = Scanner::new(records).with_retry(retry);

		Self { cfg, scanner, objects }
	}

	pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
		self.scanner = self.scanner.with_sleeper(sleeper);

		self
	}
}
