use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use exgrip_domain::combination::Combination;

use crate::{
	Error, Result,
	filter::ScanFilter,
	record::{self, AttrValue, WireRecord},
};

/// Opaque page cursor, echoed back verbatim on the next page request.
pub type ContinuationToken = HashMap<String, AttrValue>;

#[derive(Clone, Debug)]
pub struct ScanRequest {
	pub table: String,
	pub filter: ScanFilter,
}

#[derive(Clone, Debug, Default)]
pub struct ScanPage {
	pub items: Vec<WireRecord>,
	pub next: Option<ContinuationToken>,
}

/// Scan-with-pagination capability of the record store. The scanner only
/// ever needs one page at a time; fakes substitute here in tests.
#[async_trait]
pub trait RecordStore
where
	Self: Send + Sync,
{
	async fn scan_page(
		&self,
		request: &ScanRequest,
		start: Option<&ContinuationToken>,
	) -> Result<ScanPage>;
}

/// Sleep seam so backoff delays are observable in tests.
#[async_trait]
pub trait Sleeper
where
	Self: Send + Sync,
{
	async fn sleep(&self, delay: Duration);
}

pub struct TokioSleeper;
#[async_trait]
impl Sleeper for TokioSleeper {
	async fn sleep(&self, delay: Duration) {
		tokio::time::sleep(delay).await;
	}
}

#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
	/// Maximum retries of a single page after consecutive throughput errors.
	pub max_attempts: u32,
	pub base_delay: Duration,
}
impl Default for RetryConfig {
	fn default() -> Self {
		Self { max_attempts: 5, base_delay: Duration::from_millis(100) }
	}
}
impl RetryConfig {
	/// Delay before retry number `attempt` (zero-based): base × 2^attempt.
	pub fn delay(&self, attempt: u32) -> Duration {
		self.base_delay.saturating_mul(2_u32.saturating_pow(attempt.min(16)))
	}
}

/// Drives a filtered scan to exhaustion, decoding and flattening every page
/// in store order. Page fetches are inherently sequential: each depends on
/// the previous page's continuation token.
pub struct Scanner {
	store: Arc<dyn RecordStore>,
	retry: RetryConfig,
	sleeper: Arc<dyn Sleeper>,
}
impl Scanner {
	pub fn new(store: Arc<dyn RecordStore>) -> Self {
		Self { store, retry: RetryConfig::default(), sleeper: Arc::new(TokioSleeper) }
	}

	pub fn with_retry(mut self, retry: RetryConfig) -> Self {
		self.retry = retry;

		self
	}

	pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
		self.sleeper = sleeper;

		self
	}

	pub async fn scan_all(&self, request: &ScanRequest) -> Result<Vec<Combination>> {
		let mut combinations = Vec::new();
		let mut start: Option<ContinuationToken> = None;
		let mut failures = 0_u32;

		loop {
			match self.store.scan_page(request, start.as_ref()).await {
				Ok(page) => {
					// One good page resets the consecutive-failure budget.
					failures = 0;

					for item in &page.items {
						combinations.push(record::decode(item)?);
					}

					tracing::debug!(
						fetched = page.items.len(),
						total = combinations.len(),
						"Fetched catalog scan page."
					);

					match page.next {
						Some(next) => start = Some(next),
						None => break,
					}
				},
				Err(err) if err.is_transient() => {
					if failures >= self.retry.max_attempts {
						return Err(Error::RetryExhausted {
							attempts: failures,
							last_error: err.to_string(),
						});
					}

					let delay = self.retry.delay(failures);

					failures += 1;

					tracing::warn!(
						attempt = failures,
						max_attempts = self.retry.max_attempts,
						?delay,
						"Throughput exceeded; retrying the same page."
					);

					self.sleeper.sleep(delay).await;
				},
				Err(err) => return Err(err),
			}
		}

		Ok(combinations)
	}
}
