//! In-memory fakes for the record and object store boundaries, plus a
//! sleeper that records backoff delays instead of waiting them out.

use std::{
	collections::{HashSet, VecDeque},
	sync::Mutex,
	time::Duration,
};

use async_trait::async_trait;

use exgrip_store::{
	Error, Result,
	record::{AttrValue, WireRecord},
	s3::ObjectStore,
	scan::{ContinuationToken, RecordStore, ScanPage, ScanRequest, Sleeper},
};

/// One scripted response of a [`FakeRecordStore`].
pub enum FakeScanStep {
	Page(ScanPage),
	Throttle,
	Fail(&'static str),
}

/// Record store that replays a fixed script of page responses and logs
/// every request's continuation token.
pub struct FakeRecordStore {
	script: Mutex<VecDeque<FakeScanStep>>,
	requests: Mutex<Vec<Option<ContinuationToken>>>,
}
impl FakeRecordStore {
	pub fn new(script: Vec<FakeScanStep>) -> Self {
		Self { script: Mutex::new(script.into()), requests: Mutex::new(Vec::new()) }
	}

	/// Convenience constructor: the given pages chained with continuation
	/// tokens, the last page carrying none.
	pub fn with_pages(pages: Vec<Vec<WireRecord>>) -> Self {
		let count = pages.len();
		let script = pages
			.into_iter()
			.enumerate()
			.map(|(index, items)| {
				let next = (index + 1 < count).then(|| page_token(index));

				FakeScanStep::Page(ScanPage { items, next })
			})
			.collect();

		Self::new(script)
	}

	pub fn calls(&self) -> usize {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn request_tokens(&self) -> Vec<Option<ContinuationToken>> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
#[async_trait]
impl RecordStore for FakeRecordStore {
	async fn scan_page(
		&self,
		request: &ScanRequest,
		start: Option<&ContinuationToken>,
	) -> Result<ScanPage> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).push(start.cloned());

		let step = self.script.lock().unwrap_or_else(|err| err.into_inner()).pop_front();

		match step {
			Some(FakeScanStep::Page(page)) => Ok(page),
			Some(FakeScanStep::Throttle) =>
				Err(Error::ThroughputExceeded { table: request.table.clone() }),
			Some(FakeScanStep::Fail(message)) =>
				Err(Error::Backend { operation: "fake.scan", message: message.to_string() }),
			None => Err(Error::Backend {
				operation: "fake.scan",
				message: "scan script exhausted".to_string(),
			}),
		}
	}
}

/// Continuation token marking the page boundary after `index`.
pub fn page_token(index: usize) -> ContinuationToken {
	ContinuationToken::from([("id".to_string(), AttrValue::S(format!("page-{index}")))])
}

/// Minimal wire record for one combination row.
pub fn wire_combination(id: &str, spindle: &str, adapter: &str, length: &str) -> WireRecord {
	WireRecord::from([
		("id".to_string(), AttrValue::S(id.to_string())),
		("spindle".to_string(), AttrValue::S(spindle.to_string())),
		("productSKUMasterHolder".to_string(), AttrValue::S(format!("EXGRIP-{id}-MH"))),
		("productSKUExtensionAdapter".to_string(), AttrValue::S(adapter.to_string())),
		("productSKUClampingExtension".to_string(), AttrValue::S(format!("EXGRIP-{id}-CE"))),
		("length".to_string(), AttrValue::N(length.to_string())),
	])
}

/// Object store over an in-memory key set. Signing is logged so tests can
/// assert that absent objects are never signed.
#[derive(Default)]
pub struct FakeObjectStore {
	objects: HashSet<(String, String)>,
	failing: HashSet<(String, String)>,
	heads: Mutex<Vec<String>>,
	signed: Mutex<Vec<String>>,
}
impl FakeObjectStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_object(mut self, bucket: &str, key: &str) -> Self {
		self.objects.insert((bucket.to_string(), key.to_string()));

		self
	}

	/// Existence checks against this key fail with a backend error.
	pub fn with_failing(mut self, bucket: &str, key: &str) -> Self {
		self.failing.insert((bucket.to_string(), key.to_string()));

		self
	}

	pub fn head_calls(&self) -> Vec<String> {
		self.heads.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn signed_keys(&self) -> Vec<String> {
		self.signed.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
#[async_trait]
impl ObjectStore for FakeObjectStore {
	async fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
		self.heads.lock().unwrap_or_else(|err| err.into_inner()).push(key.to_string());

		if self.failing.contains(&(bucket.to_string(), key.to_string())) {
			return Err(Error::Backend {
				operation: "fake.head_object",
				message: format!("injected failure for {key:?}"),
			});
		}

		Ok(self.objects.contains(&(bucket.to_string(), key.to_string())))
	}

	async fn signed_url(&self, bucket: &str, key: &str, expiry: Duration) -> Result<String> {
		if !self.objects.contains(&(bucket.to_string(), key.to_string())) {
			return Err(Error::ObjectNotFound { bucket: bucket.to_string(), key: key.to_string() });
		}

		self.signed.lock().unwrap_or_else(|err| err.into_inner()).push(key.to_string());

		Ok(format!("https://models.test/{bucket}/{key}?expires={}", expiry.as_secs()))
	}
}

/// Sleeper that records each requested delay without waiting.
#[derive(Default)]
pub struct RecordingSleeper {
	delays: Mutex<Vec<Duration>>,
}
impl RecordingSleeper {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn delays(&self) -> Vec<Duration> {
		self.delays.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
#[async_trait]
impl Sleeper for RecordingSleeper {
	async fn sleep(&self, delay: Duration) {
		self.delays.lock().unwrap_or_else(|err| err.into_inner()).push(delay);
	}
}
