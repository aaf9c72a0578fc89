use std::{sync::Arc, time::Duration};

use exgrip_domain::criteria::QueryCriteria;
use exgrip_store::{
	Error,
	filter::ScanFilter,
	scan::{RetryConfig, ScanRequest, Scanner},
};
use exgrip_testkit::{FakeRecordStore, FakeScanStep, RecordingSleeper, page_token, wire_combination};

fn request() -> ScanRequest {
	ScanRequest {
		table: "combinations".to_string(),
		filter: ScanFilter::build(&QueryCriteria::default()).unwrap(),
	}
}

#[tokio::test]
async fn concatenates_pages_in_store_order() {
	let store = Arc::new(FakeRecordStore::with_pages(vec![
		vec![
			wire_combination("A1", "BBT40", "NA", "100"),
			wire_combination("A2", "BBT40", "EXGRIP-B2", "120"),
		],
		vec![wire_combination("B1", "HSK63", "NA", "140")],
		vec![wire_combination("C1", "HSK63", "NA", "160")],
	]));
	let scanner = Scanner::new(store.clone());
	let combinations = scanner.scan_all(&request()).await.unwrap();

	assert_eq!(
		combinations.iter().map(|combination| combination.id.as_str()).collect::<Vec<_>>(),
		["A1", "A2", "B1", "C1"]
	);
	// Each request carries the previous page's token, the first carries none.
	assert_eq!(
		store.request_tokens(),
		[None, Some(page_token(0)), Some(page_token(1))]
	);
}

#[tokio::test]
async fn retries_throttled_page_with_doubling_delays() {
	let store = Arc::new(FakeRecordStore::new(vec![
		FakeScanStep::Throttle,
		FakeScanStep::Throttle,
		FakeScanStep::Page(Default::default()),
	]));
	let sleeper = Arc::new(RecordingSleeper::new());
	let scanner = Scanner::new(store.clone())
		.with_retry(RetryConfig { max_attempts: 5, base_delay: Duration::from_millis(100) })
		.with_sleeper(sleeper.clone());
	let combinations = scanner.scan_all(&request()).await.unwrap();

	assert!(combinations.is_empty());
	assert_eq!(store.calls(), 3);
	assert_eq!(sleeper.delays(), [Duration::from_millis(100), Duration::from_millis(200)]);
}

#[tokio::test]
async fn exhausts_retries_after_persistent_throttling() {
	let store = Arc::new(FakeRecordStore::new(vec![
		FakeScanStep::Throttle,
		FakeScanStep::Throttle,
		FakeScanStep::Throttle,
		FakeScanStep::Throttle,
	]));
	let sleeper = Arc::new(RecordingSleeper::new());
	let scanner = Scanner::new(store.clone())
		.with_retry(RetryConfig { max_attempts: 3, base_delay: Duration::from_millis(10) })
		.with_sleeper(sleeper.clone());

	match scanner.scan_all(&request()).await {
		Err(Error::RetryExhausted { attempts, .. }) => assert_eq!(attempts, 3),
		other => panic!("expected RetryExhausted, got {other:?}"),
	}
	// Initial attempt plus three retries.
	assert_eq!(store.calls(), 4);
	assert_eq!(sleeper.delays().len(), 3);
}

#[tokio::test]
async fn non_transient_error_propagates_without_retry() {
	let store = Arc::new(FakeRecordStore::new(vec![FakeScanStep::Fail("access denied")]));
	let sleeper = Arc::new(RecordingSleeper::new());
	let scanner = Scanner::new(store.clone()).with_sleeper(sleeper.clone());

	assert!(matches!(scanner.scan_all(&request()).await, Err(Error::Backend { .. })));
	assert_eq!(store.calls(), 1);
	assert!(sleeper.delays().is_empty());
}
