use std::sync::Arc;

use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use tower::util::ServiceExt;

use exgrip_api::{routes, state::AppState};
use exgrip_service::CatalogService;
use exgrip_testkit::{FakeObjectStore, FakeRecordStore, wire_combination};

fn test_config() -> exgrip_config::Config {
	toml::from_str(
		r#"
		[service]
		http_bind = "127.0.0.1:0"
		log_level = "info"

		[aws]
		region = "eu-central-1"

		[catalog]
		table = "combinations"

		[artifacts]
		bucket = "exgrip-models"
		"#,
	)
	.expect("Failed to parse test config.")
}

fn app(records: FakeRecordStore, objects: FakeObjectStore) -> axum::Router {
	let service = CatalogService::new(test_config(), Arc::new(records), Arc::new(objects));

	routes::router(AppState::with_service(service))
}

fn query(payload: serde_json::Value) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri("/process-data")
		.header("content-type", "application/json")
		.body(Body::from(payload.to_string()))
		.expect("Failed to build request.")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&body).expect("Failed to parse response.")
}

#[tokio::test]
async fn health_ok() {
	let app = app(FakeRecordStore::with_pages(vec![vec![]]), FakeObjectStore::new());
	let response = app
		.oneshot(Request::builder().uri("/health").body(Body::empty()).expect("Failed to build request."))
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn returns_matches_with_signed_urls() {
	let records = FakeRecordStore::with_pages(vec![vec![wire_combination(
		"A1", "BBT40", "NA", "100",
	)]]);
	let objects = FakeObjectStore::new()
		.with_object("exgrip-models", "3d-files/BBT40/A1-MH+A1-CE.STL")
		.with_object("exgrip-models", "3d-files/BBT40/A1-MH+A1-CE.step");
	let response = app(records, objects)
		.oneshot(query(serde_json::json!({ "spindle": "BBT40" })))
		.await
		.expect("Failed to call /process-data.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;

	assert_eq!(json[0]["id"], "A1");
	assert_eq!(json[0]["productSKUMasterHolder"], "EXGRIP-A1-MH");
	assert!(json[0]["stlUrl"].as_str().expect("stlUrl must be a string").contains("A1-MH+A1-CE.STL"));
}

#[tokio::test]
async fn missing_artifact_serializes_as_null() {
	let records = FakeRecordStore::with_pages(vec![vec![wire_combination(
		"A1", "BBT40", "NA", "100",
	)]]);
	let objects =
		FakeObjectStore::new().with_object("exgrip-models", "3d-files/BBT40/A1-MH+A1-CE.STL");
	let response = app(records, objects)
		.oneshot(query(serde_json::json!({ "spindle": "BBT40" })))
		.await
		.expect("Failed to call /process-data.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;

	assert!(json[0]["stlUrl"].is_string());
	assert!(json[0]["stepUrl"].is_null());
}

#[tokio::test]
async fn empty_result_set_is_a_404_with_message() {
	let response = app(FakeRecordStore::with_pages(vec![vec![]]), FakeObjectStore::new())
		.oneshot(query(serde_json::json!({ "spindle": "HSK63" })))
		.await
		.expect("Failed to call /process-data.");

	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let json = json_body(response).await;

	assert_eq!(json["message"], routes::NO_MATCH_MESSAGE);
}

#[tokio::test]
async fn blank_criteria_match_the_whole_catalog() {
	let records = FakeRecordStore::with_pages(vec![vec![wire_combination(
		"A1", "BBT40", "NA", "100",
	)]]);
	let response = app(records, FakeObjectStore::new())
		.oneshot(query(serde_json::json!({ "spindle": "", "length": "" })))
		.await
		.expect("Failed to call /process-data.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;

	assert_eq!(json[0]["id"], "A1");
}

#[tokio::test]
async fn malformed_length_filter_is_a_400() {
	let response = app(FakeRecordStore::with_pages(vec![vec![]]), FakeObjectStore::new())
		.oneshot(query(serde_json::json!({ "length": "<=abc" })))
		.await
		.expect("Failed to call /process-data.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let json = json_body(response).await;

	assert_eq!(json["error_code"], "invalid_request");
}

#[tokio::test]
async fn store_failure_is_a_500() {
	let records = FakeRecordStore::new(vec![exgrip_testkit::FakeScanStep::Fail("access denied")]);
	let response = app(records, FakeObjectStore::new())
		.oneshot(query(serde_json::json!({ "spindle": "BBT40" })))
		.await
		.expect("Failed to call /process-data.");

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let json = json_body(response).await;

	assert_eq!(json["error_code"], "store_error");
}
