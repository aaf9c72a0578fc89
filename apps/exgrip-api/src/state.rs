use std::{sync::Arc, time::Duration};

use aws_config::{BehaviorVersion, Region};

use exgrip_service::CatalogService;
use exgrip_store::{dynamo::DynamoRecordStore, s3::S3ObjectStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CatalogService>,
}
impl AppState {
	pub async fn new(config: exgrip_config::Config) -> color_eyre::Result<Self> {
		let mut loader = aws_config::defaults(BehaviorVersion::latest())
			.region(Region::new(config.aws.region.clone()));

		if let Some(endpoint_url) = &config.aws.endpoint_url {
			loader = loader.endpoint_url(endpoint_url);
		}

		let sdk_config = loader.load().await;
		let records = Arc::new(DynamoRecordStore::new(
			aws_sdk_dynamodb::Client::new(&sdk_config),
			Duration::from_millis(config.catalog.request_timeout_ms),
		));
		let objects = Arc::new(S3ObjectStore::new(
			aws_sdk_s3::Client::new(&sdk_config),
			Duration::from_millis(config.artifacts.request_timeout_ms),
		));
		let service = CatalogService::new(config, records, objects);

		Ok(Self { service: Arc::new(service) })
	}

	/// State over an already-built service, used by tests to substitute
	/// in-memory stores.
	pub fn with_service(service: CatalogService) -> Self {
		Self { service: Arc::new(service) }
	}
}
