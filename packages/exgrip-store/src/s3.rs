use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{
	Client,
	error::{DisplayErrorContext, SdkError},
	presigning::PresigningConfig,
};

use crate::{Error, Result};

/// Head/exists plus time-limited-URL capability of the object store.
/// `signed_url` fails for absent objects; callers check `exists` first
/// because absence is a valid state, not an error.
#[async_trait]
pub trait ObjectStore
where
	Self: Send + Sync,
{
	async fn exists(&self, bucket: &str, key: &str) -> Result<bool>;

	async fn signed_url(&self, bucket: &str, key: &str, expiry: Duration) -> Result<String>;
}

pub struct S3ObjectStore {
	client: Client,
	timeout: Duration,
}
impl S3ObjectStore {
	pub fn new(client: Client, timeout: Duration) -> Self {
		Self { client, timeout }
	}
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
	async fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
		let head = self.client.head_object().bucket(bucket).key(key).send();

		match tokio::time::timeout(self.timeout, head).await {
			Err(_) => Err(Error::Timeout {
				operation: "s3.head_object",
				after_ms: self.timeout.as_millis() as u64,
			}),
			Ok(Ok(_)) => Ok(true),
			Ok(Err(SdkError::ServiceError(context))) if context.err().is_not_found() => Ok(false),
			Ok(Err(err)) => Err(Error::Backend {
				operation: "s3.head_object",
				message: DisplayErrorContext(&err).to_string(),
			}),
		}
	}

	async fn signed_url(&self, bucket: &str, key: &str, expiry: Duration) -> Result<String> {
		let presigning = PresigningConfig::expires_in(expiry).map_err(|err| Error::Backend {
			operation: "s3.presign",
			message: err.to_string(),
		})?;
		let presign = self.client.get_object().bucket(bucket).key(key).presigned(presigning);
		let presigned = tokio::time::timeout(self.timeout, presign)
			.await
			.map_err(|_| Error::Timeout {
				operation: "s3.presign",
				after_ms: self.timeout.as_millis() as u64,
			})?
			.map_err(|err| match &err {
				SdkError::ServiceError(context) if context.err().is_no_such_key() =>
					Error::ObjectNotFound { bucket: bucket.to_string(), key: key.to_string() },
				_ => Error::Backend {
					operation: "s3.presign",
					message: DisplayErrorContext(&err).to_string(),
				},
			})?;

		Ok(presigned.uri().to_string())
	}
}
