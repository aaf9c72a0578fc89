use std::time::Duration;

use serde::Serialize;

use exgrip_domain::artifact::ModelKeys;
use exgrip_store::s3::ObjectStore;

/// Outcome of resolving one derived model file. `Missing` serializes as
/// JSON `null` so absent files stay visible in result rows.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArtifactAccess {
	Url(String),
	Missing,
}
impl ArtifactAccess {
	pub fn is_missing(&self) -> bool {
		matches!(self, Self::Missing)
	}
}
/// Both model files of one combination, resolved independently. A failure
/// on one side never hides the other side's URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedArtifacts {
	pub stl: ArtifactAccess,
	pub step: ArtifactAccess,
	/// First resolution failure, if any; the affected side reads `Missing`.
	pub error: Option<String>,
}

pub async fn resolve(
	objects: &dyn ObjectStore,
	bucket: &str,
	keys: &ModelKeys,
	expiry: Duration,
) -> ResolvedArtifacts {
	let (stl, step) = tokio::join!(
		resolve_one(objects, bucket, &keys.stl, expiry),
		resolve_one(objects, bucket, &keys.step, expiry),
	);
	let (stl, stl_error) = split(stl);
	let (step, step_error) = split(step);

	ResolvedArtifacts { stl, step, error: stl_error.or(step_error) }
}

async fn resolve_one(
	objects: &dyn ObjectStore,
	bucket: &str,
	key: &str,
	expiry: Duration,
) -> exgrip_store::Result<ArtifactAccess> {
	if !objects.exists(bucket, key).await? {
		return Ok(ArtifactAccess::Missing);
	}

	Ok(ArtifactAccess::Url(objects.signed_url(bucket, key, expiry).await?))
}

fn split(outcome: exgrip_store::Result<ArtifactAccess>) -> (ArtifactAccess, Option<String>) {
	match outcome {
		Ok(access) => (access, None),
		Err(err) => (ArtifactAccess::Missing, Some(err.to_string())),
	}
}
