#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Throughput exceeded scanning table {table:?}.")]
	ThroughputExceeded { table: String },
	#[error("Retries exhausted after {attempts} attempts: {last_error}")]
	RetryExhausted { attempts: u32, last_error: String },
	#[error("Store call {operation} timed out after {after_ms} ms.")]
	Timeout { operation: &'static str, after_ms: u64 },
	#[error("Failed to decode attribute {attribute:?}: {message}")]
	Decode { attribute: String, message: String },
	#[error("Object {key:?} not found in bucket {bucket:?}.")]
	ObjectNotFound { bucket: String, key: String },
	#[error("Store error during {operation}: {message}")]
	Backend { operation: &'static str, message: String },
}
impl Error {
	/// Transient errors are retried by the scanner; everything else is fatal.
	pub fn is_transient(&self) -> bool {
		matches!(self, Self::ThroughputExceeded { .. })
	}
}
