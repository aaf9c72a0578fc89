pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid length filter {raw:?}: {message}")]
	InvalidLengthFilter { raw: String, message: String },
}
