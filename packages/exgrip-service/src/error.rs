pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid request, {message}")]
	InvalidRequest { message: String },
	#[error("store operation failed, {message}")]
	Store { message: String },
}
impl From<exgrip_domain::Error> for Error {
	fn from(err: exgrip_domain::Error) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}
impl From<exgrip_store::Error> for Error {
	fn from(err: exgrip_store::Error) -> Self {
		Self::Store { message: err.to_string() }
	}
}
