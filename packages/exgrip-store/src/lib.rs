pub mod dynamo;
pub mod filter;
pub mod record;
pub mod s3;
pub mod scan;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
