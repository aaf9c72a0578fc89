pub mod artifact;
pub mod combination;
pub mod criteria;

mod error;

pub use error::{Error, Result};
