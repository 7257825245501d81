use thiserror::Error;

/// A request that never produced a usable JSON body.
#[derive(Error, Debug)]
pub enum ApiError {
	/// The browser could not reach the backend, or the body was not JSON.
	#[error("{0}")]
	Request(#[from] gloo_net::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;
