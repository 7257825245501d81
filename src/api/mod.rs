//! HTTP access to the indexing, search and graph endpoints.

mod client;
mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
	GraphOutcome, GraphResponse, IndexOutcome, IndexResponse, SearchOutcome, SearchResponse,
	SearchResult,
};
