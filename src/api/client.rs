use gloo_net::http::Request;
use log::{debug, warn};
use serde_json::Value;

use super::error::Result;
use super::types::{GraphRequest, GraphResponse, IndexRequest, IndexResponse, SearchResponse};
use crate::config::ApiConfig;

/// Thin wrapper over the three backend endpoints. No retries, timeouts or caching.
#[derive(Clone, Debug)]
pub struct ApiClient {
	config: ApiConfig,
}

impl ApiClient {
	pub fn new(config: ApiConfig) -> Self {
		Self { config }
	}

	/// Ask the backend to index `directory`.
	pub async fn start_indexing(&self, directory: &str) -> Result<IndexResponse> {
		let url = self.config.endpoint("/index");
		debug!("POST {url} folder_path={directory}");
		let resp = Request::post(&url)
			.json(&IndexRequest {
				folder_path: directory,
			})?
			.send()
			.await
			.inspect_err(|e| warn!("index request failed: {e}"))?;
		let body: Value = resp.json().await?;
		Ok(IndexResponse::from_value(body))
	}

	/// Look up at most `top_k` files matching `query`, or the configured
	/// default when `top_k` is `None`.
	pub async fn search_files(&self, query: &str, top_k: Option<u32>) -> Result<SearchResponse> {
		let url = self.config.endpoint("/search");
		let top_k = top_k.unwrap_or(self.config.top_k).to_string();
		debug!("GET {url} query={query} top_k={top_k}");
		let resp = Request::get(&url)
			.query([("query", query), ("top_k", top_k.as_str())])
			.send()
			.await
			.inspect_err(|e| warn!("search request failed: {e}"))?;
		let body: Value = resp.json().await?;
		Ok(SearchResponse::from_value(body))
	}

	/// Fetch the node/link graph of an indexed directory.
	pub async fn fetch_graph(&self, directory: &str) -> Result<GraphResponse> {
		let url = self.config.endpoint("/graph");
		debug!("POST {url} path={directory}");
		let resp = Request::post(&url)
			.json(&GraphRequest { path: directory })?
			.send()
			.await
			.inspect_err(|e| warn!("graph request failed: {e}"))?;
		let body: Value = resp.json().await?;
		Ok(GraphResponse::from_value(body))
	}
}
