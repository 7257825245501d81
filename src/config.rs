//! Backend origin and request defaults, resolved at build time.

/// Origin used when `TREXA_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
/// Number of search hits requested when `TREXA_TOP_K` is not set.
pub const DEFAULT_TOP_K: u32 = 5;
/// Largest `top_k` the search endpoint accepts.
pub const MAX_TOP_K: u32 = 20;

/// Where the client sends its requests and how many hits it asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
	/// Backend origin without a trailing slash.
	pub base_url: String,
	/// Default number of search results to request.
	pub top_k: u32,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_API_URL.to_string(),
			top_k: DEFAULT_TOP_K,
		}
	}
}

impl ApiConfig {
	/// Build from the `TREXA_API_URL` / `TREXA_TOP_K` variables captured by the compiler.
	pub fn from_env() -> Self {
		Self::from_values(option_env!("TREXA_API_URL"), option_env!("TREXA_TOP_K"))
	}

	/// Build from optional raw values, falling back to defaults for anything
	/// missing or unparsable.
	pub fn from_values(base_url: Option<&str>, top_k: Option<&str>) -> Self {
		let base_url = base_url
			.map(|u| u.trim().trim_end_matches('/'))
			.filter(|u| !u.is_empty())
			.unwrap_or(DEFAULT_API_URL)
			.to_string();
		let top_k = top_k
			.and_then(|k| k.trim().parse::<u32>().ok())
			.map(|k| k.clamp(1, MAX_TOP_K))
			.unwrap_or(DEFAULT_TOP_K);
		Self { base_url, top_k }
	}

	/// Absolute URL for an endpoint path such as `"/index"`.
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path.trim_start_matches('/'))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_when_unset() {
		let cfg = ApiConfig::from_values(None, None);
		assert_eq!(cfg, ApiConfig::default());
		assert_eq!(cfg.endpoint("/search"), "http://localhost:8080/search");
	}

	#[test]
	fn trims_trailing_slashes() {
		let cfg = ApiConfig::from_values(Some(" http://api.local:9000// "), None);
		assert_eq!(cfg.base_url, "http://api.local:9000");
		assert_eq!(cfg.endpoint("graph"), "http://api.local:9000/graph");
	}

	#[test]
	fn blank_url_falls_back() {
		let cfg = ApiConfig::from_values(Some("  "), None);
		assert_eq!(cfg.base_url, DEFAULT_API_URL);
	}

	#[test]
	fn top_k_is_clamped_to_backend_range() {
		assert_eq!(ApiConfig::from_values(None, Some("0")).top_k, 1);
		assert_eq!(ApiConfig::from_values(None, Some("50")).top_k, MAX_TOP_K);
		assert_eq!(ApiConfig::from_values(None, Some("12")).top_k, 12);
		assert_eq!(ApiConfig::from_values(None, Some("lots")).top_k, DEFAULT_TOP_K);
	}
}
