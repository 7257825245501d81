//! Wire payloads of the backend endpoints and their discriminated outcomes.

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::components::force_graph::GraphData;

/// Placeholder shown for a hit without a usable path or name.
pub const UNKNOWN: &str = "Unknown";

/// Body of `POST /index`.
#[derive(Debug, Serialize)]
pub struct IndexRequest<'a> {
	pub folder_path: &'a str,
}

/// Body of `POST /graph`.
#[derive(Debug, Serialize)]
pub struct GraphRequest<'a> {
	pub path: &'a str,
}

/// The `status` field shared by the index and graph endpoints.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Status {
	Success,
	Other(String),
	#[default]
	Missing,
}

impl From<Value> for Status {
	fn from(value: Value) -> Self {
		match value {
			Value::String(s) if s == "success" => Status::Success,
			Value::String(s) => Status::Other(s),
			Value::Null => Status::Missing,
			other => Status::Other(other.to_string()),
		}
	}
}

/// Render a FastAPI style `detail` (a string, or a list of validation errors)
/// as a single message.
fn detail_message(detail: Option<Value>) -> Option<String> {
	match detail? {
		Value::Null => None,
		Value::String(s) if s.trim().is_empty() => None,
		Value::String(s) => Some(s),
		other => Some(other.to_string()),
	}
}

/// Decode a response body. Only a JSON object counts as a response: serde's
/// derived impls would also read an array positionally into the struct, so
/// anything else decodes to the empty response.
fn from_object<T: DeserializeOwned + Default>(body: Value) -> T {
	if !body.is_object() {
		warn!("response body is not an object: {body}");
		return T::default();
	}
	serde_json::from_value(body)
		.inspect_err(|e| warn!("malformed response body: {e}"))
		.unwrap_or_default()
}

/// Response of `POST /index`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct IndexResponse {
	#[serde(default)]
	pub status: Status,
	#[serde(default)]
	pub detail: Option<Value>,
}

/// What an index response means for the workflow.
#[derive(Clone, Debug, PartialEq)]
pub enum IndexOutcome {
	Indexed,
	Rejected { detail: Option<String> },
}

impl IndexResponse {
	pub fn from_value(body: Value) -> Self {
		from_object(body)
	}

	pub fn outcome(self) -> IndexOutcome {
		match self.status {
			Status::Success => IndexOutcome::Indexed,
			Status::Other(_) | Status::Missing => IndexOutcome::Rejected {
				detail: detail_message(self.detail),
			},
		}
	}
}

/// One normalized search hit, ready for display.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
	pub file_path: String,
	pub file_name: String,
	pub score: Option<f64>,
}

impl SearchResult {
	/// Normalize a loosely typed backend hit. Missing or empty text fields
	/// become [`UNKNOWN`]; a score survives only when it is a finite number.
	pub fn from_raw(raw: &Value) -> Self {
		let text = |key: &str| {
			raw.get(key)
				.and_then(Value::as_str)
				.filter(|s| !s.is_empty())
				.unwrap_or(UNKNOWN)
				.to_string()
		};
		Self {
			file_path: text("file_path"),
			file_name: text("file_name"),
			score: raw
				.get("score")
				.and_then(Value::as_f64)
				.filter(|s| s.is_finite()),
		}
	}
}

/// Response of `GET /search`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchResponse {
	#[serde(default)]
	pub results: Option<Value>,
	#[serde(default)]
	pub detail: Option<Value>,
}

/// What a search response means for the workflow.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
	Hits(Vec<SearchResult>),
	Failed { detail: Option<String> },
}

impl SearchResponse {
	/// Interpret any JSON body; anything that is not an object carrying a
	/// `results` list ends up as [`SearchOutcome::Failed`].
	pub fn from_value(body: Value) -> Self {
		from_object(body)
	}

	pub fn outcome(self) -> SearchOutcome {
		match self.results {
			Some(Value::Array(hits)) => {
				SearchOutcome::Hits(hits.iter().map(SearchResult::from_raw).collect())
			}
			_ => SearchOutcome::Failed {
				detail: detail_message(self.detail),
			},
		}
	}
}

/// Response of `POST /graph`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphResponse {
	#[serde(default)]
	pub status: Status,
	#[serde(default)]
	pub graph: Option<GraphData>,
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub detail: Option<Value>,
}

/// What a graph response means for the overlay.
#[derive(Clone, Debug)]
pub enum GraphOutcome {
	Ready(GraphData),
	Unavailable { message: Option<String> },
}

impl GraphResponse {
	pub fn from_value(body: Value) -> Self {
		from_object(body)
	}

	pub fn outcome(self) -> GraphOutcome {
		match (self.status, self.graph) {
			(Status::Success, Some(graph)) => GraphOutcome::Ready(graph),
			(Status::Success, None) | (Status::Other(_), _) | (Status::Missing, _) => {
				GraphOutcome::Unavailable {
					message: self
						.message
						.filter(|m| !m.trim().is_empty())
						.or_else(|| detail_message(self.detail)),
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn index_success() {
		let resp = IndexResponse::from_value(json!({ "status": "success" }));
		assert_eq!(resp.outcome(), IndexOutcome::Indexed);
	}

	#[test]
	fn index_rejected_keeps_detail() {
		let resp =
			IndexResponse::from_value(json!({ "detail": "Missing 'folder_path' in request body" }));
		assert_eq!(
			resp.outcome(),
			IndexOutcome::Rejected {
				detail: Some("Missing 'folder_path' in request body".into())
			}
		);

		let resp = IndexResponse::from_value(json!({ "status": "queued" }));
		assert_eq!(resp.outcome(), IndexOutcome::Rejected { detail: None });
	}

	#[test]
	fn normalizes_loose_hits() {
		let hit = SearchResult::from_raw(&json!({ "file_name": "a.txt", "score": "bad" }));
		assert_eq!(
			hit,
			SearchResult {
				file_path: "Unknown".into(),
				file_name: "a.txt".into(),
				score: None,
			}
		);

		let hit = SearchResult::from_raw(&json!({ "file_path": "", "file_name": null, "score": 0.5 }));
		assert_eq!(hit.file_path, UNKNOWN);
		assert_eq!(hit.file_name, UNKNOWN);
		assert_eq!(hit.score, Some(0.5));
	}

	#[test]
	fn search_hits_keep_response_order() {
		let body = json!({
			"query": "invoice",
			"results": [
				{ "file_path": "/docs/b.pdf", "file_name": "b.pdf", "score": 0.9 },
				{ "file_path": "/docs/a.pdf", "file_name": "a.pdf", "score": 0.4 },
			]
		});
		let SearchOutcome::Hits(hits) = SearchResponse::from_value(body).outcome() else {
			panic!("expected hits");
		};
		let names: Vec<_> = hits.iter().map(|h| h.file_name.as_str()).collect();
		assert_eq!(names, ["b.pdf", "a.pdf"]);
	}

	#[test]
	fn non_list_results_fail() {
		let outcome = SearchResponse::from_value(json!({ "results": "nope" })).outcome();
		assert_eq!(outcome, SearchOutcome::Failed { detail: None });

		let outcome =
			SearchResponse::from_value(json!({ "detail": "Search failed: store offline" })).outcome();
		assert_eq!(
			outcome,
			SearchOutcome::Failed {
				detail: Some("Search failed: store offline".into())
			}
		);

		assert_eq!(
			SearchResponse::from_value(Value::Null).outcome(),
			SearchOutcome::Failed { detail: None }
		);
	}

	#[test]
	fn validation_detail_is_flattened() {
		let outcome = SearchResponse::from_value(json!({
			"detail": [{ "loc": ["query", "query"], "msg": "field required" }]
		}))
		.outcome();
		let SearchOutcome::Failed { detail: Some(detail) } = outcome else {
			panic!("expected a detail message");
		};
		assert!(detail.contains("field required"));
	}

	#[test]
	fn graph_outcomes() {
		let resp = GraphResponse::from_value(json!({
			"status": "success",
			"graph": {
				"nodes": [
					{ "id": "/docs", "label": "docs", "type": "folder", "color": "rgba(93, 109, 126, 0.8)" },
					{ "id": "/docs/a.txt", "label": "a.txt", "type": "file", "size": 1.5 }
				],
				"links": [{ "source": "/docs", "target": "/docs/a.txt", "relationship": "contains" }]
			}
		}));
		let GraphOutcome::Ready(graph) = resp.outcome() else {
			panic!("expected a graph");
		};
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.links[0].target, "/docs/a.txt");

		let resp = GraphResponse::from_value(json!({ "status": "error", "message": "not a directory" }));
		assert!(matches!(
			resp.outcome(),
			GraphOutcome::Unavailable { message: Some(m) } if m == "not a directory"
		));

		let resp = GraphResponse::from_value(json!({ "status": "success" }));
		assert!(matches!(resp.outcome(), GraphOutcome::Unavailable { message: None }));
	}

	#[test]
	fn array_bodies_are_not_responses() {
		assert_eq!(
			IndexResponse::from_value(json!(["success"])).outcome(),
			IndexOutcome::Rejected { detail: None }
		);
		assert_eq!(
			SearchResponse::from_value(json!([[{ "file_name": "a.txt", "score": 0.5 }]])).outcome(),
			SearchOutcome::Failed { detail: None }
		);
		let graph = json!(["success", { "nodes": [{ "id": "x" }], "links": [] }]);
		assert!(matches!(
			GraphResponse::from_value(graph).outcome(),
			GraphOutcome::Unavailable { message: None }
		));
		assert_eq!(
			IndexResponse::from_value(json!("success")).outcome(),
			IndexOutcome::Rejected { detail: None }
		);
	}

	#[test]
	fn malformed_graph_object_is_unavailable() {
		let resp = GraphResponse::from_value(json!({ "status": "success", "graph": { "nodes": 3 } }));
		assert!(matches!(resp.outcome(), GraphOutcome::Unavailable { .. }));
	}

	#[test]
	fn status_from_non_string() {
		assert_eq!(Status::from(json!(1)), Status::Other("1".into()));
		assert_eq!(Status::from(Value::Null), Status::Missing);
	}
}
