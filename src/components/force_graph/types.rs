use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	pub id: String,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub color: Option<String>,
	/// Category for automatic coloring; the backend may send a string or a number.
	#[serde(default)]
	pub group: Option<Value>,
}

impl GraphNode {
	/// Text shown next to the node: label, else name, else id.
	pub fn display_label(&self) -> &str {
		[&self.label, &self.name]
			.into_iter()
			.flatten()
			.map(String::as_str)
			.find(|s| !s.is_empty())
			.unwrap_or(self.id.as_str())
	}

	/// Normalized group key, `None` when the node has no group.
	pub fn group_key(&self) -> Option<String> {
		match self.group.as_ref()? {
			Value::Null => None,
			Value::String(s) => Some(s.clone()),
			other => Some(other.to_string()),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub links: Vec<GraphLink>,
}
