//! Map-then-search workflow state.
//!
//! [`Workflow`] holds every piece of state the home page renders. The
//! `begin_*` methods check the same guards that disable the buttons and hand
//! back the request argument; the `finish_*` methods fold a response (or
//! error) back in and always clear the in-flight flag.

use crate::api::{ApiError, IndexOutcome, IndexResponse, SearchOutcome, SearchResponse, SearchResult};

pub const MAP_FAILED: &str = "Mapping failed.";
pub const SEARCH_FAILED: &str = "Search failed.";
pub const NO_RESULTS: &str = "No results found or backend error.";
pub const MAPPED_NOTICE: &str = "Mapping complete. You can now search.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Workflow {
	pub directory: String,
	pub query: String,
	pub is_mapped: bool,
	pub is_mapping: bool,
	pub is_searching: bool,
	pub show_graph: bool,
	pub results: Vec<SearchResult>,
	pub error_msg: Option<String>,
}

fn error_message(err: &ApiError, fallback: &str) -> String {
	let msg = err.to_string();
	if msg.trim().is_empty() {
		fallback.to_string()
	} else {
		msg
	}
}

impl Workflow {
	/// Either request is outstanding.
	pub fn busy(&self) -> bool {
		self.is_mapping || self.is_searching
	}

	pub fn can_map(&self) -> bool {
		!self.directory.is_empty() && !self.busy()
	}

	/// Query input accepts typing.
	pub fn can_edit_query(&self) -> bool {
		self.is_mapped && !self.busy()
	}

	pub fn can_search(&self) -> bool {
		self.can_edit_query() && !self.query.is_empty()
	}

	pub fn can_view_graph(&self) -> bool {
		self.is_mapped && !self.busy()
	}

	pub fn set_directory(&mut self, directory: String) {
		if !self.busy() {
			self.directory = directory;
		}
	}

	pub fn set_query(&mut self, query: String) {
		if self.can_edit_query() {
			self.query = query;
		}
	}

	/// Enter the mapping phase and return the directory to index.
	pub fn begin_map(&mut self) -> Option<String> {
		if !self.can_map() {
			return None;
		}
		self.error_msg = None;
		self.results.clear();
		self.is_mapped = false;
		self.is_mapping = true;
		Some(self.directory.clone())
	}

	pub fn finish_map(&mut self, response: Result<IndexResponse, ApiError>) {
		match response.map(IndexResponse::outcome) {
			Ok(IndexOutcome::Indexed) => self.is_mapped = true,
			Ok(IndexOutcome::Rejected { detail: None }) => {
				self.error_msg = Some(MAP_FAILED.to_string());
			}
			Ok(IndexOutcome::Rejected {
				detail: Some(detail),
			}) => {
				self.error_msg = Some(format!("{MAP_FAILED} {detail}"));
			}
			Err(err) => self.error_msg = Some(error_message(&err, MAP_FAILED)),
		}
		self.is_mapping = false;
	}

	/// Enter the searching phase and return the query to send.
	pub fn begin_search(&mut self) -> Option<String> {
		if !self.can_search() {
			return None;
		}
		self.error_msg = None;
		self.results.clear();
		self.is_searching = true;
		Some(self.query.clone())
	}

	pub fn finish_search(&mut self, response: Result<SearchResponse, ApiError>) {
		match response.map(SearchResponse::outcome) {
			Ok(SearchOutcome::Hits(hits)) => self.results = hits,
			Ok(SearchOutcome::Failed { detail }) => {
				self.results.clear();
				self.error_msg = Some(detail.unwrap_or_else(|| NO_RESULTS.to_string()));
			}
			Err(err) => {
				self.results.clear();
				self.error_msg = Some(error_message(&err, SEARCH_FAILED));
			}
		}
		self.is_searching = false;
	}

	pub fn open_graph(&mut self) -> bool {
		if self.can_view_graph() {
			self.show_graph = true;
		}
		self.show_graph
	}

	pub fn close_graph(&mut self) {
		self.show_graph = false;
	}
}
