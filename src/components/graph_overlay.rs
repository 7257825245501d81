use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};

use super::force_graph::{ForceGraphCanvas, GraphData};
use crate::api::{ApiClient, ApiError, GraphOutcome, GraphResponse};

pub const GRAPH_FAILED: &str = "Could not load the graph.";

#[derive(Clone, Debug)]
enum GraphLoad {
	Loading,
	Ready(GraphData),
	Failed(String),
}

fn settle(response: Result<GraphResponse, ApiError>) -> GraphLoad {
	match response.map(GraphResponse::outcome) {
		Ok(GraphOutcome::Ready(graph)) => GraphLoad::Ready(graph),
		Ok(GraphOutcome::Unavailable { message }) => GraphLoad::Failed(match message {
			Some(message) => format!("{GRAPH_FAILED} {message}"),
			None => GRAPH_FAILED.to_string(),
		}),
		Err(err) => {
			warn!("graph fetch failed: {err}");
			GraphLoad::Failed(format!("{GRAPH_FAILED} {err}"))
		}
	}
}

/// Full-screen view of the indexed directory's graph.
#[component]
pub fn GraphOverlay(
	#[prop(into)] directory: Signal<String>,
	#[prop(into)] on_exit: Callback<()>,
) -> impl IntoView {
	let client = expect_context::<ApiClient>();
	let load = RwSignal::new(GraphLoad::Loading);

	Effect::new(move |_| {
		let dir = directory.get();
		load.set(GraphLoad::Loading);
		let client = client.clone();
		spawn_local(async move {
			let next = settle(client.fetch_graph(&dir).await);
			if directory.try_get_untracked().as_ref() != Some(&dir) {
				debug!("dropping graph response for {dir}, directory changed");
				return;
			}
			if load.try_set(next).is_some() {
				debug!("dropping graph response for {dir}, overlay closed");
			}
		});
	});

	view! {
		<div class="graph-overlay">
			<button class="graph-exit" on:click=move |_| on_exit.run(())>
				"Exit"
			</button>
			{move || match load.get() {
				GraphLoad::Loading => {
					view! { <div class="graph-status">"Loading graph..."</div> }.into_any()
				}
				GraphLoad::Failed(message) => {
					view! { <div class="graph-status graph-error">{message}</div> }.into_any()
				}
				GraphLoad::Ready(graph) => {
					let empty = graph.nodes.is_empty();
					let data = Signal::derive(move || graph.clone());
					view! {
						<ForceGraphCanvas data=data fullscreen=true />
						<Show when=move || empty>
							<div class="graph-status">"Nothing to show for this directory."</div>
						</Show>
					}
						.into_any()
				}
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn response(v: serde_json::Value) -> Result<GraphResponse, ApiError> {
		Ok(GraphResponse::from_value(v))
	}

	#[test]
	fn success_with_graph_is_ready() {
		let load = settle(response(json!({
			"status": "success",
			"graph": { "nodes": [{ "id": "/docs" }], "links": [] }
		})));
		assert!(matches!(load, GraphLoad::Ready(g) if g.nodes.len() == 1));
	}

	#[test]
	fn every_failure_is_visible() {
		let load = settle(response(json!({ "status": "error", "message": "boom" })));
		assert!(matches!(load, GraphLoad::Failed(m) if m == format!("{GRAPH_FAILED} boom")));

		let load = settle(response(json!({ "status": "success" })));
		assert!(matches!(load, GraphLoad::Failed(m) if m == GRAPH_FAILED));

		let err = ApiError::Request(gloo_net::Error::GlooError("Failed to fetch".into()));
		assert!(matches!(settle(Err(err)), GraphLoad::Failed(m) if m.contains("Failed to fetch")));
	}
}
