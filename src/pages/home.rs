use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;
use web_sys::MouseEvent;

use crate::api::ApiClient;
use crate::components::graph_overlay::GraphOverlay;
use crate::components::result_card::ResultCard;
use crate::workflow::{MAPPED_NOTICE, Workflow};

/// The directory alone, so readers are not woken by unrelated workflow changes
/// such as closing the overlay.
fn directory_of(workflow: RwSignal<Workflow>) -> Memo<String> {
	Memo::new(move |_| workflow.with(|w| w.directory.clone()))
}

/// Map a directory, search it, and open its graph.
#[component]
pub fn Home() -> impl IntoView {
	let client = expect_context::<ApiClient>();
	let workflow = RwSignal::new(Workflow::default());

	let map_client = client.clone();
	let on_map = move |_: MouseEvent| {
		let Some(directory) = workflow.try_update(Workflow::begin_map).flatten() else {
			return;
		};
		info!("mapping {directory}");
		let client = map_client.clone();
		spawn_local(async move {
			let response = client.start_indexing(&directory).await;
			let _ = workflow.try_update(|w| w.finish_map(response));
		});
	};

	let on_search = move |_: MouseEvent| {
		let Some(query) = workflow.try_update(Workflow::begin_search).flatten() else {
			return;
		};
		info!("searching for {query}");
		let client = client.clone();
		spawn_local(async move {
			let response = client.search_files(&query, None).await;
			let _ = workflow.try_update(|w| w.finish_search(response));
		});
	};

	let busy = move || workflow.with(Workflow::busy);
	let directory = directory_of(workflow);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="app">
				<h1>"Trexa"</h1>
				<div class="workflow-controls">
					<input
						type="text"
						placeholder="Directory to index..."
						prop:value=move || directory.get()
						on:input=move |ev| {
							workflow.update(|w| w.set_directory(event_target_value(&ev)))
						}
						disabled=busy
					/>
					<button on:click=on_map disabled=move || !workflow.with(Workflow::can_map)>
						{move || if workflow.with(|w| w.is_mapping) { "Mapping..." } else { "Map" }}
					</button>
					<button
						class="view-map"
						on:click=move |_| {
							workflow.update(|w| {
								w.open_graph();
							})
						}
						disabled=move || !workflow.with(Workflow::can_view_graph)
					>
						"View Map"
					</button>
				</div>

				<Show when=move || workflow.with(|w| w.show_graph)>
					<GraphOverlay
						directory=directory
						on_exit=move |_| workflow.update(Workflow::close_graph)
					/>
				</Show>

				<div class="workflow-controls">
					<input
						type="text"
						placeholder="File name or search query..."
						prop:value=move || workflow.with(|w| w.query.clone())
						on:input=move |ev| workflow.update(|w| w.set_query(event_target_value(&ev)))
						disabled=move || !workflow.with(Workflow::can_edit_query)
					/>
					<button on:click=on_search disabled=move || !workflow.with(Workflow::can_search)>
						{move || if workflow.with(|w| w.is_searching) { "Searching..." } else { "Search" }}
					</button>
				</div>

				<Show when=move || workflow.with(|w| w.is_mapped)>
					<div class="notice">{MAPPED_NOTICE}</div>
				</Show>
				{move || {
					workflow
						.with(|w| w.error_msg.clone())
						.map(|msg| view! { <div class="error">{msg}</div> })
				}}
				<div class="results">
					{move || {
						workflow
							.with(|w| w.results.clone())
							.into_iter()
							.map(|result| view! { <ResultCard result=result /> })
							.collect_view()
					}}
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	#[test]
	fn directory_readers_ignore_other_workflow_changes() {
		let workflow = RwSignal::new(Workflow::default());
		let directory = directory_of(workflow);
		let runs = Arc::new(AtomicUsize::new(0));
		let counted = runs.clone();
		let reader = Memo::new(move |_| {
			counted.fetch_add(1, Ordering::SeqCst);
			directory.get()
		});

		assert_eq!(reader.get(), "");
		assert_eq!(runs.load(Ordering::SeqCst), 1);

		workflow.update(|w| w.set_query("invoice".into()));
		workflow.update(Workflow::close_graph);
		assert_eq!(reader.get(), "");
		assert_eq!(runs.load(Ordering::SeqCst), 1);

		workflow.update(|w| w.set_directory("/docs".into()));
		assert_eq!(reader.get(), "/docs");
		assert_eq!(runs.load(Ordering::SeqCst), 2);
	}
}
