use leptos::prelude::*;
use trexa::App;

fn main() {
	trexa::init_logging();

	mount_to_body(|| {
		view! { <App /> }
	})
}
