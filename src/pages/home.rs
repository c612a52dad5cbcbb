use leptos::prelude::*;

use crate::components::mind_map::MindMapCanvas;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
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

			<div class="fullscreen-mindmap">
				<div class="mindmap-header">
					<h1>"Mind Map"</h1>
					<p class="subtitle">
						"Drag nodes to move them. Double-click to rename. Link Mode connects the selected node to the next one you click."
					</p>
				</div>
				<MindMapCanvas />
			</div>
		</ErrorBoundary>
	}
}
