use leptos::prelude::*;
use web_sys::KeyboardEvent;

use super::store::GraphStore;

/// Modal label editor, open while `editing` holds a node id.
#[component]
pub fn LabelEditor(editing: RwSignal<Option<String>>, store: RwSignal<GraphStore>) -> impl IntoView {
	view! {
		<Show when=move || editing.with(Option::is_some)>
			{
				let id = editing.get_untracked().unwrap_or_default();
				let initial = store
					.with_untracked(|s| s.node(&id).map(|n| n.label.clone()))
					.unwrap_or_default();
				let draft = RwSignal::new(initial);
				let save = move || {
					let label = draft.get_untracked();
					store.update(|s| {
						s.update_node_label(&id, &label);
					});
					editing.set(None);
				};
				let save_on_enter = save.clone();
				view! {
					<div class="mindmap-modal-backdrop" on:click=move |_| editing.set(None)>
						<div class="mindmap-modal" on:click=|ev| ev.stop_propagation()>
							<h3>"Edit node"</h3>
							<input
								type="text"
								class="mindmap-modal-input"
								prop:value=move || draft.get()
								on:input=move |ev| draft.set(event_target_value(&ev))
								on:keydown=move |ev: KeyboardEvent| match ev.key().as_str() {
									"Enter" => save_on_enter(),
									"Escape" => editing.set(None),
									_ => {}
								}
							/>
							<div class="mindmap-modal-actions">
								<button on:click=move |_| editing.set(None)>"Cancel"</button>
								<button class="primary" on:click=move |_| save()>
									"Save"
								</button>
							</div>
						</div>
					</div>
				}
			}
		</Show>
	}
}
