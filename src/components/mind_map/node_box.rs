use leptos::prelude::*;
use web_sys::MouseEvent;

use super::interaction::Interaction;
use super::store::GraphStore;
use super::types::{NODE_HEIGHT, NODE_WIDTH, Node, PALETTE, Point};

fn stop(ev: MouseEvent) {
	ev.stop_propagation();
}

/// One node box with its hover affordances and, when selected, the palette.
#[component]
pub fn NodeBox(
	id: String,
	store: RwSignal<GraphStore>,
	interaction: RwSignal<Interaction>,
	hovered: RwSignal<Option<String>>,
	/// Pointer pressed on the body, with the client-space position.
	on_press: Callback<(String, Point)>,
	on_edit: Callback<String>,
	on_link: Callback<String>,
	on_delete: Callback<String>,
	on_color: Callback<(String, String)>,
) -> impl IntoView {
	let node = {
		let id = id.clone();
		Memo::new(move |_| store.with(|s| s.node(&id).cloned()))
	};
	let is_selected = {
		let id = id.clone();
		move || store.with(|s| s.selected() == Some(id.as_str()))
	};
	let is_source = {
		let id = id.clone();
		move || interaction.with(|s| s.connect_source() == Some(id.as_str()))
	};
	let is_hovered = {
		let id = id.clone();
		move || hovered.with(|h| h.as_deref() == Some(id.as_str()))
	};
	let connecting = move || interaction.with(|s| s.connect_source().is_some());
	let color = move || node.with(|n| n.as_ref().map(|n| n.color.clone()).unwrap_or_default());
	let is_root = store.with_untracked(|s| s.node(&id).is_some_and(Node::is_root));

	let (press_id, edit_id, enter_id, leave_id) = (id.clone(), id.clone(), id.clone(), id.clone());
	let (actions_id, palette_id) = (id.clone(), id);

	view! {
		<div
			class="mindmap-node"
			class:selected=is_selected.clone()
			class:source=is_source
			style:left=move || format!("{}px", node.with(|n| n.as_ref().map_or(0.0, |n| n.x)))
			style:top=move || format!("{}px", node.with(|n| n.as_ref().map_or(0.0, |n| n.y)))
			style:width=format!("{}px", NODE_WIDTH)
			style:height=format!("{}px", NODE_HEIGHT)
			style:border-color=color
			style:background-color=move || format!("{}33", color())
			style:cursor=move || if connecting() { "crosshair" } else { "move" }
			on:mousedown=move |ev: MouseEvent| {
				ev.stop_propagation();
				ev.prevent_default();
				let client = Point::new(ev.client_x() as f64, ev.client_y() as f64);
				on_press.run((press_id.clone(), client));
			}
			on:dblclick=move |ev: MouseEvent| {
				ev.stop_propagation();
				on_edit.run(edit_id.clone());
			}
			on:mouseenter=move |_| hovered.set(Some(enter_id.clone()))
			on:mouseleave=move |_| {
				hovered.update(|h| {
					if h.as_deref() == Some(leave_id.as_str()) {
						*h = None;
					}
				})
			}
		>
			<span class="mindmap-node-label">
				{move || node.with(|n| n.as_ref().map(|n| n.label.clone()).unwrap_or_default())}
			</span>

			<Show when=is_hovered>
				{
					let (link_id, delete_id) = (actions_id.clone(), actions_id.clone());
					view! {
						<div class="mindmap-node-actions">
							<button
								title="Connect"
								on:mousedown=stop
								on:mouseup=stop
								on:click=move |_| on_link.run(link_id.clone())
							>
								"🔗"
							</button>
							<Show when=move || !is_root>
								{
									let delete_id = delete_id.clone();
									view! {
										<button
											title="Delete"
											on:mousedown=stop
											on:click=move |_| on_delete.run(delete_id.clone())
										>
											"✕"
										</button>
									}
								}
							</Show>
						</div>
					}
				}
			</Show>

			<Show when=is_selected.clone()>
				{
					let id = palette_id.clone();
					view! {
						<div class="mindmap-palette">
							{PALETTE
								.iter()
								.map(|swatch| {
									let (id, swatch) = (id.clone(), swatch.to_string());
									view! {
										<button
											class="mindmap-swatch"
											title=swatch.clone()
											style:background-color=swatch.clone()
											on:mousedown=stop
											on:click=move |_| on_color.run((id.clone(), swatch.clone()))
										/>
									}
								})
								.collect_view()}
						</div>
					}
				}
			</Show>
		</div>
	}
}
