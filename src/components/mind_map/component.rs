use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	FileReader, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollToOptions,
};

use super::config::MindMapConfig;
use super::editor::LabelEditor;
use super::export::{self, ExportFormat};
use super::interaction::Interaction;
use super::layout;
use super::node_box::NodeBox;
use super::persistence::{Autosave, LocalStore};
use super::store::GraphStore;
use super::types::Point;
use crate::error::MindMapError;

fn client_point(ev: &MouseEvent) -> Point {
	Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

#[component]
pub fn MindMapCanvas(#[prop(optional)] config: MindMapConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Div>::new();
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let import_ref = NodeRef::<leptos::html::Input>::new();

	let local = LocalStore::new(config.storage_key.clone());
	let store = RwSignal::new(GraphStore::from_graph(local.load()));
	let interaction = RwSignal::new(Interaction::default());
	let hovered = RwSignal::new(None::<String>);
	let editing = RwSignal::new(None::<String>);
	let notice = RwSignal::new(None::<String>);
	let zoom = RwSignal::new(1.0_f64);
	let config = StoredValue::new(config);

	let graph = Memo::new(move |_| store.with(|s| s.snapshot()));
	let node_ids = Memo::new(move |_| {
		graph.with(|g| g.nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>())
	});
	let extent = Memo::new(move |_| graph.with(|g| layout::surface_extent(&g.nodes)));

	// Debounced save on every graph change.
	let autosave = Rc::new(RefCell::new(Autosave::new(
		local,
		config.with_value(|c| c.save_delay_ms),
	)));
	Effect::new(move |_| {
		let snapshot = graph.get();
		autosave.borrow_mut().schedule(snapshot);
	});

	let report = move |e: MindMapError| {
		warn!("{}", e);
		notice.set(Some(e.to_string()));
	};

	let to_canvas = move |client: Point| -> Option<Point> {
		let el = canvas_ref.get_untracked()?;
		let rect = el.get_bounding_client_rect();
		Some(layout::client_to_canvas(
			client,
			Point::new(rect.left(), rect.top()),
			Point::new(el.scroll_left() as f64, el.scroll_top() as f64),
			zoom.get_untracked(),
		))
	};

	let delete_node = move |id: String| {
		let mut result = Ok(());
		store.update(|s| result = s.delete_node(&id));
		match result {
			Ok(()) => {
				interaction.update(|st| {
					if st.connect_source() == Some(id.as_str()) {
						st.cancel_connect();
					}
				});
				notice.set(None);
			}
			Err(e) => report(e),
		}
	};

	let link_nodes = move |from: String, to: String| {
		store.update(|s| {
			if !s.add_connection(&from, &to) {
				debug!("connection {} - {} refused", from, to);
			}
		});
	};

	// Node callbacks
	let on_press = Callback::new(move |(id, client): (String, Point)| {
		let Some(pointer) = to_canvas(client) else {
			return;
		};
		// node mousedown suppresses the default focus change; keep keyboard
		// shortcuts on the canvas
		if let Some(el) = canvas_ref.get_untracked() {
			let _ = el.focus();
		}
		store.update(|s| s.select(Some(id.as_str())));
		let mut link = None;
		interaction.update(|st| link = store.with_untracked(|s| st.pointer_down(s, &id, pointer)));
		if let Some((from, to)) = link {
			link_nodes(from, to);
		}
	});
	let on_edit = Callback::new(move |id: String| editing.set(Some(id)));
	let on_link = Callback::new(move |id: String| {
		let mut link = None;
		interaction.update(|st| link = st.link_button(&id));
		if let Some((from, to)) = link {
			link_nodes(from, to);
		}
	});
	let on_delete = Callback::new(move |id: String| delete_node(id));
	let on_color = Callback::new(move |(id, color): (String, String)| {
		store.update(|s| {
			s.update_node_color(&id, &color);
		});
	});

	// Canvas pointer handling
	let on_mousedown = move |_: MouseEvent| {
		store.update(|s| s.select(None));
	};
	let on_mousemove = move |ev: MouseEvent| {
		if interaction.with_untracked(|st| st.dragged().is_none()) {
			return;
		}
		let Some(pointer) = to_canvas(client_point(&ev)) else {
			return;
		};
		if let Some((id, pos)) = interaction.with_untracked(|st| st.pointer_move(pointer)) {
			store.update(|s| {
				s.move_node(&id, pos.x, pos.y);
			});
		}
	};
	let on_mouseup = move |_: MouseEvent| interaction.update(Interaction::pointer_up);
	let on_mouseleave = move |_: MouseEvent| {
		interaction.update(Interaction::pointer_leave);
		hovered.set(None);
	};
	let on_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
		"Escape" => interaction.update(Interaction::cancel_connect),
		"Delete" | "Backspace" => {
			if let Some(id) = store.with_untracked(|s| s.selected().map(str::to_owned)) {
				ev.prevent_default();
				delete_node(id);
			}
		}
		_ => {}
	};

	// Toolbar actions
	let add_node = move |_: MouseEvent| {
		store.update(|s| {
			s.add_node();
		});
	};
	let toggle_link = move |_: MouseEvent| {
		let selected = store.with_untracked(|s| s.selected().map(str::to_owned));
		interaction.update(|st| st.toggle_link_mode(selected.as_deref()));
		if selected.is_none() && interaction.with_untracked(Interaction::is_idle) {
			notice.set(Some("Select a node to start linking".into()));
		}
	};
	let cancel_link = move |_: MouseEvent| interaction.update(Interaction::cancel_connect);
	let show_all = move |_: MouseEvent| {
		let Some(el) = canvas_ref.get_untracked() else {
			return;
		};
		let Some(center) = graph.with_untracked(|g| layout::centroid(&g.nodes)) else {
			return;
		};
		let viewport = (el.client_width() as f64, el.client_height() as f64);
		let target = layout::scroll_to_center(center, viewport, zoom.get_untracked());
		let options = ScrollToOptions::new();
		options.set_left(target.x);
		options.set_top(target.y);
		options.set_behavior(ScrollBehavior::Smooth);
		el.scroll_to_with_scroll_to_options(&options);
	};
	let zoom_in = move |_: MouseEvent| zoom.update(|z| *z = config.with_value(|c| c.zoom_in(*z)));
	let zoom_out = move |_: MouseEvent| zoom.update(|z| *z = config.with_value(|c| c.zoom_out(*z)));
	let zoom_reset = move |_: MouseEvent| zoom.set(1.0);
	let export_as = move |format: ExportFormat| {
		let padding = config.with_value(|c| c.export_padding);
		let result =
			graph.with_untracked(|g| export::export_graph(g, format, padding, js_sys::Date::now()));
		if let Err(e) = result {
			error!("export failed: {}", e);
			notice.set(Some(e.to_string()));
		}
	};
	let clear = move |_: MouseEvent| {
		let confirmed = web_sys::window()
			.map(|w| w.confirm_with_message("Clear the whole mind map? This cannot be undone."))
			.and_then(Result::ok)
			.unwrap_or(false);
		if confirmed {
			store.update(GraphStore::clear);
			interaction.set(Interaction::Idle);
			notice.set(None);
		}
	};
	let toggle_fullscreen = move |_: MouseEvent| {
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			return;
		};
		if document.fullscreen_element().is_some() {
			document.exit_fullscreen();
		} else if let Some(el) = container_ref.get_untracked() {
			if let Err(e) = el.request_fullscreen() {
				warn!("fullscreen request failed: {:?}", e);
			}
		}
	};

	// Import reads the chosen file with a FileReader whose onload closure is
	// kept alive here until the next import replaces it.
	let onload: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let open_import = move |_: MouseEvent| {
		if let Some(input) = import_ref.get_untracked() {
			input.click();
		}
	};
	let on_import = move |_: web_sys::Event| {
		let Some(input) = import_ref.get_untracked() else {
			return;
		};
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		let reader = match FileReader::new() {
			Ok(reader) => reader,
			Err(e) => return report(e.into()),
		};
		let reader_done = reader.clone();
		let cb = Closure::<dyn FnMut()>::new(move || {
			let text = reader_done.result().ok().and_then(|v| v.as_string());
			match text.map(|t| export::json::from_json(&t)) {
				Some(Ok(graph)) => {
					store.update(|s| s.replace(graph));
					interaction.set(Interaction::Idle);
					notice.set(None);
				}
				Some(Err(e)) => report(e),
				None => report(MindMapError::Dom("could not read file".into())),
			}
		});
		reader.set_onload(Some(cb.as_ref().unchecked_ref()));
		if let Err(e) = reader.read_as_text(&file) {
			report(e.into());
		}
		*onload.borrow_mut() = Some(cb);
		input.set_value("");
	};

	let link_label = move || {
		if interaction.with(|st| st.connect_source().is_some()) {
			"Exit Link Mode"
		} else {
			"Link Mode"
		}
	};

	view! {
		<div class="mindmap" node_ref=container_ref>
			<div class="mindmap-toolbar">
				<button on:click=add_node>"Add Node"</button>
				<button
					class:active=move || interaction.with(|st| st.connect_source().is_some())
					on:click=toggle_link
				>
					{link_label}
				</button>
				<button on:click=show_all>"Show All"</button>
				<span class="mindmap-toolbar-group">
					<button on:click=zoom_out>"−"</button>
					<button on:click=zoom_reset>
						{move || format!("{:.0}%", zoom.get() * 100.0)}
					</button>
					<button on:click=zoom_in>"+"</button>
				</span>
				<span class="mindmap-toolbar-group">
					<button on:click=move |_| export_as(ExportFormat::Json)>"JSON"</button>
					<button on:click=move |_| export_as(ExportFormat::Png)>"PNG"</button>
					<button on:click=move |_| export_as(ExportFormat::Svg)>"SVG"</button>
					<button on:click=open_import>"Import"</button>
					<input
						type="file"
						accept="application/json,.json"
						style="display: none;"
						node_ref=import_ref
						on:change=on_import
					/>
				</span>
				<button on:click=toggle_fullscreen>"Fullscreen"</button>
				<button class="danger" on:click=clear>"Clear"</button>
			</div>

			<Show when=move || interaction.with(|st| st.connect_source().is_some())>
				<div class="mindmap-banner">
					"Click another node to connect it. "
					<button on:click=cancel_link>"Cancel link"</button>
				</div>
			</Show>

			{move || {
				notice
					.get()
					.map(|msg| {
						view! {
							<div class="mindmap-notice" on:click=move |_| notice.set(None)>
								{msg}
							</div>
						}
					})
			}}

			<div
				class="mindmap-canvas"
				tabindex="0"
				node_ref=canvas_ref
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:keydown=on_keydown
			>
				<div
					class="mindmap-sizer"
					style:width=move || format!("{}px", extent.get().0 * zoom.get())
					style:height=move || format!("{}px", extent.get().1 * zoom.get())
				>
					<div
						class="mindmap-surface"
						style:width=move || format!("{}px", extent.get().0)
						style:height=move || format!("{}px", extent.get().1)
						style:transform=move || format!("scale({})", zoom.get())
					>
						<svg
							class="mindmap-links"
							width=move || extent.get().0.to_string()
							height=move || extent.get().1.to_string()
						>
							{move || {
								graph
									.with(layout::segments)
									.into_iter()
									.map(|seg| {
										view! {
											<line
												x1=seg.start.x.to_string()
												y1=seg.start.y.to_string()
												x2=seg.end.x.to_string()
												y2=seg.end.y.to_string()
												stroke=seg.color
												stroke-width="2"
												stroke-opacity="0.6"
											/>
										}
									})
									.collect_view()
							}}
						</svg>

						{move || {
							graph
								.with(layout::segments)
								.into_iter()
								.map(|seg| {
									let mid = seg.midpoint();
									let (from, to) = (seg.from, seg.to);
									view! {
										<button
											class="mindmap-link-delete"
											title="Remove connection"
											style:left=format!("{}px", mid.x)
											style:top=format!("{}px", mid.y)
											on:mousedown=|ev: MouseEvent| ev.stop_propagation()
											on:click=move |_| {
												store.update(|s| {
													s.delete_connection(&from, &to);
												});
											}
										>
											"×"
										</button>
									}
								})
								.collect_view()
						}}

						<For
							each=move || node_ids.get()
							key=|id| id.clone()
							children=move |id: String| {
								view! {
									<NodeBox
										id=id
										store=store
										interaction=interaction
										hovered=hovered
										on_press=on_press
										on_edit=on_edit
										on_link=on_link
										on_delete=on_delete
										on_color=on_color
									/>
								}
							}
						/>
					</div>
				</div>
			</div>

			<LabelEditor editing=editing store=store />
		</div>
	}
}
