use std::collections::HashSet;

use mindmap_canvas::MindMapError;
use mindmap_canvas::components::mind_map::export::json::{from_json, to_json};
use mindmap_canvas::components::mind_map::export::svg::to_svg;
use mindmap_canvas::components::mind_map::export::{ApproxMeasure, ExportScene};
use mindmap_canvas::components::mind_map::persistence::{decode_snapshot, encode_snapshot};
use mindmap_canvas::components::mind_map::{Connection, GraphStore, Interaction, Point, ROOT_ID};

#[test]
fn three_new_nodes_get_unique_ids_and_distinct_positions() {
	let mut store = GraphStore::new();
	let ids: Vec<String> = (0..3).map(|_| store.add_node()).collect();

	let graph = store.graph();
	assert_eq!(graph.nodes.len(), 4);
	assert!(graph.connections.is_empty());
	assert_eq!(graph.nodes[0].id, ROOT_ID);

	let unique: HashSet<&String> = graph.nodes.iter().map(|n| &n.id).collect();
	assert_eq!(unique.len(), 4);

	let positions: Vec<(f64, f64)> = ids
		.iter()
		.filter_map(|id| store.node(id).map(|n| (n.x, n.y)))
		.collect();
	assert_eq!(positions.len(), 3);
	assert_ne!(positions[0], positions[1]);
	assert_ne!(positions[1], positions[2]);
	assert_ne!(positions[0], positions[2]);
}

#[test]
fn root_survives_any_sequence() {
	let mut store = GraphStore::new();
	for _ in 0..20 {
		let id = store.add_node();
		assert_eq!(store.graph().nodes[0].id, ROOT_ID);
		store.add_connection(ROOT_ID, &id);
	}
	let before = store.graph().clone();
	assert!(matches!(
		store.delete_node(ROOT_ID),
		Err(MindMapError::RootNodeProtected)
	));
	assert_eq!(store.graph(), &before);
}

#[test]
fn deleting_a_connected_leaf_leaves_only_root() {
	let mut store = GraphStore::new();
	let n1 = store.add_node();
	assert!(store.add_connection(ROOT_ID, &n1));
	store.delete_node(&n1).unwrap();
	assert_eq!(store.graph().nodes.len(), 1);
	assert!(store.graph().connections.is_empty());
}

#[test]
fn reversed_duplicate_is_refused() {
	let mut store = GraphStore::new();
	let a = store.add_node();
	let b = store.add_node();
	store.add_connection(&a, &b);
	store.add_connection(&b, &a);
	let between = store
		.graph()
		.connections
		.iter()
		.filter(|c| c.joins(&a, &b))
		.count();
	assert_eq!(between, 1);
	assert!(!store.add_connection(&a, &a));
}

#[test]
fn json_export_contains_the_graph() {
	let mut store = GraphStore::new();
	let n1 = store.add_node();
	let n2 = store.add_node();
	store.add_connection(&n1, &n2);

	let text = to_json(store.graph()).unwrap();
	let value: serde_json::Value = serde_json::from_str(&text).unwrap();
	assert_eq!(value["nodes"].as_array().map(Vec::len), Some(3));
	let connections = value["connections"].as_array().cloned().unwrap_or_default();
	assert_eq!(connections.len(), 1);
	assert_eq!(connections[0]["from"], n1.as_str());
	assert_eq!(connections[0]["to"], n2.as_str());

	assert_eq!(&from_json(&text).unwrap(), store.graph());
}

#[test]
fn saved_snapshot_restores_the_store() {
	let mut store = GraphStore::new();
	let a = store.add_node();
	store.add_connection(ROOT_ID, &a);
	store.move_node(&a, -40.0, 12.0);

	let raw = encode_snapshot(store.graph()).unwrap();
	let mut restored = GraphStore::from_graph(decode_snapshot(Some(&raw)));
	assert_eq!(restored.graph(), store.graph());
	assert_eq!(restored.node(&a).map(|n| (n.x, n.y)), Some((0.0, 12.0)));

	// fresh ids never collide with restored ones
	let b = restored.add_node();
	assert_ne!(a, b);
}

#[test]
fn drag_then_link_through_the_controller() {
	let mut store = GraphStore::new();
	let a = store.add_node();
	let mut state = Interaction::default();

	// grab the new node 10 units inside its corner and drag it
	let grab = store.node(&a).map(|n| Point::new(n.x + 10.0, n.y + 10.0)).unwrap();
	state.pointer_down(&store, &a, grab);
	if let Some((id, pos)) = state.pointer_move(Point::new(5.0, 500.0)) {
		store.move_node(&id, pos.x, pos.y);
	}
	state.pointer_up();
	assert_eq!(store.node(&a).map(|n| (n.x, n.y)), Some((0.0, 490.0)));

	assert!(state.begin_connect(&a));
	let pair = state.pointer_down(&store, ROOT_ID, Point::default());
	let (from, to) = pair.unwrap();
	assert!(store.add_connection(&from, &to));
	assert_eq!(store.graph().connections, vec![Connection::new(a.as_str(), ROOT_ID)]);
}

#[test]
fn svg_export_is_sized_to_content() {
	let mut store = GraphStore::new();
	let a = store.add_node();
	store.add_connection(ROOT_ID, &a);
	let scene = ExportScene::build(store.graph(), 40.0).unwrap();
	// root at (400, 250), new node at (180, 180)
	assert_eq!((scene.width, scene.height), (400.0, 200.0));
	let svg = to_svg(&scene, &ApproxMeasure::default());
	assert!(svg.contains("width=\"400\" height=\"200\""));
	assert_eq!(svg.matches("<line").count(), 1);
}
