//! Canonical mind-map state. Every mutation the UI can perform goes through
//! `GraphStore`, which keeps the graph invariants:
//!
//! - a node with id `"root"` always exists;
//! - no self-loops and at most one connection per unordered pair;
//! - no connection references a missing node;
//! - positions are never negative.

use log::debug;

use super::types::{Connection, Graph, NEW_NODE_LABEL, Node, PALETTE, ROOT_ID};
use crate::error::{MindMapError, Result};

/// Graph plus the current selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphStore {
	graph: Graph,
	selected: Option<String>,
	next_id: u64,
}

impl GraphStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adopts a loaded or imported graph, repairing it first.
	pub fn from_graph(graph: Graph) -> Self {
		Self {
			graph: graph.sanitized(),
			selected: None,
			next_id: 0,
		}
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Owned copy of the persistable state.
	pub fn snapshot(&self) -> Graph {
		self.graph.clone()
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.graph.node(id)
	}

	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub fn select(&mut self, id: Option<&str>) {
		self.selected = id.filter(|id| self.graph.contains(id)).map(str::to_owned);
	}

	fn fresh_id(&mut self) -> String {
		loop {
			self.next_id += 1;
			let id = format!("node-{}", self.next_id);
			if !self.graph.contains(&id) {
				return id;
			}
		}
	}

	/// Adds a node at a spread position derived from the node count and
	/// selects it.
	pub fn add_node(&mut self) -> String {
		let count = self.graph.nodes.len();
		let step = (count * 30) as f64;
		let id = self.fresh_id();
		let node = Node {
			id: id.clone(),
			x: 150.0 + step % 300.0,
			y: 150.0 + step % 200.0,
			label: NEW_NODE_LABEL.into(),
			color: PALETTE[count % PALETTE.len()].into(),
		};
		debug!("add node {} at ({}, {})", id, node.x, node.y);
		self.graph.nodes.push(node);
		self.selected = Some(id.clone());
		id
	}

	/// Removes a node and every connection touching it.
	pub fn delete_node(&mut self, id: &str) -> Result<()> {
		if id == ROOT_ID {
			return Err(MindMapError::RootNodeProtected);
		}
		let before = self.graph.nodes.len();
		self.graph.nodes.retain(|n| n.id != id);
		if self.graph.nodes.len() == before {
			return Err(MindMapError::UnknownNode(id.to_string()));
		}
		self.graph.connections.retain(|c| !c.touches(id));
		if self.selected.as_deref() == Some(id) {
			self.selected = None;
		}
		debug!("deleted node {}", id);
		Ok(())
	}

	/// Links two distinct existing nodes unless they are already linked in
	/// either direction. Returns whether a connection was added.
	pub fn add_connection(&mut self, from: &str, to: &str) -> bool {
		if from == to
			|| !self.graph.contains(from)
			|| !self.graph.contains(to)
			|| self.graph.has_connection(from, to)
		{
			return false;
		}
		debug!("connect {} -> {}", from, to);
		self.graph.connections.push(Connection::new(from, to));
		true
	}

	/// Removes the connection stored exactly as `(from, to)`.
	pub fn delete_connection(&mut self, from: &str, to: &str) -> bool {
		let before = self.graph.connections.len();
		self.graph
			.connections
			.retain(|c| !(c.from == from && c.to == to));
		before != self.graph.connections.len()
	}

	pub fn update_node_label(&mut self, id: &str, label: &str) -> bool {
		let label = label.trim();
		if label.is_empty() {
			return false;
		}
		match self.graph.node_mut(id) {
			Some(node) => {
				node.label = label.to_string();
				true
			}
			None => false,
		}
	}

	pub fn update_node_color(&mut self, id: &str, color: &str) -> bool {
		match self.graph.node_mut(id) {
			Some(node) => {
				node.color = color.to_string();
				true
			}
			None => false,
		}
	}

	/// Moves a node's top-left corner, clamped to the positive quadrant.
	pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> bool {
		match self.graph.node_mut(id) {
			Some(node) => {
				node.x = x.max(0.0);
				node.y = y.max(0.0);
				true
			}
			None => false,
		}
	}

	/// Back to the single-root graph.
	pub fn clear(&mut self) {
		debug!("clearing graph");
		self.graph = Graph::default();
		self.selected = None;
	}

	/// Swaps in an imported graph, keeping the id sequence so fresh ids
	/// keep skipping anything already present.
	pub fn replace(&mut self, graph: Graph) {
		self.graph = graph.sanitized();
		self.selected = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store_with(n: usize) -> (GraphStore, Vec<String>) {
		let mut store = GraphStore::new();
		let ids = (0..n).map(|_| store.add_node()).collect();
		(store, ids)
	}

	#[test]
	fn new_store_has_only_root() {
		let store = GraphStore::new();
		assert_eq!(store.graph().nodes.len(), 1);
		assert_eq!(store.graph().nodes[0].id, ROOT_ID);
		assert!(store.graph().connections.is_empty());
		assert_eq!(store.selected(), None);
	}

	#[test]
	fn add_node_spreads_positions_and_cycles_palette() {
		let (store, ids) = store_with(3);
		let nodes = &store.graph().nodes;
		assert_eq!(nodes.len(), 4);
		assert_eq!((nodes[1].x, nodes[1].y), (180.0, 180.0));
		assert_eq!((nodes[2].x, nodes[2].y), (210.0, 210.0));
		assert_eq!((nodes[3].x, nodes[3].y), (240.0, 240.0));
		assert_eq!(nodes[1].color, PALETTE[1]);
		assert_eq!(nodes[3].color, PALETTE[3]);
		assert_eq!(store.selected(), Some(ids[2].as_str()));
	}

	#[test]
	fn add_node_position_wraps() {
		let (store, _) = store_with(10);
		// count == 10 before the last insert: 300 % 300 and 300 % 200
		let last = store.graph().nodes.last().map(|n| (n.x, n.y));
		assert_eq!(last, Some((150.0, 250.0)));
		assert_eq!(
			store.graph().nodes.last().map(|n| n.color.as_str()),
			Some(PALETTE[10 % 8])
		);
	}

	#[test]
	fn fresh_ids_skip_loaded_ones() {
		let mut graph = Graph::default();
		graph.nodes.push(Node {
			id: "node-1".into(),
			..Node::root()
		});
		let mut store = GraphStore::from_graph(graph);
		assert_eq!(store.add_node(), "node-2");
	}

	#[test]
	fn root_cannot_be_deleted() {
		let (mut store, _) = store_with(2);
		let before = store.clone();
		assert!(matches!(
			store.delete_node(ROOT_ID),
			Err(MindMapError::RootNodeProtected)
		));
		assert_eq!(store, before);
	}

	#[test]
	fn delete_unknown_node_is_an_error() {
		let mut store = GraphStore::new();
		assert!(matches!(
			store.delete_node("ghost"),
			Err(MindMapError::UnknownNode(_))
		));
	}

	#[test]
	fn delete_node_cascades_and_clears_selection() {
		let (mut store, ids) = store_with(2);
		assert!(store.add_connection(ROOT_ID, &ids[0]));
		assert!(store.add_connection(&ids[1], &ids[0]));
		assert!(store.add_connection(ROOT_ID, &ids[1]));
		store.select(Some(&ids[0]));

		store.delete_node(&ids[0]).unwrap();

		assert!(store.node(&ids[0]).is_none());
		assert_eq!(store.graph().connections, vec![Connection::new(ROOT_ID, ids[1].as_str())]);
		assert_eq!(store.selected(), None);
	}

	#[test]
	fn connections_are_deduplicated_both_ways() {
		let (mut store, ids) = store_with(2);
		assert!(store.add_connection(&ids[0], &ids[1]));
		assert!(!store.add_connection(&ids[1], &ids[0]));
		assert!(!store.add_connection(&ids[0], &ids[1]));
		assert_eq!(store.graph().connections.len(), 1);
	}

	#[test]
	fn self_loops_and_unknown_endpoints_are_refused() {
		let (mut store, ids) = store_with(1);
		assert!(!store.add_connection(&ids[0], &ids[0]));
		assert!(!store.add_connection(&ids[0], "ghost"));
		assert!(store.graph().connections.is_empty());
	}

	#[test]
	fn delete_connection_matches_stored_order() {
		let (mut store, ids) = store_with(1);
		store.add_connection(ROOT_ID, &ids[0]);
		assert!(!store.delete_connection(&ids[0], ROOT_ID));
		assert!(store.delete_connection(ROOT_ID, &ids[0]));
		assert!(store.graph().connections.is_empty());
	}

	#[test]
	fn blank_labels_are_ignored() {
		let mut store = GraphStore::new();
		assert!(!store.update_node_label(ROOT_ID, "   "));
		assert!(store.update_node_label(ROOT_ID, "  Plan  "));
		assert_eq!(store.node(ROOT_ID).map(|n| n.label.as_str()), Some("Plan"));
	}

	#[test]
	fn color_update_overwrites() {
		let mut store = GraphStore::new();
		assert!(store.update_node_color(ROOT_ID, PALETTE[5]));
		assert_eq!(store.node(ROOT_ID).map(|n| n.color.as_str()), Some(PALETTE[5]));
		assert!(!store.update_node_color("ghost", PALETTE[5]));
	}

	#[test]
	fn move_clamps_negative_coordinates() {
		let mut store = GraphStore::new();
		assert!(store.move_node(ROOT_ID, -20.0, 35.5));
		assert_eq!(store.node(ROOT_ID).map(|n| (n.x, n.y)), Some((0.0, 35.5)));
		store.move_node(ROOT_ID, 10.0, -1.0);
		assert_eq!(store.node(ROOT_ID).map(|n| (n.x, n.y)), Some((10.0, 0.0)));
	}

	#[test]
	fn clear_resets_to_root() {
		let (mut store, ids) = store_with(3);
		store.add_connection(&ids[0], &ids[1]);
		store.clear();
		assert_eq!(store.graph(), &Graph::default());
		assert_eq!(store.selected(), None);
	}

	#[test]
	fn select_ignores_unknown_ids() {
		let mut store = GraphStore::new();
		store.select(Some("ghost"));
		assert_eq!(store.selected(), None);
		store.select(Some(ROOT_ID));
		assert_eq!(store.selected(), Some(ROOT_ID));
	}
}
