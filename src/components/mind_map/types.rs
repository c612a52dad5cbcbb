use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Id of the permanent root node.
pub const ROOT_ID: &str = "root";
/// Label given to the root of a fresh graph.
pub const ROOT_LABEL: &str = "Central Idea";
/// Label given to nodes created with `add_node`.
pub const NEW_NODE_LABEL: &str = "New Idea";

/// Node box width in canvas units.
pub const NODE_WIDTH: f64 = 100.0;
/// Node box height in canvas units.
pub const NODE_HEIGHT: f64 = 50.0;

/// The eight colours a node can take, indexed by creation order.
pub const PALETTE: [&str; 8] = [
	"#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#06b6d4", "#84cc16",
];

/// A position in canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A labelled, coloured box on the canvas. `x`/`y` is its top-left corner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub label: String,
	pub color: String,
}

impl Node {
	pub fn root() -> Self {
		Self {
			id: ROOT_ID.into(),
			x: 400.0,
			y: 250.0,
			label: ROOT_LABEL.into(),
			color: PALETTE[0].into(),
		}
	}

	pub fn is_root(&self) -> bool {
		self.id == ROOT_ID
	}

	pub fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}

	pub fn center(&self) -> Point {
		Point::new(self.x + NODE_WIDTH / 2.0, self.y + NODE_HEIGHT / 2.0)
	}
}

/// An undirected edge. The stored order only matters for `delete_connection`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
	pub from: String,
	pub to: String,
}

impl Connection {
	pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
		}
	}

	/// True if this edge joins `a` and `b` in either direction.
	pub fn joins(&self, a: &str, b: &str) -> bool {
		(self.from == a && self.to == b) || (self.from == b && self.to == a)
	}

	pub fn touches(&self, id: &str) -> bool {
		self.from == id || self.to == id
	}
}

/// Nodes plus connections; also the persisted and exported JSON layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Graph {
	pub nodes: Vec<Node>,
	pub connections: Vec<Connection>,
}

impl Default for Graph {
	fn default() -> Self {
		Self {
			nodes: vec![Node::root()],
			connections: Vec::new(),
		}
	}
}

impl Graph {
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	pub fn has_connection(&self, a: &str, b: &str) -> bool {
		self.connections.iter().any(|c| c.joins(a, b))
	}

	/// Repairs a graph that came from storage or an imported file so that
	/// every store invariant holds: unique ids, a root, no negative
	/// positions, no self-loops, no dangling or duplicate connections.
	pub fn sanitized(self) -> Self {
		let mut seen = HashSet::new();
		let mut nodes: Vec<Node> = self
			.nodes
			.into_iter()
			.filter(|n| seen.insert(n.id.clone()))
			.map(|mut n| {
				n.x = n.x.max(0.0);
				n.y = n.y.max(0.0);
				n
			})
			.collect();
		if !seen.contains(ROOT_ID) {
			nodes.insert(0, Node::root());
			seen.insert(ROOT_ID.to_string());
		}

		let mut connections: Vec<Connection> = Vec::with_capacity(self.connections.len());
		for c in self.connections {
			if c.from == c.to || !seen.contains(&c.from) || !seen.contains(&c.to) {
				continue;
			}
			if connections.iter().any(|e| e.joins(&c.from, &c.to)) {
				continue;
			}
			connections.push(c);
		}

		Self { nodes, connections }
	}
}
