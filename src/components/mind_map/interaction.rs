use log::debug;

use super::store::GraphStore;
use super::types::Point;

/// Pointer interaction state. Only one node can be dragged or act as the
/// connect source at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
	#[default]
	Idle,
	/// `offset` is the grab point relative to the node's top-left corner.
	Dragging { node_id: String, offset: Point },
	/// The next clicked node completes an edge from `from`.
	Connecting { from: String },
}

impl Interaction {
	pub fn is_idle(&self) -> bool {
		matches!(self, Interaction::Idle)
	}

	pub fn dragged(&self) -> Option<&str> {
		match self {
			Interaction::Dragging { node_id, .. } => Some(node_id.as_str()),
			_ => None,
		}
	}

	pub fn connect_source(&self) -> Option<&str> {
		match self {
			Interaction::Connecting { from } => Some(from.as_str()),
			_ => None,
		}
	}

	/// Pointer pressed on a node body. Starts a drag, or completes a pending
	/// connection, in which case the pair to link is returned.
	pub fn pointer_down(
		&mut self,
		store: &GraphStore,
		node_id: &str,
		pointer: Point,
	) -> Option<(String, String)> {
		if self.connect_source().is_some() {
			return self.click_node(node_id);
		}
		let origin = store.node(node_id)?.position();
		let offset = Point::new(pointer.x - origin.x, pointer.y - origin.y);
		debug!("drag start {}", node_id);
		*self = Interaction::Dragging {
			node_id: node_id.to_string(),
			offset,
		};
		None
	}

	/// New top-left for the dragged node, keeping the grab point under the
	/// pointer.
	pub fn pointer_move(&self, pointer: Point) -> Option<(String, Point)> {
		match self {
			Interaction::Dragging { node_id, offset } => Some((
				node_id.clone(),
				Point::new(pointer.x - offset.x, pointer.y - offset.y),
			)),
			_ => None,
		}
	}

	pub fn pointer_up(&mut self) {
		*self = Interaction::Idle;
	}

	pub fn pointer_leave(&mut self) {
		*self = Interaction::Idle;
	}

	/// Enters connect mode from idle. Returns whether the mode was entered.
	pub fn begin_connect(&mut self, node_id: &str) -> bool {
		if !self.is_idle() {
			return false;
		}
		debug!("connect mode from {}", node_id);
		*self = Interaction::Connecting {
			from: node_id.to_string(),
		};
		true
	}

	/// A node's own link button. Starts connect mode from idle; while
	/// connecting it acts like clicking the node.
	pub fn link_button(&mut self, node_id: &str) -> Option<(String, String)> {
		if self.connect_source().is_some() {
			return self.click_node(node_id);
		}
		self.begin_connect(node_id);
		None
	}

	/// Global link-mode button: leaves connect mode, or enters it using the
	/// selected node as the source.
	pub fn toggle_link_mode(&mut self, selected: Option<&str>) {
		if self.connect_source().is_some() {
			self.cancel_connect();
		} else if let Some(id) = selected {
			self.begin_connect(id);
		}
	}

	/// Second click while connecting. Clicking the source again cancels.
	pub fn click_node(&mut self, node_id: &str) -> Option<(String, String)> {
		let Interaction::Connecting { from } = self else {
			return None;
		};
		let pair = (from.as_str() != node_id).then(|| (from.clone(), node_id.to_string()));
		*self = Interaction::Idle;
		pair
	}

	pub fn cancel_connect(&mut self) {
		if self.connect_source().is_some() {
			*self = Interaction::Idle;
		}
	}
}
