//! Canvas geometry: pointer mapping, connection segments, show-all scrolling.

use super::types::{Graph, NODE_HEIGHT, NODE_WIDTH, Node, Point};

/// Smallest scrollable surface, in canvas units.
pub const MIN_SURFACE: (f64, f64) = (2000.0, 1500.0);
/// Room kept to the right of and below the furthest node.
const SURFACE_MARGIN: f64 = 400.0;

/// Maps a client-space pointer position to canvas coordinates.
///
/// `origin` is the canvas element's client rect top-left, `scroll` its
/// scroll offset, both in screen pixels.
pub fn client_to_canvas(client: Point, origin: Point, scroll: Point, zoom: f64) -> Point {
	let zoom = if zoom > 0.0 { zoom } else { 1.0 };
	Point::new(
		(client.x - origin.x + scroll.x) / zoom,
		(client.y - origin.y + scroll.y) / zoom,
	)
}

/// A connection as drawn: centre to centre, with the delete handle at the
/// midpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
	pub from: String,
	pub to: String,
	pub start: Point,
	pub end: Point,
	pub color: String,
}

impl Segment {
	pub fn midpoint(&self) -> Point {
		Point::new(
			(self.start.x + self.end.x) / 2.0,
			(self.start.y + self.end.y) / 2.0,
		)
	}
}

/// Drawable segments for every connection whose endpoints exist. Lines take
/// the colour of their `from` node.
pub fn segments(graph: &Graph) -> Vec<Segment> {
	graph
		.connections
		.iter()
		.filter_map(|c| {
			let (a, b) = (graph.node(&c.from)?, graph.node(&c.to)?);
			Some(Segment {
				from: c.from.clone(),
				to: c.to.clone(),
				start: a.center(),
				end: b.center(),
				color: a.color.clone(),
			})
		})
		.collect()
}

/// Mean of all node positions.
pub fn centroid(nodes: &[Node]) -> Option<Point> {
	if nodes.is_empty() {
		return None;
	}
	let n = nodes.len() as f64;
	let (sx, sy) = nodes
		.iter()
		.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
	Some(Point::new(sx / n, sy / n))
}

/// Scroll offset that puts `target` (canvas units) at the centre of a
/// viewport of `viewport` screen pixels.
pub fn scroll_to_center(target: Point, viewport: (f64, f64), zoom: f64) -> Point {
	Point::new(
		(target.x * zoom - viewport.0 / 2.0).max(0.0),
		(target.y * zoom - viewport.1 / 2.0).max(0.0),
	)
}

/// Size of the scrollable surface so every node stays reachable.
pub fn surface_extent(nodes: &[Node]) -> (f64, f64) {
	nodes.iter().fold(MIN_SURFACE, |(w, h), n| {
		(
			w.max(n.x + NODE_WIDTH + SURFACE_MARGIN),
			h.max(n.y + NODE_HEIGHT + SURFACE_MARGIN),
		)
	})
}
