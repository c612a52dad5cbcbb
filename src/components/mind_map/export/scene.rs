use crate::components::mind_map::layout;
use crate::components::mind_map::types::{Graph, NODE_HEIGHT, NODE_WIDTH};
use crate::error::{MindMapError, Result};

/// Opacity of connection lines.
pub const LINE_ALPHA: f64 = 0.6;
/// Opacity of node fills; borders are opaque.
pub const FILL_ALPHA: f64 = 0.2;
pub const LINE_WIDTH: f64 = 2.0;
pub const CORNER_RADIUS: f64 = 8.0;
pub const FONT_SIZE: f64 = 14.0;
pub const LINE_HEIGHT: f64 = 16.0;
pub const TEXT_COLOR: &str = "#1f2937";
pub const BACKGROUND: &str = "#ffffff";

/// Axis-aligned box around every node rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	pub fn of(graph: &Graph) -> Result<Self> {
		let mut nodes = graph.nodes.iter();
		let first = nodes.next().ok_or(MindMapError::EmptyGraph)?;
		let init = Bounds {
			min_x: first.x,
			min_y: first.y,
			max_x: first.x + NODE_WIDTH,
			max_y: first.y + NODE_HEIGHT,
		};
		Ok(nodes.fold(init, |b, n| Bounds {
			min_x: b.min_x.min(n.x),
			min_y: b.min_y.min(n.y),
			max_x: b.max_x.max(n.x + NODE_WIDTH),
			max_y: b.max_y.max(n.y + NODE_HEIGHT),
		}))
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneLine {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub color: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
	pub color: String,
	pub label: String,
}

impl SceneNode {
	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}
}

/// Export-ready geometry, translated so the bounding box plus padding starts
/// at the origin. Shared by the PNG and SVG exporters.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportScene {
	pub width: f64,
	pub height: f64,
	pub lines: Vec<SceneLine>,
	pub nodes: Vec<SceneNode>,
}

impl ExportScene {
	pub fn build(graph: &Graph, padding: f64) -> Result<Self> {
		let bounds = Bounds::of(graph)?;
		let (dx, dy) = (padding - bounds.min_x, padding - bounds.min_y);

		let lines = layout::segments(graph)
			.into_iter()
			.map(|s| SceneLine {
				x1: s.start.x + dx,
				y1: s.start.y + dy,
				x2: s.end.x + dx,
				y2: s.end.y + dy,
				color: s.color,
			})
			.collect();

		let nodes = graph
			.nodes
			.iter()
			.map(|n| SceneNode {
				x: n.x + dx,
				y: n.y + dy,
				width: NODE_WIDTH,
				height: NODE_HEIGHT,
				color: n.color.clone(),
				label: n.label.clone(),
			})
			.collect();

		Ok(Self {
			width: (bounds.max_x - bounds.min_x + 2.0 * padding).ceil(),
			height: (bounds.max_y - bounds.min_y + 2.0 * padding).ceil(),
			lines,
			nodes,
		})
	}
}

/// Vertical centre of each wrapped line, the block being centred on `cy`.
pub fn line_baselines(cy: f64, count: usize) -> impl Iterator<Item = f64> {
	let first = cy - (count.saturating_sub(1) as f64) * LINE_HEIGHT / 2.0;
	(0..count).map(move |i| first + i as f64 * LINE_HEIGHT)
}
