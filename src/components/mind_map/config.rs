/// Tunables for one `MindMapCanvas` instance.
#[derive(Clone, Debug, PartialEq)]
pub struct MindMapConfig {
	/// Local storage key holding the JSON snapshot.
	pub storage_key: String,
	/// Quiet period after the last mutation before the snapshot is written.
	pub save_delay_ms: i32,
	/// Margin around the node bounding box in PNG/SVG exports.
	pub export_padding: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	/// Multiplier applied per zoom-in/zoom-out click.
	pub zoom_step: f64,
}

impl Default for MindMapConfig {
	fn default() -> Self {
		Self {
			storage_key: "mindmap-data".into(),
			save_delay_ms: 1000,
			export_padding: 40.0,
			min_zoom: 0.5,
			max_zoom: 2.0,
			zoom_step: 1.2,
		}
	}
}

impl MindMapConfig {
	pub fn zoom_in(&self, zoom: f64) -> f64 {
		(zoom * self.zoom_step).clamp(self.min_zoom, self.max_zoom)
	}

	pub fn zoom_out(&self, zoom: f64) -> f64 {
		(zoom / self.zoom_step).clamp(self.min_zoom, self.max_zoom)
	}
}
