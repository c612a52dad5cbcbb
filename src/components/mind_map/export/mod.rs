//! Export pipeline: JSON, PNG and SVG from the same graph snapshot.
//!
//! `ExportScene` holds the translated geometry, `wrap` the label wrapping
//! shared by both image formats. Only `raster` and `download` need a browser.

pub mod download;
pub mod json;
pub mod raster;
pub mod scene;
pub mod svg;
pub mod wrap;

use log::info;

pub use scene::ExportScene;
pub use wrap::{ApproxMeasure, TextMeasure};

use super::types::Graph;
use crate::error::Result;
use download::{download_text, download_url, export_file_name};

/// The three download formats offered by the toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
	Json,
	Png,
	Svg,
}

impl ExportFormat {
	pub fn extension(self) -> &'static str {
		match self {
			ExportFormat::Json => "json",
			ExportFormat::Png => "png",
			ExportFormat::Svg => "svg",
		}
	}
}

/// Serializes `graph` in `format` and starts a browser download named after
/// `epoch_ms`.
pub fn export_graph(graph: &Graph, format: ExportFormat, padding: f64, epoch_ms: f64) -> Result<()> {
	let file_name = export_file_name(epoch_ms, format.extension());
	match format {
		ExportFormat::Json => {
			download_text(&file_name, "application/json", &json::to_json(graph)?)?;
		}
		ExportFormat::Svg => {
			let scene = ExportScene::build(graph, padding)?;
			let doc = svg::to_svg(&scene, &ApproxMeasure::default());
			download_text(&file_name, "image/svg+xml", &doc)?;
		}
		ExportFormat::Png => {
			let scene = ExportScene::build(graph, padding)?;
			download_url(&file_name, &raster::to_png_data_url(&scene)?)?;
		}
	}
	info!("exported {}", file_name);
	Ok(())
}
