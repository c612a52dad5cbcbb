use std::fmt::Write as _;

use super::scene::{
	BACKGROUND, CORNER_RADIUS, ExportScene, FILL_ALPHA, FONT_SIZE, LINE_ALPHA, LINE_WIDTH,
	TEXT_COLOR, line_baselines,
};
use super::wrap::{TextMeasure, WRAP_RATIO, wrap_label};

/// Renders the scene as a standalone SVG document. Labels are wrapped with
/// `measure` and emitted as one `<tspan>` per line.
pub fn to_svg(scene: &ExportScene, measure: &impl TextMeasure) -> String {
	let mut out = String::new();

	let _ = writeln!(
		out,
		"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
		w = scene.width,
		h = scene.height
	);
	let _ = writeln!(
		out,
		"<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\" />",
		scene.width, scene.height, BACKGROUND
	);

	for line in &scene.lines {
		let _ = writeln!(
			out,
			"<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\" />",
			line.x1,
			line.y1,
			line.x2,
			line.y2,
			escape_xml(&line.color),
			LINE_ALPHA,
			LINE_WIDTH
		);
	}

	for node in &scene.nodes {
		let color = escape_xml(&node.color);
		let _ = writeln!(
			out,
			"<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\" fill=\"{c}\" fill-opacity=\"{}\" stroke=\"{c}\" stroke-width=\"{}\" />",
			node.x,
			node.y,
			node.width,
			node.height,
			FILL_ALPHA,
			LINE_WIDTH,
			r = CORNER_RADIUS,
			c = color
		);

		let (cx, cy) = node.center();
		let lines = wrap_label(&node.label, node.width * WRAP_RATIO, measure);
		let _ = write!(
			out,
			"<text font-family=\"sans-serif\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">",
			FONT_SIZE, TEXT_COLOR
		);
		for (text, y) in lines.iter().zip(line_baselines(cy, lines.len())) {
			let _ = write!(
				out,
				"<tspan x=\"{:.1}\" y=\"{:.1}\">{}</tspan>",
				cx,
				y,
				escape_xml(text)
			);
		}
		let _ = writeln!(out, "</text>");
	}

	let _ = writeln!(out, "</svg>");
	out
}

fn escape_xml(input: &str) -> String {
	let mut s = String::with_capacity(input.len());
	for ch in input.chars() {
		match ch {
			'&' => s.push_str("&amp;"),
			'<' => s.push_str("&lt;"),
			'>' => s.push_str("&gt;"),
			'"' => s.push_str("&quot;"),
			'\'' => s.push_str("&apos;"),
			_ => s.push(ch),
		}
	}
	s
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::export::wrap::ApproxMeasure;
	use crate::components::mind_map::store::GraphStore;
	use crate::components::mind_map::types::ROOT_ID;

	fn render(store: &GraphStore) -> String {
		let scene = ExportScene::build(store.graph(), 40.0).unwrap();
		to_svg(&scene, &ApproxMeasure::default())
	}

	#[test]
	fn root_only_document() {
		let svg = render(&GraphStore::new());
		assert!(svg.starts_with(
			"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"180\" height=\"130\" viewBox=\"0 0 180 130\">"
		));
		assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"180\" height=\"130\" fill=\"#ffffff\" />"));
		assert_eq!(svg.matches("<line").count(), 0);
		assert_eq!(svg.matches("<text").count(), 1);
		assert!(svg.trim_end().ends_with("</svg>"));
	}

	#[test]
	fn one_element_per_connection_and_node() {
		let mut store = GraphStore::new();
		let a = store.add_node();
		let b = store.add_node();
		store.add_connection(ROOT_ID, &a);
		store.add_connection(&a, &b);
		let svg = render(&store);
		assert_eq!(svg.matches("<line").count(), 2);
		assert_eq!(svg.matches("rx=\"8\"").count(), 3);
		assert_eq!(svg.matches("<text").count(), 3);
		assert!(svg.contains("stroke-opacity=\"0.6\""));
		assert!(svg.contains("fill-opacity=\"0.2\""));
	}

	#[test]
	fn labels_are_escaped_and_wrapped() {
		let mut store = GraphStore::new();
		store.update_node_label(ROOT_ID, "R&D <plans> for next quarter");
		let svg = render(&store);
		assert!(svg.contains("R&amp;D"));
		assert!(svg.contains("&lt;plans&gt;"));
		assert!(!svg.contains("<plans>"));
		assert!(svg.matches("<tspan").count() > 1);
	}
}
