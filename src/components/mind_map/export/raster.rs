use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{
	BACKGROUND, CORNER_RADIUS, ExportScene, FILL_ALPHA, FONT_SIZE, LINE_ALPHA, LINE_WIDTH,
	SceneNode, TEXT_COLOR, line_baselines,
};
use super::wrap::{ApproxMeasure, TextMeasure, WRAP_RATIO, wrap_label};
use crate::error::{MindMapError, Result};

impl TextMeasure for CanvasRenderingContext2d {
	fn text_width(&self, text: &str) -> f64 {
		self.measure_text(text)
			.map(|m| m.width())
			.unwrap_or_else(|_| ApproxMeasure::default().text_width(text))
	}
}

/// Paints the scene on an off-screen canvas and returns it as a PNG data URL.
pub fn to_png_data_url(scene: &ExportScene) -> Result<String> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| MindMapError::Dom("no document".into()))?;
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")?
		.dyn_into()
		.map_err(|_| MindMapError::Dom("not a canvas element".into()))?;
	canvas.set_width(scene.width as u32);
	canvas.set_height(scene.height as u32);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		.ok_or_else(|| MindMapError::Dom("2d context unavailable".into()))?;

	paint(scene, &ctx)?;
	Ok(canvas.to_data_url_with_type("image/png")?)
}

fn paint(scene: &ExportScene, ctx: &CanvasRenderingContext2d) -> Result<()> {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);

	ctx.set_line_width(LINE_WIDTH);
	ctx.set_global_alpha(LINE_ALPHA);
	for line in &scene.lines {
		ctx.set_stroke_style_str(&line.color);
		ctx.begin_path();
		ctx.move_to(line.x1, line.y1);
		ctx.line_to(line.x2, line.y2);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);

	ctx.set_font(&format!("{}px sans-serif", FONT_SIZE));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for node in &scene.nodes {
		rounded_rect(ctx, node)?;
		ctx.set_global_alpha(FILL_ALPHA);
		ctx.set_fill_style_str(&node.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);
		ctx.set_stroke_style_str(&node.color);
		ctx.stroke();

		let (cx, cy) = node.center();
		let lines = wrap_label(&node.label, node.width * WRAP_RATIO, ctx);
		ctx.set_fill_style_str(TEXT_COLOR);
		for (text, y) in lines.iter().zip(line_baselines(cy, lines.len())) {
			ctx.fill_text(text, cx, y)?;
		}
	}
	Ok(())
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, node: &SceneNode) -> Result<()> {
	let (x, y, w, h, r) = (node.x, node.y, node.width, node.height, CORNER_RADIUS);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	ctx.arc_to(x + w, y, x + w, y + h, r)?;
	ctx.arc_to(x + w, y + h, x, y + h, r)?;
	ctx.arc_to(x, y + h, x, y, r)?;
	ctx.arc_to(x, y, x + w, y, r)?;
	ctx.close_path();
	Ok(())
}
