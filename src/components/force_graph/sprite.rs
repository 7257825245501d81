//! Node labels rasterised once onto their own offscreen canvas and then drawn
//! as an upright image next to the node.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub const FONT_SIZE: f64 = 40.0;
pub const PADDING: f64 = 20.0;
pub const MIN_TEXTURE_WIDTH: f64 = 300.0;
/// Texture pixels per graph unit.
pub const TEXTURE_SCALE: f64 = 12.0;
/// Distance from the node centre to the label's centre, in graph units.
pub const LABEL_OFFSET: f64 = 12.0;
const FONT: &str = "40px Arial";
const TEXT_COLOR: &str = "#e8e8f0";

/// Texture size in pixels for a label whose text measures `text_width`.
pub fn texture_size(text_width: f64) -> (f64, f64) {
	(
		MIN_TEXTURE_WIDTH.max(text_width + PADDING * 2.0),
		FONT_SIZE + PADDING,
	)
}

/// Top-left corner, relative to the node, of a label drawn `width` by `height`
/// graph units and centred `LABEL_OFFSET` to the right of the node.
pub fn label_origin(width: f64, height: f64) -> (f64, f64) {
	(LABEL_OFFSET - width / 2.0, -height / 2.0)
}

#[derive(Clone, Debug)]
pub struct LabelSprite {
	pub canvas: HtmlCanvasElement,
	/// Drawn size in graph units.
	pub width: f64,
	pub height: f64,
}

impl LabelSprite {
	/// Rasterise `text`; `None` when the document cannot hand out a 2d canvas.
	pub fn new(document: &Document, text: &str) -> Option<Self> {
		let canvas: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
		let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;

		ctx.set_font(FONT);
		let text_width = ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0);
		let (w, h) = texture_size(text_width);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		// resizing resets the context state
		ctx.set_font(FONT);
		ctx.set_fill_style_str(TEXT_COLOR);
		ctx.set_text_align("left");
		ctx.set_text_baseline("middle");
		ctx.clear_rect(0.0, 0.0, w, h);
		ctx.fill_text(text, PADDING, h / 2.0).ok()?;

		Some(Self {
			canvas,
			width: w / TEXTURE_SCALE,
			height: h / TEXTURE_SCALE,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_labels_get_minimum_width() {
		assert_eq!(texture_size(0.0), (300.0, 60.0));
		assert_eq!(texture_size(120.0), (300.0, 60.0));
	}

	#[test]
	fn long_labels_grow_with_padding() {
		assert_eq!(texture_size(500.0), (540.0, 60.0));
	}

	#[test]
	fn labels_are_centred_on_the_offset() {
		let (w, h) = texture_size(0.0);
		let (w, h) = (w / TEXTURE_SCALE, h / TEXTURE_SCALE);
		let (x, y) = label_origin(w, h);
		assert_eq!(x + w / 2.0, LABEL_OFFSET);
		assert_eq!(y + h / 2.0, 0.0);
		assert_eq!(label_origin(45.0, 5.0), (-10.5, -2.5));
	}
}
