use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::sprite::{MIN_TEXTURE_WIDTH, PADDING, TEXTURE_SCALE, label_origin};
use super::state::{
	ForceGraphState, LINK_OPACITY, LINK_WIDTH, NODE_RADIUS, NodeInfo, PARTICLE_WIDTH,
};

const BACKGROUND: &str = "#0b0b1a";
const LINK_RGB: &str = "240, 240, 240";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let cam = &state.camera;
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(cam.x, cam.y);
	let _ = ctx.rotate(cam.angle);
	let _ = ctx.scale(cam.scale(), cam.scale());
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.camera.scale();
	let width = LINK_WIDTH.max(1.0 / k);
	let t = ease_out_cubic(state.hover.highlight_t);
	let progress = state.particle_progress();

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let lit = state.hover.lit(n1.index()) && state.hover.lit(n2.index());
		let alpha = if lit {
			LINK_OPACITY + 0.4 * t
		} else {
			LINK_OPACITY * (1.0 - 0.7 * t)
		};

		ctx.set_stroke_style_str(&format!("rgba({LINK_RGB}, {alpha})"));
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();

		// one particle per link, flowing source -> target
		let (px, py) = (x1 + (x2 - x1) * progress, y1 + (y2 - y1) * progress);
		ctx.set_fill_style_str(&format!("rgba({LINK_RGB}, {})", (alpha * 1.6).min(1.0)));
		ctx.begin_path();
		let _ = ctx.arc(px, py, PARTICLE_WIDTH.max(1.0 / k), 0.0, 2.0 * PI);
		ctx.fill();
	});
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.hover.active(),
		ease_out_cubic(state.hover.highlight_t),
	);

	// dimmed nodes first so highlighted ones end up on top
	for pass_lit in [false, true] {
		state.graph.visit_nodes(|node| {
			let idx = node.index();
			let lit = has_highlight && state.hover.lit(idx);
			if lit != pass_lit {
				return;
			}
			let (x, y) = (node.x() as f64, node.y() as f64);
			let (alpha, radius) = if !has_highlight {
				(1.0, NODE_RADIUS)
			} else if state.hover.centred_on(idx) {
				(1.0, NODE_RADIUS * (1.0 + 0.35 * t))
			} else if lit {
				(1.0, NODE_RADIUS * (1.0 + 0.15 * t))
			} else {
				(1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t))
			};

			ctx.set_global_alpha(alpha);
			draw_sphere(state, ctx, x, y, radius, &node.data.user_data.color);
			draw_label(state, ctx, x, y, &node.data.user_data);
			ctx.set_global_alpha(1.0);
		});
	}
}

/// Flat disc with a highlight that stays upper-left on screen whatever the roll.
fn draw_sphere(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	radius: f64,
	color: &str,
) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(color);
	ctx.fill();

	let (sin, cos) = ((-state.camera.angle).sin(), (-state.camera.angle).cos());
	let (ox, oy) = (-0.35 * radius, -0.35 * radius);
	let (hx, hy) = (x + ox * cos - oy * sin, y + ox * sin + oy * cos);
	let Ok(shine) = ctx.create_radial_gradient(hx, hy, radius * 0.1, x, y, radius) else {
		return;
	};
	let _ = shine.add_color_stop(0.0, "rgba(255, 255, 255, 0.55)");
	let _ = shine.add_color_stop(0.5, "rgba(255, 255, 255, 0.1)");
	let _ = shine.add_color_stop(1.0, "rgba(0, 0, 0, 0.25)");
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&shine);
	ctx.fill();
}

/// Label sprite kept upright by undoing the camera roll around the node.
fn draw_label(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	info: &NodeInfo,
) {
	ctx.save();
	let _ = ctx.translate(x, y);
	let _ = ctx.rotate(-state.camera.angle);
	match &info.sprite {
		Some(sprite) => {
			let (lx, ly) = label_origin(sprite.width, sprite.height);
			let _ = ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
				&sprite.canvas,
				lx,
				ly,
				sprite.width,
				sprite.height,
			);
		}
		None => {
			// where the text would start inside a minimum-width sprite
			let (lx, _) = label_origin(MIN_TEXTURE_WIDTH / TEXTURE_SCALE, 0.0);
			ctx.set_fill_style_str("#e8e8f0");
			ctx.set_font("3.3px Arial");
			ctx.set_text_align("left");
			ctx.set_text_baseline("middle");
			let _ = ctx.fill_text(&info.label, lx + PADDING / TEXTURE_SCALE, 0.0);
		}
	}
	ctx.restore();
}
