use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::Point;
use super::scene::{Scene, Shape, Stroke};
use super::state::ViewTransform;

const DASH: f64 = 6.0;
const GAP: f64 = 4.0;

pub fn render(scene: &Scene, transform: &ViewTransform, size: (f64, f64), ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&scene.background);
	ctx.fill_rect(0.0, 0.0, size.0, size.1);
	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);
	for shape in &scene.shapes {
		draw_shape(shape, ctx);
	}
	ctx.restore();
}

fn draw_shape(shape: &Shape, ctx: &CanvasRenderingContext2d) {
	match shape {
		Shape::Rect {
			origin,
			width,
			height,
			radius,
			fill,
			stroke,
		} => {
			rounded_rect(ctx, *origin, *width, *height, *radius);
			ctx.set_fill_style_str(fill);
			ctx.fill();
			apply_stroke(ctx, stroke);
			ctx.stroke();
			clear_dash(ctx);
		}
		Shape::Polyline { points, stroke } => {
			let Some((first, rest)) = points.split_first() else {
				return;
			};
			ctx.begin_path();
			ctx.move_to(first.x, first.y);
			for p in rest {
				ctx.line_to(p.x, p.y);
			}
			apply_stroke(ctx, stroke);
			ctx.stroke();
			clear_dash(ctx);
		}
		Shape::Circle {
			center,
			radius,
			fill,
		} => {
			ctx.begin_path();
			let _ = ctx.arc(center.x, center.y, *radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(fill);
			ctx.fill();
		}
		Shape::Text {
			at,
			text,
			color,
			font,
		} => {
			ctx.set_fill_style_str(color);
			ctx.set_font(font);
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			let _ = ctx.fill_text(text, at.x, at.y);
		}
	}
}

fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) {
	ctx.set_stroke_style_str(&stroke.color);
	ctx.set_line_width(stroke.width);
	if stroke.dashed {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(DASH),
			&JsValue::from_f64(GAP),
		));
	}
}

fn clear_dash(ctx: &CanvasRenderingContext2d) {
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, origin: Point, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
	let (x, y) = (origin.x, origin.y);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}
