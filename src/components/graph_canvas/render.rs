use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

use web_sys::CanvasRenderingContext2d;

use crate::graph::{Bounds, EdgeStyle, Position, VertexStyle};
use crate::runner::Renderer;

/// Vertices away from the pointer shrink to this radius.
const IDLE_RADIUS: f64 = 10.0;
const IDLE_FONT: &str = "12px Arial";
const WEIGHT_FONT: &str = "12px Arial";
const WEIGHT_COLOR: &str = "black";
/// How close the pointer must be to an endpoint to reveal an edge weight.
const WEIGHT_REACH: f64 = 10.0;
const ARROW_SIZE: f64 = 10.0;

/// [`Renderer`] onto a 2d canvas context.
///
/// Clones share the canvas size and pointer cells, so a resize or a pointer
/// move is seen by a renderer already handed to a running animation.
#[derive(Clone)]
pub struct CanvasRenderer {
	ctx: CanvasRenderingContext2d,
	size: Rc<Cell<Bounds>>,
	pointer: Rc<Cell<Position>>,
}

impl CanvasRenderer {
	pub fn new(
		ctx: CanvasRenderingContext2d,
		size: Rc<Cell<Bounds>>,
		pointer: Rc<Cell<Position>>,
	) -> Self {
		Self { ctx, size, pointer }
	}

	fn near_pointer(&self, position: Position, reach: f64) -> bool {
		let pointer = self.pointer.get();
		(pointer.x - position.x).abs() <= reach && (pointer.y - position.y).abs() <= reach
	}
}

impl Renderer for CanvasRenderer {
	fn clear(&mut self) {
		let Bounds { width, height } = self.size.get();
		self.ctx.clear_rect(0.0, 0.0, width, height);
	}

	fn draw_vertex(&mut self, id: &str, position: Position, style: &VertexStyle) {
		let ctx = &self.ctx;
		let hovered = self.near_pointer(position, style.radius);
		let (radius, font) = if hovered {
			(style.radius, style.text_font.as_str())
		} else {
			(IDLE_RADIUS, IDLE_FONT)
		};

		ctx.begin_path();
		let _ = ctx.arc(position.x, position.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&style.fill_color);
		ctx.fill();
		ctx.set_line_width(style.border_width);
		ctx.set_stroke_style_str(&style.border_color);
		ctx.stroke();

		ctx.set_fill_style_str(&style.text_color);
		ctx.set_font(font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(id, position.x, position.y);
	}

	fn draw_edge(
		&mut self,
		weight: f64,
		source: Position,
		target: Position,
		style: &EdgeStyle,
		directed: bool,
	) {
		let ctx = &self.ctx;
		let (dx, dy) = (target.x - source.x, target.y - source.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		ctx.set_stroke_style_str(&style.color);
		ctx.set_line_width(style.width);
		ctx.set_line_cap("round");
		ctx.begin_path();
		ctx.move_to(source.x, source.y);
		ctx.line_to(target.x, target.y);
		ctx.stroke();

		if directed {
			let (ux, uy) = (dx / dist, dy / dist);
			let (tip_x, tip_y) = (target.x - ux * IDLE_RADIUS, target.y - uy * IDLE_RADIUS);
			let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
			let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
			ctx.set_fill_style_str(&style.color);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}

		if self.near_pointer(source, WEIGHT_REACH) || self.near_pointer(target, WEIGHT_REACH) {
			let (mx, my) = ((source.x + target.x) / 2.0, (source.y + target.y) / 2.0);
			ctx.set_fill_style_str(WEIGHT_COLOR);
			ctx.set_font(WEIGHT_FONT);
			ctx.set_text_align("center");
			ctx.set_text_baseline("bottom");
			let _ = ctx.fill_text(&weight.to_string(), mx, my - style.width);
		}
	}
}
