//! Canvas rendering for the particle background.
//!
//! Drawing order, back to front:
//! 1. Section gradient wash
//! 2. Floating shapes (outlined)
//! 3. Stepped particles (filled), shifted by parallax
//! 4. Pointer followers

use std::f64::consts::{PI, TAU};

use web_sys::CanvasRenderingContext2d;

use super::engine::ParticleEngine;
use super::particles::parallax_offset;
use super::theme::Color;
use super::types::{ParticleShape, ShapeKind};

/// Degrees the gradient axis turns per stepped frame.
const GRADIENT_SPIN: f64 = 0.05;

/// Canvas size in CSS pixels.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	fn to_px(self, x: f64, y: f64) -> (f64, f64) {
		(x / 100.0 * self.width, y / 100.0 * self.height)
	}
}

/// Renders the complete layer to the canvas.
pub fn render(engine: &ParticleEngine, ctx: &CanvasRenderingContext2d, viewport: Viewport) {
	ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
	draw_gradient(engine, ctx, viewport);
	draw_shapes(engine, ctx, viewport);
	draw_particles(engine, ctx, viewport);
	if engine.follow_enabled() {
		draw_followers(engine, ctx, viewport);
	}
}

fn draw_gradient(engine: &ParticleEngine, ctx: &CanvasRenderingContext2d, viewport: Viewport) {
	let stops = &engine.section().gradient;
	let angle = if engine.options().enable_gradient_animation {
		(135.0 + engine.field().elapsed * GRADIENT_SPIN).to_radians()
	} else {
		135.0_f64.to_radians()
	};

	let (cx, cy) = (viewport.width / 2.0, viewport.height / 2.0);
	let reach = viewport.width.hypot(viewport.height) / 2.0;
	let (dx, dy) = (angle.cos() * reach, angle.sin() * reach);
	let gradient = ctx.create_linear_gradient(cx - dx, cy - dy, cx + dx, cy + dy);
	for (i, stop) in stops.iter().enumerate() {
		let _ = gradient.add_color_stop(i as f32 / (stops.len() - 1) as f32, &stop.to_css());
	}

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
}

fn draw_shapes(engine: &ParticleEngine, ctx: &CanvasRenderingContext2d, viewport: Viewport) {
	let elapsed = engine.field().elapsed;
	ctx.set_line_width(1.5);

	for s in &engine.field().shapes {
		let (ox, oy) = s.float_offset(elapsed);
		let (x, y) = viewport.to_px(s.x + ox, s.y + oy);
		ctx.set_stroke_style_str(&s.color.with_alpha(s.opacity * 2.0).to_css());
		ctx.set_fill_style_str(&s.color.with_alpha(s.opacity).to_css());

		ctx.save();
		let _ = ctx.translate(x, y);
		let _ = ctx.rotate(s.rotation.to_radians());
		trace_kind(ctx, s.kind, s.size / 2.0);
		ctx.fill();
		ctx.stroke();
		ctx.restore();
	}
}

fn draw_particles(engine: &ParticleEngine, ctx: &CanvasRenderingContext2d, viewport: Viewport) {
	let options = engine.options();
	let parallax = options.enable_parallax && options.enable_mouse_interaction;
	let pointer = engine.pointer();

	for p in &engine.field().particles {
		let (ox, oy) = if parallax {
			parallax_offset(p, pointer)
		} else {
			(0.0, 0.0)
		};
		let (x, y) = viewport.to_px(p.x + ox, p.y + oy);
		ctx.set_fill_style_str(&p.color.with_alpha(p.opacity).to_css());

		ctx.save();
		let _ = ctx.translate(x, y);
		let _ = ctx.rotate(p.rotation.to_radians());
		trace_particle(ctx, p.shape, p.size);
		ctx.fill();
		ctx.restore();
	}
}

fn draw_followers(engine: &ParticleEngine, ctx: &CanvasRenderingContext2d, viewport: Viewport) {
	let palette = engine.options().color_theme.palette();
	let followers = &engine.follower().followers;
	let count = followers.len().max(1) as f64;

	for (i, f) in followers.iter().enumerate() {
		let (x, y) = viewport.to_px(f.x, f.y);
		let fade = 1.0 - i as f64 / count;
		let color: Color = palette[i % palette.len()].with_alpha(0.15 + 0.45 * fade);
		ctx.set_fill_style_str(&color.to_css());
		ctx.begin_path();
		let _ = ctx.arc(x, y, 2.0 + 4.0 * fade, 0.0, TAU);
		ctx.fill();
	}
}

fn trace_particle(ctx: &CanvasRenderingContext2d, shape: ParticleShape, radius: f64) {
	let kind = match shape {
		ParticleShape::Circle => ShapeKind::Circle,
		ParticleShape::Square => ShapeKind::Square,
		ParticleShape::Triangle => ShapeKind::Triangle,
		ParticleShape::Hexagon => ShapeKind::Hexagon,
	};
	trace_kind(ctx, kind, radius);
}

/// Trace a closed path centred on the origin.
fn trace_kind(ctx: &CanvasRenderingContext2d, kind: ShapeKind, radius: f64) {
	ctx.begin_path();
	match kind {
		ShapeKind::Circle => {
			let _ = ctx.arc(0.0, 0.0, radius, 0.0, TAU);
		}
		ShapeKind::Square => ctx.rect(-radius, -radius, radius * 2.0, radius * 2.0),
		ShapeKind::Triangle => trace_polygon(ctx, 3, radius, -PI / 2.0),
		ShapeKind::Hexagon => trace_polygon(ctx, 6, radius, 0.0),
		ShapeKind::Diamond => trace_polygon(ctx, 4, radius, 0.0),
	}
	ctx.close_path();
}

fn trace_polygon(ctx: &CanvasRenderingContext2d, sides: u32, radius: f64, start: f64) {
	for i in 0..sides {
		let angle = start + TAU * i as f64 / sides as f64;
		let (x, y) = (radius * angle.cos(), radius * angle.sin());
		if i == 0 {
			ctx.move_to(x, y);
		} else {
			ctx.line_to(x, y);
		}
	}
}
