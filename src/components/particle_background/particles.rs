//! Particle records and the per-frame kinematics stepper.
//!
//! Positions live in percentage space: `(0, 0)` is the top-left corner of the
//! layer, `(100, 100)` the bottom-right. The space is a torus, so a particle
//! leaving one edge re-enters from the opposite one.

use std::f64::consts::TAU;

use super::theme::Color;
use super::types::{ParticleShape, ShapeKind};

/// A single stepped particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub id: usize,
	pub x: f64,
	pub y: f64,
	/// Percent per frame at multiplier 1.0.
	pub speed_x: f64,
	pub speed_y: f64,
	pub size: f64,
	pub opacity: f64,
	pub color: Color,
	pub shape: ParticleShape,
	/// Degrees. Unbounded; consumers render it modulo 360.
	pub rotation: f64,
	pub rotation_speed: f64,
	/// How strongly the particle follows the pointer when parallax is on.
	pub parallax: f64,
}

/// A larger, slowly bobbing decorative shape.
///
/// Its drift is a looping oscillation around `(x, y)` computed from the
/// field's elapsed clock rather than from a velocity.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingShape {
	pub id: usize,
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub opacity: f64,
	pub color: Color,
	pub kind: ShapeKind,
	pub rotation: f64,
	pub rotation_speed: f64,
	/// Peak vertical displacement, in percent.
	pub float_range: f64,
	/// Frames before this shape's loop begins.
	pub delay: f64,
	/// Frames per full loop.
	pub duration: f64,
}

impl FloatingShape {
	/// Offset from the resting position after `elapsed` frames.
	pub fn float_offset(&self, elapsed: f64) -> (f64, f64) {
		let t = (elapsed - self.delay).max(0.0);
		let phase = TAU * t / self.duration.max(1.0);
		(
			phase.cos() * self.float_range * 0.25,
			phase.sin() * self.float_range,
		)
	}
}

/// Wrap a coordinate into `[0, 100)`.
pub fn wrap_percent(value: f64) -> f64 {
	let wrapped = value.rem_euclid(100.0);
	// rem_euclid rounds tiny negatives up to exactly 100.0
	if wrapped >= 100.0 { 0.0 } else { wrapped }
}

/// Pointer-relative shift applied at draw time when parallax is enabled.
///
/// `pointer` is in percent space. A pointer at the centre yields no shift.
pub fn parallax_offset(particle: &Particle, pointer: (f64, f64)) -> (f64, f64) {
	const MAX_SHIFT: f64 = 3.0;
	let (px, py) = pointer;
	(
		(px - 50.0) / 50.0 * MAX_SHIFT * particle.parallax,
		(py - 50.0) / 50.0 * MAX_SHIFT * particle.parallax,
	)
}

/// All stepped elements of one background layer.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
	pub particles: Vec<Particle>,
	pub shapes: Vec<FloatingShape>,
	/// Frames stepped since the field was populated, scaled by the multiplier.
	pub elapsed: f64,
}

impl ParticleField {
	/// Field with the clock at zero.
	pub fn new(particles: Vec<Particle>, shapes: Vec<FloatingShape>) -> Self {
		Self {
			particles,
			shapes,
			elapsed: 0.0,
		}
	}

	/// Advance every element by one frame scaled by `multiplier`.
	pub fn step(&mut self, multiplier: f64) {
		for p in &mut self.particles {
			p.x = wrap_percent(p.x + p.speed_x * multiplier);
			p.y = wrap_percent(p.y + p.speed_y * multiplier);
			p.rotation += p.rotation_speed * multiplier;
		}

		for s in &mut self.shapes {
			s.rotation += s.rotation_speed * multiplier;
		}

		self.elapsed += multiplier;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn particle(x: f64, y: f64, speed_x: f64, speed_y: f64) -> Particle {
		Particle {
			id: 0,
			x,
			y,
			speed_x,
			speed_y,
			size: 2.0,
			opacity: 0.5,
			color: Color::rgb(255, 255, 255),
			shape: ParticleShape::Circle,
			rotation: 0.0,
			rotation_speed: 2.0,
			parallax: 1.0,
		}
	}

	fn shape() -> FloatingShape {
		FloatingShape {
			id: 0,
			x: 50.0,
			y: 50.0,
			size: 40.0,
			opacity: 0.1,
			color: Color::rgb(255, 255, 255),
			kind: ShapeKind::Diamond,
			rotation: 0.0,
			rotation_speed: 0.5,
			float_range: 4.0,
			delay: 10.0,
			duration: 400.0,
		}
	}

	#[test]
	fn particles_wrap_at_edges() {
		let mut field = ParticleField::new(
			vec![particle(99.5, 0.2, 1.0, -0.5), particle(0.0, 99.9, -0.25, 0.25)],
			vec![],
		);
		field.step(1.0);
		let (a, b) = (&field.particles[0], &field.particles[1]);
		assert!((a.x - 0.5).abs() < 1e-9);
		assert!((a.y - 99.7).abs() < 1e-9);
		assert!((b.x - 99.75).abs() < 1e-9);
		assert!((b.y - 0.15).abs() < 1e-9);
	}

	#[test]
	fn multiplier_scales_motion() {
		let mut field = ParticleField::new(vec![particle(10.0, 10.0, 1.0, 2.0)], vec![]);
		field.step(0.5);
		let p = &field.particles[0];
		assert!((p.x - 10.5).abs() < 1e-9);
		assert!((p.y - 11.0).abs() < 1e-9);
		assert!((p.rotation - 1.0).abs() < 1e-9);
		assert!((field.elapsed - 0.5).abs() < 1e-9);
	}

	#[test]
	fn rotation_is_unbounded() {
		let mut field = ParticleField::new(vec![particle(10.0, 10.0, 0.0, 0.0)], vec![shape()]);
		for _ in 0..400 {
			field.step(1.0);
		}
		assert!((field.particles[0].rotation - 800.0).abs() < 1e-9);
		assert!((field.shapes[0].rotation - 200.0).abs() < 1e-9);
	}

	#[test]
	fn wrap_never_returns_one_hundred() {
		assert_eq!(wrap_percent(100.0), 0.0);
		assert_eq!(wrap_percent(-1e-17), 0.0);
		assert!((wrap_percent(-0.5) - 99.5).abs() < 1e-9);
		assert!((wrap_percent(250.0) - 50.0).abs() < 1e-9);
	}

	#[test]
	fn floating_shapes_wait_for_their_delay() {
		let s = shape();
		let (dx, dy) = s.float_offset(5.0);
		assert!((dx - 1.0).abs() < 1e-9);
		assert_eq!(dy, 0.0);

		let (_, dy) = s.float_offset(s.delay + s.duration / 4.0);
		assert!((dy - s.float_range).abs() < 1e-9);
	}

	#[test]
	fn parallax_is_centered() {
		let p = particle(20.0, 20.0, 0.0, 0.0);
		assert_eq!(parallax_offset(&p, (50.0, 50.0)), (0.0, 0.0));
		let (dx, dy) = parallax_offset(&p, (100.0, 0.0));
		assert!((dx - 3.0).abs() < 1e-9);
		assert!((dy + 3.0).abs() < 1e-9);
	}
}
