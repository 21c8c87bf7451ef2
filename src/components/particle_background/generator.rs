//! Procedural particle and floating shape generation.
//!
//! Counts are scaled by the section preset and the device class, then clamped
//! to a minimum so the layer never degenerates to nothing. Random fields are
//! drawn from an injected [`fastrand::Rng`]; seeding it makes a layout
//! reproducible.

use log::debug;

use super::device::DeviceInfo;
use super::particles::{FloatingShape, Particle};
use super::theme::SectionConfig;
use super::types::{BackgroundOptions, ColorTheme, ParticleShape, SectionVariant, ShapeKind};

/// Fewest stepped particles a layer will hold while motion is allowed.
pub const MIN_PARTICLES: usize = 5;
/// Fewest floating shapes a layer will hold.
pub const MIN_SHAPES: usize = 2;
/// Cap on floating shapes while reduced motion is requested.
pub const REDUCED_MOTION_MAX_SHAPES: usize = 3;

const MOBILE_PARTICLE_SCALE: f64 = 0.5;
const MOBILE_SHAPE_SCALE: f64 = 0.7;
const LOW_END_PARTICLE_SCALE: f64 = 0.3;
const LOW_END_SHAPE_SCALE: f64 = 0.5;

/// Element counts after section and device scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParticleCounts {
	pub particles: usize,
	pub shapes: usize,
}

/// Scale requested counts for the current section and device.
pub fn adjust_counts(
	base_particles: usize,
	base_shapes: usize,
	section: &SectionConfig,
	device: &DeviceInfo,
	reduced_motion: bool,
) -> ParticleCounts {
	let mut particle_scale = section.particle_intensity;
	let mut shape_scale = section.shape_intensity;
	if device.is_mobile {
		particle_scale *= MOBILE_PARTICLE_SCALE;
		shape_scale *= MOBILE_SHAPE_SCALE;
	}
	if device.is_low_end {
		particle_scale *= LOW_END_PARTICLE_SCALE;
		shape_scale *= LOW_END_SHAPE_SCALE;
	}

	let particles = ((base_particles as f64 * particle_scale).floor() as usize).max(MIN_PARTICLES);
	let shapes = ((base_shapes as f64 * shape_scale).floor() as usize).max(MIN_SHAPES);

	if reduced_motion {
		ParticleCounts {
			particles: 0,
			shapes: shapes.min(REDUCED_MOTION_MAX_SHAPES),
		}
	} else {
		ParticleCounts { particles, shapes }
	}
}

/// Everything a generation pass depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorInput<'a> {
	pub counts: ParticleCounts,
	pub section: &'a SectionConfig,
	pub theme: ColorTheme,
	pub animation_speed: f64,
}

/// Produce fresh particles and floating shapes.
pub fn generate(
	input: &GeneratorInput<'_>,
	rng: &mut fastrand::Rng,
) -> (Vec<Particle>, Vec<FloatingShape>) {
	let palette = input.theme.palette();
	let speed = input.animation_speed * input.section.speed_multiplier;

	let particles = (0..input.counts.particles)
		.map(|id| Particle {
			id,
			x: rng.f64() * 100.0,
			y: rng.f64() * 100.0,
			speed_x: (rng.f64() - 0.5) * 0.1 * speed,
			speed_y: (rng.f64() - 0.5) * 0.1 * speed,
			size: 1.0 + rng.f64() * 3.0,
			opacity: 0.1 + rng.f64() * 0.5,
			color: palette[rng.usize(..palette.len())],
			shape: ParticleShape::ALL[rng.usize(..ParticleShape::ALL.len())],
			rotation: rng.f64() * 360.0,
			rotation_speed: (rng.f64() - 0.5) * 2.0 * speed,
			parallax: 0.2 + rng.f64() * 0.8,
		})
		.collect();

	let shapes = (0..input.counts.shapes)
		.map(|id| FloatingShape {
			id,
			x: 10.0 + rng.f64() * 80.0,
			y: 10.0 + rng.f64() * 80.0,
			size: 20.0 + rng.f64() * 60.0,
			opacity: 0.03 + rng.f64() * 0.07,
			color: palette[rng.usize(..palette.len())],
			kind: ShapeKind::ALL[rng.usize(..ShapeKind::ALL.len())],
			rotation: rng.f64() * 360.0,
			rotation_speed: (rng.f64() - 0.5) * 0.4 * speed,
			float_range: 2.0 + rng.f64() * 6.0,
			delay: rng.f64() * 300.0,
			duration: 600.0 + rng.f64() * 600.0,
		})
		.collect();

	(particles, shapes)
}

/// Inputs that force a regeneration when they change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationKey {
	/// Counts after device and motion scaling.
	pub counts: ParticleCounts,
	pub theme: ColorTheme,
	pub section: SectionVariant,
	pub animation_speed: f64,
	pub seed: Option<u64>,
}

impl GenerationKey {
	/// Key for `options` as adjusted for `device` and the motion preference.
	pub fn new(options: &BackgroundOptions, device: &DeviceInfo, reduced_motion: bool) -> Self {
		Self {
			counts: adjust_counts(
				options.particle_count,
				options.shape_count,
				options.section.config(),
				device,
				reduced_motion,
			),
			theme: options.color_theme,
			section: options.section,
			animation_speed: options.animation_speed,
			seed: options.seed,
		}
	}
}

/// Memoizing wrapper around [`generate`].
#[derive(Debug, Default)]
pub struct ParticleGenerator {
	last: Option<GenerationKey>,
	regenerations: usize,
}

impl ParticleGenerator {
	/// Generator with nothing memoized yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Generate a new layout if `key` differs from the last one seen.
	///
	/// Returns `None` when the previous layout is still valid.
	pub fn regenerate(
		&mut self,
		key: GenerationKey,
	) -> Option<(Vec<Particle>, Vec<FloatingShape>)> {
		if self.last == Some(key) {
			return None;
		}

		let mut rng = match key.seed {
			Some(seed) => fastrand::Rng::with_seed(seed),
			None => fastrand::Rng::new(),
		};
		let input = GeneratorInput {
			counts: key.counts,
			section: key.section.config(),
			theme: key.theme,
			animation_speed: key.animation_speed,
		};
		let layout = generate(&input, &mut rng);

		self.last = Some(key);
		self.regenerations += 1;
		debug!(
			"particle-background: generated {} particles, {} shapes for section {}",
			key.counts.particles,
			key.counts.shapes,
			key.section.name()
		);
		Some(layout)
	}

	/// Number of layouts produced so far.
	pub fn regenerations(&self) -> usize {
		self.regenerations
	}
}
