//! Property tests for generation counts, wrap-around stepping and easing.

use portfolio_particles::components::particle_background::device::DeviceInfo;
use portfolio_particles::components::particle_background::generator::{
	GeneratorInput, ParticleCounts, adjust_counts, generate,
};
use portfolio_particles::components::particle_background::mouse::MouseFollower;
use portfolio_particles::components::particle_background::particles::ParticleField;
use portfolio_particles::components::particle_background::performance::performance_multiplier;
use portfolio_particles::{ColorTheme, SectionVariant};
use proptest::prelude::*;

fn any_section() -> impl Strategy<Value = SectionVariant> {
	prop_oneof![
		Just(SectionVariant::Hero),
		Just(SectionVariant::About),
		Just(SectionVariant::Skills),
		Just(SectionVariant::Projects),
		Just(SectionVariant::Contact),
		Just(SectionVariant::Default),
	]
}

fn any_device() -> impl Strategy<Value = DeviceInfo> {
	(any::<bool>(), any::<bool>()).prop_map(|(is_mobile, is_low_end)| DeviceInfo {
		is_mobile,
		is_low_end,
		is_touch: is_mobile,
		pixel_ratio: 1.0,
	})
}

proptest! {
	#[test]
	fn prop_counts_never_drop_below_floor(
		particles in 0usize..10_000,
		shapes in 0usize..1_000,
		section in any_section(),
		device in any_device(),
	) {
		let counts = adjust_counts(particles, shapes, section.config(), &device, false);
		prop_assert!(counts.particles >= 5);
		prop_assert!(counts.shapes >= 2);
	}

	#[test]
	fn prop_reduced_motion_empties_particles(
		particles in 0usize..10_000,
		shapes in 0usize..1_000,
		section in any_section(),
		device in any_device(),
	) {
		let counts = adjust_counts(particles, shapes, section.config(), &device, true);
		prop_assert_eq!(counts.particles, 0);
		prop_assert!(counts.shapes <= 3);
	}

	#[test]
	fn prop_positions_stay_in_bounds(
		seed in any::<u64>(),
		speed in 0.0f64..50.0,
		steps in 1usize..400,
		multipliers in prop::collection::vec(0.0f64..3.0, 1..8),
	) {
		let input = GeneratorInput {
			counts: ParticleCounts { particles: 40, shapes: 0 },
			section: SectionVariant::Default.config(),
			theme: ColorTheme::Blue,
			animation_speed: speed,
		};
		let mut rng = fastrand::Rng::with_seed(seed);
		let (particles, shapes) = generate(&input, &mut rng);
		let mut field = ParticleField::new(particles, shapes);
		for i in 0..steps {
			field.step(multipliers[i % multipliers.len()]);
		}
		for p in &field.particles {
			prop_assert!((0.0..100.0).contains(&p.x), "x out of range: {}", p.x);
			prop_assert!((0.0..100.0).contains(&p.y), "y out of range: {}", p.y);
		}
	}

	#[test]
	fn prop_followers_converge_monotonically(
		tx in 0.0f64..=100.0,
		ty in 0.0f64..=100.0,
		performance_mode in any::<bool>(),
	) {
		let mut layer = MouseFollower::new(performance_mode);
		layer.set_target(tx, ty);
		let distance = |x: f64, y: f64| (tx - x).hypot(ty - y);
		let mut previous: Vec<f64> = layer.followers.iter().map(|f| distance(f.x, f.y)).collect();
		for frame in 0..200 {
			prop_assert!(layer.update(frame as f64 * 40.0));
			for (f, before) in layer.followers.iter().zip(previous.iter_mut()) {
				let now = distance(f.x, f.y);
				prop_assert!(now <= *before + 1e-12);
				*before = now;
			}
		}
		for d in previous {
			prop_assert!(d < 1.0);
		}
	}

	#[test]
	fn prop_multiplier_is_one_of_three_levels(fps in 0.0f64..240.0) {
		let m = performance_multiplier(fps);
		let expected = if fps < 45.0 { 0.5 } else if fps < 55.0 { 0.8 } else { 1.0 };
		prop_assert_eq!(m, expected);
	}
}
