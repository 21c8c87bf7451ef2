//! The particle engine: generation, stepping and adaptation in one place.
//!
//! `ParticleEngine` owns no timers. Callers feed it frame timestamps and
//! environment changes; it decides what moves and by how much.

use log::{debug, info};

use super::device::{DeviceInfo, EnvironmentSnapshot};
use super::gate::{MotionGate, MotionState};
use super::generator::{GenerationKey, ParticleCounts, ParticleGenerator};
use super::mouse::{MouseFollower, pointer_to_percent};
use super::particles::ParticleField;
use super::performance::{FrameRateMonitor, PERFORMANCE_MODE_FACTOR, PerformanceMetrics};
use super::theme::SectionConfig;
use super::types::BackgroundOptions;

/// Particle state plus the policies that decide how it moves.
pub struct ParticleEngine {
	options: BackgroundOptions,
	environment: EnvironmentSnapshot,
	device: DeviceInfo,
	generator: ParticleGenerator,
	counts: ParticleCounts,
	field: ParticleField,
	monitor: FrameRateMonitor,
	metrics: PerformanceMetrics,
	follower: MouseFollower,
	pointer: (f64, f64),
	gate: MotionGate,
}

impl ParticleEngine {
	/// Probe `environment` and generate the initial field.
	pub fn new(
		options: BackgroundOptions,
		environment: EnvironmentSnapshot,
		reduced_motion: bool,
		hidden: bool,
	) -> Self {
		let device = DeviceInfo::probe(&environment);
		let follower = MouseFollower::new(options.performance_mode);
		let mut engine = Self {
			options,
			metrics: PerformanceMetrics::new(60.0, &environment),
			environment,
			device,
			generator: ParticleGenerator::new(),
			counts: ParticleCounts::default(),
			field: ParticleField::default(),
			monitor: FrameRateMonitor::new(),
			follower,
			pointer: (50.0, 50.0),
			gate: MotionGate::new(reduced_motion, hidden),
		};
		engine.regenerate();
		engine
	}

	/// Rebuild the field if any generation input changed.
	fn regenerate(&mut self) -> bool {
		let key = GenerationKey::new(&self.options, &self.device, self.gate.reduced_motion());
		let Some((particles, shapes)) = self.generator.regenerate(key) else {
			return false;
		};
		self.counts = key.counts;
		self.field = ParticleField::new(particles, shapes);
		true
	}

	fn on_gate_change(&mut self, change: Option<MotionState>) -> Option<MotionState> {
		let state = change?;
		info!("particle-background: motion {:?}", state);
		if state != MotionState::Running {
			self.monitor.reset_clock();
			self.follower.reset_clock();
		}
		Some(state)
	}

	/// Apply new construction parameters. Returns whether the field was rebuilt.
	pub fn set_options(&mut self, options: BackgroundOptions) -> bool {
		if options == self.options {
			return false;
		}
		if options.performance_mode != self.options.performance_mode {
			self.follower = MouseFollower::new(options.performance_mode);
			self.follower.set_target(self.pointer.0, self.pointer.1);
		}
		self.options = options;
		self.regenerate()
	}

	/// Re-probe the device after a resize. Returns whether the field was rebuilt.
	pub fn resize(&mut self, environment: EnvironmentSnapshot) -> bool {
		self.device = DeviceInfo::probe(&environment);
		self.environment = environment;
		self.regenerate()
	}

	/// Returns the new gate state if it changed. Counts follow the preference.
	pub fn set_reduced_motion(&mut self, enabled: bool) -> Option<MotionState> {
		let change = self.gate.set_reduced_motion(enabled);
		let state = self.on_gate_change(change);
		if state.is_some() {
			self.regenerate();
		}
		state
	}

	/// Returns the new gate state if it changed.
	pub fn set_hidden(&mut self, hidden: bool) -> Option<MotionState> {
		let change = self.gate.set_hidden(hidden);
		self.on_gate_change(change)
	}

	/// Stop for good. Later inputs never restart motion.
	pub fn unmount(&mut self) -> Option<MotionState> {
		let change = self.gate.unmount();
		self.on_gate_change(change)
	}

	/// Whether the stepped layer should be animating.
	pub fn kinematics_enabled(&self) -> bool {
		self.gate.is_running() && self.counts.particles > 0
	}

	/// Whether the pointer-following layer should be animating.
	pub fn follow_enabled(&self) -> bool {
		self.gate.is_running()
			&& self.options.enable_mouse_follow
			&& !self.device.is_touch
			&& !self.follower.followers.is_empty()
	}

	/// Speed factor applied to the next step.
	pub fn step_multiplier(&self) -> f64 {
		let mode = if self.options.performance_mode {
			PERFORMANCE_MODE_FACTOR
		} else {
			1.0
		};
		self.monitor.multiplier() * mode
	}

	/// Advance one animation frame at `now` milliseconds.
	///
	/// Returns fresh metrics when the frame-rate estimate was recomputed.
	pub fn step(&mut self, now: f64) -> Option<PerformanceMetrics> {
		if !self.kinematics_enabled() {
			return None;
		}

		let refreshed = self.monitor.record(now).map(|fps| {
			self.metrics = PerformanceMetrics::new(fps, &self.environment);
			if self.metrics.is_low_performance {
				debug!("particle-background: low frame rate ({:.1} fps)", fps);
			}
			self.metrics
		});

		let multiplier = self.step_multiplier();
		self.field.step(multiplier);
		refreshed
	}

	/// Ease followers toward the pointer. Returns whether anything moved.
	pub fn update_followers(&mut self, now: f64) -> bool {
		if !self.follow_enabled() {
			return false;
		}
		self.follower.update(now)
	}

	/// Record a pointer position in pixels within a `width` x `height` area.
	pub fn pointer_moved(&mut self, x: f64, y: f64, width: f64, height: f64) {
		let (px, py) = pointer_to_percent(x, y, width, height);
		self.pointer = (px, py);
		self.follower.set_target(px, py);
	}

	/// Options the field was generated from.
	pub fn options(&self) -> &BackgroundOptions {
		&self.options
	}

	/// Latest probe result.
	pub fn device(&self) -> &DeviceInfo {
		&self.device
	}

	/// Preset for the configured section.
	pub fn section(&self) -> &'static SectionConfig {
		self.options.section.config()
	}

	/// Effective counts after device and motion scaling.
	pub fn counts(&self) -> ParticleCounts {
		self.counts
	}

	/// Current particles and shapes.
	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	/// Pointer-following layer.
	pub fn follower(&self) -> &MouseFollower {
		&self.follower
	}

	/// Last pointer position in percent space.
	pub fn pointer(&self) -> (f64, f64) {
		self.pointer
	}

	/// Latest metrics; the probed capability at 60 fps until a window fills.
	pub fn metrics(&self) -> PerformanceMetrics {
		self.metrics
	}

	/// Current gate state.
	pub fn motion_state(&self) -> MotionState {
		self.gate.state()
	}

	/// How many times the field has been generated.
	pub fn regenerations(&self) -> usize {
		self.generator.regenerations()
	}
}

#[cfg(test)]
mod tests {
	use super::super::gate::PauseReason;
	use super::*;

	fn desktop() -> EnvironmentSnapshot {
		EnvironmentSnapshot {
			inner_width: 1440.0,
			inner_height: 900.0,
			hardware_concurrency: Some(8),
			device_memory: Some(8.0),
			..EnvironmentSnapshot::default()
		}
	}

	fn seeded() -> BackgroundOptions {
		BackgroundOptions {
			seed: Some(9),
			..BackgroundOptions::default()
		}
	}

	#[test]
	fn reduced_motion_never_steps() {
		let mut engine = ParticleEngine::new(seeded(), desktop(), true, false);
		assert_eq!(engine.counts().particles, 0);
		assert_eq!(engine.counts().shapes, 3);
		assert!(!engine.kinematics_enabled());
		let before = engine.field().shapes.clone();
		for frame in 0..10 {
			assert_eq!(engine.step(frame as f64 * 16.0), None);
		}
		assert_eq!(engine.field().shapes, before);
		assert_eq!(engine.field().elapsed, 0.0);
	}

	#[test]
	fn performance_mode_slows_stepping() {
		let mut engine = ParticleEngine::new(seeded(), desktop(), false, false);
		assert_eq!(engine.step_multiplier(), 1.0);
		engine.set_options(BackgroundOptions {
			performance_mode: true,
			..seeded()
		});
		assert!((engine.step_multiplier() - 0.7).abs() < 1e-12);
		assert_eq!(engine.follower().followers.len(), 3);
	}

	#[test]
	fn slow_frames_halve_the_multiplier() {
		let mut engine = ParticleEngine::new(seeded(), desktop(), false, false);
		let mut refreshed = None;
		for frame in 0..=60 {
			refreshed = refreshed.or(engine.step(frame as f64 * 40.0));
		}
		let metrics = refreshed.unwrap();
		assert!((metrics.fps - 25.0).abs() < 1e-9);
		assert!(metrics.is_low_performance);
		assert_eq!(engine.step_multiplier(), 0.5);
	}

	#[test]
	fn stepping_moves_particles() {
		let mut engine = ParticleEngine::new(seeded(), desktop(), false, false);
		let before = engine.field().particles.clone();
		engine.step(0.0);
		engine.step(16.0);
		let after = &engine.field().particles;
		assert_eq!(before.len(), after.len());
		assert!(before.iter().zip(after).any(|(a, b)| a.x != b.x || a.y != b.y));
	}

	#[test]
	fn hidden_tab_pauses_and_resumes() {
		let mut engine = ParticleEngine::new(seeded(), desktop(), false, false);
		assert_eq!(
			engine.set_hidden(true),
			Some(MotionState::Paused(PauseReason::Hidden))
		);
		assert!(!engine.kinematics_enabled());
		assert!(!engine.follow_enabled());
		assert_eq!(engine.set_hidden(false), Some(MotionState::Running));
		assert!(engine.kinematics_enabled());
	}

	#[test]
	fn leaving_reduced_motion_restores_particles() {
		let mut engine = ParticleEngine::new(seeded(), desktop(), true, false);
		assert_eq!(engine.set_reduced_motion(false), Some(MotionState::Running));
		assert_eq!(engine.counts().particles, 50);
		assert!(engine.kinematics_enabled());
	}

	#[test]
	fn resize_to_mobile_regenerates_and_disables_follow() {
		let mut engine = ParticleEngine::new(seeded(), desktop(), false, false);
		assert!(engine.follow_enabled());
		let phone = EnvironmentSnapshot {
			inner_width: 500.0,
			..desktop()
		};
		assert!(engine.resize(phone.clone()));
		assert_eq!(engine.counts().particles, 25);
		assert!(!engine.follow_enabled());
		assert!(!engine.resize(phone));
		assert_eq!(engine.regenerations(), 2);
	}

	#[test]
	fn pointer_targets_followers() {
		let mut engine = ParticleEngine::new(seeded(), desktop(), false, false);
		engine.pointer_moved(1440.0, 0.0, 1440.0, 900.0);
		assert_eq!(engine.pointer(), (100.0, 0.0));
		assert!(engine.update_followers(0.0));
		assert!(engine.follower().followers[0].x > 50.0);
		assert!(!engine.update_followers(5.0));
	}

	#[test]
	fn follow_respects_option_and_touch() {
		let engine = ParticleEngine::new(
			BackgroundOptions {
				enable_mouse_follow: false,
				..seeded()
			},
			desktop(),
			false,
			false,
		);
		assert!(engine.kinematics_enabled());
		assert!(!engine.follow_enabled());

		let mut engine = ParticleEngine::new(seeded(), desktop(), false, false);
		assert!(engine.follow_enabled());
		engine.resize(EnvironmentSnapshot {
			max_touch_points: Some(5),
			..desktop()
		});
		assert!(!engine.device().is_mobile);
		assert!(!engine.follow_enabled());
		assert!(!engine.update_followers(0.0));
	}

	#[test]
	fn unmounted_engine_is_inert() {
		let mut engine = ParticleEngine::new(seeded(), desktop(), false, false);
		assert_eq!(engine.unmount(), Some(MotionState::Stopped));
		assert_eq!(engine.set_hidden(false), None);
		assert!(!engine.kinematics_enabled());
		assert!(!engine.update_followers(100.0));
	}
}
