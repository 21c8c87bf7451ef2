//! Frame-rate monitoring and quality adaptation.

use super::device::EnvironmentSnapshot;

/// Frame deltas averaged per FPS estimate.
pub const FRAME_WINDOW: usize = 60;

/// Extra slowdown applied when performance mode is on.
pub const PERFORMANCE_MODE_FACTOR: f64 = 0.7;

const ASSUMED_FPS: f64 = 60.0;
const LOW_FPS: f64 = 45.0;
const REDUCED_FPS: f64 = 55.0;
const STRUGGLING_FPS: f64 = 30.0;

/// Speed multiplier for a measured frame rate.
///
/// Below 45 fps particles move at half speed, below 55 at 80%.
pub fn performance_multiplier(fps: f64) -> f64 {
	if fps < LOW_FPS {
		0.5
	} else if fps < REDUCED_FPS {
		0.8
	} else {
		1.0
	}
}

/// Coarse capability class for the current device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceCapability {
	/// Few cores, little memory, or a struggling frame rate.
	Low,
	#[default]
	Medium,
	/// Many cores and a full frame rate.
	High,
}

impl DeviceCapability {
	/// Classify from hardware hints and the measured frame rate.
	pub fn classify(env: &EnvironmentSnapshot, fps: f64) -> Self {
		let cores = env.hardware_concurrency.filter(|c| *c > 0);
		let memory = env.device_memory.filter(|m| *m > 0.0);

		if cores.is_some_and(|c| c <= 2) || memory.is_some_and(|m| m <= 2.0) || fps < STRUGGLING_FPS
		{
			Self::Low
		} else if cores.is_some_and(|c| c >= 8)
			&& memory.is_none_or(|m| m >= 8.0)
			&& fps >= REDUCED_FPS
		{
			Self::High
		} else {
			Self::Medium
		}
	}

	/// Lowercase name for display.
	pub fn label(self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
		}
	}
}

/// Latest frame-rate readout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceMetrics {
	/// Frames per second over the last full window.
	pub fps: f64,
	/// Below 45 fps.
	pub is_low_performance: bool,
	pub capability: DeviceCapability,
}

impl Default for PerformanceMetrics {
	fn default() -> Self {
		Self {
			fps: ASSUMED_FPS,
			is_low_performance: false,
			capability: DeviceCapability::default(),
		}
	}
}

impl PerformanceMetrics {
	/// Metrics for a measured `fps`.
	pub fn new(fps: f64, env: &EnvironmentSnapshot) -> Self {
		Self {
			fps,
			is_low_performance: fps < LOW_FPS,
			capability: DeviceCapability::classify(env, fps),
		}
	}
}

/// Rolling average of frame deltas.
///
/// Deltas accumulate until the window holds [`FRAME_WINDOW`] samples; the
/// estimate is then recomputed and the window starts over.
#[derive(Clone, Debug)]
pub struct FrameRateMonitor {
	deltas: Vec<f64>,
	last_frame: Option<f64>,
	fps: f64,
}

impl Default for FrameRateMonitor {
	fn default() -> Self {
		Self {
			deltas: Vec::with_capacity(FRAME_WINDOW),
			last_frame: None,
			fps: ASSUMED_FPS,
		}
	}
}

impl FrameRateMonitor {
	/// Monitor assuming 60 fps until the first window fills.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a frame timestamp in milliseconds.
	///
	/// Returns the new estimate when the window just filled.
	pub fn record(&mut self, now: f64) -> Option<f64> {
		let previous = self.last_frame.replace(now);
		let delta = now - previous?;
		if !delta.is_finite() || delta <= 0.0 {
			return None;
		}

		self.deltas.push(delta);
		if self.deltas.len() < FRAME_WINDOW {
			return None;
		}

		let mean = self.deltas.iter().sum::<f64>() / self.deltas.len() as f64;
		self.deltas.clear();
		self.fps = 1000.0 / mean;
		Some(self.fps)
	}

	/// Forget the last timestamp so a pause is not counted as one long frame.
	pub fn reset_clock(&mut self) {
		self.last_frame = None;
	}

	/// Latest estimate.
	pub fn fps(&self) -> f64 {
		self.fps
	}

	/// Speed factor for the latest estimate.
	pub fn multiplier(&self) -> f64 {
		performance_multiplier(self.fps)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn multiplier_thresholds() {
		assert_eq!(performance_multiplier(120.0), 1.0);
		assert_eq!(performance_multiplier(55.0), 1.0);
		assert_eq!(performance_multiplier(54.99), 0.8);
		assert_eq!(performance_multiplier(45.0), 0.8);
		assert_eq!(performance_multiplier(44.99), 0.5);
		assert_eq!(performance_multiplier(0.0), 0.5);
	}

	#[test]
	fn estimate_refreshes_once_per_window() {
		let mut monitor = FrameRateMonitor::new();
		assert_eq!(monitor.record(0.0), None);
		let mut estimates = Vec::new();
		for frame in 1..=(FRAME_WINDOW * 2) {
			if let Some(fps) = monitor.record(frame as f64 * 25.0) {
				estimates.push(fps);
			}
		}
		assert_eq!(estimates.len(), 2);
		assert!((estimates[0] - 40.0).abs() < 1e-9);
		assert_eq!(monitor.multiplier(), 0.5);
	}

	#[test]
	fn reset_clock_skips_the_pause() {
		let mut monitor = FrameRateMonitor::new();
		let mut now = 0.0;
		monitor.record(now);
		for _ in 0..30 {
			now += 16.0;
			monitor.record(now);
		}
		monitor.reset_clock();
		now += 10_000.0;
		assert_eq!(monitor.record(now), None);
		let mut estimate = None;
		for _ in 0..30 {
			now += 16.0;
			estimate = estimate.or(monitor.record(now));
		}
		assert!((estimate.unwrap() - 62.5).abs() < 1e-9);
	}

	#[test]
	fn non_increasing_timestamps_are_ignored() {
		let mut monitor = FrameRateMonitor::new();
		monitor.record(100.0);
		assert_eq!(monitor.record(100.0), None);
		assert_eq!(monitor.record(90.0), None);
		assert_eq!(monitor.fps(), 60.0);
	}

	#[test]
	fn capability_classes() {
		let strong = EnvironmentSnapshot {
			hardware_concurrency: Some(8),
			device_memory: Some(8.0),
			..EnvironmentSnapshot::default()
		};
		assert_eq!(DeviceCapability::classify(&strong, 60.0), DeviceCapability::High);
		assert_eq!(DeviceCapability::classify(&strong, 50.0), DeviceCapability::Medium);
		assert_eq!(DeviceCapability::classify(&strong, 20.0), DeviceCapability::Low);

		let weak = EnvironmentSnapshot {
			hardware_concurrency: Some(2),
			..EnvironmentSnapshot::default()
		};
		assert_eq!(DeviceCapability::classify(&weak, 60.0), DeviceCapability::Low);

		let unknown = EnvironmentSnapshot::default();
		assert_eq!(DeviceCapability::classify(&unknown, 60.0), DeviceCapability::Medium);

		let metrics = PerformanceMetrics::new(40.0, &strong);
		assert!(metrics.is_low_performance);
		assert_eq!(metrics.capability, DeviceCapability::Medium);
	}
}
