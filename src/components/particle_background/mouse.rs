//! Pointer-following particle layer.
//!
//! A handful of followers ease toward the pointer with exponential smoothing.
//! Each follower uses a slightly higher easing factor than the one before it,
//! so the group stretches into a short trail behind the cursor.

/// Followers spawned normally.
pub const FOLLOWER_COUNT: usize = 8;
/// Followers spawned under performance mode.
pub const PERFORMANCE_FOLLOWER_COUNT: usize = 3;

/// Minimum milliseconds between updates.
pub const THROTTLE_MS: f64 = 16.0;
/// Minimum milliseconds between updates under performance mode.
pub const PERFORMANCE_THROTTLE_MS: f64 = 32.0;

const BASE_EASING: f64 = 0.08;
const EASING_STEP: f64 = 0.015;
const DAMPENING: f64 = 0.95;

/// Map a pixel offset inside a `width` x `height` area to percent space.
pub fn pointer_to_percent(px: f64, py: f64, width: f64, height: f64) -> (f64, f64) {
	let to_percent = |value: f64, extent: f64| {
		if extent > 0.0 {
			(value / extent * 100.0).clamp(0.0, 100.0)
		} else {
			50.0
		}
	};
	(to_percent(px, width), to_percent(py, height))
}

/// One dot trailing the pointer, in percent space.
#[derive(Clone, Debug, PartialEq)]
pub struct Follower {
	pub x: f64,
	pub y: f64,
	/// Fraction of the remaining distance covered per update.
	pub easing: f64,
}

/// The follower set plus its throttle clock.
#[derive(Clone, Debug)]
pub struct MouseFollower {
	pub followers: Vec<Follower>,
	target: (f64, f64),
	throttle_ms: f64,
	last_update: Option<f64>,
}

impl MouseFollower {
	/// Followers at the centre, sized for `performance_mode`.
	pub fn new(performance_mode: bool) -> Self {
		let (count, throttle_ms) = if performance_mode {
			(PERFORMANCE_FOLLOWER_COUNT, PERFORMANCE_THROTTLE_MS)
		} else {
			(FOLLOWER_COUNT, THROTTLE_MS)
		};

		Self {
			followers: (0..count)
				.map(|i| Follower {
					x: 50.0,
					y: 50.0,
					easing: BASE_EASING + i as f64 * EASING_STEP,
				})
				.collect(),
			target: (50.0, 50.0),
			throttle_ms,
			last_update: None,
		}
	}

	/// Set the point followers ease toward, in percent space.
	pub fn set_target(&mut self, x: f64, y: f64) {
		self.target = (x, y);
	}

	/// Ease every follower toward the target.
	///
	/// Returns `false` without moving anything when called within the
	/// throttle interval of the previous update.
	pub fn update(&mut self, now: f64) -> bool {
		if let Some(last) = self.last_update {
			if now - last < self.throttle_ms {
				return false;
			}
		}
		self.last_update = Some(now);

		let (tx, ty) = self.target;
		for f in &mut self.followers {
			f.x += (tx - f.x) * f.easing * DAMPENING;
			f.y += (ty - f.y) * f.easing * DAMPENING;
		}
		true
	}

	/// Forget the throttle clock, e.g. after a pause.
	pub fn reset_clock(&mut self) {
		self.last_update = None;
	}
}
