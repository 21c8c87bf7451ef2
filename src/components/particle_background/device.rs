//! Device capability probe.
//!
//! Classifies the runtime from a snapshot of ambient browser values. Every
//! probed value is optional; a missing value never marks the device as
//! low-end on its own.

/// Viewport widths at or below this are treated as mobile.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Core count or memory (GB) at or below this marks the device as low-end.
const LOW_END_THRESHOLD: f64 = 4.0;

const MOBILE_USER_AGENTS: [&str; 8] = [
	"android",
	"webos",
	"iphone",
	"ipad",
	"ipod",
	"blackberry",
	"iemobile",
	"opera mini",
];

/// Raw ambient values read from the host environment.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentSnapshot {
	/// Viewport size in CSS pixels.
	pub inner_width: f64,
	pub inner_height: f64,
	/// Logical core count, where reported.
	pub hardware_concurrency: Option<u32>,
	/// Approximate RAM in GB (`navigator.deviceMemory`), where supported.
	pub device_memory: Option<f64>,
	pub user_agent: Option<String>,
	pub device_pixel_ratio: Option<f64>,
	/// `navigator.maxTouchPoints`; nonzero marks a touch device.
	pub max_touch_points: Option<u32>,
}

impl Default for EnvironmentSnapshot {
	fn default() -> Self {
		Self {
			inner_width: 1280.0,
			inner_height: 800.0,
			hardware_concurrency: None,
			device_memory: None,
			user_agent: None,
			device_pixel_ratio: None,
			max_touch_points: None,
		}
	}
}

/// Coarse device classification used to scale particle counts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceInfo {
	/// Viewport at or below the mobile breakpoint.
	pub is_mobile: bool,
	/// Few cores, little memory, or a mobile user agent.
	pub is_low_end: bool,
	/// Touch-capable or mobile. Mouse-follow is disabled on these.
	pub is_touch: bool,
	pub pixel_ratio: f64,
}

impl Default for DeviceInfo {
	fn default() -> Self {
		Self {
			is_mobile: false,
			is_low_end: false,
			is_touch: false,
			pixel_ratio: 1.0,
		}
	}
}

impl DeviceInfo {
	/// Classify the device from `env`.
	pub fn probe(env: &EnvironmentSnapshot) -> Self {
		let is_mobile = env.inner_width <= MOBILE_BREAKPOINT;
		let few_cores = env
			.hardware_concurrency
			.is_some_and(|cores| cores > 0 && cores as f64 <= LOW_END_THRESHOLD);
		let little_memory = env
			.device_memory
			.is_some_and(|gb| gb > 0.0 && gb <= LOW_END_THRESHOLD);
		let mobile_agent = env.user_agent.as_deref().is_some_and(is_mobile_user_agent);

		Self {
			is_mobile,
			is_low_end: few_cores || little_memory || mobile_agent,
			is_touch: is_mobile || env.max_touch_points.is_some_and(|points| points > 0),
			pixel_ratio: env
				.device_pixel_ratio
				.filter(|ratio| ratio.is_finite() && *ratio > 0.0)
				.unwrap_or(1.0),
		}
	}
}

fn is_mobile_user_agent(agent: &str) -> bool {
	let agent = agent.to_ascii_lowercase();
	MOBILE_USER_AGENTS.iter().any(|needle| agent.contains(needle))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn desktop() -> EnvironmentSnapshot {
		EnvironmentSnapshot {
			inner_width: 1440.0,
			inner_height: 900.0,
			hardware_concurrency: Some(12),
			device_memory: Some(16.0),
			user_agent: Some("Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0".into()),
			device_pixel_ratio: Some(2.0),
			max_touch_points: Some(0),
		}
	}

	#[test]
	fn desktop_is_neither_mobile_nor_low_end() {
		let info = DeviceInfo::probe(&desktop());
		assert!(!info.is_mobile);
		assert!(!info.is_low_end);
		assert!(!info.is_touch);
		assert_eq!(info.pixel_ratio, 2.0);
	}

	#[test]
	fn narrow_viewport_is_mobile() {
		let env = EnvironmentSnapshot {
			inner_width: 500.0,
			..desktop()
		};
		let info = DeviceInfo::probe(&env);
		assert!(info.is_mobile);
		assert!(info.is_touch);
		assert!(!info.is_low_end);

		let edge = EnvironmentSnapshot {
			inner_width: 768.0,
			..desktop()
		};
		assert!(DeviceInfo::probe(&edge).is_mobile);
	}

	#[test]
	fn any_weak_signal_marks_low_end() {
		let cores = EnvironmentSnapshot {
			hardware_concurrency: Some(4),
			..desktop()
		};
		assert!(DeviceInfo::probe(&cores).is_low_end);

		let memory = EnvironmentSnapshot {
			device_memory: Some(2.0),
			..desktop()
		};
		assert!(DeviceInfo::probe(&memory).is_low_end);

		let agent = EnvironmentSnapshot {
			user_agent: Some("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)".into()),
			..desktop()
		};
		assert!(DeviceInfo::probe(&agent).is_low_end);
	}

	#[test]
	fn missing_values_are_safe() {
		let info = DeviceInfo::probe(&EnvironmentSnapshot::default());
		assert!(!info.is_mobile);
		assert!(!info.is_low_end);
		assert!(!info.is_touch);
		assert_eq!(info.pixel_ratio, 1.0);

		let zeroed = EnvironmentSnapshot {
			hardware_concurrency: Some(0),
			device_memory: Some(0.0),
			device_pixel_ratio: Some(0.0),
			..EnvironmentSnapshot::default()
		};
		let info = DeviceInfo::probe(&zeroed);
		assert!(!info.is_low_end);
		assert_eq!(info.pixel_ratio, 1.0);
	}

	#[test]
	fn touch_points_disable_pointer_features() {
		let env = EnvironmentSnapshot {
			max_touch_points: Some(5),
			..desktop()
		};
		let info = DeviceInfo::probe(&env);
		assert!(info.is_touch);
		assert!(!info.is_mobile);
	}
}
