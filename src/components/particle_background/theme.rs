//! Color palettes and per-section presets.
//!
//! Palettes are keyed by [`ColorTheme`]; section presets by [`SectionVariant`].
//! Both are constant tables and never mutated at runtime.

use super::types::{ColorTheme, SectionVariant};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Build an opaque color from a packed `0xRRGGBB` literal.
	pub const fn from_hex(hex: u32) -> Self {
		Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS color string: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

const BLUE: [Color; 4] = [
	Color::from_hex(0x3b82f6),
	Color::from_hex(0x1d4ed8),
	Color::from_hex(0x60a5fa),
	Color::from_hex(0x93c5fd),
];

const PURPLE: [Color; 4] = [
	Color::from_hex(0x8b5cf6),
	Color::from_hex(0x7c3aed),
	Color::from_hex(0xa78bfa),
	Color::from_hex(0xc4b5fd),
];

const GRADIENT: [Color; 4] = [
	Color::from_hex(0x3b82f6),
	Color::from_hex(0x8b5cf6),
	Color::from_hex(0xec4899),
	Color::from_hex(0x10b981),
];

const MONOCHROME: [Color; 4] = [
	Color::from_hex(0x6b7280),
	Color::from_hex(0x9ca3af),
	Color::from_hex(0xd1d5db),
	Color::from_hex(0xf3f4f6),
];

impl ColorTheme {
	/// Fixed palette particles and shapes pick their colors from.
	pub fn palette(self) -> &'static [Color] {
		match self {
			ColorTheme::Blue => &BLUE,
			ColorTheme::Purple => &PURPLE,
			ColorTheme::Gradient => &GRADIENT,
			ColorTheme::Monochrome => &MONOCHROME,
		}
	}
}

/// Visual preset applied to the whole layer for one page section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionConfig {
	/// Background gradient stops, start to end.
	pub gradient: [Color; 3],
	/// Multiplier on the requested particle count.
	pub particle_intensity: f64,
	/// Multiplier on the requested floating shape count.
	pub shape_intensity: f64,
	/// Multiplier baked into generated velocities.
	pub speed_multiplier: f64,
}

const HERO: SectionConfig = SectionConfig {
	gradient: [
		Color::rgba(59, 130, 246, 0.12),
		Color::rgba(139, 92, 246, 0.10),
		Color::rgba(236, 72, 153, 0.08),
	],
	particle_intensity: 1.2,
	shape_intensity: 1.0,
	speed_multiplier: 1.0,
};

const ABOUT: SectionConfig = SectionConfig {
	gradient: [
		Color::rgba(16, 185, 129, 0.10),
		Color::rgba(59, 130, 246, 0.08),
		Color::rgba(139, 92, 246, 0.06),
	],
	particle_intensity: 0.8,
	shape_intensity: 0.6,
	speed_multiplier: 0.8,
};

const SKILLS: SectionConfig = SectionConfig {
	gradient: [
		Color::rgba(245, 158, 11, 0.10),
		Color::rgba(239, 68, 68, 0.08),
		Color::rgba(236, 72, 153, 0.06),
	],
	particle_intensity: 1.0,
	shape_intensity: 0.8,
	speed_multiplier: 1.2,
};

const PROJECTS: SectionConfig = SectionConfig {
	gradient: [
		Color::rgba(139, 92, 246, 0.10),
		Color::rgba(59, 130, 246, 0.08),
		Color::rgba(16, 185, 129, 0.06),
	],
	particle_intensity: 0.9,
	shape_intensity: 0.7,
	speed_multiplier: 0.9,
};

const CONTACT: SectionConfig = SectionConfig {
	gradient: [
		Color::rgba(236, 72, 153, 0.10),
		Color::rgba(139, 92, 246, 0.08),
		Color::rgba(59, 130, 246, 0.06),
	],
	particle_intensity: 0.6,
	shape_intensity: 0.5,
	speed_multiplier: 0.7,
};

const DEFAULT: SectionConfig = SectionConfig {
	gradient: [
		Color::rgba(59, 130, 246, 0.08),
		Color::rgba(139, 92, 246, 0.06),
		Color::rgba(59, 130, 246, 0.04),
	],
	particle_intensity: 1.0,
	shape_intensity: 1.0,
	speed_multiplier: 1.0,
};

impl SectionVariant {
	/// Tuning preset for this section.
	pub fn config(self) -> &'static SectionConfig {
		match self {
			SectionVariant::Hero => &HERO,
			SectionVariant::About => &ABOUT,
			SectionVariant::Skills => &SKILLS,
			SectionVariant::Projects => &PROJECTS,
			SectionVariant::Contact => &CONTACT,
			SectionVariant::Default => &DEFAULT,
		}
	}
}
