//! Configuration types accepted by the particle background component.

use serde::Deserialize;

/// Palette family used for particles and floating shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
	#[default]
	Blue,
	Purple,
	Gradient,
	Monochrome,
}

/// Page section the background is decorating. Selects a [`SectionConfig`](super::theme::SectionConfig).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionVariant {
	Hero,
	About,
	Skills,
	Projects,
	Contact,
	#[default]
	Default,
}

impl SectionVariant {
	/// Resolve a section by name (case-insensitive). Unknown names fall back to `Default`.
	pub fn from_name(name: &str) -> Self {
		match name.trim().to_ascii_lowercase().as_str() {
			"hero" => Self::Hero,
			"about" => Self::About,
			"skills" => Self::Skills,
			"projects" => Self::Projects,
			"contact" => Self::Contact,
			_ => Self::Default,
		}
	}

	/// Lowercase name, as used in config and URL fragments.
	pub fn name(self) -> &'static str {
		match self {
			Self::Hero => "hero",
			Self::About => "about",
			Self::Skills => "skills",
			Self::Projects => "projects",
			Self::Contact => "contact",
			Self::Default => "default",
		}
	}
}

/// Outline of a stepped particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleShape {
	Circle,
	Square,
	Triangle,
	Hexagon,
}

impl ParticleShape {
	/// Every particle shape, for random picks.
	pub const ALL: [ParticleShape; 4] = [
		ParticleShape::Circle,
		ParticleShape::Square,
		ParticleShape::Triangle,
		ParticleShape::Hexagon,
	];
}

/// Outline of a floating shape. Superset of [`ParticleShape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
	Circle,
	Square,
	Triangle,
	Hexagon,
	Diamond,
}

impl ShapeKind {
	/// Every floating shape kind, for random picks.
	pub const ALL: [ShapeKind; 5] = [
		ShapeKind::Circle,
		ShapeKind::Square,
		ShapeKind::Triangle,
		ShapeKind::Hexagon,
		ShapeKind::Diamond,
	];
}

/// Construction parameters for the particle background.
///
/// Every field has a default, so a partial JSON object such as
/// `{"section": "hero"}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundOptions {
	/// Requested number of stepped particles before device scaling.
	pub particle_count: usize,
	/// Requested number of floating shapes before device scaling.
	pub shape_count: usize,
	/// Palette particles and shapes draw their colors from.
	pub color_theme: ColorTheme,
	/// Global speed multiplier baked into particle velocities.
	pub animation_speed: f64,
	/// Page section whose preset scales counts and speed.
	pub section: SectionVariant,
	/// Particles drift with the pointer (parallax) when enabled.
	pub enable_mouse_interaction: bool,
	/// Spawn the easing follower layer that trails the pointer.
	pub enable_mouse_follow: bool,
	/// Shift particles by their parallax factor toward the pointer.
	pub enable_parallax: bool,
	/// Rotate the section gradient slowly over time.
	pub enable_gradient_animation: bool,
	/// Trade fidelity for cost: slower stepping, fewer followers, coarser throttle.
	pub performance_mode: bool,
	/// Seed for particle generation. `None` draws a fresh layout every time.
	pub seed: Option<u64>,
}

impl Default for BackgroundOptions {
	fn default() -> Self {
		Self {
			particle_count: 50,
			shape_count: 8,
			color_theme: ColorTheme::default(),
			animation_speed: 1.0,
			section: SectionVariant::default(),
			enable_mouse_interaction: true,
			enable_mouse_follow: true,
			enable_parallax: true,
			enable_gradient_animation: true,
			performance_mode: false,
			seed: None,
		}
	}
}

/// Page-level configuration embedded in the host document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
	pub background: BackgroundOptions,
	/// Show the developer frame-rate overlay.
	pub show_performance: bool,
}
