//! Adaptive particle background component.
//!
//! Draws a decorative particle layer on an HTML canvas with:
//! - Procedural particles and floating shapes scaled to device capability
//! - Per-frame wrap-around kinematics, slowed down when the frame rate drops
//! - A pointer-following layer with throttled exponential easing
//! - A motion gate that honours reduced-motion and pauses in hidden tabs
//!
//! The engine is plain Rust: the browser is reached only through the
//! [`EnvironmentProvider`] and [`FrameScheduler`] seams, so everything below
//! the component can be driven deterministically.
//!
//! # Example
//!
//! ```ignore
//! use portfolio_particles::{BackgroundOptions, ParticleBackground, SectionVariant};
//!
//! let options = BackgroundOptions {
//!     section: SectionVariant::Hero,
//!     ..BackgroundOptions::default()
//! };
//!
//! view! { <ParticleBackground options=Signal::derive(move || options.clone()) /> }
//! ```

mod component;
/// Frame-loop and environment wiring around the engine.
pub mod controller;
/// Device capability probe.
pub mod device;
/// Timer-free particle engine.
pub mod engine;
/// Injected environment signals.
pub mod environment;
/// Reduced-motion and visibility gate.
pub mod gate;
/// Count scaling and particle generation.
pub mod generator;
/// Pointer-following layer.
pub mod mouse;
/// Particle data and kinematics.
pub mod particles;
/// Frame-rate monitoring.
pub mod performance;
mod render;
/// Frame scheduling.
pub mod scheduler;
/// Colors, palettes and section presets.
pub mod theme;
mod types;

pub use component::{ParticleBackground, PerformanceOverlay};
pub use controller::BackgroundController;
pub use device::{DeviceInfo, EnvironmentSnapshot};
pub use engine::ParticleEngine;
pub use environment::{EnvironmentEvent, EnvironmentProvider, Subscription};
pub use gate::{MotionState, PauseReason};
pub use performance::PerformanceMetrics;
pub use scheduler::{FrameScheduler, ManualScheduler};
pub use types::{
	BackgroundOptions, ColorTheme, PageConfig, ParticleShape, SectionVariant, ShapeKind,
};
