//! portfolio-particles: adaptive decorative particle background for a portfolio site.
//!
//! This crate provides a WASM canvas component that animates procedurally
//! generated particles, scaling its work to the device and the measured
//! frame rate, and standing still for users who prefer reduced motion.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Leptos components.
pub mod components;

pub use components::particle_background::{
	BackgroundOptions, ColorTheme, PageConfig, ParticleBackground, PerformanceMetrics,
	PerformanceOverlay, SectionVariant,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-particles: logging initialized");
}

/// Parse a page configuration document.
pub fn parse_page_config(json: &str) -> Result<PageConfig, serde_json::Error> {
	serde_json::from_str(json)
}

/// Load page configuration from a script element with id="particle-config".
/// Expected format: JSON with { background: {...}, showPerformance: bool }
fn load_page_config() -> Option<PageConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_page_config(&json_text) {
		Ok(config) => {
			info!(
				"portfolio-particles: loaded config for section {}",
				config.background.section.name()
			);
			Some(config)
		}
		Err(e) => {
			warn!("portfolio-particles: failed to parse page config: {}", e);
			None
		}
	}
}

/// Section named by the URL fragment (e.g. `#projects`), if any.
fn section_from_location() -> Option<SectionVariant> {
	let hash = web_sys::window()?.location().hash().ok()?;
	let name = hash.trim_start_matches('#');
	(!name.is_empty()).then(|| SectionVariant::from_name(name))
}

/// Main application component.
/// Loads the page configuration from the DOM and mounts the background.
/// A URL fragment naming a section overrides the configured one.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_page_config().unwrap_or_default();
	let show_performance = config.show_performance;
	let mut background = config.background;
	if let Some(section) = section_from_location() {
		background.section = section;
	}
	let options = Signal::derive(move || background.clone());
	let (metrics, set_metrics) = signal(PerformanceMetrics::default());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleBackground options=options fullscreen=true metrics=set_metrics />
		<Show when=move || show_performance>
			<PerformanceOverlay metrics=metrics />
		</Show>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn malformed_config_is_an_error() {
		assert!(parse_page_config("{ not json").is_err());
		let config = parse_page_config(r#"{"background": {"section": "about"}}"#).unwrap();
		assert_eq!(config.background.section, SectionVariant::About);
		assert!(!config.show_performance);
	}
}
