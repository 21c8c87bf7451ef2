//! Leptos component wrapping the particle background canvas.
//!
//! The component creates a canvas sized to the viewport (or its parent),
//! builds a [`BackgroundController`] fed by the browser environment and a
//! `requestAnimationFrame` scheduler, and redraws on every engine update.
//! Option changes are pushed into the running controller; unmounting the
//! component stops every loop and detaches every listener.

use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::controller::{BackgroundController, MetricsHook, RedrawHook};
use super::engine::ParticleEngine;
use super::environment::{BrowserEnvironment, EnvironmentProvider};
use super::performance::PerformanceMetrics;
use super::render::{self, Viewport};
use super::scheduler::BrowserScheduler;
use super::types::BackgroundOptions;

fn canvas_size(canvas: &HtmlCanvasElement, fullscreen: bool) -> Viewport {
	if fullscreen {
		let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
		let window = web_sys::window();
		Viewport {
			width: window
				.as_ref()
				.and_then(|w| dimension(w.inner_width()))
				.unwrap_or(800.0),
			height: window
				.as_ref()
				.and_then(|w| dimension(w.inner_height()))
				.unwrap_or(600.0),
		}
	} else {
		let parent = canvas.parent_element();
		Viewport {
			width: parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0),
			height: parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0),
		}
	}
}

/// Match the backing store to the viewport at the device pixel ratio.
fn fit_canvas(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, viewport: Viewport, ratio: f64) {
	canvas.set_width((viewport.width * ratio) as u32);
	canvas.set_height((viewport.height * ratio) as u32);
	let _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
}

/// Renders the adaptive particle background behind page content.
///
/// Pass options through the reactive `options` signal; changes regenerate the
/// layer only when they affect generation. With `fullscreen = true` the canvas
/// tracks the window size, otherwise it fills its parent. Provide `metrics`
/// to receive frame-rate readouts (see [`PerformanceOverlay`]).
#[component]
pub fn ParticleBackground(
	#[prop(into)] options: Signal<BackgroundOptions>,
	#[prop(default = true)] fullscreen: bool,
	#[prop(optional)] metrics: Option<WriteSignal<PerformanceMetrics>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let controller = StoredValue::new_local(None::<BackgroundController>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if controller.with_value(|c| c.is_some()) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("particle-background: 2d canvas context unavailable");
			return;
		};

		let surface: &web_sys::Element = canvas.as_ref();
		let environment = BrowserEnvironment::with_target(surface.clone());
		let ratio = environment.snapshot().device_pixel_ratio.unwrap_or(1.0);
		let viewport = Rc::new(std::cell::Cell::new(canvas_size(&canvas, fullscreen)));
		fit_canvas(&canvas, &ctx, viewport.get(), ratio);

		let redraw: RedrawHook = {
			let (canvas, viewport) = (canvas.clone(), viewport.clone());
			Rc::new(move |engine: &ParticleEngine| {
				let current = canvas_size(&canvas, fullscreen);
				if current.width != viewport.get().width || current.height != viewport.get().height {
					viewport.set(current);
					fit_canvas(&canvas, &ctx, current, engine.device().pixel_ratio);
				}
				render::render(engine, &ctx, viewport.get());
			})
		};
		let metrics_hook: Option<MetricsHook> = metrics.map(|signal| {
			Rc::new(move |readout: PerformanceMetrics| signal.set(readout)) as MetricsHook
		});

		let mounted = BackgroundController::mount(
			options.get_untracked(),
			&environment,
			Rc::new(BrowserScheduler::new()),
			Some(redraw),
			metrics_hook,
		);
		controller.set_value(Some(mounted));
	});

	Effect::new(move |_| {
		let next = options.get();
		controller.with_value(|c| {
			if let Some(c) = c {
				c.set_options(next);
			}
		});
	});

	on_cleanup(move || {
		controller.try_update_value(|c| {
			if let Some(c) = c.take() {
				c.unmount();
			}
		});
	});

	let position = if fullscreen { "fixed" } else { "absolute" };
	let style = format!(
		"position: {position}; inset: 0; width: 100%; height: 100%; pointer-events: none; z-index: 0;"
	);

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-background"
			aria-hidden="true"
			style=style
		/>
	}
}

/// Developer readout of the latest frame-rate estimate.
#[component]
pub fn PerformanceOverlay(#[prop(into)] metrics: Signal<PerformanceMetrics>) -> impl IntoView {
	let fps = move || format!("{:.0} fps", metrics.get().fps);
	let status = move || {
		let m = metrics.get();
		format!(
			"{} · {} capability",
			if m.is_low_performance { "degraded" } else { "smooth" },
			m.capability.label()
		)
	};

	view! {
		<div
			class="performance-overlay"
			style="position: fixed; bottom: 1rem; right: 1rem; padding: 0.5rem 0.75rem; font: 12px monospace; background: rgba(0, 0, 0, 0.6); color: #e5e7eb; border-radius: 4px; z-index: 10;"
		>
			<div class="fps">{fps}</div>
			<div class="status">{status}</div>
		</div>
	}
}
