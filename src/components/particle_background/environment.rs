//! Injected ambient signal sources.
//!
//! The engine never reads browser globals directly. Everything it needs comes
//! through an [`EnvironmentProvider`], so tests can substitute a scripted one.

use std::rc::Rc;

use js_sys::Reflect;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MediaQueryList, MouseEvent, Window};

use super::device::EnvironmentSnapshot;

/// Media query signalling the OS-level reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// A change in ambient state.
#[derive(Clone, Debug, PartialEq)]
pub enum EnvironmentEvent {
	/// Viewport size changed; carries a fresh probe snapshot.
	Resized(EnvironmentSnapshot),
	/// The reduced-motion media query flipped.
	ReducedMotionChanged(bool),
	/// `document.hidden` changed.
	VisibilityChanged { hidden: bool },
	/// Pointer position in pixels within a `width` x `height` drawing surface.
	PointerMoved { x: f64, y: f64, width: f64, height: f64 },
}

/// Receives every [`EnvironmentEvent`] after subscribing.
pub type EnvironmentListener = Rc<dyn Fn(EnvironmentEvent)>;

/// Detaches a listener when dropped.
pub struct Subscription {
	release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// Run `release` when the subscription is dropped.
	pub fn new(release: impl FnOnce() + 'static) -> Self {
		Self {
			release: Some(Box::new(release)),
		}
	}

	/// A subscription with nothing to release.
	pub fn empty() -> Self {
		Self { release: None }
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}

/// Read-only view of the host environment.
pub trait EnvironmentProvider {
	fn snapshot(&self) -> EnvironmentSnapshot;
	fn prefers_reduced_motion(&self) -> bool;
	fn is_hidden(&self) -> bool;
	/// Deliver every subsequent change to `listener` until the returned
	/// subscription is dropped.
	fn subscribe(&self, listener: EnvironmentListener) -> Subscription;
}

/// Bounds of the drawing surface in client (viewport) pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientRect {
	/// Offset from the viewport's left edge.
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl ClientRect {
	fn of_element(element: &Element) -> Self {
		let rect = element.get_bounding_client_rect();
		Self {
			left: rect.left(),
			top: rect.top(),
			width: rect.width(),
			height: rect.height(),
		}
	}

	fn of_window(window: &Window) -> Self {
		let dimension = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64());
		Self {
			left: 0.0,
			top: 0.0,
			width: dimension(window.inner_width()).unwrap_or(0.0),
			height: dimension(window.inner_height()).unwrap_or(0.0),
		}
	}

	/// Pointer event for a client-space position, relative to this rect.
	pub fn pointer_event(&self, client_x: f64, client_y: f64) -> EnvironmentEvent {
		EnvironmentEvent::PointerMoved {
			x: client_x - self.left,
			y: client_y - self.top,
			width: self.width,
			height: self.height,
		}
	}
}

/// Environment backed by `window`, `navigator` and `document`.
///
/// Pointer positions are reported relative to `target` when one is set,
/// otherwise relative to the window.
#[derive(Clone, Debug, Default)]
pub struct BrowserEnvironment {
	target: Option<Element>,
}

impl BrowserEnvironment {
	/// Report pointer positions relative to `element`'s bounding rect.
	pub fn with_target(element: Element) -> Self {
		Self {
			target: Some(element),
		}
	}

	fn reduced_motion_query(window: &Window) -> Option<MediaQueryList> {
		window.match_media(REDUCED_MOTION_QUERY).ok().flatten()
	}

	fn document() -> Option<Document> {
		web_sys::window()?.document()
	}
}

fn read_snapshot(window: &Window) -> EnvironmentSnapshot {
	let dimension = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64());
	let navigator = window.navigator();
	let cores = navigator.hardware_concurrency();
	let memory = Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
		.ok()
		.and_then(|v| v.as_f64());
	let touch_points = navigator.max_touch_points();

	EnvironmentSnapshot {
		inner_width: dimension(window.inner_width()).unwrap_or(0.0),
		inner_height: dimension(window.inner_height()).unwrap_or(0.0),
		hardware_concurrency: (cores.is_finite() && cores > 0.0).then_some(cores as u32),
		device_memory: memory.filter(|m| m.is_finite() && *m > 0.0),
		user_agent: navigator.user_agent().ok(),
		device_pixel_ratio: Some(window.device_pixel_ratio()),
		max_touch_points: (touch_points >= 0).then_some(touch_points as u32),
	}
}

impl EnvironmentProvider for BrowserEnvironment {
	fn snapshot(&self) -> EnvironmentSnapshot {
		web_sys::window()
			.map(|window| read_snapshot(&window))
			.unwrap_or_default()
	}

	fn prefers_reduced_motion(&self) -> bool {
		web_sys::window()
			.and_then(|window| Self::reduced_motion_query(&window))
			.is_some_and(|query| query.matches())
	}

	fn is_hidden(&self) -> bool {
		Self::document().is_some_and(|document| document.hidden())
	}

	fn subscribe(&self, listener: EnvironmentListener) -> Subscription {
		let Some(window) = web_sys::window() else {
			return Subscription::empty();
		};

		let on_resize: Closure<dyn FnMut()> = {
			let listener = listener.clone();
			Closure::new(move || {
				if let Some(window) = web_sys::window() {
					listener(EnvironmentEvent::Resized(read_snapshot(&window)));
				}
			})
		};
		let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

		let on_pointer: Closure<dyn FnMut(MouseEvent)> = {
			let (listener, target) = (listener.clone(), self.target.clone());
			Closure::new(move |ev: MouseEvent| {
				let rect = match target {
					Some(ref element) => ClientRect::of_element(element),
					None => match web_sys::window() {
						Some(window) => ClientRect::of_window(&window),
						None => return,
					},
				};
				listener(rect.pointer_event(ev.client_x() as f64, ev.client_y() as f64));
			})
		};
		let _ =
			window.add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref());

		let query = Self::reduced_motion_query(&window);
		let on_motion: Closure<dyn FnMut()> = {
			let (listener, query) = (listener.clone(), query.clone());
			Closure::new(move || {
				if let Some(ref query) = query {
					listener(EnvironmentEvent::ReducedMotionChanged(query.matches()));
				}
			})
		};
		if let Some(ref query) = query {
			let _ = query.add_event_listener_with_callback("change", on_motion.as_ref().unchecked_ref());
		}

		let document = window.document();
		let on_visibility: Closure<dyn FnMut()> = {
			let listener = listener.clone();
			Closure::new(move || {
				if let Some(document) = BrowserEnvironment::document() {
					listener(EnvironmentEvent::VisibilityChanged {
						hidden: document.hidden(),
					});
				}
			})
		};
		if let Some(ref document) = document {
			let _ = document.add_event_listener_with_callback(
				"visibilitychange",
				on_visibility.as_ref().unchecked_ref(),
			);
		}

		debug!("particle-background: environment listeners attached");

		Subscription::new(move || {
			let _ = window
				.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
			let _ = window.remove_event_listener_with_callback(
				"mousemove",
				on_pointer.as_ref().unchecked_ref(),
			);
			if let Some(query) = query {
				let _ = query
					.remove_event_listener_with_callback("change", on_motion.as_ref().unchecked_ref());
			}
			if let Some(document) = document {
				let _ = document.remove_event_listener_with_callback(
					"visibilitychange",
					on_visibility.as_ref().unchecked_ref(),
				);
			}
			debug!("particle-background: environment listeners detached");
		})
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::super::mouse::pointer_to_percent;
	use super::*;

	#[test]
	fn subscription_releases_once_on_drop() {
		let released = Rc::new(Cell::new(0));
		let counter = released.clone();
		let subscription = Subscription::new(move || counter.set(counter.get() + 1));
		assert_eq!(released.get(), 0);
		drop(subscription);
		assert_eq!(released.get(), 1);

		drop(Subscription::empty());
	}

	#[test]
	fn pointer_is_relative_to_the_surface() {
		let rect = ClientRect {
			left: 800.0,
			top: 400.0,
			width: 400.0,
			height: 300.0,
		};
		let event = rect.pointer_event(1000.0, 550.0);
		assert_eq!(
			event,
			EnvironmentEvent::PointerMoved {
				x: 200.0,
				y: 150.0,
				width: 400.0,
				height: 300.0,
			}
		);
		let EnvironmentEvent::PointerMoved { x, y, width, height } = event else {
			unreachable!();
		};
		assert_eq!(pointer_to_percent(x, y, width, height), (50.0, 50.0));
	}

	#[test]
	fn pointer_outside_the_surface_clamps() {
		let rect = ClientRect {
			left: 100.0,
			top: 100.0,
			width: 200.0,
			height: 100.0,
		};
		let EnvironmentEvent::PointerMoved { x, y, width, height } = rect.pointer_event(20.0, 900.0)
		else {
			unreachable!();
		};
		assert_eq!(pointer_to_percent(x, y, width, height), (0.0, 100.0));
	}
}
