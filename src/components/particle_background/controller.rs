//! Wires a [`ParticleEngine`] to frame loops and environment signals.
//!
//! Two independent loops share one scheduler: the kinematics loop steps the
//! field every frame, the follow loop eases the pointer layer (throttled
//! inside the engine). Loops run only while the motion gate is open and are
//! cancelled outright otherwise.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::info;

use super::device::EnvironmentSnapshot;
use super::engine::ParticleEngine;
use super::environment::{EnvironmentEvent, EnvironmentProvider, Subscription};
use super::gate::MotionState;
use super::performance::PerformanceMetrics;
use super::scheduler::{FrameLoop, FrameScheduler, LoopControl};
use super::types::BackgroundOptions;

/// Called whenever the engine has something new to draw.
pub type RedrawHook = Rc<dyn Fn(&ParticleEngine)>;
/// Called whenever the frame-rate estimate is refreshed.
pub type MetricsHook = Rc<dyn Fn(PerformanceMetrics)>;

struct Shared {
	engine: RefCell<ParticleEngine>,
	kinematics: FrameLoop,
	follow: FrameLoop,
	redraw: Option<RedrawHook>,
	metrics: Option<MetricsHook>,
}

impl Shared {
	fn kinematics_frame(&self, timestamp: f64) -> LoopControl {
		let refreshed = self.engine.borrow_mut().step(timestamp);
		if let (Some(metrics), Some(hook)) = (refreshed, &self.metrics) {
			hook(metrics);
		}
		self.redraw();
		if self.engine.borrow().kinematics_enabled() {
			LoopControl::Continue
		} else {
			LoopControl::Stop
		}
	}

	fn follow_frame(&self, timestamp: f64) -> LoopControl {
		let moved = self.engine.borrow_mut().update_followers(timestamp);
		// the kinematics loop redraws anyway when it is running
		if moved && !self.kinematics.is_running() {
			self.redraw();
		}
		if self.engine.borrow().follow_enabled() {
			LoopControl::Continue
		} else {
			LoopControl::Stop
		}
	}

	fn redraw(&self) {
		if let Some(ref hook) = self.redraw {
			hook(&self.engine.borrow());
		}
	}

	fn sync_loops(&self) {
		let (kinematics, follow) = {
			let engine = self.engine.borrow();
			(engine.kinematics_enabled(), engine.follow_enabled())
		};
		if kinematics {
			self.kinematics.start();
		} else {
			self.kinematics.stop();
		}
		if follow {
			self.follow.start();
		} else {
			self.follow.stop();
		}
	}

	fn handle(&self, event: EnvironmentEvent) {
		match event {
			EnvironmentEvent::Resized(snapshot) => {
				self.engine.borrow_mut().resize(snapshot);
			}
			EnvironmentEvent::ReducedMotionChanged(enabled) => {
				self.engine.borrow_mut().set_reduced_motion(enabled);
			}
			EnvironmentEvent::VisibilityChanged { hidden } => {
				self.engine.borrow_mut().set_hidden(hidden);
			}
			EnvironmentEvent::PointerMoved {
				x,
				y,
				width,
				height,
			} => {
				self.engine.borrow_mut().pointer_moved(x, y, width, height);
				return;
			}
		}
		self.sync_loops();
		self.redraw();
	}
}

/// Owns the engine and keeps its frame loops in step with the motion gate.
pub struct BackgroundController {
	shared: Rc<Shared>,
	subscription: RefCell<Option<Subscription>>,
}

impl BackgroundController {
	/// Wrap an existing engine. Loops start immediately if the gate allows.
	pub fn new(
		engine: ParticleEngine,
		scheduler: Rc<dyn FrameScheduler>,
		redraw: Option<RedrawHook>,
		metrics: Option<MetricsHook>,
	) -> Self {
		let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
			let (kinematics_ref, follow_ref) = (weak.clone(), weak.clone());
			Shared {
				engine: RefCell::new(engine),
				kinematics: FrameLoop::new(scheduler.clone(), move |timestamp| {
					match kinematics_ref.upgrade() {
						Some(shared) => shared.kinematics_frame(timestamp),
						None => LoopControl::Stop,
					}
				}),
				follow: FrameLoop::new(scheduler, move |timestamp| match follow_ref.upgrade() {
					Some(shared) => shared.follow_frame(timestamp),
					None => LoopControl::Stop,
				}),
				redraw,
				metrics,
			}
		});

		shared.sync_loops();
		shared.redraw();
		// seed readouts with the probed capability before the first window fills
		if let Some(ref hook) = shared.metrics {
			hook(shared.engine.borrow().metrics());
		}
		Self {
			shared,
			subscription: RefCell::new(None),
		}
	}

	/// Build an engine from the provider's current state, then subscribe to it.
	pub fn mount(
		options: BackgroundOptions,
		provider: &dyn EnvironmentProvider,
		scheduler: Rc<dyn FrameScheduler>,
		redraw: Option<RedrawHook>,
		metrics: Option<MetricsHook>,
	) -> Self {
		let engine = ParticleEngine::new(
			options,
			provider.snapshot(),
			provider.prefers_reduced_motion(),
			provider.is_hidden(),
		);
		let controller = Self::new(engine, scheduler, redraw, metrics);
		controller.attach(provider);
		info!(
			"particle-background: mounted with {} particles, {} shapes",
			controller.shared.engine.borrow().counts().particles,
			controller.shared.engine.borrow().counts().shapes
		);
		controller
	}

	/// Route the provider's events into this controller until unmount.
	pub fn attach(&self, provider: &dyn EnvironmentProvider) {
		let weak = Rc::downgrade(&self.shared);
		let subscription = provider.subscribe(Rc::new(move |event| {
			if let Some(shared) = weak.upgrade() {
				shared.handle(event);
			}
		}));
		*self.subscription.borrow_mut() = Some(subscription);
	}

	/// Push new options, regenerating only if generation inputs changed.
	pub fn set_options(&self, options: BackgroundOptions) {
		self.shared.engine.borrow_mut().set_options(options);
		self.shared.sync_loops();
		self.shared.redraw();
	}

	/// Re-probe the device for a new viewport.
	pub fn resize(&self, snapshot: EnvironmentSnapshot) {
		self.shared.handle(EnvironmentEvent::Resized(snapshot));
	}

	/// Apply the reduced-motion preference.
	pub fn set_reduced_motion(&self, enabled: bool) {
		self.shared
			.handle(EnvironmentEvent::ReducedMotionChanged(enabled));
	}

	/// Apply document visibility.
	pub fn set_hidden(&self, hidden: bool) {
		self.shared
			.handle(EnvironmentEvent::VisibilityChanged { hidden });
	}

	/// Feed a pointer position in pixels within a `width` x `height` surface.
	pub fn pointer_moved(&self, x: f64, y: f64, width: f64, height: f64) {
		self.shared.handle(EnvironmentEvent::PointerMoved {
			x,
			y,
			width,
			height,
		});
	}

	/// Stop everything for good: gate to `Stopped`, loops cancelled,
	/// environment listeners detached.
	pub fn unmount(&self) {
		self.shared.engine.borrow_mut().unmount();
		self.shared.kinematics.stop();
		self.shared.follow.stop();
		self.subscription.borrow_mut().take();
		info!("particle-background: unmounted");
	}

	/// Borrow the engine for inspection or drawing.
	pub fn with_engine<R>(&self, f: impl FnOnce(&ParticleEngine) -> R) -> R {
		f(&self.shared.engine.borrow())
	}

	/// Current gate state.
	pub fn motion_state(&self) -> MotionState {
		self.shared.engine.borrow().motion_state()
	}

	/// Whether the kinematics loop is scheduled.
	pub fn is_animating(&self) -> bool {
		self.shared.kinematics.is_running()
	}

	/// Whether the follow loop is scheduled.
	pub fn is_following(&self) -> bool {
		self.shared.follow.is_running()
	}

	/// Draw the current state once, outside the frame loops.
	pub fn redraw(&self) {
		self.shared.redraw();
	}
}

impl Drop for BackgroundController {
	fn drop(&mut self) {
		self.shared.kinematics.stop();
		self.shared.follow.stop();
	}
}
