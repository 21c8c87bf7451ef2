//! Frame scheduling.
//!
//! Animation work is driven by cancellable, self-rescheduling [`FrameLoop`]s
//! on top of a [`FrameScheduler`]. In the browser, [`BrowserScheduler`]
//! multiplexes every pending callback onto a single persistent
//! `requestAnimationFrame` closure; [`ManualScheduler`] lets tests step
//! frames by hand.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;

/// A one-shot callback receiving the frame timestamp in milliseconds.
pub type FrameCallback = Rc<dyn Fn(f64)>;

/// Identifies a pending frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(u64);

/// Source of animation frames.
pub trait FrameScheduler {
	/// Run `callback` once on the next frame.
	fn request_frame(&self, callback: FrameCallback) -> FrameHandle;
	/// Drop a pending request. Unknown or already-run handles are ignored.
	fn cancel_frame(&self, handle: FrameHandle);
}

/// Pending callbacks awaiting the next frame.
#[derive(Default)]
pub struct FrameQueue {
	next_id: u64,
	pending: Vec<(FrameHandle, FrameCallback)>,
}

impl FrameQueue {
	/// Queue `callback`, returning its handle.
	pub fn push(&mut self, callback: FrameCallback) -> FrameHandle {
		let handle = FrameHandle(self.next_id);
		self.next_id += 1;
		self.pending.push((handle, callback));
		handle
	}

	/// Remove a queued callback.
	pub fn cancel(&mut self, handle: FrameHandle) {
		self.pending.retain(|(h, _)| *h != handle);
	}

	/// Take every callback due this frame. Requests made while they run
	/// land in the next frame.
	pub fn drain(&mut self) -> Vec<FrameCallback> {
		std::mem::take(&mut self.pending)
			.into_iter()
			.map(|(_, callback)| callback)
			.collect()
	}

	/// Number of queued callbacks.
	pub fn len(&self) -> usize {
		self.pending.len()
	}

	/// Whether nothing is queued.
	pub fn is_empty(&self) -> bool {
		self.pending.is_empty()
	}
}

/// Scheduler advanced explicitly by the caller.
#[derive(Default)]
pub struct ManualScheduler {
	queue: RefCell<FrameQueue>,
}

impl ManualScheduler {
	/// Scheduler with nothing queued.
	pub fn new() -> Self {
		Self::default()
	}

	/// Run one frame at `timestamp`. Returns how many callbacks ran.
	pub fn advance(&self, timestamp: f64) -> usize {
		let due = self.queue.borrow_mut().drain();
		for callback in &due {
			callback(timestamp);
		}
		due.len()
	}

	/// Callbacks waiting for the next frame.
	pub fn pending(&self) -> usize {
		self.queue.borrow().len()
	}
}

impl FrameScheduler for ManualScheduler {
	fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
		self.queue.borrow_mut().push(callback)
	}

	fn cancel_frame(&self, handle: FrameHandle) {
		self.queue.borrow_mut().cancel(handle);
	}
}

struct BrowserSchedulerInner {
	queue: RefCell<FrameQueue>,
	raf_handle: Cell<Option<i32>>,
	pump: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl BrowserSchedulerInner {
	fn ensure_pumping(&self) {
		if self.raf_handle.get().is_some() || self.queue.borrow().is_empty() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(ref pump) = *self.pump.borrow() {
			if let Ok(handle) = window.request_animation_frame(pump.as_ref().unchecked_ref()) {
				self.raf_handle.set(Some(handle));
			}
		}
	}

	fn cancel_pump(&self) {
		if let (Some(handle), Some(window)) = (self.raf_handle.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(handle);
		}
	}
}

/// `requestAnimationFrame`-backed scheduler.
pub struct BrowserScheduler {
	inner: Rc<BrowserSchedulerInner>,
}

impl BrowserScheduler {
	/// Scheduler with no frame requested yet.
	pub fn new() -> Self {
		let inner = Rc::new(BrowserSchedulerInner {
			queue: RefCell::new(FrameQueue::default()),
			raf_handle: Cell::new(None),
			pump: RefCell::new(None),
		});

		let weak = Rc::downgrade(&inner);
		*inner.pump.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.raf_handle.set(None);
			let due = inner.queue.borrow_mut().drain();
			for callback in due {
				callback(timestamp);
			}
			inner.ensure_pumping();
		}));

		Self { inner }
	}
}

impl Default for BrowserScheduler {
	fn default() -> Self {
		Self::new()
	}
}

impl FrameScheduler for BrowserScheduler {
	fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
		let handle = self.inner.queue.borrow_mut().push(callback);
		self.inner.ensure_pumping();
		handle
	}

	fn cancel_frame(&self, handle: FrameHandle) {
		let now_empty = {
			let mut queue = self.inner.queue.borrow_mut();
			queue.cancel(handle);
			queue.is_empty()
		};
		if now_empty {
			self.inner.cancel_pump();
		}
	}
}

impl Drop for BrowserScheduler {
	fn drop(&mut self) {
		self.inner.cancel_pump();
		self.inner.queue.borrow_mut().drain();
	}
}

/// Whether a [`FrameLoop`] should request another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
	Continue,
	Stop,
}

struct LoopInner {
	scheduler: Rc<dyn FrameScheduler>,
	tick: RefCell<Box<dyn FnMut(f64) -> LoopControl>>,
	handle: Cell<Option<FrameHandle>>,
	active: Cell<bool>,
}

impl LoopInner {
	fn schedule(self: &Rc<Self>) {
		let weak: Weak<LoopInner> = Rc::downgrade(self);
		let handle = self.scheduler.request_frame(Rc::new(move |timestamp| {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.handle.set(None);
			if !inner.active.get() {
				return;
			}
			let control = {
				let mut tick = inner.tick.borrow_mut();
				(*tick)(timestamp)
			};
			// tick may have stopped or restarted the loop itself
			if !inner.active.get() || inner.handle.get().is_some() {
				return;
			}
			match control {
				LoopControl::Continue => inner.schedule(),
				LoopControl::Stop => inner.active.set(false),
			}
		}));
		self.handle.set(Some(handle));
	}
}

/// A cancellable callback that runs once per frame until stopped.
///
/// Dropping the loop cancels it; a frame already queued for it becomes a no-op.
pub struct FrameLoop {
	inner: Rc<LoopInner>,
}

impl FrameLoop {
	/// Loop calling `tick` once per frame from `scheduler`. Call [`FrameLoop::start`] to begin.
	pub fn new(
		scheduler: Rc<dyn FrameScheduler>,
		tick: impl FnMut(f64) -> LoopControl + 'static,
	) -> Self {
		Self {
			inner: Rc::new(LoopInner {
				scheduler,
				tick: RefCell::new(Box::new(tick)),
				handle: Cell::new(None),
				active: Cell::new(false),
			}),
		}
	}

	/// Begin requesting frames. No-op if already running.
	pub fn start(&self) {
		if self.inner.active.replace(true) {
			return;
		}
		if self.inner.handle.get().is_none() {
			self.inner.schedule();
		}
	}

	/// Cancel the pending frame. No-op if already stopped.
	pub fn stop(&self) {
		self.inner.active.set(false);
		if let Some(handle) = self.inner.handle.take() {
			self.inner.scheduler.cancel_frame(handle);
		}
	}

	/// Whether the loop will run on a coming frame.
	pub fn is_running(&self) -> bool {
		self.inner.active.get()
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}
