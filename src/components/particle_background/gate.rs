//! Reduced-motion and visibility gate.
//!
//! ```text
//! Running ──reduced motion / hidden──▶ Paused(reason)
//! Paused  ──both conditions clear────▶ Running
//! Running | Paused ──unmount─────────▶ Stopped   (terminal)
//! ```

/// Why animation is currently suspended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseReason {
	/// The user asked the OS for reduced motion.
	ReducedMotion,
	/// The document is not visible.
	Hidden,
}

/// Whether animation may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
	/// Loops may be scheduled.
	Running,
	/// Loops are cancelled until the reason clears.
	Paused(PauseReason),
	/// Unmounted. Terminal.
	Stopped,
}

/// Combines reduced motion, visibility and unmount into one [`MotionState`].
#[derive(Clone, Debug)]
pub struct MotionGate {
	reduced_motion: bool,
	hidden: bool,
	state: MotionState,
}

impl MotionGate {
	/// Gate for the initial preference and visibility.
	pub fn new(reduced_motion: bool, hidden: bool) -> Self {
		Self {
			reduced_motion,
			hidden,
			state: Self::derive(reduced_motion, hidden),
		}
	}

	fn derive(reduced_motion: bool, hidden: bool) -> MotionState {
		if reduced_motion {
			MotionState::Paused(PauseReason::ReducedMotion)
		} else if hidden {
			MotionState::Paused(PauseReason::Hidden)
		} else {
			MotionState::Running
		}
	}

	fn refresh(&mut self) -> Option<MotionState> {
		if self.state == MotionState::Stopped {
			return None;
		}
		let next = Self::derive(self.reduced_motion, self.hidden);
		if next == self.state {
			None
		} else {
			self.state = next;
			Some(next)
		}
	}

	/// Returns the new state if it changed.
	pub fn set_reduced_motion(&mut self, enabled: bool) -> Option<MotionState> {
		self.reduced_motion = enabled;
		self.refresh()
	}

	/// Returns the new state if it changed.
	pub fn set_hidden(&mut self, hidden: bool) -> Option<MotionState> {
		self.hidden = hidden;
		self.refresh()
	}

	/// Move to the terminal state. Returns `None` if already stopped.
	pub fn unmount(&mut self) -> Option<MotionState> {
		if self.state == MotionState::Stopped {
			None
		} else {
			self.state = MotionState::Stopped;
			Some(MotionState::Stopped)
		}
	}

	/// Current state.
	pub fn state(&self) -> MotionState {
		self.state
	}

	/// Whether animation may run right now.
	pub fn is_running(&self) -> bool {
		self.state == MotionState::Running
	}

	/// Whether the reduced-motion preference is set.
	pub fn reduced_motion(&self) -> bool {
		self.reduced_motion
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn initial_state_reflects_signals() {
		assert_eq!(MotionGate::new(false, false).state(), MotionState::Running);
		assert_eq!(
			MotionGate::new(false, true).state(),
			MotionState::Paused(PauseReason::Hidden)
		);
		assert_eq!(
			MotionGate::new(true, true).state(),
			MotionState::Paused(PauseReason::ReducedMotion)
		);
	}

	#[test]
	fn resumes_only_when_both_clear() {
		let mut gate = MotionGate::new(false, false);
		assert_eq!(
			gate.set_hidden(true),
			Some(MotionState::Paused(PauseReason::Hidden))
		);
		assert_eq!(
			gate.set_reduced_motion(true),
			Some(MotionState::Paused(PauseReason::ReducedMotion))
		);
		assert_eq!(
			gate.set_reduced_motion(false),
			Some(MotionState::Paused(PauseReason::Hidden))
		);
		assert_eq!(gate.set_hidden(false), Some(MotionState::Running));
		assert!(gate.is_running());
	}

	#[test]
	fn repeated_signals_report_no_change() {
		let mut gate = MotionGate::new(false, false);
		assert_eq!(gate.set_hidden(false), None);
		gate.set_hidden(true);
		assert_eq!(gate.set_hidden(true), None);
	}

	#[test]
	fn stopped_is_terminal() {
		let mut gate = MotionGate::new(false, true);
		assert_eq!(gate.unmount(), Some(MotionState::Stopped));
		assert_eq!(gate.unmount(), None);
		assert_eq!(gate.set_hidden(false), None);
		assert_eq!(gate.set_reduced_motion(true), None);
		assert_eq!(gate.state(), MotionState::Stopped);
		assert!(!gate.is_running());
	}
}
