//! Render controller bookkeeping: phases, readiness polling, stabilization.
//!
//! The canvas component owns the DOM side; the types here keep the
//! transition logic pure so it can be tested off the browser.

use thiserror::Error;

/// Failures while standing up the canvas renderer.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RenderError {
	/// The drawing surface never became ready within the poll budget.
	#[error("graph canvas never became ready; try reloading the page")]
	CanvasUnavailable,
}

/// Lifecycle of the graph widget.
///
/// `Uninitialized -> Ready -> Rendering -> Stabilizing -> Idle`, with
/// `Error` reachable from any phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderPhase {
	/// No canvas bound yet.
	#[default]
	Uninitialized,
	/// Canvas bound and sized; waiting for data.
	Ready,
	/// Data arrived; waiting for the drawing surface.
	Rendering,
	/// Physics running towards the iteration budget.
	Stabilizing,
	/// Layout frozen, viewport fitted.
	Idle,
	/// A transition failed; the error is shown inline.
	Error,
}

impl RenderPhase {
	/// Whether the loading overlay should cover the canvas.
	pub fn is_busy(self) -> bool {
		matches!(self, RenderPhase::Rendering | RenderPhase::Stabilizing)
	}
}

/// Delay between drawing-surface readiness checks.
pub const POLL_INTERVAL_MS: u32 = 200;

/// Readiness checks before giving up with a user-visible error.
pub const POLL_MAX_ATTEMPTS: u32 = 10;

/// Hard ceiling on the stabilization phase; the loading indicator is forced
/// away when it expires even if the budget was never reached.
pub const STABILIZATION_CEILING_MS: u32 = 10_000;

/// Pause between freezing physics and fitting the viewport, letting the
/// freeze take effect first.
pub const FIT_DELAY_MS: u32 = 50;

/// Canvas size forced when the container measures zero, so the drawing
/// surface is never degenerate.
pub const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Replace a zero/negative measured size with [`FALLBACK_SIZE`].
pub fn effective_size(width: f64, height: f64) -> (f64, f64) {
	if width <= 0.0 || height <= 0.0 {
		FALLBACK_SIZE
	} else {
		(width, height)
	}
}

/// Outcome of one readiness check that found the surface missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
	/// Check again after [`POLL_INTERVAL_MS`].
	Retry,
	/// Budget spent; surface the error.
	Exhausted,
}

/// Bounded retry counter for drawing-surface readiness.
#[derive(Clone, Copy, Debug, Default)]
pub struct PollBudget {
	attempts: u32,
}

impl PollBudget {
	/// Fresh budget of [`POLL_MAX_ATTEMPTS`] attempts.
	pub fn new() -> Self {
		Self::default()
	}

	/// Attempts consumed so far.
	pub fn attempts(&self) -> u32 {
		self.attempts
	}

	/// Record one failed readiness check.
	pub fn register_failure(&mut self) -> PollOutcome {
		self.attempts += 1;
		if self.attempts >= POLL_MAX_ATTEMPTS {
			PollOutcome::Exhausted
		} else {
			PollOutcome::Retry
		}
	}
}

/// Tracks stabilization progress against the profile's iteration budget.
#[derive(Clone, Copy, Debug)]
pub struct StabilizationTracker {
	budget: u32,
	done: u32,
	forced: bool,
}

impl StabilizationTracker {
	/// Tracker for a budget of `iterations` simulation steps.
	pub fn new(iterations: u32) -> Self {
		Self {
			budget: iterations.max(1),
			done: 0,
			forced: false,
		}
	}

	/// Record completed simulation steps.
	pub fn advance(&mut self, steps: u32) {
		self.done = (self.done + steps).min(self.budget);
	}

	/// Integer progress percentage, 0 to 100.
	pub fn percent(&self) -> u8 {
		if self.forced {
			return 100;
		}
		((self.done as u64 * 100) / self.budget as u64) as u8
	}

	/// Whether the budget is spent (or completion was forced).
	pub fn is_complete(&self) -> bool {
		self.forced || self.done >= self.budget
	}

	/// Ceiling timeout fired: treat stabilization as finished.
	pub fn force_complete(&mut self) {
		self.forced = true;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn poll_budget_exhausts_after_exactly_ten_attempts() {
		let mut budget = PollBudget::new();
		for attempt in 1..POLL_MAX_ATTEMPTS {
			assert_eq!(budget.register_failure(), PollOutcome::Retry, "attempt {attempt}");
		}
		assert_eq!(budget.register_failure(), PollOutcome::Exhausted);
		assert_eq!(budget.attempts(), 10);
	}

	#[test]
	fn stabilization_percent_is_monotone_and_completes_at_budget() {
		let mut tracker = StabilizationTracker::new(250);
		assert_eq!(tracker.percent(), 0);
		tracker.advance(125);
		assert_eq!(tracker.percent(), 50);
		assert!(!tracker.is_complete());
		tracker.advance(125);
		assert_eq!(tracker.percent(), 100);
		assert!(tracker.is_complete());
		// Extra steps don't overflow past 100.
		tracker.advance(500);
		assert_eq!(tracker.percent(), 100);
	}

	#[test]
	fn ceiling_forces_completion() {
		let mut tracker = StabilizationTracker::new(500);
		tracker.advance(10);
		tracker.force_complete();
		assert!(tracker.is_complete());
		assert_eq!(tracker.percent(), 100);
	}

	#[test]
	fn zero_budget_is_clamped() {
		let tracker = StabilizationTracker::new(0);
		assert!(!tracker.is_complete());
		assert_eq!(tracker.percent(), 0);
	}

	#[test]
	fn zero_sized_container_falls_back_to_800x600() {
		assert_eq!(effective_size(0.0, 0.0), FALLBACK_SIZE);
		assert_eq!(effective_size(1024.0, 0.0), FALLBACK_SIZE);
		assert_eq!(effective_size(1024.0, 768.0), (1024.0, 768.0));
	}

	#[test]
	fn render_errors_read_as_user_messages() {
		assert_eq!(
			RenderError::CanvasUnavailable.to_string(),
			"graph canvas never became ready; try reloading the page"
		);
	}

	#[test]
	fn busy_phases_show_the_overlay() {
		assert!(RenderPhase::Rendering.is_busy());
		assert!(RenderPhase::Stabilizing.is_busy());
		assert!(!RenderPhase::Idle.is_busy());
		assert!(!RenderPhase::Error.is_busy());
	}
}
