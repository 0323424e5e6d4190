//! Wheel delta accumulation.

use std::time::Duration;

use tokio::time::Instant;

use super::constants::{WHEEL_IDLE_RESET, WHEEL_THRESHOLD};

/// Direction of a single carousel step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Towards higher indices.
    Forward,
    /// Towards lower indices.
    Backward,
}

/// Turns a stream of signed wheel deltas into discrete steps.
#[derive(Debug, Clone)]
pub struct WheelAccumulator {
    accumulated: f64,
    last_event: Option<Instant>,
    threshold: f64,
    idle_reset: Duration,
}

impl Default for WheelAccumulator {
    fn default() -> Self {
        Self::new(WHEEL_THRESHOLD, WHEEL_IDLE_RESET)
    }
}

impl WheelAccumulator {
    /// Creates accumulator with the given threshold and idle gap.
    #[must_use]
    pub const fn new(threshold: f64, idle_reset: Duration) -> Self {
        Self {
            accumulated: 0.0,
            last_event: None,
            threshold,
            idle_reset,
        }
    }

    /// Adds a delta received at `now`. Returns a step once the threshold is crossed.
    ///
    /// A gap of at least the idle duration since the previous delta discards the
    /// earlier partial accumulation first.
    pub fn push(&mut self, delta: f64, now: Instant) -> Option<Step> {
        if self
            .last_event
            .is_some_and(|last| now.saturating_duration_since(last) >= self.idle_reset)
        {
            self.accumulated = 0.0;
        }
        self.last_event = Some(now);
        self.accumulated += delta;

        if self.accumulated.abs() < self.threshold {
            return None;
        }

        let step = if self.accumulated > 0.0 {
            Step::Forward
        } else {
            Step::Backward
        };
        self.accumulated = 0.0;
        Some(step)
    }

    /// Drops any partial accumulation.
    pub const fn reset(&mut self) {
        self.accumulated = 0.0;
        self.last_event = None;
    }

    /// Current accumulated delta.
    #[must_use]
    pub const fn accumulated(&self) -> f64 {
        self.accumulated
    }
}
