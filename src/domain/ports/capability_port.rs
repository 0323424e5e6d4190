//! Optional host capabilities, each with a no-op fallback chosen at construction.

/// Vertical extent of the carousel inside the visible window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRegion {
    /// Top edge, window coordinates.
    pub top: f64,
    /// Bottom edge, window coordinates.
    pub bottom: f64,
}

impl ViewportRegion {
    /// Creates a region from its edges.
    #[must_use]
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Whether the region covers the window's vertical midpoint.
    #[must_use]
    pub fn intersects_midpoint(&self, window_height: f64) -> bool {
        let midpoint = window_height / 2.0;
        self.top <= midpoint && self.bottom >= midpoint
    }
}

/// Reports whether the carousel is positioned where wheel input should drive it.
pub trait VisibilityProbe: Send + Sync {
    /// True when the carousel region intersects the window's vertical midpoint.
    fn intersects_midpoint(&self) -> bool;
}

/// Fallback for hosts without an intersection capability: always visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVisibilityProbe;

impl VisibilityProbe for NoopVisibilityProbe {
    fn intersects_midpoint(&self) -> bool {
        true
    }
}

/// Easing curve for style transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Decelerating.
    EaseOut,
    /// Accelerate then decelerate.
    EaseInOut,
}

/// Timing applied when an item's style changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Duration in milliseconds.
    pub duration_ms: u32,
    /// Easing curve.
    pub easing: Easing,
}

/// Animation capability of the host.
pub trait MotionCapability: Send + Sync {
    /// Transition to use for style changes, or `None` to apply them instantly.
    fn transition(&self) -> Option<Transition>;
}

/// Fallback for hosts without animation support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMotion;

impl MotionCapability for NoopMotion {
    fn transition(&self) -> Option<Transition> {
        None
    }
}
