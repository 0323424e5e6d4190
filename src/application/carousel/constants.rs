use std::time::Duration;

use crate::domain::entities::DEFAULT_MOBILE_BREAKPOINT;

pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(3000);
pub const INTERACTION_COOLDOWN: Duration = Duration::from_millis(5000);
pub const WHEEL_THRESHOLD: f64 = 100.0;
pub const WHEEL_IDLE_RESET: Duration = Duration::from_millis(150);
pub const SWIPE_THRESHOLD: f64 = 50.0;

pub const MOBILE_RADIUS: f64 = 250.0;
pub const DESKTOP_RADIUS: f64 = 400.0;
pub const MOBILE_MIN_SCALE: f64 = 0.6;
pub const DESKTOP_MIN_SCALE: f64 = 0.7;
pub const INACTIVE_OPACITY: f64 = 0.6;

pub const HOVER_SCALE: f64 = 1.05;
pub const HOVER_LIFT: f64 = 8.0;

/// Tunable timings and thresholds of the carousel inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSettings {
    /// Period of the mobile autoplay timer.
    pub autoplay_interval: Duration,
    /// How long manual input suppresses autoplay.
    pub interaction_cooldown: Duration,
    /// Accumulated wheel delta needed for one step.
    pub wheel_threshold: f64,
    /// Idle gap after which a partial wheel accumulation is dropped.
    pub wheel_idle_reset: Duration,
    /// Horizontal travel needed for a swipe.
    pub swipe_threshold: f64,
    /// Viewport width below which the layout is mobile.
    pub mobile_breakpoint: u32,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            autoplay_interval: AUTOPLAY_INTERVAL,
            interaction_cooldown: INTERACTION_COOLDOWN,
            wheel_threshold: WHEEL_THRESHOLD,
            wheel_idle_reset: WHEEL_IDLE_RESET,
            swipe_threshold: SWIPE_THRESHOLD,
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
        }
    }
}
