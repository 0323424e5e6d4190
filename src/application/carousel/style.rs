//! Declarative item styling: a pure function of placement and hover state.

use super::constants::{HOVER_LIFT, HOVER_SCALE};
use super::geometry::ItemPlacement;
use crate::domain::ports::{Easing, MotionCapability, Transition};

/// Visual style of one carousel item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyle {
    /// Lateral translation.
    pub translate_x: f64,
    /// Vertical translation; negative lifts the item.
    pub translate_y: f64,
    /// Depth translation.
    pub translate_z: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Stacking order.
    pub z_index: i32,
    /// Transition applied when moving to this style.
    pub transition: Option<Transition>,
}

impl ItemStyle {
    /// Computes the style for a placement.
    #[must_use]
    pub fn compute(placement: &ItemPlacement, hovered: bool, motion: &dyn MotionCapability) -> Self {
        let (scale, translate_y) = if hovered {
            (placement.scale * HOVER_SCALE, -HOVER_LIFT)
        } else {
            (placement.scale, 0.0)
        };

        Self {
            translate_x: placement.x,
            translate_y,
            translate_z: placement.z,
            scale,
            opacity: placement.opacity,
            z_index: placement.z_index,
            transition: motion.transition(),
        }
    }

    /// Renders the transform as a CSS `transform` value.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({:.1}px, {:.1}px, {:.1}px) scale({:.3})",
            self.translate_x, self.translate_y, self.translate_z, self.scale
        )
    }
}

/// Motion capability with a fixed duration and ease-out curve.
#[derive(Debug, Clone, Copy)]
pub struct EasedMotion {
    duration_ms: u32,
}

impl EasedMotion {
    /// Creates motion with the given duration.
    #[must_use]
    pub const fn new(duration_ms: u32) -> Self {
        Self { duration_ms }
    }
}

impl MotionCapability for EasedMotion {
    fn transition(&self) -> Option<Transition> {
        Some(Transition {
            duration_ms: self.duration_ms,
            easing: Easing::EaseOut,
        })
    }
}
