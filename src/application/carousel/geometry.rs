//! Circular 3D placement of carousel items.

use std::f64::consts::TAU;

use super::constants::{
    DESKTOP_MIN_SCALE, DESKTOP_RADIUS, INACTIVE_OPACITY, MOBILE_MIN_SCALE, MOBILE_RADIUS,
};
use crate::domain::entities::ViewportClass;

/// Position and appearance of one item on the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    /// Index of the item.
    pub index: usize,
    /// Angle relative to the focal item, in radians.
    pub angle: f64,
    /// Lateral offset.
    pub x: f64,
    /// Depth; positive faces the viewer.
    pub z: f64,
    /// Render scale in `[min_scale, 1]`.
    pub scale: f64,
    /// Render opacity.
    pub opacity: f64,
    /// Stacking order; nearer items draw above farther ones.
    pub z_index: i32,
    /// Whether this is the focal item.
    pub is_focal: bool,
}

/// Ring radius for a viewport class.
#[must_use]
pub const fn radius(viewport: ViewportClass) -> f64 {
    match viewport {
        ViewportClass::Mobile => MOBILE_RADIUS,
        ViewportClass::Desktop => DESKTOP_RADIUS,
    }
}

/// Smallest scale an item can shrink to.
#[must_use]
pub const fn min_scale(viewport: ViewportClass) -> f64 {
    match viewport {
        ViewportClass::Mobile => MOBILE_MIN_SCALE,
        ViewportClass::Desktop => DESKTOP_MIN_SCALE,
    }
}

/// Angular distance between neighbours, `None` for an empty ring.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn angle_step(item_count: usize) -> Option<f64> {
    (item_count > 0).then(|| TAU / item_count as f64)
}

/// Places a single item. `None` if the ring is empty or the index is out of range.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn place(
    index: usize,
    focal_index: usize,
    item_count: usize,
    viewport: ViewportClass,
) -> Option<ItemPlacement> {
    if index >= item_count {
        return None;
    }
    let step = angle_step(item_count)?;
    let angle = (index as f64 - focal_index as f64) * step;
    let (sin, cos) = angle.sin_cos();
    let r = radius(viewport);

    let scale = if cos > 0.0 {
        1.0
    } else {
        (1.0 + cos).max(min_scale(viewport))
    };
    let normalized_depth = (cos + 1.0) / 2.0;
    let is_focal = index == focal_index;

    Some(ItemPlacement {
        index,
        angle,
        x: sin * r,
        z: cos * r,
        scale,
        opacity: if is_focal { 1.0 } else { INACTIVE_OPACITY },
        z_index: (normalized_depth * 100.0).round() as i32,
        is_focal,
    })
}

/// Places every item around the focal index.
#[must_use]
pub fn layout(focal_index: usize, item_count: usize, viewport: ViewportClass) -> Vec<ItemPlacement> {
    (0..item_count)
        .filter_map(|index| place(index, focal_index, item_count, viewport))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_empty_ring_has_no_geometry() {
        assert_eq!(angle_step(0), None);
        assert!(layout(0, 0, ViewportClass::Desktop).is_empty());
        assert!(place(0, 0, 0, ViewportClass::Mobile).is_none());
    }

    #[test]
    fn test_focal_item_at_zero_angle_full_size() {
        for n in 1..8 {
            for focal in 0..n {
                let p = place(focal, focal, n, ViewportClass::Desktop).unwrap();
                assert!(p.angle.abs() < EPSILON);
                assert!((p.scale - 1.0).abs() < EPSILON);
                assert!((p.opacity - 1.0).abs() < EPSILON);
                assert!(p.is_focal);
            }
        }
    }

    #[test]
    fn test_angles_span_full_circle() {
        let n = 6;
        let placements = layout(2, n, ViewportClass::Mobile);
        let step = angle_step(n).unwrap();

        #[allow(clippy::cast_precision_loss)]
        let span = step * n as f64;
        assert!((span - TAU).abs() < EPSILON);

        let min = placements.iter().map(|p| p.angle).fold(f64::INFINITY, f64::min);
        let max = placements.iter().map(|p| p.angle).fold(f64::NEG_INFINITY, f64::max);
        assert!((max - min + step - TAU).abs() < EPSILON);
    }

    #[test]
    fn test_scale_clamped_to_floor() {
        let mobile = place(2, 0, 4, ViewportClass::Mobile).unwrap();
        let desktop = place(2, 0, 4, ViewportClass::Desktop).unwrap();

        assert!((mobile.scale - MOBILE_MIN_SCALE).abs() < EPSILON);
        assert!((desktop.scale - DESKTOP_MIN_SCALE).abs() < EPSILON);
        assert!((mobile.z + MOBILE_RADIUS).abs() < EPSILON);
    }

    #[test]
    fn test_partial_depth_scales_proportionally() {
        // 3 items: neighbours sit at 120 degrees, cos = -0.5.
        let p = place(1, 0, 3, ViewportClass::Mobile).unwrap();

        assert!((p.scale - 0.6).abs() < 1e-6);
        assert!((p.opacity - INACTIVE_OPACITY).abs() < EPSILON);
        assert!(p.x > 0.0);
    }

    #[test]
    fn test_nearer_items_stack_above() {
        let placements = layout(0, 8, ViewportClass::Desktop);

        assert!(placements[0].z_index > placements[1].z_index);
        assert!(placements[1].z_index > placements[2].z_index);
        assert!(placements[2].z_index > placements[4].z_index);
        assert_eq!(placements[1].z_index, placements[7].z_index);
    }
}
