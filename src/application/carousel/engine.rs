//! Carousel state machine and input arbitration.
//!
//! The engine owns the focal index and is the only place that mutates it.
//! Inputs arrive as method calls stamped with the current instant; which ones
//! take effect depends on the viewport class:
//!
//! - mobile: autoplay, touch swipes, prev/next (wrapping)
//! - desktop: wheel, prev/next (clamped)
//!
//! Manual input marks the shopper as interacting until the cool-down has
//! elapsed, and autoplay ticks are ignored while that mark is set.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, trace};

use super::constants::CarouselSettings;
use super::geometry::{self, ItemPlacement};
use super::style::ItemStyle;
use super::wheel::{Step, WheelAccumulator};
use crate::domain::entities::{CatalogEntry, ViewportClass, items_per_page};
use crate::domain::errors::CatalogError;
use crate::domain::ports::{
    MotionCapability, NoopMotion, NoopVisibilityProbe, SelectionPort, VisibilityProbe,
};

/// Input channel that caused an index change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Mobile autoplay timer.
    Autoplay,
    /// Desktop wheel.
    Wheel,
    /// Prev/next controls or item clicks.
    Navigation,
    /// Mobile swipe.
    Touch,
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Autoplay => write!(f, "autoplay"),
            Self::Wheel => write!(f, "wheel"),
            Self::Navigation => write!(f, "navigation"),
            Self::Touch => write!(f, "touch"),
        }
    }
}

/// A single accepted focal index update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexChange {
    /// Previous focal index.
    pub from: usize,
    /// New focal index.
    pub to: usize,
    /// Channel that caused it.
    pub source: InputSource,
}

/// Result of activating an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The focal item was handed to the selection port.
    Selected(usize),
    /// A non-focal item was brought to the focus instead.
    Focused(IndexChange),
    /// Index out of range.
    Ignored,
}

/// Result of a viewport resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOutcome {
    /// Whether the viewport class changed.
    pub viewport_changed: bool,
    /// Items per page after the resize.
    pub items_per_page: usize,
}

/// Circular carousel over a fixed, non-empty item list.
pub struct CarouselEngine {
    items: Arc<[CatalogEntry]>,
    focal_index: usize,
    items_per_page: usize,
    viewport: ViewportClass,
    settings: CarouselSettings,
    wheel: WheelAccumulator,
    interacting_until: Option<Instant>,
    touch_origin: Option<f64>,
    hovered: Option<usize>,
    selection: Arc<dyn SelectionPort>,
    visibility: Arc<dyn VisibilityProbe>,
    motion: Arc<dyn MotionCapability>,
}

impl std::fmt::Debug for CarouselEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselEngine")
            .field("items", &self.items.len())
            .field("focal_index", &self.focal_index)
            .field("items_per_page", &self.items_per_page)
            .field("viewport", &self.viewport)
            .field("interacting_until", &self.interacting_until)
            .finish_non_exhaustive()
    }
}

impl CarouselEngine {
    /// Creates an engine focused on the first item.
    ///
    /// Capabilities default to their no-op fallbacks.
    ///
    /// # Errors
    /// Returns `CatalogError::EmptyCatalog` if `items` is empty.
    pub fn new(
        items: Vec<CatalogEntry>,
        viewport_width: u32,
        settings: CarouselSettings,
        selection: Arc<dyn SelectionPort>,
    ) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        Ok(Self {
            items: items.into(),
            focal_index: 0,
            items_per_page: items_per_page(viewport_width, settings.mobile_breakpoint),
            viewport: ViewportClass::from_width(viewport_width, settings.mobile_breakpoint),
            settings,
            wheel: WheelAccumulator::new(settings.wheel_threshold, settings.wheel_idle_reset),
            interacting_until: None,
            touch_origin: None,
            hovered: None,
            selection,
            visibility: Arc::new(NoopVisibilityProbe),
            motion: Arc::new(NoopMotion),
        })
    }

    /// Uses a host visibility capability for wheel gating.
    #[must_use]
    pub fn with_visibility_probe(mut self, probe: Arc<dyn VisibilityProbe>) -> Self {
        self.visibility = probe;
        self
    }

    /// Uses a host animation capability for style transitions.
    #[must_use]
    pub fn with_motion(mut self, motion: Arc<dyn MotionCapability>) -> Self {
        self.motion = motion;
        self
    }

    /// Returns the items.
    #[must_use]
    pub fn items(&self) -> &[CatalogEntry] {
        &self.items
    }

    /// Number of items. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; an engine cannot be built without items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the focal index.
    #[must_use]
    pub const fn focal_index(&self) -> usize {
        self.focal_index
    }

    /// Returns the focal item.
    #[must_use]
    pub fn focal_item(&self) -> &CatalogEntry {
        &self.items[self.focal_index]
    }

    /// Returns items per page for the current width.
    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Returns the viewport class.
    #[must_use]
    pub const fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    /// Returns the settings.
    #[must_use]
    pub const fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    /// Returns the hovered item.
    #[must_use]
    pub const fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Current wheel accumulation.
    #[must_use]
    pub const fn wheel_accumulated(&self) -> f64 {
        self.wheel.accumulated()
    }

    /// Whether the cool-down after the latest manual input has not elapsed.
    ///
    /// A touch counts from its start, so a release that never arrives only
    /// suppresses autoplay for one cool-down.
    #[must_use]
    pub fn is_user_interacting(&self, now: Instant) -> bool {
        self.interacting_until.is_some_and(|until| now < until)
    }

    /// Advances one step on mobile unless the shopper is interacting.
    pub fn autoplay_tick(&mut self, now: Instant) -> Option<IndexChange> {
        if !self.viewport.is_mobile() {
            return None;
        }
        if self.is_user_interacting(now) {
            trace!("Autoplay tick suppressed by user interaction");
            return None;
        }
        let next = (self.focal_index + 1) % self.len();
        self.commit(next, InputSource::Autoplay)
    }

    /// Feeds a wheel delta. Desktop only, and only while the carousel straddles the
    /// window midpoint. Steps clamp at both ends.
    pub fn wheel(&mut self, delta: f64, now: Instant) -> Option<IndexChange> {
        if self.viewport.is_mobile() || !self.visibility.intersects_midpoint() {
            return None;
        }
        let step = self.wheel.push(delta, now)?;
        let target = self.clamped_step(step);
        self.commit(target, InputSource::Wheel)
    }

    /// Moves one step via the prev/next controls.
    ///
    /// Wraps on mobile and clamps on desktop. Always restarts the cool-down.
    pub fn navigate(&mut self, step: Step, now: Instant) -> Option<IndexChange> {
        self.mark_interaction(now);
        let target = if self.viewport.is_mobile() {
            self.wrapped_step(step)
        } else {
            self.clamped_step(step)
        };
        self.commit(target, InputSource::Navigation)
    }

    /// Jumps straight to an index, e.g. after clicking a side item.
    pub fn focus(&mut self, index: usize, now: Instant) -> Option<IndexChange> {
        if index >= self.len() {
            return None;
        }
        self.mark_interaction(now);
        self.commit(index, InputSource::Navigation)
    }

    /// Begins a touch on mobile and restarts the cool-down.
    pub fn touch_start(&mut self, x: f64, now: Instant) {
        if self.viewport.is_mobile() {
            self.touch_origin = Some(x);
            self.mark_interaction(now);
        }
    }

    /// Ends a touch. A horizontal travel past the swipe threshold moves one step;
    /// swiping left moves forward.
    pub fn touch_end(&mut self, x: f64, now: Instant) -> Option<IndexChange> {
        let origin = self.touch_origin.take()?;
        self.mark_interaction(now);

        let travel = x - origin;
        if travel.abs() < self.settings.swipe_threshold {
            return None;
        }
        let step = if travel < 0.0 {
            Step::Forward
        } else {
            Step::Backward
        };
        let target = self.wrapped_step(step);
        self.commit(target, InputSource::Touch)
    }

    /// Recomputes layout metrics for a new width without resetting the focal index.
    pub fn resize(&mut self, viewport_width: u32) -> ResizeOutcome {
        let viewport = ViewportClass::from_width(viewport_width, self.settings.mobile_breakpoint);
        let viewport_changed = viewport != self.viewport;

        self.viewport = viewport;
        self.items_per_page = items_per_page(viewport_width, self.settings.mobile_breakpoint);
        self.focal_index = self.focal_index.min(self.len() - 1);

        if viewport_changed {
            self.wheel.reset();
            self.touch_origin = None;
            debug!(viewport = %viewport, "Carousel viewport class changed");
        }

        ResizeOutcome {
            viewport_changed,
            items_per_page: self.items_per_page,
        }
    }

    /// Activates an item: selects the focal item, focuses any other one.
    pub fn activate(&mut self, index: usize, now: Instant) -> Activation {
        if index >= self.len() {
            return Activation::Ignored;
        }
        if index == self.focal_index {
            debug!(index, product_id = %self.items[index].product().id(), "Item selected");
            self.selection.select(&self.items[index]);
            return Activation::Selected(index);
        }
        self.focus(index, now)
            .map_or(Activation::Ignored, Activation::Focused)
    }

    /// Sets or clears the hovered item.
    pub fn set_hovered(&mut self, index: Option<usize>) {
        self.hovered = index.filter(|&i| i < self.len());
    }

    /// Places every item on the ring.
    #[must_use]
    pub fn placements(&self) -> Vec<ItemPlacement> {
        geometry::layout(self.focal_index, self.len(), self.viewport)
    }

    /// Styles for every item, in index order.
    #[must_use]
    pub fn styles(&self) -> Vec<ItemStyle> {
        self.placements()
            .iter()
            .map(|p| ItemStyle::compute(p, self.hovered == Some(p.index), self.motion.as_ref()))
            .collect()
    }

    fn mark_interaction(&mut self, now: Instant) {
        self.interacting_until = Some(now + self.settings.interaction_cooldown);
    }

    fn clamped_step(&self, step: Step) -> usize {
        match step {
            Step::Forward => (self.focal_index + 1).min(self.len() - 1),
            Step::Backward => self.focal_index.saturating_sub(1),
        }
    }

    fn wrapped_step(&self, step: Step) -> usize {
        let n = self.len();
        match step {
            Step::Forward => (self.focal_index + 1) % n,
            Step::Backward => (self.focal_index + n - 1) % n,
        }
    }

    fn commit(&mut self, target: usize, source: InputSource) -> Option<IndexChange> {
        if target == self.focal_index {
            return None;
        }
        let change = IndexChange {
            from: self.focal_index,
            to: target,
            source,
        };
        self.focal_index = target;
        debug!(from = change.from, to = change.to, source = %source, "Focal index changed");
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use crate::application::carousel::constants::INACTIVE_OPACITY;
    use crate::domain::entities::Product;
    use crate::domain::ports::mocks::RecordingSelection;

    const MOBILE: u32 = 375;
    const DESKTOP: u32 = 1440;

    fn entries(n: usize) -> Vec<CatalogEntry> {
        (0..n)
            .map(|i| CatalogEntry::in_category(Product::new(format!("p{i}"), "Item", 10.0), "All"))
            .collect()
    }

    fn engine(n: usize, width: u32) -> CarouselEngine {
        CarouselEngine::new(
            entries(n),
            width,
            CarouselSettings::default(),
            Arc::new(RecordingSelection::new()),
        )
        .unwrap()
    }

    struct ToggleProbe(AtomicBool);

    impl VisibilityProbe for ToggleProbe {
        fn intersects_midpoint(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_empty_items_rejected() {
        let result = CarouselEngine::new(
            Vec::new(),
            DESKTOP,
            CarouselSettings::default(),
            Arc::new(RecordingSelection::new()),
        );

        assert!(matches!(result, Err(CatalogError::EmptyCatalog)));
    }

    #[test]
    fn test_wheel_scenario_three_small_deltas() {
        let mut carousel = engine(4, DESKTOP);
        let now = Instant::now();

        assert_eq!(carousel.wheel(40.0, now), None);
        assert_eq!(carousel.wheel(40.0, now + Duration::from_millis(10)), None);
        let change = carousel.wheel(40.0, now + Duration::from_millis(20));

        assert_eq!(
            change,
            Some(IndexChange {
                from: 0,
                to: 1,
                source: InputSource::Wheel
            })
        );
        assert_eq!(carousel.focal_index(), 1);
        assert!(carousel.wheel_accumulated().abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_clamps_on_desktop() {
        let mut carousel = engine(2, DESKTOP);
        let now = Instant::now();

        assert_eq!(carousel.wheel(-120.0, now), None);
        assert_eq!(carousel.focal_index(), 0);
        carousel.wheel(120.0, now);
        assert_eq!(carousel.wheel(120.0, now), None);
        assert_eq!(carousel.focal_index(), 1);
    }

    #[test]
    fn test_wheel_ignored_on_mobile_and_off_midpoint() {
        let mut mobile = engine(4, MOBILE);
        assert_eq!(mobile.wheel(500.0, Instant::now()), None);

        let probe = Arc::new(ToggleProbe(AtomicBool::new(false)));
        let mut desktop = engine(4, DESKTOP).with_visibility_probe(probe.clone());
        assert_eq!(desktop.wheel(500.0, Instant::now()), None);

        probe.0.store(true, Ordering::SeqCst);
        assert!(desktop.wheel(500.0, Instant::now()).is_some());
    }

    #[test]
    fn test_navigation_wraps_on_mobile_clamps_on_desktop() {
        let now = Instant::now();

        let mut mobile = engine(3, MOBILE);
        assert_eq!(mobile.navigate(Step::Backward, now).map(|c| c.to), Some(2));
        assert_eq!(mobile.navigate(Step::Forward, now).map(|c| c.to), Some(0));

        let mut desktop = engine(3, DESKTOP);
        assert_eq!(desktop.navigate(Step::Backward, now), None);
        desktop.navigate(Step::Forward, now);
        desktop.navigate(Step::Forward, now);
        assert_eq!(desktop.navigate(Step::Forward, now), None);
        assert_eq!(desktop.focal_index(), 2);
    }

    #[test]
    fn test_navigation_suppresses_autoplay_for_cooldown() {
        let mut carousel = engine(4, MOBILE);
        let now = Instant::now();

        carousel.navigate(Step::Forward, now);
        assert_eq!(carousel.focal_index(), 1);

        assert_eq!(carousel.autoplay_tick(now + Duration::from_millis(3000)), None);
        assert_eq!(carousel.autoplay_tick(now + Duration::from_millis(4999)), None);
        assert_eq!(carousel.focal_index(), 1);

        let change = carousel.autoplay_tick(now + Duration::from_millis(5000));
        assert_eq!(change.map(|c| c.to), Some(2));
    }

    #[test]
    fn test_autoplay_wraps_and_is_mobile_only() {
        let now = Instant::now();
        let mut mobile = engine(2, MOBILE);
        mobile.autoplay_tick(now);
        assert_eq!(mobile.autoplay_tick(now).map(|c| c.to), Some(0));

        let mut desktop = engine(2, DESKTOP);
        assert_eq!(desktop.autoplay_tick(now), None);

        let mut single = engine(1, MOBILE);
        assert_eq!(single.autoplay_tick(now), None);
    }

    #[test]
    fn test_touch_swipe() {
        let mut carousel = engine(4, MOBILE);
        let now = Instant::now();

        carousel.touch_start(200.0, now);
        assert!(carousel.is_user_interacting(now));
        assert_eq!(carousel.autoplay_tick(now), None);

        let change = carousel.touch_end(120.0, now);
        assert_eq!(change.map(|c| (c.to, c.source)), Some((1, InputSource::Touch)));

        carousel.touch_start(100.0, now);
        assert_eq!(carousel.touch_end(130.0, now), None);
        assert!(carousel.is_user_interacting(now + Duration::from_millis(4000)));

        carousel.touch_start(100.0, now);
        assert_eq!(carousel.touch_end(200.0, now).map(|c| c.to), Some(0));
    }

    #[test]
    fn test_unreleased_touch_blocks_autoplay_for_one_cooldown() {
        let mut carousel = engine(4, MOBILE);
        let now = Instant::now();
        let cooldown = carousel.settings().interaction_cooldown;

        carousel.touch_start(200.0, now);

        assert_eq!(carousel.autoplay_tick(now + cooldown / 2), None);
        assert!(!carousel.is_user_interacting(now + cooldown));
        assert_eq!(carousel.autoplay_tick(now + cooldown).map(|c| c.to), Some(1));
    }

    #[test]
    fn test_resize_keeps_focal_index() {
        let mut carousel = engine(5, DESKTOP);
        let now = Instant::now();
        carousel.navigate(Step::Forward, now);
        carousel.navigate(Step::Forward, now);

        let outcome = carousel.resize(MOBILE);

        assert!(outcome.viewport_changed);
        assert_eq!(outcome.items_per_page, 1);
        assert_eq!(carousel.viewport(), ViewportClass::Mobile);
        assert_eq!(carousel.focal_index(), 2);
        assert!(!carousel.resize(MOBILE + 10).viewport_changed);
    }

    #[test]
    fn test_activate_selects_focal_and_focuses_others() {
        let selection = Arc::new(RecordingSelection::new());
        let mut carousel = CarouselEngine::new(
            entries(3),
            DESKTOP,
            CarouselSettings::default(),
            selection.clone(),
        )
        .unwrap();
        let now = Instant::now();

        assert_eq!(carousel.activate(0, now), Activation::Selected(0));
        assert!(matches!(carousel.activate(2, now), Activation::Focused(c) if c.to == 2));
        assert_eq!(carousel.activate(9, now), Activation::Ignored);
        assert_eq!(carousel.activate(2, now), Activation::Selected(2));

        let selected: Vec<String> = selection
            .selected()
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();
        assert_eq!(selected, vec!["p0", "p2"]);
    }

    #[test]
    fn test_styles_reflect_hover() {
        let mut carousel = engine(3, DESKTOP);
        carousel.set_hovered(Some(1));
        let styles = carousel.styles();

        assert_eq!(styles.len(), 3);
        assert!((styles[0].opacity - 1.0).abs() < f64::EPSILON);
        assert!((styles[1].opacity - INACTIVE_OPACITY).abs() < f64::EPSILON);
        assert!(styles[1].scale > styles[2].scale);

        carousel.set_hovered(Some(99));
        assert_eq!(carousel.hovered(), None);
    }
}
