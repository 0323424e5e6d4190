//! Terminal-backed visibility capability.

use parking_lot::RwLock;
use ratatui::layout::Rect;

use crate::domain::ports::{ViewportRegion, VisibilityProbe};

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    region: ViewportRegion,
    window_height: f64,
}

/// Tracks where the carousel was last drawn.
///
/// Reports visible until the first render, matching hosts without layout info.
#[derive(Debug, Default)]
pub struct TerminalVisibility {
    snapshot: RwLock<Option<Snapshot>>,
}

impl TerminalVisibility {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the carousel area and terminal height after a render.
    pub fn update(&self, carousel: Rect, terminal_height: u16) {
        *self.snapshot.write() = Some(Snapshot {
            region: ViewportRegion::new(f64::from(carousel.top()), f64::from(carousel.bottom())),
            window_height: f64::from(terminal_height),
        });
    }

    /// Forgets the last layout, e.g. when the carousel is not on screen.
    pub fn clear(&self) {
        *self.snapshot.write() = None;
    }
}

impl VisibilityProbe for TerminalVisibility {
    fn intersects_midpoint(&self) -> bool {
        self.snapshot
            .read()
            .is_none_or(|s| s.region.intersects_midpoint(s.window_height))
    }
}
