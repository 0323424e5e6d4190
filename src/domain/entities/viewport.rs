//! Viewport classification.

use serde::{Deserialize, Serialize};

/// Width below which the viewport counts as mobile.
pub const DEFAULT_MOBILE_BREAKPOINT: u32 = 768;

/// Width below which two items fit on a page.
pub const TABLET_BREAKPOINT: u32 = 1024;

/// Coarse device class used for layout and input policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    /// Narrow, touch-first viewport.
    Mobile,
    /// Wide, pointer-first viewport.
    #[default]
    Desktop,
}

impl ViewportClass {
    /// Classifies a viewport width against the mobile breakpoint.
    #[must_use]
    pub const fn from_width(width: u32, mobile_breakpoint: u32) -> Self {
        if width < mobile_breakpoint {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Returns true for the mobile class.
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}

impl std::fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mobile => write!(f, "mobile"),
            Self::Desktop => write!(f, "desktop"),
        }
    }
}

/// Number of items shown per page for a viewport width.
#[must_use]
pub const fn items_per_page(width: u32, mobile_breakpoint: u32) -> usize {
    if width < mobile_breakpoint {
        1
    } else if width < TABLET_BREAKPOINT {
        2
    } else {
        3
    }
}
