//! CDN image URL optimization.
//!
//! URLs of the form `<base>/upload/<transform>/v<version>/<path>[?query]` get
//! their transform segment replaced with resize, quality and format
//! directives chosen from the display intent. Anything else passes through.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::domain::entities::ViewportClass;

/// Width for thumbnails, regardless of viewport.
pub const THUMBNAIL_WIDTH: u32 = 150;

/// Width for above-the-fold images on mobile.
pub const PRIORITY_MOBILE_WIDTH: u32 = 800;

/// Width for above-the-fold images on desktop.
pub const PRIORITY_DESKTOP_WIDTH: u32 = 1200;

/// Default gallery width on mobile.
pub const DEFAULT_MOBILE_WIDTH: u32 = 400;

/// Default gallery width on desktop.
pub const DEFAULT_DESKTOP_WIDTH: u32 = 600;

const PRIORITY_ALTERNATIVE_WIDTHS: [u32; 3] = [800, 1200, 1600];
const GALLERY_ALTERNATIVE_WIDTHS: [u32; 3] = [300, 600, 900];

fn cdn_pattern() -> &'static Regex {
    static CDN_URL: OnceLock<Regex> = OnceLock::new();
    CDN_URL.get_or_init(|| {
        Regex::new(
            r"^(?P<base>.+?/upload)/(?:(?P<transform>[^/?]*_[^/?]*)/)?v(?P<version>\d+)/(?P<path>[^?]+)(?:\?(?P<query>.*))?$",
        )
        .expect("Invalid regex")
    })
}

/// CDN quality preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    /// Smallest files, visible artifacts.
    Low,
    /// Balanced default.
    Eco,
    /// Highest fidelity.
    Best,
}

impl Quality {
    const fn directive(self) -> &'static str {
        match self {
            Self::Low => "q_auto:low",
            Self::Eco => "q_auto:eco",
            Self::Best => "q_auto:best",
        }
    }
}

/// How an image is about to be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageIntent {
    /// Rendered as a small preview.
    pub thumbnail: bool,
    /// Rendered above the fold and loaded eagerly.
    pub priority: bool,
    /// Device class of the viewport.
    pub viewport: ViewportClass,
}

impl ImageIntent {
    /// Regular gallery image.
    #[must_use]
    pub const fn gallery(viewport: ViewportClass) -> Self {
        Self {
            thumbnail: false,
            priority: false,
            viewport,
        }
    }

    /// Marks the image as above the fold.
    #[must_use]
    pub const fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    /// Marks the image as a thumbnail.
    #[must_use]
    pub const fn with_thumbnail(mut self, thumbnail: bool) -> Self {
        self.thumbnail = thumbnail;
        self
    }
}

/// One entry of a responsive source set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    /// Optimized URL.
    pub url: String,
    /// Width the URL resizes to.
    pub width: u32,
}

/// Derives optimized CDN URLs from display intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageUrlTransformer {
    mobile_width: u32,
    desktop_width: u32,
}

impl Default for ImageUrlTransformer {
    fn default() -> Self {
        Self::new(DEFAULT_MOBILE_WIDTH, DEFAULT_DESKTOP_WIDTH)
    }
}

impl ImageUrlTransformer {
    /// Creates a transformer with component-specific default widths.
    #[must_use]
    pub const fn new(mobile_width: u32, desktop_width: u32) -> Self {
        Self {
            mobile_width,
            desktop_width,
        }
    }

    /// Resolves the target width. First matching rule wins.
    #[must_use]
    pub const fn target_width(&self, intent: ImageIntent) -> u32 {
        match (intent.thumbnail, intent.priority, intent.viewport) {
            (true, _, _) => THUMBNAIL_WIDTH,
            (false, true, ViewportClass::Mobile) => PRIORITY_MOBILE_WIDTH,
            (false, true, ViewportClass::Desktop) => PRIORITY_DESKTOP_WIDTH,
            (false, false, ViewportClass::Mobile) => self.mobile_width,
            (false, false, ViewportClass::Desktop) => self.desktop_width,
        }
    }

    /// Resolves the quality preset.
    #[must_use]
    pub const fn quality(intent: ImageIntent) -> Quality {
        if intent.thumbnail {
            Quality::Low
        } else if intent.priority {
            Quality::Best
        } else {
            Quality::Eco
        }
    }

    /// Returns the optimized URL, or the input unchanged if it is not a CDN URL.
    #[must_use]
    pub fn optimize(&self, url: &str, intent: ImageIntent) -> String {
        match cdn_pattern().captures(url) {
            Some(caps) => rebuild(&caps, self.target_width(intent), Self::quality(intent)),
            None => url.to_string(),
        }
    }

    /// Returns width variants for a responsive source set.
    ///
    /// `None` for non-CDN URLs and for thumbnails, which have a single fixed size.
    #[must_use]
    pub fn generate_alternatives(
        &self,
        url: &str,
        intent: ImageIntent,
    ) -> Option<Vec<ImageCandidate>> {
        if intent.thumbnail {
            return None;
        }
        let caps = cdn_pattern().captures(url)?;
        let quality = Self::quality(intent);
        let widths = if intent.priority {
            &PRIORITY_ALTERNATIVE_WIDTHS
        } else {
            &GALLERY_ALTERNATIVE_WIDTHS
        };

        Some(
            widths
                .iter()
                .map(|&width| ImageCandidate {
                    url: rebuild(&caps, width, quality),
                    width,
                })
                .collect(),
        )
    }

    /// Returns true if the URL matches the CDN pattern.
    #[must_use]
    pub fn is_cdn_url(url: &str) -> bool {
        cdn_pattern().is_match(url)
    }
}

/// Renders candidates as an HTML `srcset` value.
#[must_use]
pub fn srcset(candidates: &[ImageCandidate]) -> String {
    candidates
        .iter()
        .map(|c| format!("{} {}w", c.url, c.width))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Picks the candidate whose width is nearest to the rendered width.
/// Ties go to the larger candidate.
#[must_use]
pub fn closest_candidate(candidates: &[ImageCandidate], rendered_width: u32) -> Option<&ImageCandidate> {
    candidates
        .iter()
        .min_by_key(|c| (c.width.abs_diff(rendered_width), std::cmp::Reverse(c.width)))
}

fn rebuild(caps: &Captures<'_>, width: u32, quality: Quality) -> String {
    let base = &caps["base"];
    let version = &caps["version"];
    let path = &caps["path"];
    let transform = format!("c_limit,f_auto,{},w_{width}", quality.directive());

    match caps.name("query") {
        Some(query) => format!("{base}/{transform}/v{version}/{path}?{}", query.as_str()),
        None => format!("{base}/{transform}/v{version}/{path}"),
    }
}
