//! Host capability seam.
//!
//! Everything the motion layer would otherwise read from browser globals (`window.scrollY`,
//! `innerHeight`, `matchMedia(...)`, `window.scrollTo`) goes through [`Platform`], so the state
//! machines run unchanged under tests, a CLI, or a wasm host.

use crate::foundation::core::Viewport;

/// How a programmatic scroll should move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    /// Jump immediately.
    Instant,
    /// Let the host animate the scroll.
    Smooth,
}

/// A request to scroll the document to an absolute vertical offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollRequest {
    /// Target document offset in CSS pixels (already clamped to `>= 0`).
    pub top: f64,
    /// Requested motion.
    pub behavior: ScrollBehavior,
}

/// Capabilities the motion layer needs from its host.
pub trait Platform {
    /// `prefers-reduced-motion: reduce`.
    fn prefers_reduced_motion(&self) -> bool;
    /// `prefers-color-scheme: dark`.
    fn prefers_dark_scheme(&self) -> bool;
    /// Current viewport extents.
    fn viewport(&self) -> Viewport;
    /// Current document scroll offset.
    fn scroll_y(&self) -> f64;
    /// Total scrollable document height.
    fn document_height(&self) -> f64;
    /// Ask the host to scroll. Completion is not observable; callers must not assume it
    /// has happened when this returns.
    fn scroll_to(&mut self, req: ScrollRequest);
}

/// In-memory [`Platform`] for tests, the CLI simulator, and server-side rendering.
///
/// Scroll requests are recorded and applied immediately, clamped to the scrollable range.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HeadlessPlatform {
    /// Reduced-motion preference.
    #[serde(default)]
    pub reduced_motion: bool,
    /// Dark color-scheme preference.
    #[serde(default)]
    pub dark_scheme: bool,
    /// Viewport extents.
    pub viewport: Viewport,
    /// Current scroll offset.
    #[serde(default)]
    pub scroll_y: f64,
    /// Document height.
    pub document_height: f64,
    /// Every scroll request received, oldest first.
    #[serde(skip)]
    pub scroll_log: Vec<ScrollRequest>,
}

impl HeadlessPlatform {
    /// Create a platform with no preferences set and scroll at the top.
    pub fn new(viewport: Viewport, document_height: f64) -> Self {
        Self {
            reduced_motion: false,
            dark_scheme: false,
            viewport,
            scroll_y: 0.0,
            document_height,
            scroll_log: Vec::new(),
        }
    }

    /// Builder-style reduced-motion toggle.
    pub fn with_reduced_motion(mut self, on: bool) -> Self {
        self.reduced_motion = on;
        self
    }

    /// Move the simulated scroll position (as the user would).
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }
}

impl Platform for HeadlessPlatform {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn prefers_dark_scheme(&self) -> bool {
        self.dark_scheme
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn scroll_to(&mut self, req: ScrollRequest) {
        self.scroll_log.push(req);
        self.set_scroll_y(req.top);
    }
}

#[cfg(test)]
#[path = "../tests/unit/platform/headless.rs"]
mod tests;
