use crate::foundation::math::clamp01;
use crate::platform::{Platform, ScrollBehavior, ScrollRequest};

/// Issue one smooth scroll so that `target_top` lands `offset` pixels below the viewport top
/// (e.g. under a fixed header).
///
/// Fire-and-forget: the host animates the scroll and there is no completion signal. The
/// returned request is what was sent. With `reduced` set the scroll jumps instead; callers
/// pass the effective preference from [`MotionConfig`](crate::MotionConfig).
pub fn smooth_scroll_to<P: Platform + ?Sized>(
    platform: &mut P,
    target_top: f64,
    offset: f64,
    reduced: bool,
) -> ScrollRequest {
    let req = ScrollRequest {
        top: (target_top - offset).max(0.0),
        behavior: if reduced {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        },
    };
    tracing::debug!(top = req.top, behavior = ?req.behavior, "scroll requested");
    platform.scroll_to(req);
    req
}

/// How far the reader is through the page, in `[0, 1]`.
///
/// Pages that fit in the viewport count as fully read.
pub fn page_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 1.0;
    }
    clamp01(scroll_y / scrollable)
}

/// Visibility rule for a "back to top" button.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackToTop {
    /// Show once the page is scrolled past this many pixels.
    pub threshold: f64,
}

impl Default for BackToTop {
    fn default() -> Self {
        Self { threshold: 400.0 }
    }
}

impl BackToTop {
    /// Whether the button should be shown at `scroll_y`.
    pub fn is_visible(&self, scroll_y: f64) -> bool {
        scroll_y > self.threshold
    }

    /// Scroll back to the top of the document. Does nothing while the button is hidden.
    pub fn activate<P: Platform + ?Sized>(
        &self,
        platform: &mut P,
        reduced: bool,
    ) -> Option<ScrollRequest> {
        if !self.is_visible(platform.scroll_y()) {
            return None;
        }
        Some(smooth_scroll_to(platform, 0.0, 0.0, reduced))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/smooth.rs"]
mod tests;
