//! Scroll-linked parallax transforms.
//!
//! Progress `p` runs from 0 (element top just entering at the bottom of the viewport) to 1
//! (element bottom just leaving at the top). Everything is centered on `p = 0.5`, where the
//! transform is the identity.

use crate::foundation::core::{Affine, ElementId, Rect, Vec2};
use crate::foundation::error::{ScrollkitError, ScrollkitResult};
use crate::foundation::math::{clamp01, round4};

const TRAVEL_PX: f64 = 200.0;
const SCALE_DRIFT: f64 = 0.2;
const ROTATE_RANGE_DEG: f64 = 360.0;
const MIN_OPACITY: f64 = 0.1;

/// Which way content drifts as the page scrolls down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParallaxDirection {
    /// Drift up (negative Y).
    #[default]
    Up,
    /// Drift down (positive Y).
    Down,
    /// Drift left (negative X).
    Left,
    /// Drift right (positive X).
    Right,
}

impl ParallaxDirection {
    fn apply(self, magnitude: f64) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -magnitude),
            Self::Down => Vec2::new(0.0, magnitude),
            Self::Left => Vec2::new(-magnitude, 0.0),
            Self::Right => Vec2::new(magnitude, 0.0),
        }
    }
}

/// Parallax settings for one element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Travel multiplier; `0.5` moves the element 50px either side of center.
    pub speed: f64,
    /// Drift direction.
    pub direction: ParallaxDirection,
    /// Scale ±10% around center.
    pub scale: bool,
    /// Rotate linearly with progress.
    pub rotate: bool,
    /// Fade toward the viewport edges.
    pub opacity: bool,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            direction: ParallaxDirection::Up,
            scale: false,
            rotate: false,
            opacity: false,
        }
    }
}

impl ParallaxConfig {
    /// Reject non-finite speeds.
    pub fn validate(&self) -> ScrollkitResult<()> {
        if !self.speed.is_finite() {
            return Err(ScrollkitError::validation("parallax speed must be finite"));
        }
        Ok(())
    }
}

/// Resolved parallax transform for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxTransform {
    /// Translation in CSS pixels.
    pub translate: Vec2,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotate_deg: f64,
    /// Opacity in `[0.1, 1]`.
    pub opacity: f64,
}

impl Default for ParallaxTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ParallaxTransform {
    /// No movement, full opacity.
    pub const IDENTITY: Self = Self {
        translate: Vec2::new(0.0, 0.0),
        scale: 1.0,
        rotate_deg: 0.0,
        opacity: 1.0,
    };

    /// Whether this is (numerically) the identity.
    pub fn is_identity(&self) -> bool {
        const EPS: f64 = 1e-9;
        self.translate.x.abs() < EPS
            && self.translate.y.abs() < EPS
            && (self.scale - 1.0).abs() < EPS
            && self.rotate_deg.abs() < EPS
            && (self.opacity - 1.0).abs() < EPS
    }

    /// CSS `transform` value, always listing all three components for stable diffs.
    pub fn transform_css(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0) scale({}) rotate({}deg)",
            round4(self.translate.x),
            round4(self.translate.y),
            round4(self.scale),
            round4(self.rotate_deg)
        )
    }

    /// Same transform as a 2D affine about the element origin: `T * R * S`.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translate)
            * Affine::rotate(self.rotate_deg.to_radians())
            * Affine::scale(self.scale)
    }
}

/// Scroll progress of an element through the viewport, clamped to `[0, 1]`.
///
/// `rect_top` is viewport-relative. A degenerate zero-height viewport and element report the
/// centered value `0.5`.
pub fn scroll_progress(rect_top: f64, rect_height: f64, viewport_height: f64) -> f64 {
    let span = viewport_height + rect_height;
    if span <= 0.0 {
        return 0.5;
    }
    clamp01((viewport_height - rect_top) / span)
}

/// Compute the parallax transform for an element box (viewport-relative).
pub fn compute_parallax(
    rect: Rect,
    viewport_height: f64,
    config: &ParallaxConfig,
    reduced_motion: bool,
) -> ParallaxTransform {
    if reduced_motion {
        return ParallaxTransform::IDENTITY;
    }
    let p = scroll_progress(rect.y0, rect.height(), viewport_height);
    let centered = p - 0.5;
    let magnitude = centered * TRAVEL_PX * config.speed;

    ParallaxTransform {
        translate: config.direction.apply(magnitude),
        scale: if config.scale {
            1.0 + centered * SCALE_DRIFT
        } else {
            1.0
        },
        rotate_deg: if config.rotate {
            centered * ROTATE_RANGE_DEG * config.speed
        } else {
            0.0
        },
        opacity: if config.opacity {
            (1.0 - 2.0 * centered.abs()).max(MIN_OPACITY)
        } else {
            1.0
        },
    }
}

/// Per-element parallax state; holds the most recent transform.
#[derive(Clone, Debug)]
pub struct ParallaxLayer {
    element: ElementId,
    config: ParallaxConfig,
    transform: ParallaxTransform,
}

impl ParallaxLayer {
    /// Create a layer starting at the identity.
    pub fn new(element: ElementId, config: ParallaxConfig) -> ScrollkitResult<Self> {
        config.validate()?;
        Ok(Self {
            element,
            config,
            transform: ParallaxTransform::IDENTITY,
        })
    }

    /// Owning element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Layer settings.
    pub fn config(&self) -> &ParallaxConfig {
        &self.config
    }

    /// Most recent transform.
    pub fn transform(&self) -> ParallaxTransform {
        self.transform
    }

    /// Recompute for the current geometry. Returns the new transform when it changed.
    pub fn update(
        &mut self,
        rect: Rect,
        viewport_height: f64,
        reduced_motion: bool,
    ) -> Option<ParallaxTransform> {
        let next = compute_parallax(rect, viewport_height, &self.config, reduced_motion);
        if next == self.transform {
            return None;
        }
        self.transform = next;
        Some(next)
    }
}

#[cfg(test)]
#[path = "../tests/unit/parallax/calc.rs"]
mod tests;
