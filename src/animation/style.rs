use std::fmt::Write as _;

use crate::animation::ease::Ease;
use crate::foundation::core::{Millis, Vec2};
use crate::foundation::error::{ScrollkitError, ScrollkitResult};
use crate::foundation::math::{Lerp, round4};

/// Named reveal animation.
///
/// Names parse leniently through [`AnimationName::parse_or_fade`]; anything unrecognized
/// resolves to [`AnimationName::Fade`] and logs a warning. Strict parsing is available via
/// [`std::str::FromStr`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationName {
    /// Opacity 0 → 1.
    #[default]
    Fade,
    /// Rise into place from below.
    SlideUp,
    /// Drop into place from above.
    SlideDown,
    /// Enter moving leftward (starts offset to the right).
    SlideLeft,
    /// Enter moving rightward (starts offset to the left).
    SlideRight,
    /// Grow from 80%.
    Scale,
    /// Unwind from a small counter-clockwise tilt.
    Rotate,
    /// Settle from 110%.
    ZoomOut,
    /// Unfold vertically from a flat line.
    Flip,
}

/// Every name, in declaration order.
pub const ALL_ANIMATIONS: [AnimationName; 9] = [
    AnimationName::Fade,
    AnimationName::SlideUp,
    AnimationName::SlideDown,
    AnimationName::SlideLeft,
    AnimationName::SlideRight,
    AnimationName::Scale,
    AnimationName::Rotate,
    AnimationName::ZoomOut,
    AnimationName::Flip,
];

const SLIDE_DISTANCE_PX: f64 = 50.0;

// Accepted spellings, matched after lowercasing and stripping `-`/`_`.
const ALIASES: &[(&str, AnimationName)] = &[
    ("fade", AnimationName::Fade),
    ("fadein", AnimationName::Fade),
    ("slideup", AnimationName::SlideUp),
    ("fadeup", AnimationName::SlideUp),
    ("fadeinup", AnimationName::SlideUp),
    ("slidedown", AnimationName::SlideDown),
    ("fadedown", AnimationName::SlideDown),
    ("fadeindown", AnimationName::SlideDown),
    ("slideleft", AnimationName::SlideLeft),
    ("fadeleft", AnimationName::SlideLeft),
    ("slideright", AnimationName::SlideRight),
    ("faderight", AnimationName::SlideRight),
    ("scale", AnimationName::Scale),
    ("scalein", AnimationName::Scale),
    ("zoomin", AnimationName::Scale),
    ("rotate", AnimationName::Rotate),
    ("rotatein", AnimationName::Rotate),
    ("zoomout", AnimationName::ZoomOut),
    ("flip", AnimationName::Flip),
    ("flipin", AnimationName::Flip),
];

impl AnimationName {
    /// Canonical kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::SlideUp => "slide-up",
            Self::SlideDown => "slide-down",
            Self::SlideLeft => "slide-left",
            Self::SlideRight => "slide-right",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
            Self::ZoomOut => "zoom-out",
            Self::Flip => "flip",
        }
    }

    /// Parse a name, falling back to [`AnimationName::Fade`] for anything unknown.
    pub fn parse_or_fade(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!(name = s, "unknown animation name, falling back to fade");
            Self::Fade
        })
    }

    /// Pre-reveal style.
    pub fn initial(self) -> StyleDecl {
        let hidden = StyleDecl {
            opacity: 0.0,
            ..StyleDecl::IDENTITY
        };
        match self {
            Self::Fade => hidden,
            Self::SlideUp => hidden.translated(0.0, SLIDE_DISTANCE_PX),
            Self::SlideDown => hidden.translated(0.0, -SLIDE_DISTANCE_PX),
            Self::SlideLeft => hidden.translated(SLIDE_DISTANCE_PX, 0.0),
            Self::SlideRight => hidden.translated(-SLIDE_DISTANCE_PX, 0.0),
            Self::Scale => StyleDecl {
                scale: Vec2::new(0.8, 0.8),
                ..hidden
            },
            Self::Rotate => StyleDecl {
                rotate_deg: -15.0,
                scale: Vec2::new(0.9, 0.9),
                ..hidden
            },
            Self::ZoomOut => StyleDecl {
                scale: Vec2::new(1.1, 1.1),
                ..hidden
            },
            Self::Flip => StyleDecl {
                scale: Vec2::new(1.0, 0.0),
                ..hidden
            },
        }
    }

    /// Settled style. Every animation lands on the identity.
    pub fn animated(self) -> StyleDecl {
        StyleDecl::IDENTITY
    }
}

impl std::fmt::Display for AnimationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnimationName {
    type Err = ScrollkitError;

    fn from_str(s: &str) -> ScrollkitResult<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, name)| *name)
            .ok_or_else(|| ScrollkitError::validation(format!("unknown animation name '{s}'")))
    }
}

impl serde::Serialize for AnimationName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for AnimationName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse_or_fade(&s))
    }
}

/// Visual state of an element: opacity plus a 2D transform.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleDecl {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Translation in CSS pixels.
    pub translate: Vec2,
    /// Per-axis scale factor.
    pub scale: Vec2,
    /// Clockwise rotation in degrees.
    pub rotate_deg: f64,
}

impl Default for StyleDecl {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl StyleDecl {
    /// Fully opaque, untransformed.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        translate: Vec2::new(0.0, 0.0),
        scale: Vec2::new(1.0, 1.0),
        rotate_deg: 0.0,
    };

    fn translated(self, x: f64, y: f64) -> Self {
        Self {
            translate: Vec2::new(x, y),
            ..self
        }
    }

    /// `true` when the transform part is the identity.
    pub fn is_untransformed(&self) -> bool {
        self.translate == Vec2::ZERO && self.scale == Vec2::new(1.0, 1.0) && self.rotate_deg == 0.0
    }

    /// CSS `transform` value (`"none"` for the identity).
    pub fn transform_css(&self) -> String {
        if self.is_untransformed() {
            return "none".to_owned();
        }
        let mut parts = Vec::with_capacity(3);
        if self.translate != Vec2::ZERO {
            parts.push(format!(
                "translate({}px, {}px)",
                round4(self.translate.x),
                round4(self.translate.y)
            ));
        }
        if self.scale != Vec2::new(1.0, 1.0) {
            if self.scale.x == self.scale.y {
                parts.push(format!("scale({})", round4(self.scale.x)));
            } else {
                parts.push(format!(
                    "scale({}, {})",
                    round4(self.scale.x),
                    round4(self.scale.y)
                ));
            }
        }
        if self.rotate_deg != 0.0 {
            parts.push(format!("rotate({}deg)", round4(self.rotate_deg)));
        }
        parts.join(" ")
    }

    /// Inline CSS declarations (`"opacity: 0; transform: translate(0px, 50px)"`).
    pub fn css(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "opacity: {}; transform: {}",
            round4(self.opacity),
            self.transform_css()
        );
        out
    }
}

impl Lerp for StyleDecl {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t),
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            scale: <Vec2 as Lerp>::lerp(&a.scale, &b.scale, t),
            rotate_deg: <f64 as Lerp>::lerp(&a.rotate_deg, &b.rotate_deg, t),
        }
    }
}

/// CSS transition parameters attached to a reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Transition {
    /// Transition duration.
    pub duration: Millis,
    /// Delay before the transition starts.
    pub delay: Millis,
    /// Timing curve.
    pub ease: Ease,
}

impl Transition {
    /// CSS `transition` shorthand.
    pub fn css(&self) -> String {
        let mut s = format!("all {} {}", self.duration, self.ease.css());
        if self.delay > Millis::ZERO {
            let _ = write!(s, " {}", self.delay);
        }
        s
    }
}

/// Output of [`resolve_style`]: both endpoint styles plus which one is active.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedStyle {
    /// Resolved animation.
    pub name: AnimationName,
    /// Pre-reveal style.
    pub initial: StyleDecl,
    /// Post-reveal style.
    pub animated: StyleDecl,
    /// Whether the element is revealed.
    pub visible: bool,
}

impl ResolvedStyle {
    /// Style the host should apply right now.
    pub fn current(&self) -> StyleDecl {
        if self.visible {
            self.animated
        } else {
            self.initial
        }
    }

    /// Class list for hosts that animate through stylesheets instead of inline styles.
    pub fn class_name(&self) -> String {
        let mut s = format!("sk-reveal sk-{}", self.name.as_str());
        if self.visible {
            s.push_str(" is-visible");
        }
        s
    }

    /// Style part-way through the reveal, with `progress` in `[0, 1]` shaped by `ease`.
    pub fn sample(&self, progress: f64, ease: Ease) -> StyleDecl {
        StyleDecl::lerp(&self.initial, &self.animated, ease.apply(progress))
    }
}

/// Resolve an animation and visibility flag to concrete styles.
///
/// Pure: the same inputs always produce the same output.
pub fn resolve_style(name: AnimationName, visible: bool) -> ResolvedStyle {
    ResolvedStyle {
        name,
        initial: name.initial(),
        animated: name.animated(),
        visible,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/style.rs"]
mod tests;
