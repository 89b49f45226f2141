use crate::foundation::error::{ScrollkitError, ScrollkitResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Stable identity of one mounted element on a [`crate::Stage`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);

/// Milliseconds on the host's monotonic clock, or a duration in milliseconds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Zero duration.
    pub const ZERO: Self = Self(0);

    /// Saturating addition of two durations/instants.
    pub fn saturating_add(self, other: Millis) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply a duration by an integer step count.
    pub fn times(self, n: u64) -> Self {
        Self(self.0.saturating_mul(n))
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Visible area of the host window, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with finite, non-negative extents.
    pub fn new(width: f64, height: f64) -> ScrollkitResult<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(ScrollkitError::validation(
                "viewport extents must be finite and >= 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Viewport rectangle in viewport-relative coordinates.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Intersection ratio threshold in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Threshold(f64);

impl Threshold {
    /// Create a validated threshold.
    pub fn new(v: f64) -> ScrollkitResult<Self> {
        if !(0.0..=1.0).contains(&v) {
            return Err(ScrollkitError::validation(format!(
                "threshold must be in [0, 1], got {v}"
            )));
        }
        Ok(Self(v))
    }

    /// Raw ratio.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(0.1)
    }
}

impl<'de> serde::Deserialize<'de> for Threshold {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Threshold::new(v).map_err(serde::de::Error::custom)
    }
}

/// One side of a root margin.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MarginLength {
    /// Absolute length in CSS pixels.
    Px(f64),
    /// Percentage of the root extent along the same axis.
    Percent(f64),
}

impl MarginLength {
    fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => extent * p / 100.0,
        }
    }

    fn parse(token: &str) -> ScrollkitResult<Self> {
        let parse_num = |s: &str| {
            s.trim().parse::<f64>().map_err(|_| {
                ScrollkitError::validation(format!("invalid root margin length '{token}'"))
            })
        };
        if let Some(v) = token.strip_suffix("px") {
            return Ok(Self::Px(parse_num(v)?));
        }
        if let Some(v) = token.strip_suffix('%') {
            return Ok(Self::Percent(parse_num(v)?));
        }
        // Bare zero is the only unitless length CSS accepts.
        if parse_num(token)? == 0.0 {
            return Ok(Self::Px(0.0));
        }
        Err(ScrollkitError::validation(format!(
            "root margin length '{token}' needs a px or % unit"
        )))
    }
}

/// Growth (positive) or shrink (negative) applied to the viewport before intersection tests.
///
/// Parsed from the same 1-4 value shorthand CSS margins use: `"10px"`, `"0px 20%"`,
/// `"0px 0px -50px 0px"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    /// Top edge.
    pub top: MarginLength,
    /// Right edge.
    pub right: MarginLength,
    /// Bottom edge.
    pub bottom: MarginLength,
    /// Left edge.
    pub left: MarginLength,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::uniform(MarginLength::Px(0.0))
    }
}

impl RootMargin {
    /// Same length on every side.
    pub fn uniform(v: MarginLength) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// Parse the CSS margin shorthand.
    pub fn parse(s: &str) -> ScrollkitResult<Self> {
        let parts = s
            .split_whitespace()
            .map(MarginLength::parse)
            .collect::<ScrollkitResult<Vec<_>>>()?;
        match parts.as_slice() {
            [a] => Ok(Self::uniform(*a)),
            [v, h] => Ok(Self {
                top: *v,
                right: *h,
                bottom: *v,
                left: *h,
            }),
            [t, h, b] => Ok(Self {
                top: *t,
                right: *h,
                bottom: *b,
                left: *h,
            }),
            [t, r, b, l] => Ok(Self {
                top: *t,
                right: *r,
                bottom: *b,
                left: *l,
            }),
            _ => Err(ScrollkitError::validation(format!(
                "root margin '{s}' must have 1 to 4 values"
            ))),
        }
    }

    /// Grow `root` by this margin. Percentages resolve against the root's own extents.
    pub fn apply(&self, root: Rect) -> Rect {
        let w = root.width();
        let h = root.height();
        Rect::new(
            root.x0 - self.left.resolve(w),
            root.y0 - self.top.resolve(h),
            root.x1 + self.right.resolve(w),
            root.y1 + self.bottom.resolve(h),
        )
    }
}

impl std::fmt::Display for MarginLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

impl std::fmt::Display for RootMargin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl std::str::FromStr for RootMargin {
    type Err = ScrollkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for RootMargin {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for RootMargin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RootMargin::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
