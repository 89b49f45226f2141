/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    #[default]
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    /// CSS `transition-timing-function` approximating this curve.
    pub fn css(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "cubic-bezier(0.11, 0, 0.5, 0)",
            Self::OutQuad => "cubic-bezier(0.5, 1, 0.89, 1)",
            Self::InOutQuad => "cubic-bezier(0.45, 0, 0.55, 1)",
            Self::InCubic => "cubic-bezier(0.32, 0, 0.67, 0)",
            Self::OutCubic => "cubic-bezier(0.33, 1, 0.68, 1)",
            Self::InOutCubic => "cubic-bezier(0.65, 0, 0.35, 1)",
        }
    }
}

impl std::str::FromStr for Ease {
    type Err = crate::foundation::error::ScrollkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        Ok(match norm.as_str() {
            "linear" => Self::Linear,
            "in_quad" => Self::InQuad,
            "out_quad" => Self::OutQuad,
            "in_out_quad" => Self::InOutQuad,
            "in_cubic" | "ease_in" => Self::InCubic,
            "out_cubic" | "ease_out" => Self::OutCubic,
            "in_out_cubic" | "ease_in_out" => Self::InOutCubic,
            _ => {
                return Err(crate::foundation::error::ScrollkitError::validation(format!(
                    "unknown ease '{s}'"
                )));
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
