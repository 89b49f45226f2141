//! Site-level configuration, loaded once and passed explicitly to the services that need it.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::compose::SequencePolicy;
use crate::foundation::core::Millis;
use crate::foundation::error::{ScrollkitError, ScrollkitResult};
use crate::observe::reveal::RevealConfig;
use crate::platform::Platform;
use crate::scroll::smooth::BackToTop;

/// Motion defaults shared by every reveal, stagger, and scroll helper on a page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Default reveal settings.
    pub reveal: RevealConfig,
    /// Default delay step between staggered children.
    pub stagger: Millis,
    /// Sequence length-mismatch policy.
    pub sequence_policy: SequencePolicy,
    /// Scroll-spy probe offset (usually the fixed header height).
    pub spy_offset: f64,
    /// Back-to-top button rule.
    pub back_to_top: BackToTop,
    /// Force reduced motion on or off regardless of the platform preference.
    pub reduced_motion: Option<bool>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::default(),
            stagger: Millis(150),
            sequence_policy: SequencePolicy::Cycle,
            spy_offset: 100.0,
            back_to_top: BackToTop::default(),
            reduced_motion: None,
        }
    }
}

impl MotionConfig {
    /// Effective reduced-motion flag: the override if set, else the platform preference.
    pub fn reduced_motion<P: Platform + ?Sized>(&self, platform: &P) -> bool {
        self.reduced_motion
            .unwrap_or_else(|| platform.prefers_reduced_motion())
    }

    /// Check numeric fields.
    pub fn validate(&self) -> ScrollkitResult<()> {
        if !self.spy_offset.is_finite() {
            return Err(ScrollkitError::validation("spy_offset must be finite"));
        }
        if !self.back_to_top.threshold.is_finite() || self.back_to_top.threshold < 0.0 {
            return Err(ScrollkitError::validation(
                "back_to_top.threshold must be finite and >= 0",
            ));
        }
        if self.reveal.duration == Millis::ZERO {
            tracing::warn!("reveal duration is 0ms; reveals will snap");
        }
        Ok(())
    }
}

/// Requested color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the platform preference.
    #[default]
    System,
}

/// Concrete scheme after resolving [`ThemeMode::System`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedTheme {
    /// Light scheme.
    Light,
    /// Dark scheme.
    Dark,
}

impl ResolvedTheme {
    /// Root class for stylesheet switching.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Light => "theme-light",
            Self::Dark => "theme-dark",
        }
    }
}

/// Theme selection, owned by the host instead of a global store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Requested mode.
    pub mode: ThemeMode,
}

impl ThemeConfig {
    /// Resolve against the platform's dark-scheme preference.
    pub fn resolve<P: Platform + ?Sized>(&self, platform: &P) -> ResolvedTheme {
        match self.mode {
            ThemeMode::Light => ResolvedTheme::Light,
            ThemeMode::Dark => ResolvedTheme::Dark,
            ThemeMode::System if platform.prefers_dark_scheme() => ResolvedTheme::Dark,
            ThemeMode::System => ResolvedTheme::Light,
        }
    }

    /// Flip to the opposite of what is currently shown. Leaves `System` behind.
    pub fn toggle<P: Platform + ?Sized>(&mut self, platform: &P) -> ResolvedTheme {
        self.mode = match self.resolve(platform) {
            ResolvedTheme::Light => ThemeMode::Dark,
            ResolvedTheme::Dark => ThemeMode::Light,
        };
        self.resolve(platform)
    }
}

/// Everything a page needs to configure the motion and theme layers.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Motion defaults.
    pub motion: MotionConfig,
    /// Theme selection.
    pub theme: ThemeConfig,
}

impl SiteConfig {
    /// Parse from a JSON reader and validate.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollkitResult<Self> {
        let cfg: SiteConfig = serde_json::from_reader(r)
            .map_err(|e| ScrollkitError::validation(format!("parse site config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse from a JSON file on disk and validate.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollkitResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollkitError::validation(format!("open site config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate every section.
    pub fn validate(&self) -> ScrollkitResult<()> {
        self.motion.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/site.rs"]
mod tests;
