use std::collections::BTreeMap;

use crate::foundation::core::{ElementId, Rect, RootMargin, Threshold};

/// Handle returned by [`ObserverRegistry::observe`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ObserverId(pub u64);

/// Options for one observation, mirroring `IntersectionObserverInit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObserverOptions {
    /// Ratio at which the element counts as intersecting.
    #[serde(default)]
    pub threshold: Threshold,
    /// Adjustment applied to the viewport before testing.
    #[serde(default)]
    pub root_margin: RootMargin,
}

/// Change notification for one observed element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct IntersectionEntry {
    /// Observer that produced the entry.
    pub observer: ObserverId,
    /// Observed element.
    pub target: ElementId,
    /// Visible fraction of the element's box within the margin-adjusted root.
    pub ratio: f64,
    /// `ratio` has reached the observer threshold.
    pub is_intersecting: bool,
}

/// Fraction of `target` inside `root`.
///
/// Zero-area targets (e.g. an empty anchor) count as fully visible when their box lies inside the
/// root and invisible otherwise.
pub fn intersection_ratio(target: Rect, root: Rect) -> f64 {
    let area = target.area();
    if area <= 0.0 {
        let inside = target.x0 >= root.x0
            && target.x1 <= root.x1
            && target.y0 >= root.y0
            && target.y1 <= root.y1;
        return if inside { 1.0 } else { 0.0 };
    }
    (target.intersect(root).area() / area).clamp(0.0, 1.0)
}

/// Decide intersection for a ratio against a threshold.
///
/// A zero threshold still requires some overlap, matching the browser rule that an
/// element merely adjacent to the root is not intersecting.
pub fn crosses(ratio: f64, threshold: Threshold) -> bool {
    let t = threshold.get();
    if t == 0.0 { ratio > 0.0 } else { ratio >= t }
}

#[derive(Debug)]
struct Observation {
    target: ElementId,
    options: ObserverOptions,
    last: Option<bool>,
}

/// Owns every live observation.
///
/// Each observation watches exactly one element. Entries are produced only when the
/// intersecting state changes, plus once for the first check after `observe`, like the
/// browser's initial callback.
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    next_id: u64,
    live: BTreeMap<ObserverId, Observation>,
    created: u64,
}

impl ObserverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `target`.
    pub fn observe(&mut self, target: ElementId, options: ObserverOptions) -> ObserverId {
        self.next_id += 1;
        self.created += 1;
        let id = ObserverId(self.next_id);
        self.live.insert(
            id,
            Observation {
                target,
                options,
                last: None,
            },
        );
        tracing::trace!(observer = id.0, element = target.0, "observer connected");
        id
    }

    /// Stop and drop an observation. Returns `false` if it was already gone.
    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        let removed = self.live.remove(&id).is_some();
        if removed {
            tracing::trace!(observer = id.0, "observer disconnected");
        }
        removed
    }

    /// Number of connected observations.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total observations ever created.
    pub fn created_count(&self) -> u64 {
        self.created
    }

    /// Whether `id` is still connected.
    pub fn is_live(&self, id: ObserverId) -> bool {
        self.live.contains_key(&id)
    }

    /// Test every observation against `root` (viewport-relative) and report state changes.
    ///
    /// `rect_of` maps an element to its viewport-relative box; elements without geometry are
    /// skipped and keep their previous state.
    pub fn check(
        &mut self,
        root: Rect,
        mut rect_of: impl FnMut(ElementId) -> Option<Rect>,
    ) -> Vec<IntersectionEntry> {
        let mut out = Vec::new();
        for (id, obs) in &mut self.live {
            let Some(rect) = rect_of(obs.target) else {
                continue;
            };
            let root = obs.options.root_margin.apply(root);
            let ratio = intersection_ratio(rect, root);
            let is_intersecting = crosses(ratio, obs.options.threshold);
            if obs.last == Some(is_intersecting) {
                continue;
            }
            obs.last = Some(is_intersecting);
            out.push(IntersectionEntry {
                observer: *id,
                target: obs.target,
                ratio,
                is_intersecting,
            });
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/observe/intersection.rs"]
mod tests;
