//! Headless host for every scroll-driven effect on one page.
//!
//! A [`Stage`] owns the platform handle, the observation registry, the timer queue, and the
//! frame scheduler, plus per-element state for reveals, parallax layers, and spied sections.
//! The host reports geometry and events; [`Stage::tick`] does the work and returns what
//! changed.
//!
//! Event flow per host frame:
//!
//! 1. `on_scroll` / `on_resize` / geometry changes only *request* a frame.
//! 2. `tick(now)` fires due reveal timers, then, if a frame was requested, runs intersection
//!    checks, parallax, scroll-spy, and back-to-top in that order.

use std::collections::BTreeMap;

use crate::animation::style::{ResolvedStyle, Transition};
use crate::compose::StaggerPlan;
use crate::config::MotionConfig;
use crate::foundation::core::{ElementId, Millis, Rect, Vec2};
use crate::foundation::error::{ScrollkitError, ScrollkitResult};
use crate::observe::intersection::ObserverRegistry;
use crate::observe::reveal::{AnimationState, Reveal, RevealConfig};
use crate::parallax::{ParallaxConfig, ParallaxLayer, ParallaxTransform};
use crate::platform::{Platform, ScrollRequest};
use crate::scroll::smooth::{page_progress, smooth_scroll_to};
use crate::scroll::spy::ScrollSpy;
use crate::timing::frame::FrameScheduler;
use crate::timing::timers::TimerQueue;

/// One change the host should render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageUpdate {
    /// A reveal flipped.
    Visibility {
        /// Element.
        element: ElementId,
        /// New visibility.
        visible: bool,
        /// Styles for the new state.
        style: ResolvedStyle,
        /// Transition to animate with.
        transition: Transition,
    },
    /// A parallax layer moved.
    Transform {
        /// Element.
        element: ElementId,
        /// New transform.
        transform: ParallaxTransform,
    },
    /// The scroll-spy active section changed.
    ActiveSection {
        /// New active section id.
        id: Option<String>,
    },
    /// The back-to-top button should appear or disappear.
    BackToTop {
        /// New visibility.
        visible: bool,
    },
}

impl StageUpdate {
    /// Element the update targets, if it is element-specific.
    pub fn element(&self) -> Option<ElementId> {
        match self {
            Self::Visibility { element, .. } | Self::Transform { element, .. } => Some(*element),
            Self::ActiveSection { .. } | Self::BackToTop { .. } => None,
        }
    }
}

/// Resource counters for leak checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct StageStats {
    /// Mounted elements of any kind.
    pub mounted: usize,
    /// Connected observations.
    pub live_observers: usize,
    /// Timers not yet fired or cancelled.
    pub pending_timers: usize,
    /// Frames actually run.
    pub frames_run: u64,
}

#[derive(Debug)]
enum Mounted {
    Reveal(Reveal),
    Parallax(ParallaxLayer),
    Section(String),
}

/// Page-level coordinator. See the module docs for the event flow.
pub struct Stage<P: Platform> {
    platform: P,
    config: MotionConfig,
    observers: ObserverRegistry,
    timers: TimerQueue,
    frames: FrameScheduler,
    layout: BTreeMap<ElementId, Rect>,
    elements: BTreeMap<ElementId, Mounted>,
    spy: ScrollSpy,
    back_to_top_visible: bool,
    queued: Vec<StageUpdate>,
    next_id: u64,
}

impl<P: Platform> Stage<P> {
    /// Create an empty stage.
    pub fn new(platform: P, config: MotionConfig) -> Self {
        let spy = ScrollSpy::new(Vec::new(), config.spy_offset);
        Self {
            platform,
            config,
            observers: ObserverRegistry::new(),
            timers: TimerQueue::new(),
            frames: FrameScheduler::new(),
            layout: BTreeMap::new(),
            elements: BTreeMap::new(),
            spy,
            back_to_top_visible: false,
            queued: Vec::new(),
            next_id: 0,
        }
    }

    /// Borrow the platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutably borrow the platform (e.g. to move a simulated scroll position).
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Motion settings in effect.
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    fn reduced_motion(&self) -> bool {
        self.config.reduced_motion(&self.platform)
    }

    fn alloc_id(&mut self) -> ElementId {
        self.next_id += 1;
        ElementId(self.next_id)
    }

    /// Mount a reveal using the page's default settings.
    pub fn mount_default_reveal(&mut self) -> ElementId {
        self.mount_reveal(self.config.reveal)
    }

    /// Mount a reveal wrapper.
    pub fn mount_reveal(&mut self, config: RevealConfig) -> ElementId {
        let id = self.alloc_id();
        let reduced = self.reduced_motion();
        let reveal = Reveal::mount(id, config, reduced, &mut self.observers);
        if reveal.state().visible {
            self.queued.push(visibility_update(&reveal));
        }
        self.elements.insert(id, Mounted::Reveal(reveal));
        self.frames.request();
        id
    }

    /// Mount every child of a stagger/sequence plan, returning each payload with its element.
    pub fn mount_stagger<T>(&mut self, plan: StaggerPlan<T>) -> Vec<(T, ElementId)> {
        plan.into_items()
            .into_iter()
            .map(|item| {
                let id = self.mount_reveal(item.reveal);
                (item.child, id)
            })
            .collect()
    }

    /// Mount a parallax layer.
    pub fn mount_parallax(&mut self, config: ParallaxConfig) -> ScrollkitResult<ElementId> {
        let id = self.alloc_id();
        let layer = ParallaxLayer::new(id, config)?;
        self.elements.insert(id, Mounted::Parallax(layer));
        self.frames.request();
        Ok(id)
    }

    /// Register a navigable section for scroll-spy, appended to the navigation order.
    pub fn mount_section(&mut self, section_id: impl Into<String>) -> ScrollkitResult<ElementId> {
        let section_id = section_id.into();
        if self.section_element(&section_id).is_some() {
            return Err(ScrollkitError::validation(format!(
                "section '{section_id}' is already mounted"
            )));
        }
        let id = self.alloc_id();
        self.spy.add_section(section_id.clone());
        self.elements.insert(id, Mounted::Section(section_id));
        self.frames.request();
        Ok(id)
    }

    /// Unmount any element, releasing its observation and timers. Returns `false` if unknown.
    pub fn unmount(&mut self, element: ElementId) -> bool {
        let Some(mounted) = self.elements.remove(&element) else {
            return false;
        };
        match mounted {
            Mounted::Reveal(reveal) => reveal.unmount(&mut self.observers, &mut self.timers),
            Mounted::Parallax(_) => {}
            Mounted::Section(id) => self.spy.remove_section(&id),
        }
        self.queued.retain(|u| u.element() != Some(element));
        let stray = self.timers.cancel_owner(element);
        debug_assert_eq!(stray, 0, "timers outlived their reveal");
        self.layout.remove(&element);
        true
    }

    /// Unmount everything (page teardown).
    pub fn unmount_all(&mut self) {
        let ids: Vec<ElementId> = self.elements.keys().copied().collect();
        for id in ids {
            self.unmount(id);
        }
        self.frames.cancel();
        self.queued.clear();
    }

    /// Report an element's document-space box.
    pub fn set_layout(&mut self, element: ElementId, rect: Rect) -> ScrollkitResult<()> {
        if !self.elements.contains_key(&element) {
            return Err(ScrollkitError::validation(format!(
                "layout for unmounted element {}",
                element.0
            )));
        }
        self.layout.insert(element, rect);
        self.frames.request();
        Ok(())
    }

    /// Scroll event from the host.
    pub fn on_scroll(&mut self) {
        self.frames.request();
    }

    /// Resize event from the host.
    pub fn on_resize(&mut self) {
        self.frames.request();
    }

    /// Smooth-scroll so a section sits below the configured header offset.
    pub fn scroll_to_section(&mut self, section_id: &str) -> ScrollkitResult<ScrollRequest> {
        let element = self.section_element(section_id).ok_or_else(|| {
            ScrollkitError::validation(format!("unknown section '{section_id}'"))
        })?;
        let top = self.layout.get(&element).map(|r| r.y0).ok_or_else(|| {
            ScrollkitError::validation(format!("section '{section_id}' has no layout yet"))
        })?;
        let reduced = self.reduced_motion();
        let req = smooth_scroll_to(&mut self.platform, top, self.config.spy_offset, reduced);
        self.frames.request();
        Ok(req)
    }

    /// Back-to-top click. `None` while the button is hidden.
    pub fn scroll_to_top(&mut self) -> Option<ScrollRequest> {
        let reduced = self.reduced_motion();
        let req = self.config.back_to_top.activate(&mut self.platform, reduced)?;
        self.frames.request();
        Some(req)
    }

    /// Advance to `now`: fire due timers, then run the pending frame if one was requested.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, now: Millis) -> Vec<StageUpdate> {
        let mut out = std::mem::take(&mut self.queued);

        for (timer, owner) in self.timers.due(now) {
            if let Some(Mounted::Reveal(reveal)) = self.elements.get_mut(&owner)
                && reveal.on_timer(timer, &mut self.observers).is_some()
            {
                out.push(visibility_update(reveal));
            }
        }

        if self.frames.take() {
            self.run_frame(now, &mut out);
        }
        out
    }

    fn run_frame(&mut self, now: Millis, out: &mut Vec<StageUpdate>) {
        let viewport = self.platform.viewport();
        let scroll_y = self.platform.scroll_y();
        let reduced = self.reduced_motion();
        let shift = Vec2::new(0.0, scroll_y);
        let layout = &self.layout;

        let entries = self
            .observers
            .check(viewport.rect(), |el| layout.get(&el).map(|r| *r - shift));
        for entry in entries {
            if let Some(Mounted::Reveal(reveal)) = self.elements.get_mut(&entry.target)
                && reveal
                    .on_entry(&entry, now, &mut self.timers, &mut self.observers)
                    .is_some()
            {
                out.push(visibility_update(reveal));
            }
        }

        for (id, mounted) in &mut self.elements {
            let Mounted::Parallax(layer) = mounted else {
                continue;
            };
            let Some(rect) = layout.get(id) else {
                continue;
            };
            if let Some(transform) = layer.update(*rect - shift, viewport.height, reduced) {
                out.push(StageUpdate::Transform {
                    element: *id,
                    transform,
                });
            }
        }

        let elements = &self.elements;
        let section_top = |section: &str| {
            elements.iter().find_map(|(id, m)| match m {
                Mounted::Section(s) if s == section => layout.get(id).map(|r| r.y0),
                _ => None,
            })
        };
        if let Some(id) = self.spy.update(scroll_y, section_top) {
            out.push(StageUpdate::ActiveSection { id });
        }

        let btt = self.config.back_to_top.is_visible(scroll_y);
        if btt != self.back_to_top_visible {
            self.back_to_top_visible = btt;
            out.push(StageUpdate::BackToTop { visible: btt });
        }
    }

    fn section_element(&self, section_id: &str) -> Option<ElementId> {
        self.elements.iter().find_map(|(id, m)| match m {
            Mounted::Section(s) if s == section_id => Some(*id),
            _ => None,
        })
    }

    /// Reveal flags for an element, if it is a mounted reveal.
    pub fn reveal_state(&self, element: ElementId) -> Option<AnimationState> {
        match self.elements.get(&element)? {
            Mounted::Reveal(r) => Some(r.state()),
            _ => None,
        }
    }

    /// Current styles for a mounted reveal (what to render before any update arrives).
    pub fn reveal_style(&self, element: ElementId) -> Option<ResolvedStyle> {
        match self.elements.get(&element)? {
            Mounted::Reveal(r) => Some(r.style()),
            _ => None,
        }
    }

    /// Delay configured on a mounted reveal.
    pub fn reveal_delay(&self, element: ElementId) -> Option<Millis> {
        match self.elements.get(&element)? {
            Mounted::Reveal(r) => Some(r.config().delay),
            _ => None,
        }
    }

    /// Latest transform of a mounted parallax layer.
    pub fn parallax_transform(&self, element: ElementId) -> Option<ParallaxTransform> {
        match self.elements.get(&element)? {
            Mounted::Parallax(l) => Some(l.transform()),
            _ => None,
        }
    }

    /// Active scroll-spy section.
    pub fn active_section(&self) -> Option<&str> {
        self.spy.state().active_section_id.as_deref()
    }

    /// Reading progress through the document.
    pub fn page_progress(&self) -> f64 {
        page_progress(
            self.platform.scroll_y(),
            self.platform.document_height(),
            self.platform.viewport().height,
        )
    }

    /// Earliest pending timer deadline, so hosts can sleep until it.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Whether a frame is waiting.
    pub fn needs_frame(&self) -> bool {
        self.frames.is_pending()
    }

    /// Resource counters.
    pub fn stats(&self) -> StageStats {
        StageStats {
            mounted: self.elements.len(),
            live_observers: self.observers.live_count(),
            pending_timers: self.timers.pending(),
            frames_run: self.frames.counters().1,
        }
    }

    /// Total observations created over the stage's life.
    pub fn observers_created(&self) -> u64 {
        self.observers.created_count()
    }
}

fn visibility_update(reveal: &Reveal) -> StageUpdate {
    StageUpdate::Visibility {
        element: reveal.element(),
        visible: reveal.state().visible,
        style: reveal.style(),
        transition: reveal.transition(),
    }
}

#[cfg(test)]
#[path = "../tests/unit/stage/stage.rs"]
mod tests;
