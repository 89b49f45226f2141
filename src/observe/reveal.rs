use crate::animation::ease::Ease;
use crate::animation::style::{AnimationName, ResolvedStyle, Transition, resolve_style};
use crate::foundation::core::{ElementId, Millis, RootMargin, Threshold};
use crate::observe::intersection::{IntersectionEntry, ObserverId, ObserverOptions, ObserverRegistry};
use crate::timing::timers::{TimerId, TimerQueue};

/// Per-element reveal settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Intersection ratio that triggers the reveal.
    pub threshold: Threshold,
    /// Viewport adjustment; the default shrinks the bottom edge so elements reveal a little
    /// after they scroll into view.
    pub root_margin: RootMargin,
    /// Reveal once and stay revealed.
    pub trigger_once: bool,
    /// Wait this long after intersecting before revealing.
    pub delay: Millis,
    /// Which animation to play.
    pub animation: AnimationName,
    /// Transition duration.
    pub duration: Millis,
    /// Transition curve.
    pub ease: Ease,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            root_margin: RootMargin {
                bottom: crate::foundation::core::MarginLength::Px(-50.0),
                ..RootMargin::default()
            },
            trigger_once: true,
            delay: Millis::ZERO,
            animation: AnimationName::Fade,
            duration: Millis(600),
            ease: Ease::OutCubic,
        }
    }
}

impl RevealConfig {
    /// Same settings with another animation.
    pub fn with_animation(self, animation: AnimationName) -> Self {
        Self { animation, ..self }
    }

    /// Same settings with another delay.
    pub fn with_delay(self, delay: Millis) -> Self {
        Self { delay, ..self }
    }

    fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.threshold,
            root_margin: self.root_margin,
        }
    }
}

/// Reveal flags for one element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationState {
    /// The reveal has fired at least once.
    pub triggered: bool,
    /// The element is currently shown in its animated state.
    pub visible: bool,
}

/// The visibility state machine for one element.
///
/// Lifecycle: [`Reveal::mount`] connects one observation (or none under reduced motion);
/// intersection entries and timer callbacks drive `visible`; [`Reveal::unmount`] disconnects the
/// observation and clears any pending delay. With `trigger_once`, `visible` never goes back to
/// `false` once set, and the observation is released right after the reveal.
#[derive(Debug)]
pub struct Reveal {
    element: ElementId,
    config: RevealConfig,
    state: AnimationState,
    observer: Option<ObserverId>,
    pending: Option<TimerId>,
}

impl Reveal {
    /// Mount a reveal. Under reduced motion the element is visible immediately and nothing
    /// is observed.
    pub fn mount(
        element: ElementId,
        config: RevealConfig,
        reduced_motion: bool,
        observers: &mut ObserverRegistry,
    ) -> Self {
        if reduced_motion {
            tracing::debug!(element = element.0, "reduced motion: revealing without observer");
            return Self {
                element,
                config,
                state: AnimationState {
                    triggered: true,
                    visible: true,
                },
                observer: None,
                pending: None,
            };
        }
        let observer = observers.observe(element, config.observer_options());
        Self {
            element,
            config,
            state: AnimationState::default(),
            observer: Some(observer),
            pending: None,
        }
    }

    /// Element this reveal belongs to.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Current flags.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Settings this reveal was mounted with.
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Connected observation, if any.
    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    /// Pending delay timer, if any.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending
    }

    /// Styles for the current visibility.
    pub fn style(&self) -> ResolvedStyle {
        resolve_style(self.config.animation, self.state.visible)
    }

    /// Transition to attach while animating. The reveal delay is enforced by the timer, so the
    /// transition itself starts immediately.
    pub fn transition(&self) -> Transition {
        Transition {
            duration: self.config.duration,
            delay: Millis::ZERO,
            ease: self.config.ease,
        }
    }

    /// Feed an intersection entry. Returns the new `visible` value when it changed.
    pub fn on_entry(
        &mut self,
        entry: &IntersectionEntry,
        now: Millis,
        timers: &mut TimerQueue,
        observers: &mut ObserverRegistry,
    ) -> Option<bool> {
        if Some(entry.observer) != self.observer {
            return None;
        }
        if entry.is_intersecting {
            if self.state.visible || self.pending.is_some() {
                return None;
            }
            if self.config.delay == Millis::ZERO {
                return self.reveal(observers);
            }
            self.pending = Some(timers.schedule(now, self.config.delay, self.element));
            return None;
        }

        if self.config.trigger_once {
            return None;
        }
        if let Some(t) = self.pending.take() {
            timers.cancel(t);
        }
        if self.state.visible {
            self.state.visible = false;
            return Some(false);
        }
        None
    }

    /// Feed a fired timer. Returns the new `visible` value when it changed.
    pub fn on_timer(&mut self, id: TimerId, observers: &mut ObserverRegistry) -> Option<bool> {
        if self.pending != Some(id) {
            return None;
        }
        self.pending = None;
        self.reveal(observers)
    }

    fn reveal(&mut self, observers: &mut ObserverRegistry) -> Option<bool> {
        if self.state.visible {
            return None;
        }
        self.state = AnimationState {
            triggered: true,
            visible: true,
        };
        if self.config.trigger_once
            && let Some(obs) = self.observer.take()
        {
            observers.disconnect(obs);
        }
        Some(true)
    }

    /// Release the observation and any pending timer.
    pub fn unmount(mut self, observers: &mut ObserverRegistry, timers: &mut TimerQueue) {
        if let Some(obs) = self.observer.take() {
            observers.disconnect(obs);
        }
        if let Some(t) = self.pending.take() {
            timers.cancel(t);
        }
        tracing::trace!(element = self.element.0, "reveal unmounted");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/observe/reveal.rs"]
mod tests;
