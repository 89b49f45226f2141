//! Scrollkit is a headless engine for scroll-driven page motion.
//!
//! It models what a portfolio page does while the visitor scrolls: elements reveal with an
//! entrance animation when they enter the viewport, layers drift with parallax, the navigation
//! tracks the section in view, and a back-to-top control appears past a threshold. The engine
//! never touches a real DOM; hosts feed it geometry and time and apply the [`StageUpdate`]s it
//! returns.
//!
//! - Describe the page in a [`SiteConfig`]
//! - Mount elements on a [`Stage`] backed by a [`Platform`]
//! - Forward scroll/resize events and call [`Stage::tick`] once per host frame
//!
//! Page content (projects, skills, ...) lives behind the [`DocumentStore`] trait, with
//! [`MemoryStore`] as the in-process implementation. See [`guide`] for a walkthrough.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod compose;
pub(crate) mod config;
pub(crate) mod feedback;
pub(crate) mod forms;
pub(crate) mod observe;
pub(crate) mod parallax;
pub(crate) mod platform;
pub(crate) mod scroll;
pub(crate) mod stage;
pub mod store;
pub(crate) mod timing;

pub mod guide;

pub use crate::foundation::core::{
    Affine, ElementId, MarginLength, Millis, Point, Rect, RootMargin, Threshold, Vec2, Viewport,
};
pub use crate::foundation::error::{
    ErrorCategory, FieldError, ScrollkitError, ScrollkitResult,
};
pub use crate::foundation::math::Lerp;

pub use crate::animation::ease::Ease;
pub use crate::animation::style::{
    ALL_ANIMATIONS, AnimationName, ResolvedStyle, StyleDecl, Transition, resolve_style,
};
pub use crate::compose::{
    SequencePolicy, StaggerItem, StaggerPlan, sequence_animations, stagger_delays,
};
pub use crate::config::{MotionConfig, ResolvedTheme, SiteConfig, ThemeConfig, ThemeMode};
pub use crate::feedback::{ErrorReporter, RetryPolicy, Toast, ToastKind, retry_operation};
pub use crate::forms::{ContactForm, LoadingTracker, is_valid_email};
pub use crate::observe::intersection::{
    IntersectionEntry, ObserverId, ObserverOptions, ObserverRegistry, crosses, intersection_ratio,
};
pub use crate::observe::reveal::{AnimationState, Reveal, RevealConfig};
pub use crate::parallax::{
    ParallaxConfig, ParallaxDirection, ParallaxLayer, ParallaxTransform, compute_parallax,
    scroll_progress,
};
pub use crate::platform::{HeadlessPlatform, Platform, ScrollBehavior, ScrollRequest};
pub use crate::scroll::smooth::{BackToTop, page_progress, smooth_scroll_to};
pub use crate::scroll::spy::{ScrollSpy, ScrollSpyState, active_section};
pub use crate::stage::{Stage, StageStats, StageUpdate};
pub use crate::store::memory::MemoryStore;
pub use crate::store::records::{Experience, Project, Record, Skill, Testimonial};
pub use crate::store::{Document, DocumentStore, Listener, ORDER_FIELD, RecordStoreExt, Subscription};
pub use crate::timing::frame::FrameScheduler;
pub use crate::timing::timers::{TimerId, TimerQueue};
