//! # Scrollkit guide
//!
//! This module is a standalone walkthrough of how Scrollkit models a scrolling page and how a
//! host is expected to drive it. If you are looking for commands, start with the CLI
//! (`scrollkit --help`). If you are embedding the engine, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Platform`](crate::Platform): what the engine may ask the host (viewport, scroll offset,
//!   document height, motion/theme preferences) and the one thing it may ask the host to do
//!   (scroll)
//! - [`Stage`](crate::Stage): owns every mounted element and turns host events into
//!   [`StageUpdate`](crate::StageUpdate)s
//! - [`Reveal`](crate::Reveal): the per-element entrance animation state machine
//! - [`ParallaxLayer`](crate::ParallaxLayer): a scroll-linked transform
//! - [`ScrollSpy`](crate::ScrollSpy): which section the navigation should highlight
//! - [`DocumentStore`](crate::DocumentStore): where page content comes from
//!
//! ---
//!
//! ## Driving a stage
//!
//! The host owns the clock. A typical frame loop looks like:
//!
//! 1. Report geometry with [`Stage::set_layout`](crate::Stage::set_layout), in document
//!    coordinates (independent of the current scroll offset).
//! 2. Forward events: [`Stage::on_scroll`](crate::Stage::on_scroll) and
//!    [`Stage::on_resize`](crate::Stage::on_resize). Any number of events between two ticks
//!    coalesce into one frame of work.
//! 3. Call [`Stage::tick`](crate::Stage::tick) with the current time and apply the returned
//!    updates in order.
//!
//! [`Stage::next_deadline`](crate::Stage::next_deadline) and
//! [`Stage::needs_frame`](crate::Stage::needs_frame) tell an idle host when it must wake up.
//!
//! ```
//! use scrollkit::{HeadlessPlatform, Millis, MotionConfig, Rect, Stage, StageUpdate, Viewport};
//!
//! let viewport = Viewport::new(1280.0, 800.0).unwrap();
//! let mut stage = Stage::new(HeadlessPlatform::new(viewport, 4000.0), MotionConfig::default());
//!
//! let card = stage.mount_default_reveal();
//! stage.set_layout(card, Rect::new(0.0, 1500.0, 400.0, 1800.0)).unwrap();
//! assert!(stage.tick(Millis(0)).is_empty());
//!
//! stage.platform_mut().set_scroll_y(1000.0);
//! stage.on_scroll();
//! let updates = stage.tick(Millis(16));
//! assert!(matches!(updates[0], StageUpdate::Visibility { visible: true, .. }));
//! ```
//!
//! ---
//!
//! ## Reveal lifecycle
//!
//! A reveal starts hidden in its animation's initial style. When its observer reports the
//! element crossing the threshold (after the root margin is applied to the viewport), the
//! reveal either flips to visible at once or, with a delay, schedules a timer that flips it
//! later. With `trigger_once` the observer is disconnected after the first reveal; otherwise
//! leaving the viewport hides the element again and cancels a pending delay.
//!
//! Unmounting always releases the observer and any pending timer, so a torn-down element never
//! produces a late update.
//!
//! ---
//!
//! ## Reduced motion
//!
//! When the platform reports a reduced-motion preference (or
//! [`MotionConfig::reduced_motion`](crate::MotionConfig) overrides it), reveals are visible from
//! mount without observers, parallax stays at identity, and programmatic scrolling is instant.
//!
//! ---
//!
//! ## Content
//!
//! Records ([`Project`](crate::Project), [`Skill`](crate::Skill),
//! [`Experience`](crate::Experience), [`Testimonial`](crate::Testimonial)) each belong to one
//! collection and validate themselves before every typed write through
//! [`RecordStoreExt`](crate::RecordStoreExt). Live queries deliver the whole ordered collection
//! on subscribe and after every change until the [`Subscription`](crate::Subscription) is
//! dropped.
//!
//! Failures are [`ScrollkitError`](crate::ScrollkitError)s. Show
//! [`user_message`](crate::ScrollkitError::user_message) to visitors through an
//! [`ErrorReporter`](crate::ErrorReporter) and keep the `Display` text for logs. Only network
//! errors are retried by [`retry_operation`](crate::retry_operation).
