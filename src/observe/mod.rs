//! Viewport intersection tracking and the per-element reveal state machine.

pub(crate) mod intersection;
pub(crate) mod reveal;
