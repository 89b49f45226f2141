//! Deferred work: millisecond timers and animation-frame coalescing.

pub(crate) mod frame;
pub(crate) mod timers;
