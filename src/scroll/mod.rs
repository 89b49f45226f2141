//! Scroll-spy and programmatic scrolling helpers.

pub(crate) mod smooth;
pub(crate) mod spy;
