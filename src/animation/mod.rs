//! Easing curves and the animation-name → style lookup.

pub(crate) mod ease;
pub(crate) mod style;
