//! Stagger and sequence composition over ordered children.

use crate::animation::style::AnimationName;
use crate::foundation::core::Millis;
use crate::foundation::error::{ScrollkitError, ScrollkitResult};
use crate::observe::reveal::RevealConfig;

/// Delays `base + i * step` for `count` children, in input order.
pub fn stagger_delays(count: usize, base: Millis, step: Millis) -> Vec<Millis> {
    (0..count as u64)
        .map(|i| base.saturating_add(step.times(i)))
        .collect()
}

/// What to do when a sequence has more children than animation names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencePolicy {
    /// Wrap around the name list.
    #[default]
    Cycle,
    /// Extra children reuse the last name.
    HoldLast,
    /// Lengths must match exactly.
    Strict,
}

/// Assign one animation per child from an ordered name list.
///
/// Extra names (more names than children) are ignored except under [`SequencePolicy::Strict`].
pub fn sequence_animations(
    count: usize,
    names: &[AnimationName],
    policy: SequencePolicy,
) -> ScrollkitResult<Vec<AnimationName>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let Some(last) = names.last().copied() else {
        return Err(ScrollkitError::validation(
            "sequence needs at least one animation name",
        ));
    };
    if policy == SequencePolicy::Strict && names.len() != count {
        return Err(ScrollkitError::validation(format!(
            "sequence has {count} children but {} animation names",
            names.len()
        )));
    }
    Ok((0..count)
        .map(|i| match policy {
            SequencePolicy::Cycle | SequencePolicy::Strict => names[i % names.len()],
            SequencePolicy::HoldLast => names.get(i).copied().unwrap_or(last),
        })
        .collect())
}

/// One child of a stagger or sequence with its resolved reveal settings.
#[derive(Clone, Debug, PartialEq)]
pub struct StaggerItem<T> {
    /// Position in the input list.
    pub index: usize,
    /// Caller payload (content, element handle, ...).
    pub child: T,
    /// Reveal settings with the staggered delay applied.
    pub reveal: RevealConfig,
}

/// Ordered children, each wrapped with its own reveal configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct StaggerPlan<T> {
    items: Vec<StaggerItem<T>>,
}

impl<T> StaggerPlan<T> {
    /// Stagger `children` with the same animation: child `i` reveals after
    /// `base.delay + i * step`.
    pub fn stagger(children: Vec<T>, base: RevealConfig, step: Millis) -> Self {
        let delays = stagger_delays(children.len(), base.delay, step);
        let items = children
            .into_iter()
            .zip(delays)
            .enumerate()
            .map(|(index, (child, delay))| StaggerItem {
                index,
                child,
                reveal: base.with_delay(delay),
            })
            .collect();
        Self { items }
    }

    /// Stagger `children` and assign animation names from `names` per `policy`.
    pub fn sequence(
        children: Vec<T>,
        base: RevealConfig,
        step: Millis,
        names: &[AnimationName],
        policy: SequencePolicy,
    ) -> ScrollkitResult<Self> {
        let animations = sequence_animations(children.len(), names, policy)?;
        let mut plan = Self::stagger(children, base, step);
        for (item, animation) in plan.items.iter_mut().zip(animations) {
            item.reveal.animation = animation;
        }
        Ok(plan)
    }

    /// Items in input order.
    pub fn items(&self) -> &[StaggerItem<T>] {
        &self.items
    }

    /// Consume into items.
    pub fn into_items(self) -> Vec<StaggerItem<T>> {
        self.items
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the plan has no children.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/unit/compose/stagger.rs"]
mod tests;
