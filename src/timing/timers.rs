use std::collections::BTreeMap;

use crate::foundation::core::{ElementId, Millis};

/// Handle to one scheduled timer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimerId(pub u64);

#[derive(Clone, Copy, Debug)]
struct Pending {
    deadline: Millis,
    owner: ElementId,
}

/// Single-threaded `setTimeout` model.
///
/// Every timer belongs to an element so unmounting can clear all of its timers at once.
/// Firing order is `(deadline, id)`, so timers with equal deadlines fire in scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: BTreeMap<TimerId, Pending>,
}

impl TimerQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer due at `now + delay`.
    pub fn schedule(&mut self, now: Millis, delay: Millis, owner: ElementId) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let deadline = now.saturating_add(delay);
        self.pending.insert(id, Pending { deadline, owner });
        tracing::trace!(timer = id.0, element = owner.0, deadline = deadline.0, "timer scheduled");
        id
    }

    /// Cancel one timer. Returns `false` if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    /// Cancel every timer owned by `owner`, returning how many were cleared.
    pub fn cancel_owner(&mut self, owner: ElementId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, p| p.owner != owner);
        before - self.pending.len()
    }

    /// Remove and return all timers due at or before `now`, in firing order.
    pub fn due(&mut self, now: Millis) -> Vec<(TimerId, ElementId)> {
        let mut fired: Vec<(Millis, TimerId, ElementId)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(id, p)| (p.deadline, *id, p.owner))
            .collect();
        fired.sort_by_key(|(deadline, id, _)| (*deadline, *id));
        for (_, id, _) in &fired {
            self.pending.remove(id);
        }
        fired.into_iter().map(|(_, id, owner)| (id, owner)).collect()
    }

    /// Number of timers not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Number of pending timers owned by `owner`.
    pub fn pending_for(&self, owner: ElementId) -> usize {
        self.pending.values().filter(|p| p.owner == owner).count()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.values().map(|p| p.deadline).min()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/timers.rs"]
mod tests;
