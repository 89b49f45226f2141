/// `requestAnimationFrame` coalescing.
///
/// Scroll and resize handlers call [`FrameScheduler::request`] any number of times; the host's
/// next frame consumes at most one pending callback via [`FrameScheduler::take`]. Layout reads
/// and transform math never run inside the event handler itself.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
    requests: u64,
    frames: u64,
}

impl FrameScheduler {
    /// Create an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for work on the next frame. Returns `true` if this request opened a new frame.
    pub fn request(&mut self) -> bool {
        self.requests += 1;
        let fresh = !self.pending;
        self.pending = true;
        fresh
    }

    /// Consume the pending frame, if any.
    pub fn take(&mut self) -> bool {
        let was = std::mem::take(&mut self.pending);
        if was {
            self.frames += 1;
        }
        was
    }

    /// Whether a frame is waiting to run.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Drop a pending frame without running it.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    /// `(requests, frames actually run)` since creation.
    pub fn counters(&self) -> (u64, u64) {
        (self.requests, self.frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/frame.rs"]
mod tests;
