use std::time::{Duration, Instant};

use crate::curve::CurveKind;
use crate::foundation::error::{PitchError, PitchResult};

/// Display ticks arriving this much early still count as due.
const FRAME_SLACK: Duration = Duration::from_millis(1);

/// Why the scene needs to be presented again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirtyReason {
    CurveColor,
    Segments(CurveKind),
    Viewport,
    Resize,
    SingerPresence,
}

/// Caps how often display ticks are honored.
#[derive(Clone, Debug)]
pub struct FrameClock {
    min_interval: Duration,
    last_frame: Option<Instant>,
    running: bool,
}

impl FrameClock {
    pub fn new(max_fps: u32) -> PitchResult<Self> {
        if max_fps == 0 {
            return Err(PitchError::validation("max_fps must be > 0"));
        }
        Ok(Self {
            min_interval: Duration::from_secs_f64(1.0 / f64::from(max_fps)),
            last_frame: None,
            running: true,
        })
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Returns `true` and records `now` if a frame is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        if let Some(last) = self.last_frame
            && now.saturating_duration_since(last) + FRAME_SLACK < self.min_interval
        {
            return false;
        }
        self.last_frame = Some(now);
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Outcome of [`RenderScheduler::begin_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameDecision {
    /// Rate cap not elapsed, or the clock is stopped.
    NotDue,
    /// Due, but nothing changed since the last presentation.
    Clean,
    /// Due and dirty: update geometry, present, then call [`RenderScheduler::finish_frame`].
    Present,
}

/// Two-state (clean/dirty) presentation gate on top of a [`FrameClock`].
#[derive(Clone, Debug)]
pub struct RenderScheduler {
    clock: FrameClock,
    reasons: Vec<DirtyReason>,
    presented: u64,
}

impl RenderScheduler {
    pub fn new(max_fps: u32) -> PitchResult<Self> {
        Ok(Self {
            clock: FrameClock::new(max_fps)?,
            reasons: Vec::new(),
            presented: 0,
        })
    }

    pub fn mark_dirty(&mut self, reason: DirtyReason) {
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.reasons.is_empty()
    }

    /// Reasons accumulated since the last presentation.
    pub fn dirty_reasons(&self) -> &[DirtyReason] {
        &self.reasons
    }

    pub fn begin_frame(&mut self, now: Instant) -> FrameDecision {
        if !self.clock.poll(now) {
            FrameDecision::NotDue
        } else if self.is_dirty() {
            FrameDecision::Present
        } else {
            FrameDecision::Clean
        }
    }

    /// Transition back to clean after a successful presentation.
    pub fn finish_frame(&mut self) {
        tracing::trace!(reasons = ?self.reasons, "frame presented");
        self.reasons.clear();
        self.presented += 1;
    }

    pub fn presented_frames(&self) -> u64 {
        self.presented
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
