use std::sync::Arc;
use std::time::Duration;

use crate::playback::clock::Clock;
use crate::render::frame::FrameRGBA;

/// Handle to the driver's single scheduled tick.
///
/// A handle stays valid until the driver re-arms, cancels or rebinds. After that every tick
/// carrying it is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerHandle {
    generation: u64,
    due: Duration,
}

impl TimerHandle {
    /// Deadline at which this tick should fire.
    pub fn due(&self) -> Duration {
        self.due
    }
}

/// Cycles the displayed frame index over a frame set at a fixed interval.
///
/// At most one timer is live at a time. Arming always cancels the previous timer first, so ticks
/// from an earlier arm or from a replaced frame set cannot advance the index.
#[derive(Debug)]
pub struct PlaybackDriver {
    frames: Arc<[FrameRGBA]>,
    index: usize,
    interval: Duration,
    timer: Option<TimerHandle>,
    next_generation: u64,
}

impl PlaybackDriver {
    /// Create an unarmed driver showing frame 0 of `frames`.
    pub fn new(frames: Arc<[FrameRGBA]>, interval: Duration) -> Self {
        Self {
            frames,
            index: 0,
            interval,
            timer: None,
            next_generation: 0,
        }
    }

    /// Tick interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Index of the displayed frame.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Displayed frame, from the currently bound set.
    pub fn current_frame(&self) -> Option<&FrameRGBA> {
        self.frames.get(self.index)
    }

    /// Currently bound frame set.
    pub fn frames(&self) -> &Arc<[FrameRGBA]> {
        &self.frames
    }

    /// The live timer, if armed.
    pub fn active_timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Whether a timer is live.
    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Cancel any live timer, then schedule the first tick one interval after `now`.
    pub fn arm(&mut self, now: Duration) -> TimerHandle {
        self.cancel();
        let handle = TimerHandle {
            generation: self.next_generation,
            due: now + self.interval,
        };
        self.next_generation += 1;
        self.timer = Some(handle);
        handle
    }

    /// Invalidate the live timer. Returns the cancelled handle, if there was one.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.timer.take()
    }

    /// Fire `handle`: advance by one frame and schedule the next tick.
    ///
    /// Returns `false` and does nothing when `handle` is not the live timer.
    pub fn tick(&mut self, handle: TimerHandle) -> bool {
        if self.timer != Some(handle) {
            tracing::trace!(generation = handle.generation, "ignoring stale playback tick");
            return false;
        }
        if !self.frames.is_empty() {
            self.index = (self.index + 1) % self.frames.len();
        }
        self.timer = Some(TimerHandle {
            generation: handle.generation,
            due: handle.due + self.interval,
        });
        true
    }

    /// Fire every tick due at or before `now`, in order. Returns how many fired.
    pub fn poll(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.timer {
            if timer.due > now {
                break;
            }
            self.tick(timer);
            fired += 1;
        }
        fired
    }

    /// Swap in a new frame set, reset to frame 0 and re-arm from `now`.
    ///
    /// Handles issued before the rebind become stale.
    pub fn rebind(&mut self, frames: Arc<[FrameRGBA]>, now: Duration) -> TimerHandle {
        self.cancel();
        self.frames = frames;
        self.index = 0;
        self.arm(now)
    }

    /// Play `ticks` steps against `clock`, calling `on_frame` for the initial frame and after
    /// every tick.
    ///
    /// Arms the driver if it is idle. Each step sleeps until the live timer's deadline, so a late
    /// wake-up still advances exactly one frame per step.
    pub fn play(
        &mut self,
        clock: &dyn Clock,
        ticks: u64,
        mut on_frame: impl FnMut(usize, &FrameRGBA),
    ) {
        if !self.is_armed() {
            self.arm(clock.now());
        }
        if let Some(frame) = self.current_frame() {
            on_frame(self.index, frame);
        }
        for _ in 0..ticks {
            let Some(timer) = self.timer else {
                break;
            };
            clock.sleep_until(timer.due);
            self.tick(timer);
            if let Some(frame) = self.current_frame() {
                on_frame(self.index, frame);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/driver.rs"]
mod tests;
