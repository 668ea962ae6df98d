//! Walk-cycle animation for sprite-sheet characters.
//!
//! A walk cycle is a fixed number of equally long frames laid out in one
//! sprite-sheet row. Timing uses integer microseconds (`u64`) so that replaying
//! the same sequence of deltas always lands on the same frame, with no
//! floating-point drift between platforms.

pub const DEFAULT_FRAME_COUNT: usize = 8;
pub const DEFAULT_FRAME_PERIOD_US: u64 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkCycle {
    pub frame_index: usize,
    pub frame_count: usize,
    pub frame_period_us: u64,
    elapsed_us: u64,
}

impl WalkCycle {
    pub fn new(frame_count: usize, frame_period_us: u64) -> Self {
        Self {
            frame_index: 0,
            frame_count: frame_count.max(1),
            frame_period_us: frame_period_us.max(1),
            elapsed_us: 0,
        }
    }

    /// Advance by `dt_us`. While moving, the accumulator grows until it reaches
    /// one frame period, then the frame steps forward (wrapping) and the
    /// accumulator resets. When not moving the cycle snaps back to frame 0.
    pub fn tick(&mut self, dt_us: u64, moving: bool) -> usize {
        if moving {
            self.elapsed_us = self.elapsed_us.saturating_add(dt_us);
            if self.elapsed_us >= self.frame_period_us {
                self.frame_index = (self.frame_index + 1) % self.frame_count;
                self.elapsed_us = 0;
            }
        } else {
            self.frame_index = 0;
            self.elapsed_us = 0;
        }
        self.clamp();
        self.frame_index
    }

    /// Overwrite the frame from an external source (e.g. a server snapshot).
    pub fn set_frame(&mut self, frame_index: usize) {
        self.frame_index = frame_index;
        self.clamp();
    }

    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    fn clamp(&mut self) {
        self.frame_index = self.frame_index.min(self.frame_count - 1);
    }
}

impl Default for WalkCycle {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_COUNT, DEFAULT_FRAME_PERIOD_US)
    }
}

/// Convert a delta in seconds to whole microseconds, treating negative or
/// non-finite input as zero.
pub fn seconds_to_us(dt: f64) -> u64 {
    if dt.is_finite() && dt > 0.0 {
        (dt * 1_000_000.0).round() as u64
    } else {
        0
    }
}
