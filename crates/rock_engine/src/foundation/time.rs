//! Time management utilities

use std::time::Instant;

/// Wall-clock frame timer with an upper bound on the reported step
///
/// Slow frames are clamped to `max_delta` so a hitch never produces an
/// integration step large enough to tunnel through colliders.
pub struct FrameClock {
    last_frame: Instant,
    delta_time: f32,
    max_delta: f32,
    total_time: f64,
    frame_count: u64,
}

impl FrameClock {
    /// Default cap on a single step: one thirtieth of a second
    pub const DEFAULT_MAX_DELTA: f32 = 1.0 / 30.0;

    /// Create a new clock capped at `max_delta` seconds per frame
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            max_delta,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Sample the wall clock; call exactly once per loop iteration
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(elapsed)
    }

    /// Feed an externally measured step through the same clamp
    pub fn advance(&mut self, elapsed: f32) -> f32 {
        self.delta_time = elapsed.clamp(0.0, self.max_delta);
        self.total_time += f64::from(self.delta_time);
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds (already capped)
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Upper bound applied to every step
    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Get the total simulated time since clock creation
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DELTA)
    }
}
