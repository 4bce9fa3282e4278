//! Frame clock.
//!
//! Produces the `(elapsed, delta)` pair the field tick needs.
//!
//! ```ignore
//! let mut clock = Clock::new();
//!
//! // once per frame:
//! let (elapsed, delta) = clock.update();
//! ```

use std::time::{Duration, Instant};

/// Tracks elapsed time, frame delta and frame count.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    /// Fixed delta for deterministic stepping.
    fixed_delta: Option<f32>,
    /// Longest delta a single frame may report.
    max_delta: f32,
}

impl Clock {
    /// Create a clock starting now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fixed_delta: None,
            max_delta: 0.25,
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns `(elapsed_time, delta_time)` for convenience.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();

        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        match self.fixed_delta {
            Some(fixed) => {
                self.delta_secs = fixed;
                self.elapsed_secs += fixed;
            }
            None => {
                // Clamped: a stalled window must not jump the rotation.
                self.delta_secs = raw_delta.min(self.max_delta);
                self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
            }
        }

        self.frame_count += 1;
        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Use a fixed delta instead of wall time. `None` restores real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Clamp real frame deltas to at most `max` seconds.
    pub fn set_max_delta(&mut self, max: Duration) {
        self.max_delta = max.as_secs_f32();
    }

    /// Restart from zero.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_frame = now;
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.frame_count = 0;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
