use std::time::{Duration, Instant};

/// Frame-rate sampler.
///
/// Counts ticks and, once per sampling window, reports `ticks / elapsed_secs`.
/// A single clock drives both counting and reporting.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    window: Duration,
    window_start: Option<Instant>,
    frames: u32,
    last_sample: Option<f32>,
}

impl FpsMeter {
    /// Meter reporting once per second.
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    pub fn with_window(window: Duration) -> Self {
        Self { window, window_start: None, frames: 0, last_sample: None }
    }

    /// Starts (or restarts) sampling at `now`.
    pub fn start(&mut self, now: Instant) {
        self.window_start = Some(now);
        self.frames = 0;
    }

    /// Stops sampling. Calling this on a stopped meter does nothing.
    pub fn stop(&mut self) {
        self.window_start = None;
        self.frames = 0;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.window_start.is_some()
    }

    /// Most recent completed sample, if any.
    #[inline]
    pub fn last_sample(&self) -> Option<f32> {
        self.last_sample
    }

    /// Counts one frame at `now`.
    ///
    /// Returns a fresh sample when the window has elapsed, then starts the next
    /// window at `now`. Returns `None` while stopped.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let start = self.window_start?;
        self.frames += 1;

        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.window {
            return None;
        }

        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.last_sample = Some(fps);
        self.window_start = Some(now);
        self.frames = 0;
        Some(fps)
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}
