//! Host-side frame loop: supplies monotonically increasing millisecond
//! timestamps to the starfield and paces frames to a target rate.

use std::time::{Duration, Instant};
use tracing::warn;

/// Frames slower than this are reported.
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(250);

/// Source of frame timestamps in milliseconds.
pub trait Clock {
    /// Current time in milliseconds since the clock started.
    fn now_ms(&mut self) -> f64;
}

/// Wall clock measured from construction.
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that advances by a fixed step on every read. Starts at zero.
pub struct ManualClock {
    now_ms: f64,
    step_ms: f64,
}

impl ManualClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            step_ms,
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> f64 {
        let now = self.now_ms;
        self.now_ms += self.step_ms;
        now
    }
}

/// Frame loop state.
///
/// Call [`tick`](Self::tick) once per frame. Timestamps passed to the frame
/// function never decrease, even if the clock does.
pub struct FrameLoop<C: Clock> {
    clock: C,
    frame_interval: Option<Duration>,
    last_timestamp_ms: f64,
    frame_count: u64,
}

impl<C: Clock> FrameLoop<C> {
    /// Create a loop targeting `target_fps` frames per second (0 = unpaced).
    pub fn new(clock: C, target_fps: u32) -> Self {
        Self {
            clock,
            frame_interval: frame_interval(target_fps),
            last_timestamp_ms: 0.0,
            frame_count: 0,
        }
    }

    /// Change the pacing target (0 = unpaced).
    pub fn set_target_fps(&mut self, target_fps: u32) {
        self.frame_interval = frame_interval(target_fps);
    }

    /// Read the clock and run one frame with its timestamp. Returns the timestamp.
    pub fn tick(&mut self, frame_fn: impl FnOnce(f64)) -> f64 {
        let timestamp_ms = self.clock.now_ms().max(self.last_timestamp_ms);
        self.last_timestamp_ms = timestamp_ms;
        frame_fn(timestamp_ms);
        self.frame_count += 1;
        timestamp_ms
    }

    /// How long to sleep after a frame that took `frame_time` to hit the target rate.
    pub fn pacing_delay(&self, frame_time: Duration) -> Duration {
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds {:.1}ms",
                frame_time.as_secs_f64() * 1000.0,
                MAX_FRAME_TIME.as_secs_f64() * 1000.0
            );
        }
        self.frame_interval
            .map_or(Duration::ZERO, |interval| interval.saturating_sub(frame_time))
    }

    /// Total frames run.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Timestamp of the most recent frame.
    pub fn last_timestamp_ms(&self) -> f64 {
        self.last_timestamp_ms
    }
}

fn frame_interval(target_fps: u32) -> Option<Duration> {
    (target_fps > 0).then(|| Duration::from_nanos(1_000_000_000 / u64::from(target_fps)))
}
