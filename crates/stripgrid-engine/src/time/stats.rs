use std::time::{Duration, Instant};

/// One reporting interval's worth of frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    pub frames: u32,
    pub elapsed: Duration,
}

impl FrameReport {
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 { f64::from(self.frames) / secs } else { 0.0 }
    }

    /// Mean frame time in milliseconds.
    pub fn mean_ms(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.elapsed.as_secs_f64() * 1000.0 / f64::from(self.frames)
        }
    }
}

/// Counts frames and emits a report once per `interval`.
///
/// Used to compare draw strategies; call [`FrameStats::restart`] on a mode
/// switch so a report never mixes two strategies.
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: Duration,
    started: Option<Instant>,
    frames: u32,
}

impl FrameStats {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            started: None,
            frames: 0,
        }
    }

    pub fn restart(&mut self) {
        self.started = None;
        self.frames = 0;
    }

    /// Records one frame at `now`; returns a report when the interval elapsed.
    pub fn record(&mut self, now: Instant) -> Option<FrameReport> {
        let Some(started) = self.started else {
            self.started = Some(now);
            return None;
        };

        self.frames += 1;
        let elapsed = now.saturating_duration_since(started);
        if elapsed < self.interval {
            return None;
        }

        let report = FrameReport {
            frames: self.frames,
            elapsed,
        };
        self.started = Some(now);
        self.frames = 0;
        Some(report)
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
