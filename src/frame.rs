use std::time::Instant;

/// Per-tick timing handed to scene hooks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the first frame
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Endless source of frame timings: `for frame in frames { ... }`
#[derive(Debug)]
pub struct FrameIterator {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
}

impl FrameIterator {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Stamp the next frame
    pub fn advance(&mut self) -> FrameInfo {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let time = now.duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = now;

        info
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        Some(self.advance())
    }
}

/// Counts frames and reports the rate once per interval
#[derive(Debug, Clone)]
pub struct FpsMeter {
    interval: f32,
    frames: u32,
    window_start: f32,
}

impl FpsMeter {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            frames: 0,
            window_start: 0.0,
        }
    }

    /// Record a frame; returns the rate when an interval has elapsed
    pub fn record(&mut self, frame: &FrameInfo) -> Option<f32> {
        self.frames += 1;
        let span = frame.time - self.window_start;
        if span < self.interval {
            return None;
        }
        let fps = self.frames as f32 / span;
        self.frames = 0;
        self.window_start = frame.time;
        Some(fps)
    }
}
