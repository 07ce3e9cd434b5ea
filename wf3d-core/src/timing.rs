use std::time::{Duration, Instant};

/// Fixed-rate frame deadlines.
///
/// Deadlines advance by whole intervals from the previous deadline rather
/// than from the end of the last frame, so slow frames do not push the
/// cadence back. After a stall longer than one interval the timer
/// resynchronizes to the current time instead of firing a burst of ticks.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    deadline: Option<Instant>,
    window_start: Instant,
    window_frames: u32,
    fps: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            deadline: None,
            window_start: Instant::now(),
            window_frames: 0,
            fps: 0.0,
        }
    }

    /// Returns the instant at which the next frame is due
    pub fn next_deadline(&mut self, interval: Duration) -> Instant {
        self.next_deadline_at(Instant::now(), interval)
    }

    pub fn next_deadline_at(&mut self, now: Instant, interval: Duration) -> Instant {
        let deadline = match self.deadline {
            Some(previous) if now.saturating_duration_since(previous) < interval => {
                previous + interval
            }
            _ => now + interval,
        };
        self.deadline = Some(deadline);
        self.count_frame(now);
        deadline
    }

    fn count_frame(&mut self, now: Instant) {
        self.window_frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.window_frames as f32 / elapsed.as_secs_f32();
            self.window_frames = 0;
            self.window_start = now;
        }
    }

    /// Frames per second measured over the last full second
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
