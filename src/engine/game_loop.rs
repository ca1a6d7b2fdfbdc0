/// Frame clock for the redraw loop
///
/// Hands out monotonic timestamps (time since the clock started) that the
/// character uses for its frame timer, and keeps a rolling FPS estimate.
use std::time::{Duration, Instant};

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// How often the FPS estimate is logged, in frames
const FPS_LOG_INTERVAL: u64 = 600;

/// Frame timing state
pub struct FrameClock {
    /// Time when the clock started
    start_time: Instant,

    /// Time of last frame
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame_time: now,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns its timestamp
    pub fn begin_frame(&mut self) -> Duration {
        let now = Instant::now();
        self.record_frame(now.duration_since(self.last_frame_time));
        self.last_frame_time = now;
        now.duration_since(self.start_time)
    }

    /// Time since the clock started, for input callbacks between frames
    pub fn now(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    fn record_frame(&mut self, frame_time: Duration) {
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }
        if self.frame_count % FPS_LOG_INTERVAL == 0 {
            log::debug!("{:.1} fps over the last {} frames", self.current_fps, self.frame_times.len());
        }
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
