use std::time::{Duration, Instant};

/// Frame pacer for the render loop.
///
/// Sleeps off whatever is left of the frame budget after drawing. When the
/// loop falls more than three frames behind the schedule is reset instead of
/// bursting to catch up.
pub struct VSync {
    target_fps: f64,
    frame_duration: Duration,
    next_frame_time: Instant,
    frames_rendered: u64,
    frames_late: u64,
}

impl VSync {
    /// A zero `fps` is treated as 1.
    pub fn new(fps: u32) -> Self {
        let target_fps = fps.max(1) as f64;
        let frame_duration = Duration::from_secs_f64(1.0 / target_fps);
        Self {
            target_fps,
            frame_duration,
            next_frame_time: Instant::now() + frame_duration,
            frames_rendered: 0,
            frames_late: 0,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub fn wait_for_next_frame(&mut self) {
        let now = Instant::now();
        self.frames_rendered += 1;

        if now > self.next_frame_time + self.frame_duration * 3 {
            self.next_frame_time = now + self.frame_duration;
            self.frames_late += 1;
            return;
        }

        if now < self.next_frame_time {
            std::thread::sleep(self.next_frame_time - now);
        }

        self.next_frame_time += self.frame_duration;
    }

    pub fn stats(&self) -> VSyncStats {
        VSyncStats {
            frames_rendered: self.frames_rendered,
            frames_late: self.frames_late,
            target_fps: self.target_fps,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VSyncStats {
    pub frames_rendered: u64,
    pub frames_late: u64,
    pub target_fps: f64,
}

impl VSyncStats {
    pub fn effective_fps(&self, elapsed: Duration) -> f64 {
        if elapsed.as_secs_f64() > 0.0 {
            self.frames_rendered as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}
