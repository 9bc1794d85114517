use std::time::{Duration, Instant};

/// Monotonic animation clock.
///
/// Paused time is excluded, so a scene driven by `elapsed` freezes while
/// paused and resumes where it stopped.
pub struct MasterClock {
    start: Instant,
    paused: bool,
    pause_time: Option<Instant>,
    total_pause_duration: Duration,
}

impl MasterClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            paused: false,
            pause_time: None,
            total_pause_duration: Duration::ZERO,
        }
    }

    /// Elapsed time since the clock started, excluding paused time.
    pub fn elapsed(&self) -> Duration {
        let now = match self.pause_time {
            Some(pause_time) if self.paused => pause_time,
            _ => Instant::now(),
        };
        now.duration_since(self.start)
            .saturating_sub(self.total_pause_duration)
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.pause_time = Some(Instant::now());
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            if let Some(pause_time) = self.pause_time {
                self.total_pause_duration += Instant::now().duration_since(pause_time);
            }
            self.paused = false;
            self.pause_time = None;
        }
    }

    pub fn toggle(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Default for MasterClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_paused_clock_stands_still() {
        let mut clock = MasterClock::new();
        clock.pause();
        assert!(clock.is_paused());
        let frozen = clock.elapsed();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(clock.elapsed(), frozen);

        clock.toggle();
        assert!(!clock.is_paused());
        thread::sleep(Duration::from_millis(5));
        let resumed = clock.elapsed();
        assert!(resumed >= frozen);
        assert!(resumed < frozen + Duration::from_millis(20));
    }
}
