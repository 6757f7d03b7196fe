//! Fixed-rate frame clock

use std::time::{Duration, Instant};

use crate::consts::FRAMES_PER_SECOND;

/// Number of frame timestamps kept for the FPS estimate
const FPS_WINDOW: usize = 60;

/// Paces the loop at a fixed rate and measures the achieved frame rate
pub struct FrameClock {
    start: Instant,
    frame_interval: Duration,
    next_frame: Instant,
    /// Ring buffer of recent frame timestamps
    frame_times: [Option<Instant>; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now(), FRAMES_PER_SECOND)
    }

    pub fn starting_at(start: Instant, frames_per_second: u32) -> Self {
        let frame_interval = Duration::from_secs(1) / frames_per_second.max(1);
        Self {
            start,
            frame_interval,
            next_frame: start,
            frame_times: [None; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Milliseconds since the clock started
    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.start).as_millis() as u64
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// When the next frame should run
    pub fn next_frame_at(&self) -> Instant {
        self.next_frame
    }

    pub fn is_frame_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Record that a frame ran at `now` and schedule the next one.
    ///
    /// A late frame pushes the schedule forward instead of queueing
    /// catch-up frames.
    pub fn mark_frame(&mut self, now: Instant) {
        self.next_frame += self.frame_interval;
        if self.next_frame <= now {
            self.next_frame = now + self.frame_interval;
        }

        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest entry is the one about to be overwritten
        if let Some(oldest) = self.frame_times[self.frame_index] {
            let elapsed = now.saturating_duration_since(oldest).as_secs_f64();
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 / elapsed).round() as u32;
            }
        }
    }

    /// Measured frames per second; zero until the window has filled
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_due_immediately() {
        let start = Instant::now();
        let clock = FrameClock::starting_at(start, 60);
        assert!(clock.is_frame_due(start));
        assert_eq!(clock.elapsed_ms(start), 0);
    }

    #[test]
    fn test_frames_paced_at_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, 60);
        clock.mark_frame(start);
        assert!(!clock.is_frame_due(start + Duration::from_millis(10)));
        assert!(clock.is_frame_due(start + Duration::from_millis(17)));
        assert_eq!(clock.next_frame_at(), start + clock.frame_interval());
    }

    #[test]
    fn test_late_frame_does_not_burst() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, 60);
        clock.mark_frame(start);

        let late = start + Duration::from_millis(500);
        clock.mark_frame(late);
        assert_eq!(clock.next_frame_at(), late + clock.frame_interval());
        assert!(!clock.is_frame_due(late));
    }

    #[test]
    fn test_elapsed_ms() {
        let start = Instant::now();
        let clock = FrameClock::starting_at(start, 60);
        assert_eq!(clock.elapsed_ms(start + Duration::from_millis(5_000)), 5_000);
    }

    #[test]
    fn test_fps_measurement() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, 60);
        let interval = clock.frame_interval();
        for i in 0..FPS_WINDOW as u32 - 1 {
            clock.mark_frame(start + interval * i);
        }
        assert_eq!(clock.fps(), 0);

        for i in FPS_WINDOW as u32 - 1..180 {
            clock.mark_frame(start + interval * i);
        }
        assert_eq!(clock.fps(), 60);
    }
}
