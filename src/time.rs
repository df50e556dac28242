//! Frame timing for the render loop.
//!
//! The attractor advances one fixed step per frame regardless of wall time,
//! so this clock only feeds diagnostics: delta time, frame count, and a
//! periodically refreshed FPS figure for the log.
//!
//! # Example
//!
//! ```
//! use lorenz_trail::time::Time;
//!
//! let mut time = Time::new();
//!
//! // In the redraw handler:
//! if time.update() {
//!     println!("{:.1} fps over {} frames", time.fps(), time.frame());
//! }
//! ```

use std::time::{Duration, Instant};

/// Frame clock with periodic FPS sampling.
#[derive(Debug)]
pub struct Time {
    /// When the clock was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// FPS over the last sampling window.
    fps: f32,
    /// Frame count at last FPS sample.
    fps_frame_count: u64,
    /// Time of last FPS sample.
    fps_update_time: Instant,
    /// Length of the FPS sampling window.
    fps_update_interval: Duration,
}

impl Time {
    /// Create a clock sampling FPS every two seconds.
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(2))
    }

    /// Create a clock sampling FPS every `interval`.
    pub fn with_interval(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: interval,
        }
    }

    /// Record a frame. Call once per redraw.
    ///
    /// Returns `true` when a new FPS sample was taken on this frame.
    pub fn update(&mut self) -> bool {
        let now = Instant::now();

        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            return true;
        }
        false
    }

    /// Seconds since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Seconds between the last two frames.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second over the last sampling window.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.fps(), 0.0);
        assert_eq!(time.delta(), 0.0);
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        time.update();

        assert!(time.elapsed() > 0.0);
        assert!(time.delta() > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_fps_sample_after_interval() {
        let mut time = Time::with_interval(Duration::from_millis(20));
        assert!(!time.update());

        thread::sleep(Duration::from_millis(30));
        assert!(time.update());
        assert!(time.fps() > 0.0);
        assert_eq!(time.frame(), 2);
    }

    #[test]
    fn test_delta_is_last_frame_and_elapsed_is_total() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(30));
        time.update();
        let first = time.delta();
        time.update();

        // The second frame followed the first immediately.
        assert!(time.delta() < first);
        assert!(time.elapsed() >= first + time.delta());
    }
}
