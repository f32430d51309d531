//! Platform-agnostic time utilities
//!
//! Elapsed seconds since start, plus a rolling frame-rate counter used by the
//! preview overlay and the headless CLI.

use std::collections::VecDeque;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Frames per second over the last `window` ticks
pub struct FpsCounter {
    stamps: VecDeque<f64>,
    window: usize,
}

impl FpsCounter {
    pub fn new(window: usize) -> Self {
        Self {
            stamps: VecDeque::with_capacity(window + 1),
            window: window.max(2),
        }
    }

    pub fn tick(&mut self) {
        self.record(now_seconds());
    }

    /// Record a frame at an explicit time in seconds
    pub fn record(&mut self, seconds: f64) {
        self.stamps.push_back(seconds);
        if self.stamps.len() > self.window {
            self.stamps.pop_front();
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.stamps.front(), self.stamps.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.stamps.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.stamps.len() as f64 - 1.0) / elapsed
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_from_even_spacing() {
        let mut counter = FpsCounter::new(60);
        for i in 0..120 {
            counter.record(i as f64 / 60.0);
        }
        assert!((counter.fps() - 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_fps_needs_two_samples() {
        let mut counter = FpsCounter::default();
        assert_eq!(counter.fps(), 0.0);
        counter.record(1.0);
        assert_eq!(counter.fps(), 0.0);
        counter.record(1.0);
        assert_eq!(counter.fps(), 0.0);
    }
}
