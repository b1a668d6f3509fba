//! Progress throttling.
//!
//! Coalesces bursts of progress samples so the display is redrawn at most
//! once per window, always with the latest sample.

use std::time::Duration;

use tokio::time::Instant;

/// Trailing-edge coalescer for progress values.
///
/// The first value offered opens a window. Values offered while the window is
/// open replace each other. When the window closes the latest value is
/// released and the next offer opens a fresh window.
#[derive(Debug)]
pub struct ProgressThrottle<T> {
    window: Duration,
    window_end: Option<Instant>,
    pending: Option<T>,
}

impl<T> ProgressThrottle<T> {
    /// Create a new throttle with the given window length.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            window_end: None,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Offer a value observed at `now`. Replaces any value still waiting.
    pub fn offer(&mut self, value: T, now: Instant) {
        if self.window_end.is_none() {
            self.window_end = Some(now + self.window);
        }
        self.pending = Some(value);
    }

    /// When the waiting value becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().and(self.window_end)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the waiting value if its window has closed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.window_end {
            Some(end) if now >= end => {
                self.window_end = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Drop the waiting value and close the window.
    pub fn discard(&mut self) {
        self.window_end = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(1000);

    #[test]
    fn test_nothing_due_before_window_closes() {
        let start = Instant::now();
        let mut throttle = ProgressThrottle::new(WINDOW);

        throttle.offer(1, start);
        assert_eq!(throttle.deadline(), Some(start + WINDOW));
        assert_eq!(throttle.take_due(start + Duration::from_millis(999)), None);
        assert!(throttle.has_pending());
    }

    #[test]
    fn test_burst_releases_latest_value_once() {
        let start = Instant::now();
        let mut throttle = ProgressThrottle::new(WINDOW);

        for (i, offset) in [0u64, 100, 250, 400, 900].iter().enumerate() {
            throttle.offer(i, start + Duration::from_millis(*offset));
        }

        assert_eq!(throttle.take_due(start + WINDOW), Some(4));
        assert_eq!(throttle.take_due(start + WINDOW * 2), None);
        assert_eq!(throttle.deadline(), None);
    }

    #[test]
    fn test_next_offer_opens_new_window() {
        let start = Instant::now();
        let mut throttle = ProgressThrottle::new(WINDOW);

        throttle.offer("a", start);
        assert_eq!(throttle.take_due(start + WINDOW), Some("a"));

        let later = start + Duration::from_millis(1500);
        throttle.offer("b", later);
        assert_eq!(throttle.deadline(), Some(later + WINDOW));
        assert_eq!(throttle.take_due(start + WINDOW * 2), None);
        assert_eq!(throttle.take_due(later + WINDOW), Some("b"));
    }

    #[test]
    fn test_discard() {
        let start = Instant::now();
        let mut throttle = ProgressThrottle::new(WINDOW);

        throttle.offer(7, start);
        throttle.discard();
        assert!(!throttle.has_pending());
        assert_eq!(throttle.take_due(start + WINDOW), None);
    }
}
