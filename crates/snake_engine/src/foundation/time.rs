//! Time measurement utilities

use std::time::{Duration, Instant};

/// Running stopwatch for measuring how long a unit of work took
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start_time: Instant,
}

impl Stopwatch {
    /// Create a stopwatch that starts counting immediately
    pub fn start_new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Time since the stopwatch was started
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_grows_while_running() {
        let stopwatch = Stopwatch::start_new();
        std::thread::sleep(Duration::from_millis(2));

        let first = stopwatch.elapsed();
        assert!(first >= Duration::from_millis(2));
        std::thread::sleep(Duration::from_millis(1));
        assert!(stopwatch.elapsed() > first);
    }
}
