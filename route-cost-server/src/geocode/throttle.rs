//! Minimum-interval throttle for outbound calls.
//!
//! The public geocoding service allows at most one request per second.
//! Callers await [`Throttle::wait`] immediately before each network call;
//! the throttle spaces consecutive calls at least `interval` apart.
//! Work that needs no network call simply never waits.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Spaces successive callers at least `interval` apart.
///
/// Waiters are served in FIFO order (tokio's mutex is fair), so concurrent
/// callers queue behind each other rather than all firing after one delay.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl Throttle {
    /// Create a throttle with the given minimum interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// Wait until at least `interval` has passed since the previous caller
    /// was released, then record this call.
    ///
    /// The spacing is measured between request starts, not from the end of
    /// the previous request.
    pub async fn wait(&self) {
        let mut last = self.last.lock().await;

        if let Some(prev) = *last {
            tokio::time::sleep_until(prev + self.interval).await;
        }

        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn first_call_does_not_wait() {
        let throttle = Throttle::new(Duration::from_secs(1));
        let start = Instant::now();

        throttle.wait().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_calls_are_spaced() {
        let throttle = Throttle::new(Duration::from_secs(1));
        let start = Instant::now();

        throttle.wait().await;
        throttle.wait().await;
        throttle.wait().await;

        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_after_interval_already_passed() {
        let throttle = Throttle::new(Duration::from_secs(1));

        throttle.wait().await;
        tokio::time::sleep(Duration::from_secs(5)).await;

        let before = Instant::now();
        throttle.wait().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn spacing_counts_from_previous_start() {
        let throttle = Throttle::new(Duration::from_secs(1));
        let start = Instant::now();

        throttle.wait().await;
        // A slow request occupies part of the interval
        tokio::time::sleep(Duration::from_millis(700)).await;
        throttle.wait().await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_millis(1700));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_queue() {
        let throttle = Arc::new(Throttle::new(Duration::from_secs(1)));
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let throttle = throttle.clone();
                tokio::spawn(async move {
                    throttle.wait().await;
                    Instant::now()
                })
            })
            .collect();

        let mut times = Vec::new();
        for handle in handles {
            times.push(handle.await.unwrap());
        }
        times.sort();

        assert_eq!(times[0], start);
        assert!(times[1] - times[0] >= Duration::from_secs(1));
        assert!(times[2] - times[1] >= Duration::from_secs(1));
    }
}
