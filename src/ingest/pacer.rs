// src/ingest/pacer.rs
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Shared minimum spacing between request starts against one upstream host.
///
/// Waiters queue on the mutex, so N concurrent callers are released one
/// `min_spacing` apart regardless of how many workers are running.
#[derive(Debug)]
pub struct Pacer {
    min_spacing: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(min_spacing: Duration) -> Self {
        Self {
            min_spacing,
            next_slot: Mutex::new(None),
        }
    }

    pub fn min_spacing(&self) -> Duration {
        self.min_spacing
    }

    /// Block until the caller may issue its request.
    pub async fn wait(&self) {
        if self.min_spacing.is_zero() {
            return;
        }
        let mut slot = self.next_slot.lock().await;
        if let Some(at) = *slot {
            if at > Instant::now() {
                tokio::time::sleep_until(at).await;
            }
        }
        *slot = Some(Instant::now() + self.min_spacing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn first_call_is_immediate_then_spaced() {
        let pacer = Pacer::new(Duration::from_millis(500));
        let t0 = Instant::now();
        pacer.wait().await;
        assert_eq!(t0.elapsed(), Duration::ZERO);

        pacer.wait().await;
        assert!(t0.elapsed() >= Duration::from_millis(500));

        pacer.wait().await;
        assert!(t0.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_waiters_are_serialized() {
        let pacer = Arc::new(Pacer::new(Duration::from_millis(200)));
        let t0 = Instant::now();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let p = pacer.clone();
            handles.push(tokio::spawn(async move {
                p.wait().await;
                Instant::now()
            }));
        }
        let mut starts = Vec::new();
        for h in handles {
            starts.push(h.await.unwrap());
        }
        starts.sort();

        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(200));
        }
        assert!(starts[3] - t0 >= Duration::from_millis(600));
    }

    #[tokio::test]
    async fn zero_spacing_never_sleeps() {
        let pacer = Pacer::new(Duration::ZERO);
        let t0 = std::time::Instant::now();
        for _ in 0..10 {
            pacer.wait().await;
        }
        assert!(t0.elapsed() < Duration::from_millis(100));
    }
}
