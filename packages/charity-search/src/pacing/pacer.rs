use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

use super::delay::DelayBound;

/// Pause taken between two consecutive registry calls of a batch.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait before the next call. Returns how long was waited.
    async fn pause(&self) -> Duration;
}

/// Sleeps for a uniformly random delay in `[0, bound]` milliseconds.
pub struct RandomPacer {
    bound: DelayBound,
    rng: Mutex<StdRng>,
}

impl RandomPacer {
    pub fn new(bound: DelayBound) -> Self {
        Self::with_rng(bound, StdRng::from_entropy())
    }

    /// Use a specific RNG (seeded in tests).
    pub fn with_rng(bound: DelayBound, rng: StdRng) -> Self {
        Self {
            bound,
            rng: Mutex::new(rng),
        }
    }

    pub fn bound(&self) -> DelayBound {
        self.bound
    }

    fn next_delay(&self) -> Duration {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.bound.choose_duration(&mut *rng)
    }
}

#[async_trait]
impl Pacer for RandomPacer {
    async fn pause(&self) -> Duration {
        let delay = self.next_delay();
        debug!(delay_ms = delay.as_millis() as u64, "Pausing before next registry call");
        tokio::time::sleep(delay).await;
        delay
    }
}

/// Never waits. For callers that pace elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_random_pacer_sleeps_for_chosen_delay() {
        let pacer = RandomPacer::with_rng(DelayBound::new(500).unwrap(), StdRng::seed_from_u64(3));

        let start = tokio::time::Instant::now();
        let waited = pacer.pause().await;

        assert!(waited <= Duration::from_millis(500));
        assert!(start.elapsed() >= waited);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_bound_does_not_wait() {
        let pacer = RandomPacer::new(DelayBound::new(0).unwrap());
        assert_eq!(pacer.pause().await, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_no_pacing() {
        assert_eq!(NoPacing.pause().await, Duration::ZERO);
    }
}
