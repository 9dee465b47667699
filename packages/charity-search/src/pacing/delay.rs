use rand::Rng;
use std::time::Duration;

use crate::error::{Result, SearchError};

/// Default ceiling for the pause between registry calls.
pub const DEFAULT_DELAY_MAX_MS: u64 = 2000;

/// Validated upper bound for a random delay, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayBound(u64);

impl DelayBound {
    /// Bound from an integer number of milliseconds. Negative is invalid.
    pub fn new(max_ms: i64) -> Result<Self> {
        u64::try_from(max_ms)
            .map(Self)
            .map_err(|_| SearchError::invalid(format!("delay bound must be non-negative, got {max_ms}")))
    }

    /// Bound from a possibly fractional number. Only whole, non-negative,
    /// finite values are accepted.
    pub fn from_f64(max_ms: f64) -> Result<Self> {
        if !max_ms.is_finite() || max_ms.fract() != 0.0 {
            return Err(SearchError::invalid(format!(
                "delay bound must be an integer, got {max_ms}"
            )));
        }
        if max_ms < 0.0 || max_ms > u64::MAX as f64 {
            return Err(SearchError::invalid(format!(
                "delay bound must be non-negative, got {max_ms}"
            )));
        }
        Ok(Self(max_ms as u64))
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Uniformly pick a delay in `[0, bound]` milliseconds.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        rng.gen_range(0..=self.0)
    }

    pub fn choose_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(self.choose(rng))
    }
}

impl Default for DelayBound {
    fn default() -> Self {
        Self(DEFAULT_DELAY_MAX_MS)
    }
}

impl TryFrom<i64> for DelayBound {
    type Error = SearchError;

    fn try_from(max_ms: i64) -> Result<Self> {
        Self::new(max_ms)
    }
}

/// Pick a delay in `[0, bound]` milliseconds.
///
/// Fails with `InvalidArgument` for a negative bound.
pub fn choose<R: Rng + ?Sized>(bound: i64, rng: &mut R) -> Result<u64> {
    Ok(DelayBound::new(bound)?.choose(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_choose_is_at_most_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(choose(20, &mut rng).unwrap() <= 20);
        }
    }

    #[test]
    fn test_zero_bound_always_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose(0, &mut rng).unwrap(), 0);
    }

    #[test]
    fn test_negative_bound_is_invalid() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = choose(-1, &mut rng).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(DelayBound::from_f64(1500.0).unwrap().as_millis(), 1500);
        assert!(DelayBound::from_f64(1.5).unwrap_err().is_invalid_argument());
        assert!(DelayBound::from_f64(-3.0).unwrap_err().is_invalid_argument());
        assert!(DelayBound::from_f64(f64::NAN).unwrap_err().is_invalid_argument());
        assert!(DelayBound::from_f64(f64::INFINITY).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_choose_reaches_both_ends() {
        let mut rng = StdRng::seed_from_u64(42);
        let bound = DelayBound::new(2).unwrap();
        let picks: Vec<u64> = (0..500).map(|_| bound.choose(&mut rng)).collect();
        assert!(picks.contains(&0));
        assert!(picks.contains(&2));
    }

    proptest! {
        #[test]
        fn prop_choose_within_bound(bound in 0i64..100_000, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = choose(bound, &mut rng).unwrap();
            prop_assert!(picked <= bound as u64);
        }

        #[test]
        fn prop_negative_bound_rejected(bound in i64::MIN..0, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            prop_assert!(choose(bound, &mut rng).is_err());
        }
    }
}
