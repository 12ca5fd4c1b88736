//! Random State
//!
//! The generator behind `brand0`. It is created and seeded on the first
//! sample, never reseeded and lives as long as its module. Seeding and every
//! sample are serialized behind a mutex.
//!
//! Without a configured seed, the seed combines a value from the thread-local
//! entropy source, the wall clock in milliseconds and the time elapsed since
//! the process first touched this module.

use std::sync::OnceLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use log::debug;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use entities_bignum::{EngineError, NativeInteger};

static PROCESS_START: OnceLock<Instant> = OnceLock::new();

/// Lazily seeded generator
#[derive(Debug)]
pub struct RandomState {
    seed_override: Option<u64>,
    generator: OnceLock<Mutex<StdRng>>,
}

impl RandomState {
    /// Create an unseeded random state
    ///
    /// # Arguments
    ///
    /// * `seed_override` - Fixed seed to use instead of entropy
    pub fn new(seed_override: Option<u64>) -> Self {
        PROCESS_START.get_or_init(Instant::now);
        Self {
            seed_override,
            generator: OnceLock::new(),
        }
    }

    /// Check whether the generator has been seeded
    pub fn is_initialized(&self) -> bool {
        self.generator.get().is_some()
    }

    /// Draw a uniform sample in `[0, |bound|)`
    ///
    /// Seeds the generator on first use.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DivisionByZero`] when `bound` is zero.
    pub fn sample_below(&self, bound: &NativeInteger) -> Result<NativeInteger, EngineError> {
        let generator = self.generator.get_or_init(|| Mutex::new(self.seeded()));
        let mut rng = generator.lock();
        bound.random_below(&mut *rng)
    }

    fn seeded(&self) -> StdRng {
        let seed = match self.seed_override {
            Some(seed) => {
                debug!("seeding random state from configured seed");
                seed
            }
            None => {
                debug!("seeding random state from entropy and clocks");
                entropy_seed()
            }
        };
        StdRng::seed_from_u64(seed)
    }
}

fn entropy_seed() -> u64 {
    let wall_millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0);
    let uptime_nanos = PROCESS_START
        .get_or_init(Instant::now)
        .elapsed()
        .as_nanos() as u64;
    rand::random::<u64>()
        .wrapping_add(wall_millis)
        .wrapping_add(uptime_nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_lazy_initialization() {
        let state = RandomState::new(None);
        assert!(!state.is_initialized());
        state.sample_below(&NativeInteger::from_u64(10)).unwrap();
        assert!(state.is_initialized());
    }

    #[test]
    fn test_zero_bound() {
        let state = RandomState::new(Some(1));
        assert_eq!(
            state.sample_below(&NativeInteger::zero()),
            Err(EngineError::DivisionByZero)
        );
    }

    #[test]
    fn test_configured_seed_is_reproducible() {
        let a = RandomState::new(Some(99));
        let b = RandomState::new(Some(99));
        let bound = NativeInteger::u64_pow_u64(2, 100).unwrap();
        for _ in 0..5 {
            let x = a.sample_below(&bound).unwrap();
            let y = b.sample_below(&bound).unwrap();
            assert_eq!(x.compare(&y), Ordering::Equal);
        }
    }

    #[test]
    fn test_negative_bound_uses_magnitude() {
        let state = RandomState::new(Some(3));
        let bound = NativeInteger::from_i64(-5);
        for _ in 0..100 {
            let sample = state.sample_below(&bound).unwrap();
            assert!(!sample.is_negative());
            assert_eq!(sample.compare_u64(5), Ordering::Less);
        }
    }

    #[test]
    fn test_concurrent_samples() {
        let state = std::sync::Arc::new(RandomState::new(None));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let state = std::sync::Arc::clone(&state);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        let sample = state.sample_below(&NativeInteger::from_u64(100)).unwrap();
                        assert_eq!(sample.compare_u64(100), Ordering::Less);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(state.is_initialized());
    }
}
