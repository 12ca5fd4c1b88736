//! Uniform Sampling
//!
//! Draws natural numbers uniformly below a bound. Candidates are built from
//! random 64-bit words trimmed to the bit length of the bound and rejected
//! until one falls below it, so fewer than two draws are needed on average.

use malachite::base::num::logic::traits::SignificantBits;
use malachite::Natural;
use rand::RngCore;

/// Draw a natural number uniformly from `[0, bound)`
///
/// # Arguments
///
/// * `rng` - Generator to draw words from
/// * `bound` - Exclusive upper bound
///
/// # Returns
///
/// * `Some(Natural)` - Sample below `bound`
/// * `None` - `bound` is zero
pub fn uniform_below<R: RngCore + ?Sized>(rng: &mut R, bound: &Natural) -> Option<Natural> {
    if *bound == 0u32 {
        return None;
    }
    let bits = bound.significant_bits();
    let words = bits.div_ceil(64);
    let excess = words * 64 - bits;

    loop {
        let mut candidate = Natural::from(0u32);
        for _ in 0..words {
            candidate <<= 64u64;
            candidate += Natural::from(rng.next_u64());
        }
        candidate >>= excess;
        if candidate < *bound {
            return Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_bound() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(uniform_below(&mut rng, &Natural::from(0u32)), None);
    }

    #[test]
    fn test_bound_one_yields_zero() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..16 {
            assert_eq!(uniform_below(&mut rng, &Natural::from(1u32)), Some(Natural::from(0u32)));
        }
    }

    #[test]
    fn test_samples_stay_below_bound() {
        let mut rng = StdRng::seed_from_u64(3);
        let bound = Natural::from(100u32);
        let mut seen_high = false;
        for _ in 0..2_000 {
            let sample = uniform_below(&mut rng, &bound).unwrap();
            assert!(sample < bound);
            if sample >= 90u32 {
                seen_high = true;
            }
        }
        assert!(seen_high);
    }

    #[test]
    fn test_multi_word_bound() {
        let mut rng = StdRng::seed_from_u64(4);
        let bound = Natural::from(u64::MAX) * Natural::from(u64::MAX);
        for _ in 0..100 {
            assert!(uniform_below(&mut rng, &bound).unwrap() < bound);
        }
    }

    #[test]
    fn test_same_seed_same_samples() {
        let bound = Natural::from(1_000_000u32);
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        for _ in 0..10 {
            assert_eq!(uniform_below(&mut a, &bound), uniform_below(&mut b, &bound));
        }
    }
}
