//! Primality
//!
//! Probable-primality testing and next-prime search over natural numbers.
//!
//! Values up to [`EXACT_LIMIT`] are decided exactly by trial division and are
//! reported as [`Primality::Prime`] or [`Primality::Composite`]. Larger values
//! are screened against small primes and then run through Miller–Rabin rounds;
//! survivors are reported as [`Primality::ProbablyPrime`].
//!
//! Witnesses after the first (always 2) come from a generator with a fixed
//! seed, so a given value and repetition count always yield the same verdict.

use log::trace;
use malachite::base::num::arithmetic::traits::ModPow;
use malachite::Natural;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Values at or below this bound are decided exactly
pub const EXACT_LIMIT: u64 = 1_000_000;

/// Repetitions used by [`next_prime`] when screening candidates
pub const NEXT_PRIME_REPS: u32 = 25;

const WITNESS_SEED: u64 = 0x6d70_7a5f_7072_6d65;

const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Result of a probable-primality test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primality {
    /// Definitely composite (or below 2)
    Composite,
    /// Passed every round; prime with overwhelming probability
    ProbablyPrime,
    /// Proven prime
    Prime,
}

impl Primality {
    /// Integer code: 0 composite, 1 probably prime, 2 definitely prime
    pub fn code(self) -> u32 {
        match self {
            Primality::Composite => 0,
            Primality::ProbablyPrime => 1,
            Primality::Prime => 2,
        }
    }
}

/// Test whether `n` is prime
///
/// # Arguments
///
/// * `n` - Value to test
/// * `reps` - Miller–Rabin rounds for values above [`EXACT_LIMIT`]; at least
///   one round is always run
pub fn probable_prime(n: &Natural, reps: u32) -> Primality {
    if let Ok(small) = u64::try_from(n) {
        if small <= EXACT_LIMIT {
            return if is_prime_u64(small) {
                Primality::Prime
            } else {
                Primality::Composite
            };
        }
    }

    for p in SMALL_PRIMES {
        if n % Natural::from(p) == 0u32 {
            return Primality::Composite;
        }
    }

    if miller_rabin(n, reps.max(1)) {
        Primality::ProbablyPrime
    } else {
        Primality::Composite
    }
}

/// Smallest prime strictly greater than `n`
pub fn next_prime(n: &Natural) -> Natural {
    if *n < 2u32 {
        return Natural::from(2u32);
    }
    let mut candidate = n + Natural::from(1u32);
    if candidate == 2u32 {
        return candidate;
    }
    if &candidate % Natural::from(2u32) == 0u32 {
        candidate += Natural::from(1u32);
    }
    let mut tested = 1u64;
    while probable_prime(&candidate, NEXT_PRIME_REPS) == Primality::Composite {
        candidate += Natural::from(2u32);
        tested += 1;
    }
    trace!("next prime found after {} candidate(s)", tested);
    candidate
}

fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Miller–Rabin over `rounds` witnesses; `n` is odd and above [`EXACT_LIMIT`]
fn miller_rabin(n: &Natural, rounds: u32) -> bool {
    let one = Natural::from(1u32);
    let n_minus_one = n - &one;

    // n - 1 = d * 2^s with d odd
    let mut d = n_minus_one.clone();
    let mut s = 0u64;
    while &d % Natural::from(2u32) == 0u32 {
        d >>= 1u64;
        s += 1;
    }

    let mut witnesses = StdRng::seed_from_u64(WITNESS_SEED);
    let span = n - Natural::from(3u32);
    for round in 0..rounds {
        let witness = if round == 0 {
            Natural::from(2u32)
        } else {
            // Uniform-enough witness in [2, n - 2]
            Natural::from(witnesses.gen::<u64>()) % &span + Natural::from(2u32)
        };

        let mut x = witness.mod_pow(d.clone(), n.clone());
        if x == one || x == n_minus_one {
            continue;
        }
        let mut composite = true;
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                composite = false;
                break;
            }
        }
        if composite {
            return false;
        }
    }
    true
}
