//! Configuration
//!
//! Settings of a BigInt module. The defaults match the classic binding:
//! radix 10 and a random state seeded from entropy on first use.
//!
//! ## Environment
//!
//! - `BIGINT_RANDOM_SEED` - decimal `u64` seed for the random state, making
//!   `brand0` reproducible

use log::warn;

use entities_bignum::radix::is_valid_radix;

use crate::error::BigIntError;

/// Environment variable holding a fixed random seed
pub const RANDOM_SEED_ENV: &str = "BIGINT_RANDOM_SEED";

/// Radix used when none is given
pub const DEFAULT_RADIX: u32 = 10;

/// Settings of a BigInt module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigIntConfig {
    /// Fixed seed for the random state; `None` seeds from entropy
    pub random_seed: Option<u64>,
    /// Radix for string construction and `toString` without a base
    pub default_radix: u32,
}

impl Default for BigIntConfig {
    fn default() -> Self {
        Self {
            random_seed: None,
            default_radix: DEFAULT_RADIX,
        }
    }
}

impl BigIntConfig {
    /// Build a configuration from the process environment
    ///
    /// An unparsable seed is logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(RANDOM_SEED_ENV) {
            config.random_seed = parse_seed(&raw);
        }
        config
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Set the default radix
    ///
    /// # Errors
    ///
    /// Returns [`BigIntError::Range`] when `radix` is outside 2..=62.
    pub fn with_default_radix(mut self, radix: u32) -> Result<Self, BigIntError> {
        if !is_valid_radix(radix) {
            return Err(BigIntError::Range(format!(
                "Base should be between 2 and 62, inclusive (got {})",
                radix
            )));
        }
        self.default_radix = radix;
        Ok(self)
    }
}

fn parse_seed(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(err) => {
            warn!("ignoring {}={:?}: {}", RANDOM_SEED_ENV, raw, err);
            None
        }
    }
}
