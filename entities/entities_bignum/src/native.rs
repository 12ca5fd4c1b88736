//! Native Integer Handles
//!
//! Provides the owned arbitrary-precision integer that every host-visible
//! big integer wraps.
//!
//! This module uses the `malachite` crate as the arithmetic engine. Each
//! operation reads its operands and computes into a freshly allocated handle;
//! no operation mutates an operand in place. The engine value is released
//! when its handle is dropped.
//!
//! ## Conventions
//!
//! - Division (`div_floor`, `div_u64`, `rshift_floor`) rounds toward negative
//!   infinity.
//! - Modulus (`modulo`, `mod_u64`) is always non-negative and taken against
//!   the magnitude of the divisor.
//! - Modular power, inverse and sampling use the magnitude of the modulus or
//!   bound.
//! - Bitwise operations use two's complement semantics.
//! - Roots truncate toward zero.
//! - Powers and left shifts fail with [`EngineError::ResultTooLarge`] instead
//!   of allocating more than [`MAX_RESULT_BITS`] bits.

use std::cmp::Ordering;

use malachite::base::num::arithmetic::traits::{
    FloorRoot, FloorSqrt, Gcd, ModInverse, ModPow, Pow, UnsignedAbs,
};
use malachite::base::num::logic::traits::SignificantBits;
use malachite::{Integer, Natural};
use rand::RngCore;

use crate::error::{EngineError, ParseError};
use crate::primes::{self, Primality};
use crate::radix;
use crate::sampling;

/// Owned native integer handle
///
/// A handle has exactly one owner. Every constructor and every operation
/// allocates a new engine value, so two handles never share storage.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct NativeInteger {
    value: Integer,
}

impl NativeInteger {
    /// Create a handle holding zero
    pub fn zero() -> Self {
        Self::from_integer(Integer::from(0))
    }

    /// Create a handle from a signed machine integer
    pub fn from_i64(value: i64) -> Self {
        Self::from_integer(Integer::from(value))
    }

    /// Create a handle from an unsigned machine integer
    pub fn from_u64(value: u64) -> Self {
        Self::from_integer(Integer::from(value))
    }

    /// Take ownership of an engine value
    pub fn from_integer(value: Integer) -> Self {
        Self { value }
    }

    /// Parse base-N text
    ///
    /// # Arguments
    ///
    /// * `source` - Text to parse
    /// * `radix` - 2..=62, or 0 to detect the radix from a `0x`/`0b`/`0` prefix
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for an invalid radix or malformed digits.
    pub fn parse(source: &str, radix: u32) -> Result<Self, ParseError> {
        radix::parse(source, radix).map(Self::from_integer)
    }

    /// Format as base-N text
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidRadix`] when `radix` is outside 2..=62.
    pub fn to_string_radix(&self, radix: u32) -> Result<String, ParseError> {
        radix::format(&self.value, radix)
    }

    /// Borrow the engine value
    pub fn as_integer(&self) -> &Integer {
        &self.value
    }

    /// Check whether the value is negative
    pub fn is_negative(&self) -> bool {
        self.value < 0
    }

    /// Check whether the value is zero
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    /// `self + other`
    pub fn plus(&self, other: &Self) -> Self {
        Self::from_integer(&self.value + &other.value)
    }

    /// `self - other`
    pub fn minus(&self, other: &Self) -> Self {
        Self::from_integer(&self.value - &other.value)
    }

    /// `self * other`
    pub fn times(&self, other: &Self) -> Self {
        Self::from_integer(&self.value * &other.value)
    }

    /// `floor(self / other)`
    pub fn div_floor(&self, other: &Self) -> Result<Self, EngineError> {
        floor_div(&self.value, &other.value).map(Self::from_integer)
    }

    /// `self + x`
    pub fn add_u64(&self, x: u64) -> Self {
        Self::from_integer(&self.value + Integer::from(x))
    }

    /// `self - x`
    pub fn sub_u64(&self, x: u64) -> Self {
        Self::from_integer(&self.value - Integer::from(x))
    }

    /// `self * x`
    pub fn mul_u64(&self, x: u64) -> Self {
        Self::from_integer(&self.value * Integer::from(x))
    }

    /// `floor(self / x)`
    pub fn div_u64(&self, x: u64) -> Result<Self, EngineError> {
        floor_div(&self.value, &Integer::from(x)).map(Self::from_integer)
    }

    /// `self * 2^bits`
    pub fn lshift(&self, bits: u64) -> Result<Self, EngineError> {
        if self.value == 0 {
            return Ok(Self::zero());
        }
        check_result_bits(self.value.significant_bits().saturating_add(bits))?;
        Ok(Self::from_integer(&self.value << bits))
    }

    /// `floor(self / 2^bits)`
    pub fn rshift_floor(&self, bits: u64) -> Self {
        Self::from_integer(&self.value >> bits)
    }

    /// `|self|`
    pub fn abs(&self) -> Self {
        Self::from_integer(Integer::from(magnitude_of(&self.value)))
    }

    /// `-self`
    pub fn negate(&self) -> Self {
        Self::from_integer(-&self.value)
    }

    /// `self mod |other|`, in `[0, |other|)`
    pub fn modulo(&self, other: &Self) -> Result<Self, EngineError> {
        non_negative_mod(&self.value, &magnitude_of(&other.value)).map(Self::from_integer)
    }

    /// `self mod x`, in `[0, x)`
    pub fn mod_u64(&self, x: u64) -> Result<Self, EngineError> {
        non_negative_mod(&self.value, &Natural::from(x)).map(Self::from_integer)
    }

    // ------------------------------------------------------------------
    // Powers
    // ------------------------------------------------------------------

    /// `self^exponent mod |modulus|`
    ///
    /// A negative exponent raises the modular inverse instead.
    ///
    /// # Errors
    ///
    /// * [`EngineError::DivisionByZero`] - `modulus` is zero
    /// * [`EngineError::NoInverse`] - negative exponent and no inverse exists
    pub fn pow_mod(&self, exponent: &Self, modulus: &Self) -> Result<Self, EngineError> {
        let modulus = magnitude_of(&modulus.value);
        let mut base = reduce(&self.value, &modulus)?;
        if exponent.is_negative() {
            base = invert_reduced(base, &modulus)?;
        }
        Ok(Self::from_integer(Integer::from(power_mod(
            base,
            magnitude_of(&exponent.value),
            modulus,
        ))))
    }

    /// `self^x mod |modulus|`
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DivisionByZero`] when `modulus` is zero.
    pub fn pow_mod_u64(&self, x: u64, modulus: &Self) -> Result<Self, EngineError> {
        let modulus = magnitude_of(&modulus.value);
        let base = reduce(&self.value, &modulus)?;
        Ok(Self::from_integer(Integer::from(power_mod(
            base,
            Natural::from(x),
            modulus,
        ))))
    }

    /// `self^x`
    pub fn pow_u64(&self, x: u64) -> Result<Self, EngineError> {
        check_power_bits(self.value.significant_bits(), x)?;
        Ok(Self::from_integer(self.value.clone().pow(x)))
    }

    /// `base^exponent` for machine integers
    pub fn u64_pow_u64(base: u64, exponent: u64) -> Result<Self, EngineError> {
        check_power_bits(base.significant_bits(), exponent)?;
        Ok(Self::from_integer(Integer::from(Natural::from(base).pow(exponent))))
    }

    // ------------------------------------------------------------------
    // Number theory
    // ------------------------------------------------------------------

    /// Uniform sample in `[0, |self|)`
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DivisionByZero`] when `self` is zero.
    pub fn random_below<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<Self, EngineError> {
        sampling::uniform_below(rng, &magnitude_of(&self.value))
            .map(|sample| Self::from_integer(Integer::from(sample)))
            .ok_or(EngineError::DivisionByZero)
    }

    /// Probable-primality test of `|self|` with `reps` rounds
    pub fn probable_prime(&self, reps: u32) -> Primality {
        primes::probable_prime(&magnitude_of(&self.value), reps)
    }

    /// Smallest prime strictly greater than `self`
    pub fn next_prime(&self) -> Self {
        if self.is_negative() {
            return Self::from_u64(2);
        }
        Self::from_integer(Integer::from(primes::next_prime(&magnitude_of(&self.value))))
    }

    /// `self^-1 mod |modulus|`, in `[0, |modulus|)`
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoInverse`] when `self` and `modulus` are not
    /// coprime or `modulus` is zero.
    pub fn invert(&self, modulus: &Self) -> Result<Self, EngineError> {
        let modulus = magnitude_of(&modulus.value);
        let base = reduce(&self.value, &modulus).map_err(|_| EngineError::NoInverse)?;
        invert_reduced(base, &modulus).map(|inverse| Self::from_integer(Integer::from(inverse)))
    }

    /// `gcd(self, other)`, never negative
    pub fn gcd(&self, other: &Self) -> Self {
        let gcd = magnitude_of(&self.value).gcd(magnitude_of(&other.value));
        Self::from_integer(Integer::from(gcd))
    }

    /// Floor square root
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NegativeSquareRoot`] for negative values.
    pub fn sqrt(&self) -> Result<Self, EngineError> {
        if self.is_negative() {
            return Err(EngineError::NegativeSquareRoot);
        }
        Ok(Self::from_integer(Integer::from(
            magnitude_of(&self.value).floor_sqrt(),
        )))
    }

    /// Integer `degree`-th root, truncated toward zero
    ///
    /// # Errors
    ///
    /// * [`EngineError::ZerothRoot`] - `degree` is zero
    /// * [`EngineError::EvenRootOfNegative`] - even degree of a negative value
    pub fn root(&self, degree: u64) -> Result<Self, EngineError> {
        if degree == 0 {
            return Err(EngineError::ZerothRoot);
        }
        let negative = self.is_negative();
        if negative && degree % 2 == 0 {
            return Err(EngineError::EvenRootOfNegative);
        }
        let root = Integer::from(magnitude_of(&self.value).floor_root(degree));
        Ok(Self::from_integer(if negative { -root } else { root }))
    }

    /// Number of bits in `|self|`; zero counts as one bit
    pub fn bit_length(&self) -> u64 {
        self.value.significant_bits().max(1)
    }

    // ------------------------------------------------------------------
    // Comparison and bitwise
    // ------------------------------------------------------------------

    /// Compare with another handle
    pub fn compare(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }

    /// Compare with a signed machine integer
    pub fn compare_i64(&self, x: i64) -> Ordering {
        self.value.cmp(&Integer::from(x))
    }

    /// Compare with an unsigned machine integer
    pub fn compare_u64(&self, x: u64) -> Ordering {
        self.value.cmp(&Integer::from(x))
    }

    /// Bitwise AND
    pub fn bitand(&self, other: &Self) -> Self {
        Self::from_integer(&self.value & &other.value)
    }

    /// Bitwise inclusive OR
    pub fn bitor(&self, other: &Self) -> Self {
        Self::from_integer(&self.value | &other.value)
    }

    /// Bitwise exclusive OR
    pub fn bitxor(&self, other: &Self) -> Self {
        Self::from_integer(&self.value ^ &other.value)
    }
}

impl std::fmt::Display for NativeInteger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Largest result, in bits, that a power or left shift may produce
pub const MAX_RESULT_BITS: u64 = 1 << 32;

fn check_result_bits(bits: u64) -> Result<(), EngineError> {
    if bits > MAX_RESULT_BITS {
        Err(EngineError::ResultTooLarge)
    } else {
        Ok(())
    }
}

/// `base^exponent` has at least `(base_bits - 1) * exponent + 1` bits
fn check_power_bits(base_bits: u64, exponent: u64) -> Result<(), EngineError> {
    if base_bits <= 1 || exponent == 0 {
        return Ok(());
    }
    check_result_bits((base_bits - 1).saturating_mul(exponent).saturating_add(1))
}

/// Magnitude of an engine integer as a natural number
pub(crate) fn magnitude_of(value: &Integer) -> Natural {
    value.clone().unsigned_abs()
}

fn floor_div(dividend: &Integer, divisor: &Integer) -> Result<Integer, EngineError> {
    if *divisor == 0 {
        return Err(EngineError::DivisionByZero);
    }
    let quotient = dividend / divisor;
    let remainder = dividend % divisor;
    // Truncated quotient is one too high when the signs differ
    if remainder != 0 && ((remainder < 0) != (*divisor < 0)) {
        Ok(quotient - Integer::from(1))
    } else {
        Ok(quotient)
    }
}

fn non_negative_mod(value: &Integer, modulus: &Natural) -> Result<Integer, EngineError> {
    reduce(value, modulus).map(Integer::from)
}

/// Reduce `value` into `[0, modulus)`
fn reduce(value: &Integer, modulus: &Natural) -> Result<Natural, EngineError> {
    if *modulus == 0u32 {
        return Err(EngineError::DivisionByZero);
    }
    let modulus = Integer::from(modulus.clone());
    let mut remainder = value % &modulus;
    if remainder < 0 {
        remainder += modulus;
    }
    Ok(remainder.unsigned_abs())
}

/// Modular inverse of a value already reduced into `[0, modulus)`
fn invert_reduced(base: Natural, modulus: &Natural) -> Result<Natural, EngineError> {
    if *modulus == 1u32 {
        return Ok(Natural::from(0u32));
    }
    if base == 0u32 {
        return Err(EngineError::NoInverse);
    }
    base.mod_inverse(modulus.clone()).ok_or(EngineError::NoInverse)
}

/// `base^exponent mod modulus` with `base` already reduced
fn power_mod(base: Natural, exponent: Natural, modulus: Natural) -> Natural {
    if modulus == 1u32 {
        return Natural::from(0u32);
    }
    base.mod_pow(exponent, modulus)
}
