//! Integration tests for entities_bignum crate
//!
//! These tests exercise the native integer handle end to end: text round
//! trips, algebraic identities and the number-theoretic operations.

use entities_bignum::*;
use std::cmp::Ordering;

fn parse(text: &str) -> NativeInteger {
    NativeInteger::parse(text, 10).unwrap()
}

#[test]
fn test_decimal_round_trip() {
    for text in [
        "0",
        "1",
        "-1",
        "9223372036854775807",
        "-9223372036854775808",
        "340282366920938463463374607431768211456",
        "-123456789012345678901234567890",
    ] {
        assert_eq!(parse(text).to_string_radix(10).unwrap(), text);
    }
}

#[test]
fn test_canonical_formatting() {
    assert_eq!(parse("-0").to_string_radix(10).unwrap(), "0");
    assert_eq!(parse("000123").to_string_radix(10).unwrap(), "123");
}

#[test]
fn test_every_radix_round_trip() {
    let value = parse("-98765432109876543210987654321098765432109876543210");
    for radix in MIN_RADIX..=MAX_RADIX {
        let text = value.to_string_radix(radix).unwrap();
        let back = NativeInteger::parse(&text, radix).unwrap();
        assert_eq!(back.compare(&value), Ordering::Equal, "radix {}", radix);
    }
}

#[test]
fn test_radix_out_of_range() {
    let value = parse("5");
    assert_eq!(value.to_string_radix(1), Err(ParseError::InvalidRadix(1)));
    assert_eq!(value.to_string_radix(63), Err(ParseError::InvalidRadix(63)));
}

#[test]
fn test_addition_identities() {
    let a = parse("123456789123456789123456789");
    let b = parse("-987654321987654321");
    assert_eq!(a.plus(&b).compare(&b.plus(&a)), Ordering::Equal);
    assert_eq!(a.plus(&b).minus(&b).compare(&a), Ordering::Equal);
}

#[test]
fn test_pow_mod_zero_exponent() {
    let a = parse("918273645");
    let zero = NativeInteger::zero();
    for m in [2u64, 3, 10, 97, 1 << 40] {
        let modulus = NativeInteger::from_u64(m);
        let result = a.pow_mod(&zero, &modulus).unwrap();
        assert_eq!(result.compare_u64(1), Ordering::Equal);
    }
}

#[test]
fn test_primality_codes() {
    assert_eq!(parse("7").probable_prime(25).code(), 2);
    assert_eq!(parse("9").probable_prime(25).code(), 0);
    // 2^89 - 1 is prime
    let m89 = NativeInteger::u64_pow_u64(2, 89).unwrap().sub_u64(1);
    assert_eq!(m89.probable_prime(25), Primality::ProbablyPrime);
}

#[test]
fn test_next_prime() {
    assert_eq!(parse("10").next_prime().compare_u64(11), Ordering::Equal);
    let m89 = NativeInteger::u64_pow_u64(2, 89).unwrap().sub_u64(1);
    let before = m89.sub_u64(2);
    assert_eq!(before.next_prime().compare(&m89), Ordering::Equal);
}

#[test]
fn test_modular_inverse() {
    assert_eq!(parse("4").invert(&parse("8")), Err(EngineError::NoInverse));
    assert_eq!(parse("3").invert(&parse("7")).unwrap().compare_u64(5), Ordering::Equal);
}

#[test]
fn test_random_below_bounds() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    let mut rng = StdRng::seed_from_u64(42);
    let bound = parse("100");
    for _ in 0..10_000 {
        let sample = bound.random_below(&mut rng).unwrap();
        assert!(!sample.is_negative());
        assert_eq!(sample.compare(&bound), Ordering::Less);
    }
}
