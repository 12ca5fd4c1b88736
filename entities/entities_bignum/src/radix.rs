//! Radix Text Codec
//!
//! Converts native integers to and from base-N text for bases 2 through 62.
//!
//! ## Alphabet
//!
//! - Bases 2..=36 write `0-9a-z` and read letters case-insensitively.
//! - Bases 37..=62 use `0-9`, then `A-Z` for 10..=35, then `a-z` for 36..=61.
//! - Negative values carry a leading `-`. Zero is always written as `0`.
//!
//! ## Parsing
//!
//! Leading whitespace is skipped, an optional `-` is read, and whitespace
//! between digits is ignored. Radix 0 selects the base from the prefix:
//! `0x`/`0X` is hexadecimal, `0b`/`0B` is binary, a lone leading `0` is octal
//! and anything else is decimal.
//!
//! Digits are accumulated in machine-word chunks so each engine
//! multiplication consumes as many digits as fit in a `u64`.

use malachite::{Integer, Natural};

use crate::error::ParseError;
use crate::native::magnitude_of;

/// Smallest supported radix
pub const MIN_RADIX: u32 = 2;
/// Largest supported radix
pub const MAX_RADIX: u32 = 62;

const LOWER_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MIXED_DIGITS: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Check whether `radix` is a supported output radix
pub fn is_valid_radix(radix: u32) -> bool {
    (MIN_RADIX..=MAX_RADIX).contains(&radix)
}

/// Parse base-N text into an integer
///
/// # Arguments
///
/// * `source` - Text to parse
/// * `radix` - 2..=62, or 0 to detect the radix from a prefix
///
/// # Returns
///
/// * `Ok(Integer)` - Parsed value
/// * `Err(ParseError)` - Invalid radix, no digits, or an invalid digit
pub fn parse(source: &str, radix: u32) -> Result<Integer, ParseError> {
    if radix != 0 && !is_valid_radix(radix) {
        return Err(ParseError::InvalidRadix(radix));
    }

    let trimmed = source.trim_start();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let (radix, digits) = if radix == 0 {
        detect_radix(body)
    } else {
        (radix, body)
    };

    let value = Integer::from(parse_magnitude(digits, radix)?);
    Ok(if negative { -value } else { value })
}

/// Format an integer as base-N text
///
/// # Arguments
///
/// * `value` - Integer to format
/// * `radix` - Output radix, 2..=62
///
/// # Returns
///
/// * `Ok(String)` - Canonical text (no leading zeros, `0` for zero)
/// * `Err(ParseError::InvalidRadix)` - Radix outside 2..=62
pub fn format(value: &Integer, radix: u32) -> Result<String, ParseError> {
    if !is_valid_radix(radix) {
        return Err(ParseError::InvalidRadix(radix));
    }
    let alphabet: &[u8] = if radix <= 36 { LOWER_DIGITS } else { MIXED_DIGITS };

    let negative = *value < 0;
    let mut magnitude = magnitude_of(value);
    if magnitude == 0u32 {
        return Ok("0".to_string());
    }

    let (chunk_len, chunk_power) = chunk_size(radix);
    let divisor = Natural::from(chunk_power);

    // Least significant chunk first
    let mut chunks = Vec::new();
    while magnitude != 0u32 {
        let remainder = &magnitude % &divisor;
        magnitude /= &divisor;
        // Remainder is below radix^chunk_len, so it always fits in u64
        chunks.push(u64::try_from(&remainder).unwrap_or(0));
    }

    let mut out = String::with_capacity(chunks.len() * chunk_len + 1);
    if negative {
        out.push('-');
    }
    let mut digits = Vec::with_capacity(chunk_len);
    for (i, chunk) in chunks.iter().rev().enumerate() {
        digits.clear();
        let mut rest = *chunk;
        while rest > 0 {
            digits.push(alphabet[(rest % radix as u64) as usize]);
            rest /= radix as u64;
        }
        if i > 0 {
            digits.resize(chunk_len, b'0');
        }
        out.extend(digits.iter().rev().map(|&b| b as char));
    }
    Ok(out)
}

fn detect_radix(body: &str) -> (u32, &str) {
    if let Some(rest) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, rest)
    } else if let Some(rest) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        (2, rest)
    } else if body.starts_with('0') {
        (8, body)
    } else {
        (10, body)
    }
}

fn digit_value(c: char, radix: u32) -> Option<u32> {
    let value = match c {
        '0'..='9' => c as u32 - '0' as u32,
        'A'..='Z' => c as u32 - 'A' as u32 + 10,
        'a'..='z' if radix <= 36 => c as u32 - 'a' as u32 + 10,
        'a'..='z' => c as u32 - 'a' as u32 + 36,
        _ => return None,
    };
    (value < radix).then_some(value)
}

/// Largest digit count `k` with `radix^k <= u64::MAX`, and `radix^k`
fn chunk_size(radix: u32) -> (usize, u64) {
    let radix = radix as u64;
    let mut len = 1;
    let mut power = radix;
    while let Some(next) = power.checked_mul(radix) {
        power = next;
        len += 1;
    }
    (len, power)
}

fn parse_magnitude(digits: &str, radix: u32) -> Result<Natural, ParseError> {
    // The first digit must follow the sign/prefix directly
    match digits.chars().next() {
        None => return Err(ParseError::Empty),
        Some(c) if c.is_whitespace() => {
            return Err(ParseError::InvalidDigit { digit: c, radix })
        }
        Some(_) => {}
    }

    let (chunk_len, chunk_power) = chunk_size(radix);
    let mut magnitude = Natural::from(0u32);
    let mut chunk: u64 = 0;
    let mut filled = 0usize;

    for c in digits.chars().filter(|c| !c.is_whitespace()) {
        let digit = digit_value(c, radix).ok_or(ParseError::InvalidDigit { digit: c, radix })?;
        chunk = chunk * radix as u64 + digit as u64;
        filled += 1;
        if filled == chunk_len {
            magnitude = magnitude * Natural::from(chunk_power) + Natural::from(chunk);
            chunk = 0;
            filled = 0;
        }
    }
    if filled > 0 {
        let scale = (radix as u64).pow(filled as u32);
        magnitude = magnitude * Natural::from(scale) + Natural::from(chunk);
    }
    Ok(magnitude)
}
