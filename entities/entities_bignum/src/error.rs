//! Engine Errors
//!
//! Error types raised by the native integer layer. Parsing failures and
//! mathematically undefined operations are reported as values instead of
//! aborting the process.

/// Errors raised while converting base-N text to and from a native integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Radix outside 2..=62 (0 is accepted only when parsing)
    InvalidRadix(u32),
    /// Radix given as a number that is not a non-negative 32-bit integer
    UnrepresentableRadix(String),
    /// No digits were found after the sign and prefix
    Empty,
    /// A character that is not a digit in the requested radix
    InvalidDigit {
        /// Offending character
        digit: char,
        /// Radix in effect when the character was read
        radix: u32,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidRadix(radix) => {
                write!(f, "Base should be between 2 and 62, inclusive (got {})", radix)
            }
            ParseError::UnrepresentableRadix(radix) => {
                write!(f, "Base should be between 2 and 62, inclusive (got {})", radix)
            }
            ParseError::Empty => write!(f, "No digits to parse"),
            ParseError::InvalidDigit { digit, radix } => {
                write!(f, "Invalid digit '{}' for base {}", digit, radix)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised by operations that are undefined for their operands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Division, modulus, sampling or modular power with a zero divisor
    DivisionByZero,
    /// No modular inverse exists (operands are not coprime)
    NoInverse,
    /// Square root of a negative value
    NegativeSquareRoot,
    /// Even root of a negative value
    EvenRootOfNegative,
    /// Root of degree zero
    ZerothRoot,
    /// Power or shift whose result would exceed the size limit
    ResultTooLarge,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::DivisionByZero => write!(f, "Division by zero"),
            EngineError::NoInverse => write!(f, "Modular inverse does not exist"),
            EngineError::NegativeSquareRoot => write!(f, "Square root of a negative number"),
            EngineError::EvenRootOfNegative => write!(f, "Even root of a negative number"),
            EngineError::ZerothRoot => write!(f, "Root of degree zero"),
            EngineError::ResultTooLarge => write!(f, "Result is too large to represent"),
        }
    }
}

impl std::error::Error for EngineError {}
